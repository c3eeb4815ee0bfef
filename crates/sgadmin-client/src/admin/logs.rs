//! Document access history.

use serde::Serialize;
use sgadmin_protocol::NamedRecord;
use time::{Date, OffsetDateTime};

use super::{AdminClient, Outcome, date_parameter};
use crate::error::ClientError;
use crate::params::ParameterSet;
use crate::request_url::Action;
use crate::transport::Transport;

/// Column order of a `listAccessLog` data line.
pub const ACCESS_LOG_FIELDS: [&str; 5] =
    ["customer_id", "document_id", "accessed_at", "action", "client"];

/// One recorded access event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessLogEntry {
    /// Customer who acted.
    pub customer_id: String,
    /// Document acted on.
    pub document_id: String,
    /// When it happened, in server time.
    pub accessed_at: Option<OffsetDateTime>,
    /// What happened, such as `opened` or `printed`.
    pub action: String,
    /// Reader application that reported the event.
    pub client: String,
}

impl AccessLogEntry {
    /// Builds an entry from a zipped data line.
    #[must_use]
    pub fn from_record(record: &NamedRecord) -> Self {
        Self {
            customer_id: record.text("customer_id").unwrap_or_default(),
            document_id: record.text("document_id").unwrap_or_default(),
            accessed_at: record.timestamp("accessed_at"),
            action: record.text("action").unwrap_or_default(),
            client: record.text("client").unwrap_or_default(),
        }
    }
}

/// Filters for [`AdminClient::list_access_log`]. Empty filters match
/// everything.
///
/// Keep identifier filters within the chunk size: a split listing only
/// returns the entries of its last request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessLogQuery {
    /// Restrict to these customers.
    pub customers: Vec<String>,
    /// Restrict to these documents.
    pub documents: Vec<String>,
    /// Earliest day to include.
    pub since: Option<Date>,
    /// Latest day to include.
    pub until: Option<Date>,
}

impl AccessLogQuery {
    fn to_parameters(&self) -> Result<ParameterSet, ClientError> {
        let since = self
            .since
            .map(|date| date_parameter("since", date))
            .transpose()?;
        let until = self
            .until
            .map(|date| date_parameter("until", date))
            .transpose()?;
        Ok(ParameterSet::new()
            .with_ids("custid", &self.customers)
            .with_ids("docid", &self.documents)
            .with_optional("since", since)
            .with_optional("until", until))
    }
}

impl<T: Transport> AdminClient<T> {
    /// Reads access events matching `query`.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when a date cannot be rendered or a
    /// request fails below the protocol.
    pub fn list_access_log(
        &self,
        query: &AccessLogQuery,
    ) -> Result<Outcome<Vec<AccessLogEntry>>, ClientError> {
        let parameters = query.to_parameters()?;
        self.listing(
            Action::ListAccessLog,
            &parameters,
            &ACCESS_LOG_FIELDS,
            AccessLogEntry::from_record,
        )
    }
}
