//! One method per server action.
//!
//! Every method assembles a [`ParameterSet`], hands it to the
//! [`Dispatcher`], and maps the raw response onto an [`Outcome`]. Listing
//! methods additionally zip each data line against a fixed field-name
//! table.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use sgadmin_config::Config;
use sgadmin_protocol::{NamedRecord, RawResponse, format_date, parse_typed_lines};
use time::Date;
use tracing::debug;

use crate::dispatch::Dispatcher;
use crate::error::ClientError;
use crate::params::ParameterSet;
use crate::request_url::{Action, action_url};
use crate::settings::ClientSettings;
use crate::transport::{HttpTransport, Transport};

mod access;
mod catalogue;
mod customers;
mod logs;
mod replace;

pub use access::AccessTarget;
pub use catalogue::{DOCUMENT_FIELDS, Document, PUBLICATION_FIELDS, Publication};
pub use customers::{CUSTOMER_FIELDS, Customer, CustomerChanges, NewCustomer};
pub use logs::{ACCESS_LOG_FIELDS, AccessLogEntry, AccessLogQuery};

/// The result of a call that reached the server.
///
/// `Failure` is not an error: the server reports expected conditions,
/// such as an unknown customer, through the status tag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    /// The status tag was `OK`.
    Success(T),
    /// The server replied with another status tag.
    Failure(ProtocolFailure),
}

impl<T> Outcome<T> {
    /// Interprets a response, handing the data lines of a successful one
    /// to `on_success`.
    pub(crate) fn from_response(
        response: &RawResponse,
        on_success: impl FnOnce(&[&str]) -> T,
    ) -> Self {
        let split = response.split();
        if split.is_success() {
            Self::Success(on_success(&split.data))
        } else {
            Self::Failure(ProtocolFailure::new(split.status, split.data_owned()))
        }
    }

    /// Whether the server reported success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The success value, discarding a failure.
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// The failure, if the server reported one.
    #[must_use]
    pub const fn failure(&self) -> Option<&ProtocolFailure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }

    /// Transforms the success value.
    pub fn map<U>(self, transform: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(transform(value)),
            Self::Failure(failure) => Outcome::Failure(failure),
        }
    }

    /// Converts into a `Result` for callers that treat failure as an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns the [`ProtocolFailure`] when the server did not report
    /// success.
    pub fn into_result(self) -> Result<T, ProtocolFailure> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(failure) => Err(failure),
        }
    }
}

/// A non-`OK` status tag and the data lines that came with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolFailure {
    status: String,
    detail: Vec<String>,
}

impl ProtocolFailure {
    /// Creates a failure from its parts.
    #[must_use]
    pub fn new(status: impl Into<String>, detail: Vec<String>) -> Self {
        Self {
            status: status.into(),
            detail,
        }
    }

    /// The status tag, such as `Failed`.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Data lines the server sent with the status, verbatim.
    #[must_use]
    pub fn detail(&self) -> &[String] {
        &self.detail
    }
}

impl fmt::Display for ProtocolFailure {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.status.is_empty() {
            formatter.write_str("server returned an empty response")?;
        } else {
            write!(formatter, "server replied '{}'", self.status)?;
        }
        if !self.detail.is_empty() {
            write!(formatter, ": {}", self.detail.join("; "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolFailure {}

/// Typed access to the administration server.
///
/// Calls block until every physical request has completed or failed.
/// Apart from [`override_timeout`](Self::override_timeout) the client is
/// immutable, so a shared reference may be used from several threads when
/// the transport allows it.
#[derive(Debug, Clone)]
pub struct AdminClient<T = HttpTransport> {
    settings: ClientSettings,
    dispatcher: Dispatcher<T>,
}

impl AdminClient<HttpTransport> {
    /// Builds a client over HTTP from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the configuration is unusable.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let settings = ClientSettings::from_config(config)?;
        Ok(Self::new(settings, HttpTransport::new()))
    }
}

impl<T> AdminClient<T> {
    /// Creates a client that sends requests through `transport`.
    #[must_use]
    pub const fn new(settings: ClientSettings, transport: T) -> Self {
        let dispatcher = Dispatcher::new(transport, settings.chunk_size(), settings.timeout());
        Self {
            settings,
            dispatcher,
        }
    }

    /// Settings the client was built with.
    #[must_use]
    pub const fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// The dispatcher that carries every call.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher<T> {
        &self.dispatcher
    }

    /// Replaces the per-request deadline for subsequent calls.
    pub fn override_timeout(&mut self, timeout: Duration) {
        debug!(timeout_secs = timeout.as_secs(), "overriding request timeout");
        self.settings.set_timeout(timeout);
        self.dispatcher.set_timeout(timeout);
    }
}

impl<T: Transport> AdminClient<T> {
    fn call(&self, action: Action, parameters: &ParameterSet) -> Result<RawResponse, ClientError> {
        let url = action_url(&self.settings, action, &[]);
        debug!(action = action.as_str(), parameters = parameters.len(), "calling server");
        Ok(self.dispatcher.dispatch(&url, parameters)?)
    }

    /// Sends an action whose success carries no data.
    fn command(
        &self,
        action: Action,
        parameters: &ParameterSet,
    ) -> Result<Outcome<()>, ClientError> {
        let response = self.call(action, parameters)?;
        Ok(Outcome::from_response(&response, |_| ()))
    }

    /// Sends an action that answers with one record per data line.
    fn listing<R>(
        &self,
        action: Action,
        parameters: &ParameterSet,
        names: &[&'static str],
        build: impl Fn(&NamedRecord) -> R,
    ) -> Result<Outcome<Vec<R>>, ClientError> {
        let response = self.call(action, parameters)?;
        Ok(Outcome::from_response(&response, |data| {
            parse_typed_lines(data)
                .iter()
                .map(|record| build(&record.zip(names)))
                .collect()
        }))
    }
}

fn date_parameter(parameter: &'static str, date: Date) -> Result<String, ClientError> {
    format_date(date).map_err(|source| ClientError::DateFormat {
        parameter,
        source: Arc::new(source),
    })
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
