//! Customer accounts.

use serde::Serialize;
use sgadmin_protocol::{NamedRecord, parse_typed_lines};
use time::Date;

use super::{AdminClient, Outcome, date_parameter, yes_no};
use crate::error::ClientError;
use crate::params::ParameterSet;
use crate::request_url::Action;
use crate::transport::Transport;

/// Column order of a `listCustomers` data line. Older servers omit the
/// trailing `web_viewer` column.
pub const CUSTOMER_FIELDS: [&str; 11] = [
    "id",
    "name",
    "email",
    "company",
    "enabled",
    "start_date",
    "expiry_date",
    "licenses",
    "documents",
    "publications",
    "web_viewer",
];

/// A customer account as listed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    /// Server-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact address the licence is mailed to.
    pub email: String,
    /// Organisation, possibly empty.
    pub company: String,
    /// Whether the account may open documents.
    pub enabled: bool,
    /// First day of the licence.
    pub start_date: Option<Date>,
    /// Last day of the licence.
    pub expiry_date: Option<Date>,
    /// Number of devices the licence covers.
    pub licenses: Option<u32>,
    /// Documents granted directly.
    pub documents: Vec<String>,
    /// Publications granted.
    pub publications: Vec<String>,
    /// Browser access flag; absent when the server omits the column.
    pub web_viewer: Option<bool>,
}

impl Customer {
    /// Builds a customer from a zipped data line.
    #[must_use]
    pub fn from_record(record: &NamedRecord) -> Self {
        Self {
            id: record.text("id").unwrap_or_default(),
            name: record.text("name").unwrap_or_default(),
            email: record.text("email").unwrap_or_default(),
            company: record.text("company").unwrap_or_default(),
            enabled: record.boolean("enabled").unwrap_or(false),
            start_date: record.date("start_date"),
            expiry_date: record.date("expiry_date"),
            licenses: record
                .text("licenses")
                .and_then(|count| count.trim().parse().ok()),
            documents: record.id_list("documents"),
            publications: record.id_list("publications"),
            web_viewer: record.boolean("web_viewer"),
        }
    }
}

/// Details for a new customer account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Organisation.
    pub company: Option<String>,
    /// Number of devices the licence covers.
    pub licenses: u32,
    /// First day of the licence; the server uses today when absent.
    pub start_date: Option<Date>,
    /// Last day of the licence; open-ended when absent.
    pub expiry_date: Option<Date>,
    /// Whether browser access is allowed.
    pub web_viewer: bool,
}

impl NewCustomer {
    /// A single-licence customer with no dates and no browser access.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            company: None,
            licenses: 1,
            start_date: None,
            expiry_date: None,
            web_viewer: false,
        }
    }

    fn to_parameters(&self) -> Result<ParameterSet, ClientError> {
        Ok(ParameterSet::new()
            .with("name", self.name.as_str())
            .with("email", self.email.as_str())
            .with_optional("company", self.company.as_deref())
            .with("licenses", self.licenses.to_string())
            .with_optional("startdate", optional_date("startdate", self.start_date)?)
            .with_optional("expirydate", optional_date("expirydate", self.expiry_date)?)
            .with("webviewer", yes_no(self.web_viewer)))
    }
}

/// Fields to change on an existing customer. Unset fields are left as
/// they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerChanges {
    /// New display name.
    pub name: Option<String>,
    /// New contact address.
    pub email: Option<String>,
    /// New organisation.
    pub company: Option<String>,
    /// New device count.
    pub licenses: Option<u32>,
    /// New first day.
    pub start_date: Option<Date>,
    /// New last day.
    pub expiry_date: Option<Date>,
    /// New browser access flag.
    pub web_viewer: Option<bool>,
}

impl CustomerChanges {
    /// Whether no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn to_parameters(&self, id: &str) -> Result<ParameterSet, ClientError> {
        Ok(ParameterSet::new()
            .with("custid", id)
            .with_optional("name", self.name.as_deref())
            .with_optional("email", self.email.as_deref())
            .with_optional("company", self.company.as_deref())
            .with_optional("licenses", self.licenses.map(|count| count.to_string()))
            .with_optional("startdate", optional_date("startdate", self.start_date)?)
            .with_optional("expirydate", optional_date("expirydate", self.expiry_date)?)
            .with_optional("webviewer", self.web_viewer.map(yes_no)))
    }
}

fn optional_date(
    parameter: &'static str,
    date: Option<Date>,
) -> Result<Option<String>, ClientError> {
    date.map(|value| date_parameter(parameter, value)).transpose()
}

impl<T: Transport> AdminClient<T> {
    /// Lists customers, restricted to `ids` unless it is empty.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when a request fails below the protocol.
    pub fn list_customers<S: AsRef<str>>(
        &self,
        ids: &[S],
    ) -> Result<Outcome<Vec<Customer>>, ClientError> {
        let parameters = ParameterSet::new().with_ids("custid", ids);
        self.listing(
            Action::ListCustomers,
            &parameters,
            &CUSTOMER_FIELDS,
            Customer::from_record,
        )
    }

    /// Registers a customer and returns the identifier the server
    /// assigned, when it reports one.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when a date cannot be rendered or a
    /// request fails below the protocol.
    pub fn add_customer(
        &self,
        customer: &NewCustomer,
    ) -> Result<Outcome<Option<String>>, ClientError> {
        let parameters = customer.to_parameters()?;
        let response = self.call(Action::AddCustomer, &parameters)?;
        Ok(Outcome::from_response(&response, |data| {
            parse_typed_lines(data)
                .first()
                .and_then(|record| record.get(0))
                .map(ToString::to_string)
        }))
    }

    /// Changes an existing customer.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when a date cannot be rendered or a
    /// request fails below the protocol.
    pub fn update_customer(
        &self,
        id: &str,
        changes: &CustomerChanges,
    ) -> Result<Outcome<()>, ClientError> {
        let parameters = changes.to_parameters(id)?;
        self.command(Action::UpdateCustomer, &parameters)
    }

    /// Deletes customers.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when a request fails below the protocol.
    pub fn delete_customers<S: AsRef<str>>(&self, ids: &[S]) -> Result<Outcome<()>, ClientError> {
        let parameters = ParameterSet::new().with_ids("custid", ids);
        self.command(Action::DeleteCustomer, &parameters)
    }

    /// Activates or suspends customers.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when a request fails below the protocol.
    pub fn set_customers_enabled<S: AsRef<str>>(
        &self,
        ids: &[S],
        enabled: bool,
    ) -> Result<Outcome<()>, ClientError> {
        let action = if enabled {
            Action::ActivateCustomer
        } else {
            Action::SuspendCustomer
        };
        let parameters = ParameterSet::new().with_ids("custid", ids);
        self.command(action, &parameters)
    }

    /// Asks the server to email a customer their licence again.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when a request fails below the protocol.
    pub fn resend_licence(&self, id: &str) -> Result<Outcome<()>, ClientError> {
        let parameters = ParameterSet::new().with("custid", id);
        self.command(Action::ResendLicense, &parameters)
    }
}
