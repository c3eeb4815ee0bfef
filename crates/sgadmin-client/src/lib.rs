//! Client adapter for the licensing administration server.
//!
//! The server exposes bulk commands over HTTP POST but rejects requests
//! that carry too many identifiers, and it answers in a bespoke line format
//! (see [`sgadmin_protocol`]). This crate hides both quirks:
//!
//! - [`Dispatcher`] splits oversized identifier lists across several
//!   physical requests, sequentially, stopping at the first response whose
//!   status tag is not `OK`.
//! - [`AdminClient`] offers one method per server action and turns each
//!   response into an [`Outcome`]: typed records on success, or the
//!   server's [`ProtocolFailure`] text otherwise.
//!
//! Only transport problems are errors. A "Failed" status is a normal
//! return value because the server uses it for expected conditions such as
//! unknown customers.
//!
//! # Example
//!
//! ```no_run
//! use sgadmin_client::{AdminClient, Outcome};
//! use sgadmin_config::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     server: "https://licences.example.com/api/".into(),
//!     username: "admin".into(),
//!     password: "secret".into(),
//!     ..Config::default()
//! };
//! let client = AdminClient::from_config(&config)?;
//! let customers: Vec<String> = (1..=250).map(|id| id.to_string()).collect();
//! let documents = vec![String::from("17")];
//! // 250 customers at the default chunk size become three requests.
//! match client.grant_document_access(&customers, &documents)? {
//!     Outcome::Success(()) => {}
//!     Outcome::Failure(failure) => eprintln!("server refused: {failure}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod admin;
mod dispatch;
mod error;
mod params;
mod request_url;
mod settings;
pub mod transport;

pub use admin::{
    ACCESS_LOG_FIELDS, AccessLogEntry, AccessLogQuery, AccessTarget, AdminClient,
    CUSTOMER_FIELDS, Customer, CustomerChanges, DOCUMENT_FIELDS, Document, NewCustomer, Outcome,
    PUBLICATION_FIELDS, ProtocolFailure, Publication,
};
pub use dispatch::{ChunkPlan, ChunkedParameter, Dispatcher, PlannedRequests};
pub use error::{ClientError, TransportError};
pub use params::{CHUNKABLE_PARAMETERS, ParameterSet};
pub use request_url::{Action, action_url};
pub use settings::ClientSettings;
pub use transport::{HttpTransport, Transport};

#[cfg(test)]
mod tests;
