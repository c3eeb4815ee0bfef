//! Errors surfaced by the client.
//!
//! Only failures that prevent a response from being read at all are
//! errors. A response whose status tag reports failure is returned as
//! [`Outcome::Failure`](crate::Outcome::Failure) instead.

use std::sync::Arc;

use thiserror::Error;

use sgadmin_config::ConfigError;

/// The HTTP exchange did not produce a response body.
///
/// Endpoints are reported without their query string so credentials never
/// reach logs or error messages.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The request exceeded its deadline.
    #[error("request to {endpoint} timed out after {timeout_secs}s")]
    Timeout {
        /// Redacted endpoint.
        endpoint: String,
        /// Deadline that was exceeded.
        timeout_secs: u64,
    },
    /// The server answered with a non-2xx status.
    #[error("server at {endpoint} answered with HTTP status {status}")]
    Status {
        /// Redacted endpoint.
        endpoint: String,
        /// HTTP status code.
        status: u16,
    },
    /// The connection could not be established or broke mid-request.
    #[error("failed to reach {endpoint}: {source}")]
    Connection {
        /// Redacted endpoint.
        endpoint: String,
        /// Underlying HTTP client error.
        #[source]
        source: Arc<ureq::Error>,
    },
    /// The response body could not be read as text.
    #[error("failed to read response body from {endpoint}: {source}")]
    Body {
        /// Redacted endpoint.
        endpoint: String,
        /// Underlying HTTP client error.
        #[source]
        source: Arc<ureq::Error>,
    },
}

/// Errors returned by [`AdminClient`](crate::AdminClient) methods.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The configuration cannot be used to build a client.
    #[error("invalid client configuration: {0}")]
    Config(#[from] ConfigError),
    /// A request failed below the protocol layer.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// A date parameter could not be rendered.
    #[error("failed to format date parameter '{parameter}': {source}")]
    DateFormat {
        /// Parameter being rendered.
        parameter: &'static str,
        /// Formatting failure.
        #[source]
        source: Arc<time::error::Format>,
    },
}
