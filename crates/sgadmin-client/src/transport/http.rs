//! Blocking HTTP transport backed by `ureq`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use ureq::Agent;
use url::Url;

use super::Transport;
use crate::error::TransportError;
use crate::request_url::redact;

/// Sends form POSTs through a shared `ureq` agent.
///
/// The agent pools connections; each request carries its own deadline so
/// a timeout override takes effect on the next call. Response bodies are
/// read in full whatever their size.
#[derive(Clone)]
pub struct HttpTransport {
    agent: Agent,
}

impl HttpTransport {
    /// Creates a transport with a fresh connection pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            agent: Agent::new_with_defaults(),
        }
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn post_form(
        &self,
        url: &Url,
        fields: &[(String, String)],
        timeout: Duration,
    ) -> Result<String, TransportError> {
        let endpoint = redact(url);
        debug!(endpoint = %endpoint, fields = fields.len(), "posting form");

        let response = self
            .agent
            .post(url.as_str())
            .config()
            .timeout_global(Some(timeout))
            .build()
            .send_form(
                fields
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str())),
            )
            .map_err(|error| request_error(&endpoint, timeout, error))?;

        let mut body = response.into_body();
        body.with_config()
            .limit(u64::MAX)
            .read_to_string()
            .map_err(|error| match error {
                ureq::Error::Timeout(_) => timeout_error(&endpoint, timeout),
                other => TransportError::Body {
                    endpoint: endpoint.clone(),
                    source: Arc::new(other),
                },
            })
    }
}

fn request_error(endpoint: &str, timeout: Duration, error: ureq::Error) -> TransportError {
    match error {
        ureq::Error::StatusCode(status) => TransportError::Status {
            endpoint: endpoint.to_owned(),
            status,
        },
        ureq::Error::Timeout(_) => timeout_error(endpoint, timeout),
        other => TransportError::Connection {
            endpoint: endpoint.to_owned(),
            source: Arc::new(other),
        },
    }
}

fn timeout_error(endpoint: &str, timeout: Duration) -> TransportError {
    TransportError::Timeout {
        endpoint: endpoint.to_owned(),
        timeout_secs: timeout.as_secs(),
    }
}
