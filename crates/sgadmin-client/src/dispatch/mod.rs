//! Turning one logical call into as many physical requests as the
//! server's identifier limit demands.

use std::num::NonZeroUsize;
use std::time::Duration;

use sgadmin_protocol::RawResponse;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::TransportError;
use crate::params::ParameterSet;
use crate::request_url::redact;
use crate::transport::Transport;

mod plan;

pub use plan::{ChunkPlan, ChunkedParameter, PlannedRequests};

/// Issues requests through a [`Transport`], splitting oversized lists.
///
/// Requests are strictly sequential. A multi-request call stops at the
/// first response whose status tag is not `OK` and returns that response;
/// when every request succeeds it returns the last one. Earlier successful
/// responses are discarded, so chunking suits commands rather than
/// listings.
#[derive(Debug, Clone)]
pub struct Dispatcher<T> {
    transport: T,
    chunk_size: NonZeroUsize,
    timeout: Duration,
}

impl<T> Dispatcher<T> {
    /// Creates a dispatcher.
    #[must_use]
    pub const fn new(transport: T, chunk_size: NonZeroUsize, timeout: Duration) -> Self {
        Self {
            transport,
            chunk_size,
            timeout,
        }
    }

    /// Largest identifier batch per list parameter.
    #[must_use]
    pub const fn chunk_size(&self) -> NonZeroUsize {
        self.chunk_size
    }

    /// Deadline handed to the transport for each request.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Replaces the per-request deadline for later calls.
    pub const fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// The underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> Dispatcher<T> {
    /// Sends one logical call.
    ///
    /// A call that fits in one request is sent as-is and its response is
    /// returned unmodified.
    ///
    /// # Errors
    ///
    /// Returns the first [`TransportError`]; no further requests are sent
    /// after it.
    pub fn dispatch(
        &self,
        url: &Url,
        parameters: &ParameterSet,
    ) -> Result<RawResponse, TransportError> {
        let plan = ChunkPlan::build(parameters, self.chunk_size);
        if plan.is_single_request() {
            return self.send(url, parameters);
        }

        let total = plan.request_count();
        info!(
            endpoint = %redact(url),
            parameters = ?plan.chunked().iter().map(ChunkedParameter::name).collect::<Vec<_>>(),
            requests = total,
            "splitting oversized identifier lists"
        );

        let mut last = RawResponse::default();
        for (index, request) in plan.requests().enumerate() {
            let response = self.send(url, &request)?;
            if !response.is_success() {
                warn!(
                    endpoint = %redact(url),
                    request = index + 1,
                    requests = total,
                    status = response.status(),
                    "server rejected a chunk; abandoning remaining chunks"
                );
                return Ok(response);
            }
            last = response;
        }
        Ok(last)
    }

    fn send(&self, url: &Url, parameters: &ParameterSet) -> Result<RawResponse, TransportError> {
        let fields = parameters.to_form_fields();
        let body = self.transport.post_form(url, &fields, self.timeout)?;
        let response = RawResponse::new(body);
        debug!(status = response.status(), "response received");
        Ok(response)
    }
}

#[cfg(test)]
mod tests;
