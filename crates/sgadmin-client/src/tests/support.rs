//! Scripted transport shared by the client's unit and behaviour tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use url::Url;

use crate::error::TransportError;
use crate::settings::ClientSettings;
use crate::transport::Transport;

/// One request observed by [`ScriptedTransport`].
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub(crate) url: Url,
    pub(crate) fields: BTreeMap<String, String>,
    pub(crate) timeout: Duration,
}

impl RecordedRequest {
    pub(crate) fn action(&self) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(name, _)| name == "action")
            .map(|(_, value)| value.into_owned())
    }

    pub(crate) fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub(crate) fn ids(&self, name: &str) -> Vec<String> {
        self.field(name)
            .map(|value| value.split(',').map(str::to_owned).collect())
            .unwrap_or_default()
    }
}

/// Replays queued responses in order and records every request. Once the
/// script runs out it answers `OK`.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    script: RefCell<VecDeque<Result<String, TransportError>>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, body: &str) -> Self {
        self.script.borrow_mut().push_back(Ok(body.to_owned()));
        self
    }

    pub(crate) fn respond_times(self, body: &str, times: usize) -> Self {
        (0..times).fold(self, |transport, _| transport.respond(body))
    }

    pub(crate) fn fail(self, error: TransportError) -> Self {
        self.script.borrow_mut().push_back(Err(error));
        self
    }

    /// Number of queued responses not yet consumed.
    pub(crate) fn pending(&self) -> usize {
        self.script.borrow().len()
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn actions(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .filter_map(RecordedRequest::action)
            .collect()
    }
}

impl Transport for ScriptedTransport {
    fn post_form(
        &self,
        url: &Url,
        fields: &[(String, String)],
        timeout: Duration,
    ) -> Result<String, TransportError> {
        self.requests.borrow_mut().push(RecordedRequest {
            url: url.clone(),
            fields: fields.iter().cloned().collect(),
            timeout,
        });
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(String::from("OK\n")))
    }
}

pub(crate) fn settings() -> ClientSettings {
    let server = Url::parse("https://licences.example.com/api/").expect("valid server url");
    ClientSettings::new(server, "admin", "secret")
}

pub(crate) fn ids(range: std::ops::RangeInclusive<u32>) -> Vec<String> {
    range.map(|id| id.to_string()).collect()
}

pub(crate) fn timeout_error() -> TransportError {
    TransportError::Timeout {
        endpoint: String::from("https://licences.example.com/api/"),
        timeout_secs: 30,
    }
}
