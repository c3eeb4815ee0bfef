//! Immutable per-client settings.

use std::num::NonZeroUsize;
use std::time::Duration;

use sgadmin_config::{Config, ConfigError, DEFAULT_CHUNK_SIZE, default_timeout};
use url::Url;

/// Server address, credentials and limits shared by every call.
///
/// Settings never change after construction apart from the deadline,
/// which [`AdminClient::override_timeout`](crate::AdminClient::override_timeout)
/// may replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    server: Url,
    username: String,
    password: String,
    timeout: Duration,
    chunk_size: NonZeroUsize,
}

impl ClientSettings {
    /// Creates settings with the default timeout and chunk size.
    #[must_use]
    pub fn new(server: Url, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            server,
            username: username.into(),
            password: password.into(),
            timeout: default_timeout(),
            chunk_size: NonZeroUsize::new(DEFAULT_CHUNK_SIZE).unwrap_or(NonZeroUsize::MIN),
        }
    }

    /// Validates a loaded configuration and copies what the client needs.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] reported by [`Config::validate`].
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            server: config.server_url()?,
            username: config.username().to_owned(),
            password: config.password().to_owned(),
            timeout: config.timeout(),
            chunk_size: config.chunk_size()?,
        })
    }

    /// Replaces the per-request deadline.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the identifier batch size.
    #[must_use]
    pub const fn with_chunk_size(mut self, chunk_size: NonZeroUsize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Base URL of the administration endpoint.
    #[must_use]
    pub const fn server(&self) -> &Url {
        &self.server
    }

    /// Administrator account name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Administrator password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Per-request deadline.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Largest identifier batch per list parameter.
    #[must_use]
    pub const fn chunk_size(&self) -> NonZeroUsize {
        self.chunk_size
    }

    pub(crate) const fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }
}
