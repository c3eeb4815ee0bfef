//! Shared configuration for the `sgadmin` client library and CLI.
//!
//! Values are layered by `ortho_config`: built-in defaults, then a TOML file
//! named by `--config-path` or `SGADMIN_CONFIG_PATH`, then `SGADMIN_*`
//! environment variables, then command-line flags. The resolved [`Config`]
//! is read-only for the lifetime of a process; the client copies what it
//! needs into its own settings at construction.

use std::num::NonZeroUsize;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use url::Url;

mod defaults;
mod logging;
mod validation;

pub use defaults::{
    DEFAULT_CHUNK_SIZE, DEFAULT_LOG_FILTER, DEFAULT_SERVER, DEFAULT_TIMEOUT_SECS,
    default_log_filter, default_log_filter_string, default_log_format, default_server,
    default_timeout,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use validation::ConfigError;

/// Resolved configuration for talking to the administration server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "SGADMIN")]
pub struct Config {
    /// Base URL of the administration endpoint; the action and credentials
    /// are appended as query parameters.
    #[ortho_config(default = defaults::default_server())]
    pub server: String,
    /// Administrator account name embedded in every request URL.
    #[ortho_config(default = String::new())]
    pub username: String,
    /// Administrator password embedded in every request URL.
    #[ortho_config(default = String::new())]
    pub password: String,
    /// Per-request deadline in seconds.
    #[ortho_config(default = defaults::DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
    /// Largest number of identifiers sent in one list parameter.
    #[ortho_config(default = defaults::DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,
    /// `tracing` filter expression.
    #[ortho_config(default = defaults::default_log_filter_string())]
    pub log_filter: String,
    /// Output format for log events.
    #[ortho_config(default = defaults::default_log_format())]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            username: String::new(),
            password: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Raw server address as configured.
    #[must_use]
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Parses the server address, requiring an `http` or `https` scheme.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidServer`] or
    /// [`ConfigError::UnsupportedScheme`] when the address is unusable.
    pub fn server_url(&self) -> Result<Url, ConfigError> {
        validation::parse_server(&self.server)
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
        Duration::from_secs(self.timeout_secs)
    }

    /// Identifier batch size, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroChunkSize`] when the size is zero.
    pub fn chunk_size(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.chunk_size).ok_or(ConfigError::ZeroChunkSize)
    }

    /// Log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Checks every value the client depends on.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered, checking the server,
    /// then credentials, then the timeout and chunk size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server_url()?;
        validation::require_credential("username", &self.username)?;
        validation::require_credential("password", &self.password)?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        self.chunk_size()?;
        Ok(())
    }
}
