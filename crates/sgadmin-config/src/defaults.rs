use std::time::Duration;

use crate::logging::LogFormat;

/// Administration endpoint assumed when none is configured.
pub const DEFAULT_SERVER: &str = "http://127.0.0.1/api/";

/// Per-request deadline, in seconds, applied by the HTTP transport.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Largest identifier batch sent for a single list parameter.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Owned default server address used where allocation is required.
#[must_use]
pub fn default_server() -> String {
    DEFAULT_SERVER.to_owned()
}

/// Default per-request deadline.
#[must_use]
pub const fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}
