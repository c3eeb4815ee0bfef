//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use sgadmin_client::ClientError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("failed to serialise command output: {0}")]
    SerialiseOutput(serde_json::Error),
    #[error("failed to write command output: {0}")]
    WriteOutput(io::Error),
}
