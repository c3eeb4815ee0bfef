//! Command-line runtime for the licensing administration client.
//!
//! The module owns argument parsing, configuration bootstrapping, telemetry
//! set-up and output rendering. It is exercised both from the binary
//! entrypoint and from tests, where configuration loading and the IO streams
//! are substituted.
//!
//! Exit codes: `0` when the server reported success (the result is printed
//! as JSON on stdout), `2` when it answered with another status tag, and `1`
//! for usage, configuration and transport errors.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;
use sgadmin_client::{AdminClient, Outcome, ProtocolFailure};

mod cli;
mod commands;
mod config;
mod errors;
mod telemetry;

use cli::Cli;
use config::split_config_arguments;
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub(crate) use errors::AppError;

/// CLI flags recognised by the configuration loader.
///
/// MAINTENANCE: keep in sync with the fields of `sgadmin_config::Config`.
const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--server",
    "--username",
    "--password",
    "--timeout-secs",
    "--chunk-size",
    "--log-filter",
    "--log-format",
];

const PROTOCOL_FAILURE_EXIT: u8 = 2;

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdout, stderr, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let arguments: Vec<OsString> = args.into_iter().collect();
    let split = split_config_arguments(&arguments);

    let cli = match Cli::try_parse_from(split.command_arguments.iter().cloned()) {
        Ok(cli) => cli,
        Err(error) if !error.use_stderr() => {
            let _ = write!(stdout, "{}", error.render());
            return ExitCode::SUCCESS;
        }
        Err(error) => {
            let _ = write!(stderr, "{}", AppError::CliUsage(error));
            return ExitCode::FAILURE;
        }
    };

    let result = loader.load(&split.config_arguments).and_then(|config| {
        telemetry::initialise(&config)?;
        let client = AdminClient::from_config(&config)?;
        commands::execute(&client, cli.command)
    });

    match result {
        Ok(Outcome::Success(value)) => match write_json(stdout, &value) {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                let _ = writeln!(stderr, "{error}");
                ExitCode::FAILURE
            }
        },
        Ok(Outcome::Failure(failure)) => {
            let _ = write_failure(stderr, &failure);
            ExitCode::from(PROTOCOL_FAILURE_EXIT)
        }
        Err(error) => {
            let _ = writeln!(stderr, "{error}");
            ExitCode::FAILURE
        }
    }
}

fn write_json<W: Write>(stdout: &mut W, value: &Value) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut *stdout, value).map_err(AppError::SerialiseOutput)?;
    stdout.write_all(b"\n").map_err(AppError::WriteOutput)?;
    stdout.flush().map_err(AppError::WriteOutput)
}

fn write_failure<E: Write>(stderr: &mut E, failure: &ProtocolFailure) -> io::Result<()> {
    writeln!(stderr, "server replied: {}", failure.status())?;
    for line in failure.detail() {
        writeln!(stderr, "{line}")?;
    }
    stderr.flush()
}

#[cfg(test)]
mod tests;
