//! CLI entrypoint for the licensing administration client.
//!
//! The binary delegates to [`sgadmin_cli::run`], which loads configuration,
//! parses the command, talks to the server and renders the outcome.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    sgadmin_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
