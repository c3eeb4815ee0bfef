//! Configuration loading helpers for the CLI.
//!
//! Configuration flags are peeled off the front of the argument list so
//! `ortho_config` only sees flags it understands, while clap parses the
//! command that follows.

use std::ffi::{OsStr, OsString};

use ortho_config::OrthoConfig;
use sgadmin_config::Config;

use crate::AppError;

pub(crate) trait ConfigLoader {
    /// Loads configuration for the CLI.
    ///
    /// # Flag Ordering
    ///
    /// Configuration flags (listed in `CONFIG_CLI_FLAGS`) must appear before
    /// the command group. Later occurrences are parsed as command arguments.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

#[derive(Debug, Clone, Copy)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

impl OrthoConfigLoader {
    fn process_config_flag(argument: &OsStr) -> FlagAction {
        let argument_text = argument.to_string_lossy();
        if !argument_text.starts_with("--") {
            return FlagAction::Skip;
        }

        let (flag, has_inline_value) = match argument_text.split_once('=') {
            Some((name, _)) => (name, true),
            None => (&*argument_text, false),
        };

        if super::CONFIG_CLI_FLAGS.contains(&flag) {
            return FlagAction::Include {
                needs_value: !has_inline_value,
            };
        }

        FlagAction::Skip
    }
}

pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_arguments: Vec<OsString>,
}

/// Separates leading configuration flags from the command.
///
/// Both halves keep the program name so each can be handed to its own
/// parser.
pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some((program, rest)) = args.split_first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_arguments: Vec::new(),
        };
    };

    let mut config_arguments = vec![program.clone()];
    let mut remaining = rest.iter();
    let mut command_arguments = vec![program.clone()];

    while let Some(argument) = remaining.next() {
        match OrthoConfigLoader::process_config_flag(argument) {
            FlagAction::Include { needs_value } => {
                config_arguments.push(argument.clone());
                if needs_value && let Some(value) = remaining.next() {
                    config_arguments.push(value.clone());
                }
            }
            FlagAction::Skip => {
                command_arguments.push(argument.clone());
                command_arguments.extend(remaining.cloned());
                break;
            }
        }
    }

    ConfigArgumentSplit {
        config_arguments,
        command_arguments,
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use rstest::rstest;

    use super::*;

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn inline_value_flags_do_not_need_follow_up_value() {
        let result = OrthoConfigLoader::process_config_flag(OsStr::new("--server=http://x/"));
        assert!(matches!(result, FlagAction::Include { needs_value: false }));
    }

    #[test]
    fn separate_value_flags_consume_following_argument() {
        let result = OrthoConfigLoader::process_config_flag(OsStr::new("--chunk-size"));
        assert!(matches!(result, FlagAction::Include { needs_value: true }));
    }

    #[rstest]
    #[case("customers")]
    #[case("--unknown")]
    #[case("--name")]
    fn other_arguments_stop_the_scan(#[case] argument: &str) {
        let result = OrthoConfigLoader::process_config_flag(OsStr::new(argument));
        assert!(matches!(result, FlagAction::Skip));
    }

    #[test]
    fn leading_flags_are_split_from_the_command() {
        let split = split_config_arguments(&os_args(&[
            "sgadmin",
            "--server",
            "http://127.0.0.1/api/",
            "--username=admin",
            "customers",
            "list",
            "--server",
        ]));
        assert_eq!(
            split.config_arguments,
            os_args(&["sgadmin", "--server", "http://127.0.0.1/api/", "--username=admin"])
        );
        assert_eq!(
            split.command_arguments,
            os_args(&["sgadmin", "customers", "list", "--server"])
        );
    }

    #[test]
    fn empty_arguments_split_into_nothing() {
        let split = split_config_arguments(&[]);
        assert!(split.config_arguments.is_empty());
        assert!(split.command_arguments.is_empty());
    }
}
