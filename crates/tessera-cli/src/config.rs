//! Configuration loading helpers.
//!
//! Leading arguments that name configuration flags are routed to
//! `ortho_config`; everything from the first other argument onwards is
//! parsed as a command.

use std::ffi::{OsStr, OsString};

use ortho_config::OrthoConfig;
use tessera_config::{CONFIG_CLI_FLAGS, Config};

use crate::AppError;

pub(crate) trait ConfigLoader {
    /// Loads configuration from the configuration arguments.
    ///
    /// Configuration flags must appear before any command arguments.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

fn process_config_flag(argument: &OsStr) -> FlagAction {
    let text = argument.to_string_lossy();
    if !text.starts_with("--") {
        return FlagAction::Skip;
    }
    let (flag, has_inline_value) = text
        .split_once('=')
        .map_or((text.as_ref(), false), |(flag, _)| (flag, true));
    if CONFIG_CLI_FLAGS.contains(&flag) {
        FlagAction::Include {
            needs_value: !has_inline_value,
        }
    } else {
        FlagAction::Skip
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_arguments: Vec<OsString>,
}

/// Splits `args` (program name first) into configuration and command parts.
///
/// Both parts start with the program name so each can be handed to a parser.
pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some((program, rest)) = args.split_first() else {
        return ConfigArgumentSplit::default();
    };

    let mut config_arguments = vec![program.clone()];
    let mut remaining = rest.iter().peekable();
    while let Some(argument) = remaining.next_if(|argument| {
        matches!(process_config_flag(argument), FlagAction::Include { .. })
    }) {
        config_arguments.push(argument.clone());
        if process_config_flag(argument) == (FlagAction::Include { needs_value: true }) {
            if let Some(value) = remaining.next() {
                config_arguments.push(value.clone());
            }
        }
    }

    let mut command_arguments = vec![program.clone()];
    command_arguments.extend(remaining.cloned());
    ConfigArgumentSplit {
        config_arguments,
        command_arguments,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn os(values: &[&str]) -> Vec<OsString> {
        values.iter().map(OsString::from).collect()
    }

    #[rstest]
    #[case("--log-filter=debug", FlagAction::Include { needs_value: false })]
    #[case("--log-filter", FlagAction::Include { needs_value: true })]
    #[case("--max-line-bytes", FlagAction::Include { needs_value: true })]
    #[case("--check", FlagAction::Skip)]
    #[case("input.jsonl", FlagAction::Skip)]
    fn classifies_flags(#[case] argument: &str, #[case] expected: FlagAction) {
        assert_eq!(process_config_flag(OsStr::new(argument)), expected);
    }

    #[test]
    fn leading_config_flags_are_split_off() {
        let split = split_config_arguments(&os(&[
            "tessera",
            "--log-format",
            "compact",
            "--log-filter=debug",
            "--check",
            "--log-filter",
            "trace",
        ]));
        assert_eq!(
            split.config_arguments,
            os(&["tessera", "--log-format", "compact", "--log-filter=debug"])
        );
        assert_eq!(
            split.command_arguments,
            os(&["tessera", "--check", "--log-filter", "trace"])
        );
    }

    #[test]
    fn loader_applies_leading_flags() {
        let split = split_config_arguments(&os(&[
            "tessera",
            "--max-line-bytes",
            "512",
            "--log-format=compact",
            "--check",
        ]));
        let config = OrthoConfigLoader
            .load(&split.config_arguments)
            .expect("configuration loads");
        assert_eq!(config.max_line_bytes(), 512);
        assert_eq!(config.log_format(), tessera_config::LogFormat::Compact);
    }

    #[test]
    fn empty_arguments_split_to_nothing() {
        assert_eq!(split_config_arguments(&[]), ConfigArgumentSplit::default());
    }
}
