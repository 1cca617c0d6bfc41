//! Test doubles for driving the runtime in-process.

use std::cell::RefCell;
use std::ffi::OsString;
use std::io::Cursor;
use std::process::ExitCode;

use tessera_config::Config;

use crate::config::ConfigLoader;
use crate::{AppError, IoStreams, run_with_loader};

/// Loader that ignores the environment and returns a fixed configuration.
pub(super) struct StaticLoader {
    pub(super) config: Config,
    pub(super) seen: RefCell<Vec<OsString>>,
}

impl StaticLoader {
    pub(super) fn new(config: Config) -> Self {
        Self {
            config,
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl ConfigLoader for StaticLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        self.seen.borrow_mut().extend(args.iter().cloned());
        Ok(self.config.clone())
    }
}

/// Captured result of one in-process run.
pub(super) struct RunOutput {
    pub(super) exit: ExitCode,
    pub(super) stdout: String,
    pub(super) stderr: String,
}

impl RunOutput {
    pub(super) fn stdout_lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }
}

/// Runs the CLI over `input` with extra command arguments.
pub(super) fn run_cli(loader: &StaticLoader, args: &[&str], input: &str) -> RunOutput {
    let mut stdin = Cursor::new(input.as_bytes().to_vec());
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let argv = std::iter::once("tessera")
        .chain(args.iter().copied())
        .map(OsString::from);
    let exit = {
        let mut io = IoStreams {
            stdin: &mut stdin,
            stdout: &mut stdout,
            stderr: &mut stderr,
        };
        run_with_loader(argv, &mut io, loader)
    };
    RunOutput {
        exit,
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    }
}

pub(super) const TRANSACTION_LINE: &str =
    r#"{"uid":1,"type":"transaction","commands":[{"move":[1,2]}]}"#;
pub(super) const EVENT_LINE: &str = r#"{"uid":2,"type":"event","event_name":"tick","event_value":true}"#;
pub(super) const INVALID_LINE: &str = r#"{"uid":3,"bogus":true}"#;
pub(super) const MALFORMED_LINE: &str = r#"{"uid":"#;

/// Looks up a sample line by the name used in feature files.
pub(super) fn sample_line(name: &str) -> Option<&'static str> {
    match name {
        "transaction" => Some(TRANSACTION_LINE),
        "event" => Some(EVENT_LINE),
        "invalid" => Some(INVALID_LINE),
        "malformed" => Some(MALFORMED_LINE),
        "blank" => Some(""),
        _ => None,
    }
}
