//! Runtime for the `tessera` command-line decoder.
//!
//! The runtime splits configuration flags from command arguments, loads
//! [`tessera_config::Config`], installs telemetry, and runs a decoding
//! session over standard input or a named file. Streams are injected so the
//! whole runtime can be driven from tests.
//!
//! Exit status is `0` when every line decoded, `1` when any line failed, and
//! `2` for usage, configuration, or I/O failures.

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};

mod cli;
mod config;
mod errors;
mod input;
mod session;
mod telemetry;

use cli::Cli;
use config::{ConfigLoader, OrthoConfigLoader, split_config_arguments};
pub(crate) use errors::AppError;
use session::{SessionOptions, Summary};

/// Bundles the streams handed to the runtime.
pub(crate) struct IoStreams<'a, R: BufRead, W: Write, E: Write> {
    pub(crate) stdin: &'a mut R,
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

/// Runs the CLI with the given arguments and streams.
#[must_use]
pub fn run<I, R, W, E>(args: I, stdin: &mut R, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut io = IoStreams {
        stdin,
        stdout,
        stderr,
    };
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
pub(crate) fn run_with_loader<I, R, W, E, L>(
    args: I,
    io: &mut IoStreams<'_, R, W, E>,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let args: Vec<OsString> = args.into_iter().collect();
    let split = split_config_arguments(&args);

    let cli = match Cli::try_parse_from(&split.command_arguments) {
        Ok(cli) => cli,
        Err(error) if !error.use_stderr() => {
            let _ = write!(io.stdout, "{error}");
            return ExitCode::SUCCESS;
        }
        Err(error) => {
            let failure = AppError::CliUsage(error);
            let _ = write!(io.stderr, "{failure}");
            return failure.exit_code();
        }
    };

    match execute(&cli, &split.config_arguments, io, loader) {
        Ok(summary) => summary.exit_code(),
        Err(error) => {
            let _ = writeln!(io.stderr, "{error}");
            error.exit_code()
        }
    }
}

fn execute<R, W, E, L>(
    cli: &Cli,
    config_arguments: &[OsString],
    io: &mut IoStreams<'_, R, W, E>,
    loader: &L,
) -> Result<Summary, AppError>
where
    R: BufRead,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let config = loader.load(config_arguments)?;
    config.validate()?;
    let log_format = telemetry::initialise(&config)?;
    debug!(target: "tessera::cli", %log_format, max_line_bytes = config.max_line_bytes(), "configuration loaded");

    let options = SessionOptions {
        max_line_bytes: config.max_line_bytes(),
        echo: !cli.check,
        fail_fast: cli.fail_fast,
    };

    let summary = match cli.input_path() {
        Some(path) => {
            info!(target: "tessera::cli", input = %path.display(), "decoding file");
            let file = File::open(path).map_err(|source| AppError::OpenInput {
                path: path.display().to_string(),
                source,
            })?;
            session::process(&mut BufReader::new(file), &mut *io.stdout, options)?
        }
        None => {
            info!(target: "tessera::cli", "decoding standard input");
            session::process(&mut *io.stdin, &mut *io.stdout, options)?
        }
    };

    info!(
        target: "tessera::cli",
        decoded = summary.decoded,
        failed = summary.failed,
        "session finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests;
