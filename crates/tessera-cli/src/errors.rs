//! Error types for the CLI runtime.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use tessera_config::ConfigValidationError;
use tessera_protocol::DecodeError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

/// Exit status for I/O, configuration, and usage failures.
pub(crate) const EXIT_RUNTIME_FAILURE: u8 = 2;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigValidationError),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to initialise telemetry: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to open input {path}: {source}")]
    OpenInput { path: String, source: io::Error },
    #[error("failed to read input: {0}")]
    ReadInput(io::Error),
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
    #[error("failed to serialise message: {0}")]
    Serialise(serde_json::Error),
}

impl AppError {
    pub(crate) fn exit_code(&self) -> ExitCode {
        let status = match self {
            Self::CliUsage(error) => u8::try_from(error.exit_code()).unwrap_or(EXIT_RUNTIME_FAILURE),
            _ => EXIT_RUNTIME_FAILURE,
        };
        ExitCode::from(status)
    }
}

/// Why a single input line produced no message.
#[derive(Debug, Error)]
pub(crate) enum LineFailure {
    #[error("line exceeds the {limit} byte limit")]
    TooLong { limit: usize },
    #[error("line is not valid UTF-8")]
    NotUtf8,
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl LineFailure {
    /// Negative errno-style code placed in the error reply.
    pub(crate) const fn code(&self) -> i32 {
        match self {
            Self::TooLong { .. } => -90,
            Self::NotUtf8 => -84,
            Self::Decode(error) => error.code(),
        }
    }
}
