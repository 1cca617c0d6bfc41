//! Shared configuration for the Tessera binaries.
//!
//! [`Config`] is loaded through `ortho_config`, which layers built-in
//! defaults, an optional configuration file, `TESSERA_*` environment
//! variables, and command-line flags, in increasing order of precedence.

mod defaults;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_MAX_LINE_BYTES, default_log_filter, default_log_filter_string,
    default_log_format, default_max_line_bytes,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Command-line flags understood by the configuration loader.
pub const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--max-line-bytes",
];

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "TESSERA")]
pub struct Config {
    /// `tracing` filter directive, such as `info` or `tessera=debug`.
    #[serde(default = "defaults::default_log_filter_string")]
    #[ortho_config(default = defaults::default_log_filter_string())]
    pub log_filter: String,

    /// Output format of log events.
    #[serde(default = "defaults::default_log_format")]
    #[ortho_config(default = defaults::default_log_format())]
    pub log_format: LogFormat,

    /// Longest accepted input line in bytes.
    #[serde(default = "defaults::default_max_line_bytes")]
    #[ortho_config(default = defaults::default_max_line_bytes())]
    pub max_line_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            max_line_bytes: default_max_line_bytes(),
        }
    }
}

/// A configuration that loaded but cannot be used.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// The line limit is shorter than the smallest document.
    #[error("max_line_bytes must be at least 2, got {0}")]
    LineLimitTooSmall(usize),
}

impl Config {
    /// `tracing` filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Output format of log events.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Longest accepted input line in bytes.
    #[must_use]
    pub const fn max_line_bytes(&self) -> usize {
        self.max_line_bytes
    }

    /// Checks cross-field constraints that the loader cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError::LineLimitTooSmall`] when the line
    /// limit cannot hold the smallest document, `{}`.
    pub const fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.max_line_bytes < 2 {
            return Err(ConfigValidationError::LineLimitTooSmall(self.max_line_bytes));
        }
        Ok(())
    }
}
