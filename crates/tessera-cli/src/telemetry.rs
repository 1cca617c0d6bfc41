//! Log subscriber setup for the decoder.
//!
//! Log events always go to stderr; stdout carries nothing but JSON lines.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::fmt::{self, MakeWriter, time::UtcTime};
use tracing_subscriber::EnvFilter;

use tessera_config::{Config, LogFormat};

type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

static INSTALLED_FORMAT: OnceCell<LogFormat> = OnceCell::new();

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub(crate) enum TelemetryError {
    #[error("invalid log filter '{directive}': {message}")]
    Filter { directive: String, message: String },
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(#[source] SetGlobalDefaultError),
}

/// Installs the process-wide subscriber once and reports the format in use.
///
/// The first successful call wins; later calls, even with a different
/// configuration, return the format that was installed.
pub(crate) fn initialise(config: &Config) -> Result<LogFormat, TelemetryError> {
    INSTALLED_FORMAT
        .get_or_try_init(|| {
            let subscriber = build_subscriber(config, io::stderr, io::stderr().is_terminal())?;
            tracing::subscriber::set_global_default(subscriber)
                .map_err(TelemetryError::Subscriber)?;
            Ok(config.log_format())
        })
        .copied()
}

/// Builds a subscriber for `config` that writes through `writer`.
pub(crate) fn build_subscriber<W>(
    config: &Config,
    writer: W,
    ansi: bool,
) -> Result<BoxedSubscriber, TelemetryError>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_new(config.log_filter()).map_err(|error| TelemetryError::Filter {
        directive: config.log_filter().to_owned(),
        message: error.to_string(),
    })?;
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(true)
        .with_ansi(ansi)
        .with_timer(UtcTime::rfc_3339());

    Ok(match config.log_format() {
        LogFormat::Json => Box::new(builder.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder.compact().finish()),
    })
}
