//! Line-by-line decoding session.

use std::io::{BufRead, Write};
use std::process::ExitCode;

use tessera_protocol::{Message, MessageId, Reply, ReplyError, decode};
use tracing::{debug, warn};

use crate::errors::{AppError, LineFailure};
use crate::input::{Line, read_line_limited};

const LOG_TARGET: &str = "tessera::session";

/// Behaviour switches for a session.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SessionOptions {
    pub(crate) max_line_bytes: usize,
    pub(crate) echo: bool,
    pub(crate) fail_fast: bool,
}

/// Line counts gathered by a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) decoded: usize,
    pub(crate) failed: usize,
}

impl Summary {
    /// Success only when no line failed.
    pub(crate) fn exit_code(self) -> ExitCode {
        if self.failed == 0 {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Decodes every line of `input`, writing one JSON line per message or
/// failure to `output`. Blank lines are skipped.
pub(crate) fn process<R, W>(
    input: &mut R,
    output: &mut W,
    options: SessionOptions,
) -> Result<Summary, AppError>
where
    R: BufRead,
    W: Write,
{
    let mut buffer = Vec::new();
    let mut summary = Summary::default();
    let mut line_number = 0_usize;

    loop {
        let line = read_line_limited(input, options.max_line_bytes, &mut buffer)
            .map_err(AppError::ReadInput)?;
        line_number += 1;
        let outcome = match line {
            Line::Eof => break,
            Line::TooLong => Err(LineFailure::TooLong {
                limit: options.max_line_bytes,
            }),
            Line::Complete => {
                let trimmed = buffer.trim_ascii();
                if trimmed.is_empty() {
                    continue;
                }
                decode_line(trimmed)
            }
        };

        match outcome {
            Ok(message) => {
                summary.decoded += 1;
                debug!(
                    target: LOG_TARGET,
                    line = line_number,
                    kind = %message.kind(),
                    id = message.id().get(),
                    "decoded message"
                );
                if options.echo {
                    write_message(output, &message)?;
                }
            }
            Err(failure) => {
                summary.failed += 1;
                warn!(target: LOG_TARGET, line = line_number, error = %failure, "rejected line");
                let reply = Reply::error(
                    MessageId::default(),
                    ReplyError::new(failure.code(), failure.to_string()),
                );
                write_message(output, &Message::from(reply))?;
                if options.fail_fast {
                    break;
                }
            }
        }
    }

    output.flush().map_err(AppError::WriteOutput)?;
    Ok(summary)
}

fn decode_line(line: &[u8]) -> Result<Message, LineFailure> {
    if std::str::from_utf8(line).is_err() {
        return Err(LineFailure::NotUtf8);
    }
    Ok(decode(line)?)
}

fn write_message<W: Write>(output: &mut W, message: &Message) -> Result<(), AppError> {
    serde_json::to_writer(&mut *output, message).map_err(AppError::Serialise)?;
    output.write_all(b"\n").map_err(AppError::WriteOutput)
}
