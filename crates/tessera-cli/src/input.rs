//! Bounded line reading.

use std::io::{self, BufRead, Read};

/// Outcome of reading one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line {
    /// A line, without its terminator, is in the buffer.
    Complete,
    /// The line exceeded the limit and was skipped.
    TooLong,
    /// No more input.
    Eof,
}

/// Reads one line of at most `limit` bytes into `buffer`.
///
/// Oversized lines are consumed up to and including their newline so the
/// next call starts on the following line. `\n` and `\r\n` terminators are
/// stripped and do not count against `limit`. At most `limit + 2` bytes of a
/// line are buffered.
pub(crate) fn read_line_limited<R: BufRead>(
    reader: &mut R,
    limit: usize,
    buffer: &mut Vec<u8>,
) -> io::Result<Line> {
    buffer.clear();
    let budget = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(2);
    let read = reader.by_ref().take(budget).read_until(b'\n', buffer)?;
    if read == 0 {
        return Ok(Line::Eof);
    }
    let terminated = buffer.last() == Some(&b'\n');
    if terminated {
        buffer.pop();
        if buffer.last() == Some(&b'\r') {
            buffer.pop();
        }
    }
    if buffer.len() > limit {
        if !terminated {
            discard_rest_of_line(reader)?;
        }
        buffer.clear();
        return Ok(Line::TooLong);
    }
    Ok(Line::Complete)
}

fn discard_rest_of_line<R: BufRead>(reader: &mut R) -> io::Result<()> {
    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            return Ok(());
        }
        match available.iter().position(|byte| *byte == b'\n') {
            Some(index) => {
                reader.consume(index + 1);
                return Ok(());
            }
            None => {
                let length = available.len();
                reader.consume(length);
            }
        }
    }
}
