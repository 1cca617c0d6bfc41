//! Command-line argument definitions.

use std::path::{Path, PathBuf};

use clap::Parser;

/// Decodes Tessera control messages from JSON lines.
///
/// Each non-empty input line holds one message. Decoded messages are echoed
/// in canonical form; failures produce an error reply on the same output.
#[derive(Parser, Debug)]
#[command(name = "tessera", version)]
pub(crate) struct Cli {
    /// Only report failures instead of echoing decoded messages.
    #[arg(long)]
    pub(crate) check: bool,
    /// Stop at the first line that fails to decode.
    #[arg(long)]
    pub(crate) fail_fast: bool,
    /// Input file. Standard input is read when omitted or `-`.
    #[arg(value_name = "FILE")]
    pub(crate) input: Option<PathBuf>,
}

impl Cli {
    /// Input path, or `None` for standard input.
    pub(crate) fn input_path(&self) -> Option<&Path> {
        self.input
            .as_deref()
            .filter(|path| path.as_os_str() != "-")
    }
}
