pub mod fasta;
pub mod genbank;
pub mod registry;

pub use registry::{FileFormat, FormatRegistry, Parsed};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unsupported format: .{0}")]
    UnsupportedFormat(String),
    #[error("line {line}: {msg} ({state} state): {content:?}")]
    Structural {
        line: usize,
        state: &'static str,
        msg: String,
        content: String,
    },
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Split a raw line into its whitespace-separated tokens (no empty tokens)
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}
