//! Line-based roster codecs.
//!
//! # Responsibility
//! - Convert between roster file text and in-memory rows.
//! - Reject malformed lines before anything is committed to memory or disk.
//!
//! # Invariants
//! - `plain` (headerless) and `headered` are separate formats; the caller
//!   picks one per operation and nothing auto-detects between them.
//! - Blank lines are ignored by both decoders.
//! - A decode either returns every row or fails; no partial result escapes.

use crate::model::record::FIELD_DELIMITER;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod headered;
pub mod plain;

pub type CodecResult<T> = Result<T, CodecError>;

/// Decode failure for roster text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A non-blank line does not have an accepted field count.
    Format { line_number: usize, line: String },
    /// Headered text whose first non-blank line is not the expected header.
    MissingHeader { line: String },
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format { line_number, line } => {
                write!(f, "invalid line format at line {line_number}: `{line}`")
            }
            Self::MissingHeader { line } => write!(
                f,
                "expected header `{}`, found `{line}`",
                headered::HEADER
            ),
        }
    }
}

impl Error for CodecError {}

/// Yields `(line_number, trimmed_line)` for every non-blank line.
fn non_blank_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(FIELD_DELIMITER).map(str::trim).collect()
}
