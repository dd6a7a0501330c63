//! Raw column source.
//!
//! A raw column is a line-oriented text file: one value per line, in row
//! order. It is read wholesale into memory and never modified afterwards.

use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Reads a raw column file into memory.
///
/// `\n`, `\r\n` and lone `\r` line endings are accepted. A trailing line
/// ending does not produce an extra empty row.
///
/// # Errors
///
/// Returns [`Error::ColumnNotFound`] if the file does not exist and
/// [`Error::Io`] if it cannot be read (including invalid UTF-8).
pub fn read_column_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::ColumnNotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })?;

    let column = parse_column(&contents);
    debug!(path = %path.display(), rows = column.len(), "Raw column loaded");
    Ok(column)
}

/// Splits in-memory text into rows.
///
/// `\n`, `\r\n` and a lone `\r` each end a row.
#[must_use]
pub fn parse_column(contents: &str) -> Vec<String> {
    let mut rows = Vec::new();
    let mut rest = contents;
    while !rest.is_empty() {
        let end = rest.find(['\n', '\r']).unwrap_or(rest.len());
        rows.push(rest[..end].to_owned());
        let tail = &rest[end..];
        rest = tail
            .strip_prefix("\r\n")
            .or_else(|| tail.strip_prefix(['\n', '\r']))
            .unwrap_or(tail);
    }
    rows
}
