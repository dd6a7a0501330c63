//! Results file writer for prefix queries.
//!
//! One line per matched value:
//!
//! ```text
//! Item 'ab' found at indices: [0, 3]
//! Item 'ac' found at indices: [1]
//! ```

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::util::write_atomic;

use super::PrefixMatches;

/// Formats the line reporting `indices` for `item`.
#[must_use]
pub fn format_result_line(item: &str, indices: &[usize]) -> String {
    format!("Item '{item}' found at indices: {indices:?}")
}

/// Writes `matches` to `path`, replacing any previous results.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] if the file cannot be written; the previous
/// results file, if any, is left intact.
pub fn write_results<P: AsRef<Path>>(matches: &PrefixMatches, path: P) -> Result<()> {
    let path = path.as_ref();
    write_atomic(path, |writer| {
        for (item, indices) in matches {
            writeln!(writer, "{}", format_result_line(item, indices))?;
        }
        Ok(())
    })?;

    debug!(path = %path.display(), lines = matches.len(), "Results written");
    Ok(())
}
