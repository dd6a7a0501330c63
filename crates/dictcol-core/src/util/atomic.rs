//! Atomic file replacement.
//!
//! Artifacts and result files are written to a sibling temporary file, synced,
//! then renamed over the destination. A failure at any point leaves the
//! previous file untouched and removes the temporary.

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Returns the temporary sibling used while `path` is being written.
#[must_use]
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("dictcol"), OsString::from);
    name.push(".tmp");
    path.with_file_name(name)
}

/// Writes `path` atomically through `write`.
///
/// # Errors
///
/// Returns the first error raised by `write`, by flushing/syncing the
/// temporary file, or by the final rename.
pub fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let temp_path = temp_path_for(path);

    let outcome = write_then_replace(&temp_path, path, write);
    if outcome.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }
    outcome
}

fn write_then_replace<F>(temp_path: &Path, path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let mut writer = BufWriter::new(File::create(temp_path)?);
    write(&mut writer)?;
    writer.flush()?;
    let file = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
    file.sync_all()?;
    drop(file);

    atomic_replace(temp_path, path)?;
    Ok(())
}

/// Cross-platform atomic file replacement.
///
/// On Unix, `rename()` atomically replaces the destination.
/// On Windows, `rename()` fails if destination exists, so we use a backup strategy.
fn atomic_replace(src: &Path, dst: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        let backup = temp_path_for(&dst.with_extension("bak"));
        let _ = std::fs::remove_file(&backup);

        if dst.exists() {
            std::fs::rename(dst, &backup)?;
        }

        match std::fs::rename(src, dst) {
            Ok(()) => {
                let _ = std::fs::remove_file(&backup);
                Ok(())
            }
            Err(e) => {
                if backup.exists() {
                    let _ = std::fs::rename(&backup, dst);
                }
                Err(e)
            }
        }
    }

    #[cfg(not(windows))]
    {
        std::fs::rename(src, dst)
    }
}
