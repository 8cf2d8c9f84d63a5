//! Filesystem utilities.

use groundwork_types::{GroundworkError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Expand path with tilde.
pub fn expand_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();

    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }

    path.to_path_buf()
}

/// Read entire file as string (slurp).
pub fn slurp(path: impl AsRef<Path>) -> Result<String> {
    fs::read_to_string(path).map_err(Into::into)
}

/// Write a file atomically: write to a sibling temp file, then rename.
///
/// A failure mid-write never leaves a partial document at `path`; the
/// previous contents, if any, remain intact.
pub fn atomic_write(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path.parent().ok_or_else(|| {
        GroundworkError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Cannot determine parent directory of {:?}", path),
        ))
    })?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| GroundworkError::Io(e.error))?;

    Ok(())
}

/// Append a line to a file, creating it if absent.
pub fn append_line(path: impl AsRef<Path>, line: &str) -> Result<()> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())?;
    file.write_all(line.as_bytes())?;
    Ok(())
}
