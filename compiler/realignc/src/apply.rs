//! Atomic file replacement.
//!
//! A fix is written to a temporary file in the target's directory, synced,
//! given the target's permission bits and renamed over the target. Until
//! the rename the original is untouched, and a staged write that is
//! dropped removes its temporary file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Why a fix could not be written.
#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    #[error("unable to stat the file: {0}")]
    Stat(#[source] io::Error),
    #[error("not a regular file, skipping")]
    NotRegularFile,
    #[error("unable to write to file: {0}")]
    Write(#[source] io::Error),
}

/// New contents written to disk beside the target but not yet in place.
#[derive(Debug)]
pub struct StagedWrite {
    target: PathBuf,
    temp: NamedTempFile,
}

impl StagedWrite {
    /// Where the new contents currently live.
    pub fn temp_path(&self) -> &Path {
        self.temp.path()
    }

    /// Rename the staged contents over the target.
    pub fn commit(self) -> Result<(), ApplyError> {
        self.temp
            .persist(&self.target)
            .map_err(|e| ApplyError::Write(e.error))?;
        Ok(())
    }
}

/// Write `contents` next to `path` without touching `path` itself.
///
/// `path` must be a regular file; symlinks are rejected, not followed.
pub fn stage(path: &Path, contents: &[u8]) -> Result<StagedWrite, ApplyError> {
    let meta = fs::symlink_metadata(path).map_err(ApplyError::Stat)?;
    if !meta.file_type().is_file() {
        return Err(ApplyError::NotRegularFile);
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = tempfile::Builder::new()
        .prefix(".realign-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(ApplyError::Write)?;
    temp.write_all(contents).map_err(ApplyError::Write)?;
    temp.as_file().sync_all().map_err(ApplyError::Write)?;
    fs::set_permissions(temp.path(), meta.permissions()).map_err(ApplyError::Write)?;

    Ok(StagedWrite {
        target: path.to_path_buf(),
        temp,
    })
}

/// Atomically replace the contents of `path`.
pub fn apply_fix(path: &Path, contents: &[u8]) -> Result<(), ApplyError> {
    stage(path, contents)?.commit()?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "applied fix");
    Ok(())
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
