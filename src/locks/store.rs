//! File-backed storage for a single lock record.

use super::record::LockRecord;
use crate::error::{Result, SingletonError};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the lock file for `identity`: `.<identity>.pid`.
pub fn lock_file_name(identity: &str) -> String {
    format!(".{}.pid", identity)
}

/// Check that `identity` can be embedded in a lock file name.
///
/// The identity must be non-empty and must not contain path separators,
/// NUL bytes, or be a `.`/`..` component, so the lock file always lands
/// directly inside the configured directory.
pub fn validate_identity(identity: &str) -> Result<()> {
    if identity.is_empty() {
        return Err(SingletonError::Config(
            "identity must not be empty".to_string(),
        ));
    }
    if identity.contains(['/', '\\', '\0']) || identity == "." || identity == ".." {
        return Err(SingletonError::Config(format!(
            "invalid identity '{}': must be a plain name without path separators",
            identity.escape_default()
        )));
    }
    Ok(())
}

/// Reads, writes, and clears the lock record for one guarded entity.
///
/// The file is never deleted: release truncates it, so its content toggles
/// between a claim and empty over the entity's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockStore {
    path: PathBuf,
}

impl LockStore {
    /// Store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for `identity` inside `dir` (`dir/.<identity>.pid`).
    pub fn for_entity(dir: impl AsRef<Path>, identity: &str) -> Result<Self> {
        validate_identity(identity)?;
        Ok(Self::new(dir.as_ref().join(lock_file_name(identity))))
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current record.
    ///
    /// A missing, unreadable, empty, or malformed file all read as `None`;
    /// this never fails.
    pub fn read(&self) -> Option<LockRecord> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    debug!(path = %self.path.display(), error = %e, "lock file unreadable, treating as unclaimed");
                }
                return None;
            }
        };

        let record = LockRecord::parse(&content);
        if record.is_none() && !content.trim().is_empty() {
            debug!(path = %self.path.display(), content = %content.trim(), "malformed lock record, treating as unclaimed");
        }
        record
    }

    /// Overwrite the file with `record`, creating it (and its directory) if needed.
    pub fn write(&self, record: &LockRecord) -> Result<()> {
        let mut file = self.open_truncated()?;
        file.write_all(record.encode().as_bytes())
            .map_err(|e| SingletonError::io(&self.path, e))?;
        file.sync_all()
            .map_err(|e| SingletonError::io(&self.path, e))
    }

    /// Truncate the file to zero length, leaving it in place.
    pub fn clear(&self) -> Result<()> {
        let file = self.open_truncated()?;
        file.sync_all()
            .map_err(|e| SingletonError::io(&self.path, e))
    }

    fn open_truncated(&self) -> Result<fs::File> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| SingletonError::io(parent, e))?;
        }

        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| SingletonError::io(&self.path, e))
    }
}
