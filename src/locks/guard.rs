//! RAII guard for a held singleton lock.

use super::record::LockRecord;
use super::store::LockStore;
use crate::error::Result;
use std::path::Path;
use tracing::{info, warn};

/// Proof that this process holds the lock.
///
/// When dropped, the lock record is cleared. If clearing fails during drop,
/// a warning is logged but no panic occurs; call [`SingletonGuard::release`]
/// to observe the error instead.
#[derive(Debug)]
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct SingletonGuard {
    store: LockStore,

    /// The record this process wrote on acquisition.
    record: LockRecord,

    /// Whether the lock has been released manually.
    released: bool,
}

impl SingletonGuard {
    pub(super) fn new(store: LockStore, record: LockRecord) -> Self {
        Self {
            store,
            record,
            released: false,
        }
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// The record written when the lock was acquired.
    pub fn record(&self) -> &LockRecord {
        &self.record
    }

    /// Release the lock now and report whether the record could be cleared.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.clear_record()
    }

    fn clear_record(&self) -> Result<()> {
        // Two first-time acquirers can both win the read-then-write race;
        // the loser finds the other's record here.
        if let Some(current) = self.store.read()
            && current != self.record
        {
            warn!(
                path = %self.store.path().display(),
                ours = %self.record,
                found = %current,
                "lock record was overwritten by another process while held"
            );
        }

        self.store.clear()?;
        info!(path = %self.store.path().display(), pid = self.record.holder_pid, "released lock");
        Ok(())
    }
}

impl Drop for SingletonGuard {
    fn drop(&mut self) {
        if !self.released
            && let Err(e) = self.clear_record()
        {
            warn!(
                path = %self.store.path().display(),
                error = %e,
                "failed to release lock"
            );
        }
    }
}
