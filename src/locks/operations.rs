//! Acquire, inspect, and clear operations for a guarded entity.

use super::guard::SingletonGuard;
use super::record::LockRecord;
use super::store::LockStore;
use super::types::{LockStatus, StaleReason};
use crate::config::{ProbeFailurePolicy, SingletonConfig};
use crate::error::{Result, SingletonError};
use crate::probe::{ProbeOutcome, StartTimeProbe, probe_for};
use tracing::{debug, info, warn};

/// Single-instance enforcement for one guarded entity.
///
/// Acquisition reads the lock file, corroborates any recorded holder with
/// the probe, and either rejects with [`SingletonError::LockHeld`] or writes
/// a fresh record for this process.
///
/// The read-decide-write sequence is not atomic: two processes that both
/// find the file unclaimed at the same moment can both acquire. Callers are
/// expected to be short-lived, independently scheduled processes for which
/// that window is negligible.
#[derive(Debug)]
pub struct Singleton<P = Box<dyn StartTimeProbe>> {
    store: LockStore,
    probe: P,
    on_probe_failure: ProbeFailurePolicy,
}

impl Singleton {
    /// Build a singleton from configuration, using the configured OS probe.
    pub fn from_config(config: &SingletonConfig) -> Result<Self> {
        config.validate()?;
        let store = LockStore::new(config.lock_path()?);
        let probe = probe_for(config.probe)?;
        Ok(Singleton::new(store, probe).with_probe_failure_policy(config.on_probe_failure))
    }
}

impl<P: StartTimeProbe> Singleton<P> {
    pub fn new(store: LockStore, probe: P) -> Self {
        Self {
            store,
            probe,
            on_probe_failure: ProbeFailurePolicy::default(),
        }
    }

    pub fn with_probe_failure_policy(mut self, policy: ProbeFailurePolicy) -> Self {
        self.on_probe_failure = policy;
        self
    }

    pub fn store(&self) -> &LockStore {
        &self.store
    }

    /// Corroborate the lock file against the process table without writing.
    pub fn status(&self) -> LockStatus {
        match self.store.read() {
            Some(record) => self.corroborate(record),
            None => LockStatus::Unclaimed,
        }
    }

    /// Take the lock for this process.
    ///
    /// # Returns
    ///
    /// * `Ok(SingletonGuard)` - Lock acquired; released when the guard drops
    /// * `Err(SingletonError::LockHeld)` - Another live instance holds it (record untouched)
    /// * `Err(SingletonError::Io)` - The claim could not be written
    /// * `Err(SingletonError::Probe)` - This process's own start time is unknown
    pub fn acquire(&self) -> Result<SingletonGuard> {
        let status = self.status();
        if self.blocks_acquisition(&status) {
            let pid = status.record().map(|r| r.holder_pid).unwrap_or_default();
            info!(path = %self.store.path().display(), pid, "lock held by another instance");
            return Err(SingletonError::LockHeld { pid });
        }

        match &status {
            LockStatus::Stale { record, reason } => {
                warn!(path = %self.store.path().display(), stale = %record, %reason, "reclaiming stale lock");
            }
            LockStatus::Unknown { record, error } => {
                warn!(path = %self.store.path().display(), holder = %record, %error, "cannot verify lock holder, reclaiming");
            }
            _ => debug!(path = %self.store.path().display(), "lock unclaimed"),
        }

        let record = LockRecord::new(std::process::id(), self.probe.current_start_time()?);
        self.store.write(&record)?;
        info!(path = %self.store.path().display(), pid = record.holder_pid, "acquired lock");

        Ok(SingletonGuard::new(self.store.clone(), record))
    }

    /// Run `body` while holding the lock.
    ///
    /// The lock is released when `body` returns or unwinds. A failure to
    /// clear the record after a normal return is reported as an error.
    pub fn run<T, F>(&self, body: F) -> Result<T>
    where
        F: FnOnce() -> T,
    {
        let guard = self.acquire()?;
        let value = body();
        guard.release()?;
        Ok(value)
    }

    /// Clear the lock record without acquiring.
    ///
    /// A live holder (or an unverifiable one under `AssumeHeld`) is only
    /// cleared with `force`. Returns the status observed before clearing.
    pub fn force_clear(&self, force: bool) -> Result<LockStatus> {
        let status = self.status();
        match &status {
            LockStatus::Unclaimed => return Ok(status),
            s if self.blocks_acquisition(s) && !force => {
                let pid = s.record().map(|r| r.holder_pid).unwrap_or_default();
                return Err(SingletonError::LockHeld { pid });
            }
            _ => {}
        }

        self.store.clear()?;
        warn!(path = %self.store.path().display(), previous = %status, "lock record cleared");
        Ok(status)
    }

    fn corroborate(&self, record: LockRecord) -> LockStatus {
        match self.probe.start_time_of(record.holder_pid) {
            ProbeOutcome::Running(current) if current == record.start_time => {
                LockStatus::Held { record }
            }
            ProbeOutcome::Running(current) => LockStatus::Stale {
                record,
                reason: StaleReason::PidReused {
                    current_start_time: current,
                },
            },
            ProbeOutcome::NotRunning => LockStatus::Stale {
                record,
                reason: StaleReason::NotRunning,
            },
            ProbeOutcome::Unavailable(error) => LockStatus::Unknown { record, error },
        }
    }

    fn blocks_acquisition(&self, status: &LockStatus) -> bool {
        match status {
            LockStatus::Held { .. } => true,
            LockStatus::Unknown { .. } => self.on_probe_failure == ProbeFailurePolicy::AssumeHeld,
            LockStatus::Unclaimed | LockStatus::Stale { .. } => false,
        }
    }
}
