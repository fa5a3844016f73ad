use crate::probe::{ProbeOutcome, StartTime, StartTimeProbe};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// In-memory process table.
///
/// The test process itself is always present with start time `"self"`
/// unless overridden, so acquisitions can write a record.
#[derive(Debug, Default)]
pub(crate) struct FakeProbe {
    table: RefCell<HashMap<u32, ProbeOutcome>>,
}

impl FakeProbe {
    pub(crate) fn new() -> Self {
        let probe = Self::default();
        probe.spawn(std::process::id(), "self");
        probe
    }

    /// Add (or restart) a process.
    pub(crate) fn spawn(&self, pid: u32, start_time: &str) {
        self.table.borrow_mut().insert(
            pid,
            ProbeOutcome::Running(StartTime::new(start_time).unwrap()),
        );
    }

    pub(crate) fn kill(&self, pid: u32) {
        self.table.borrow_mut().remove(&pid);
    }

    /// Make queries for `pid` fail as if `ps` were broken.
    pub(crate) fn break_for(&self, pid: u32) {
        self.table
            .borrow_mut()
            .insert(pid, ProbeOutcome::Unavailable("ps: not found".to_string()));
    }

    pub(crate) fn self_start_time() -> StartTime {
        StartTime::new("self").unwrap()
    }
}

impl StartTimeProbe for FakeProbe {
    fn start_time_of(&self, pid: u32) -> ProbeOutcome {
        if pid == 0 {
            return ProbeOutcome::NotRunning;
        }
        self.table
            .borrow()
            .get(&pid)
            .cloned()
            .unwrap_or(ProbeOutcome::NotRunning)
    }
}
