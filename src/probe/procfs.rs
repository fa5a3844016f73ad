//! `/proc`-backed start-time probe (Linux).

use super::{ProbeOutcome, StartTime, StartTimeProbe};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// Index of `starttime` among the fields that follow `comm` in `/proc/<pid>/stat`.
///
/// `starttime` is field 22 overall; the first field after `comm` is field 3.
const STARTTIME_FIELD: usize = 22 - 3;

/// Reads `starttime` (clock ticks since boot) from `/proc/<pid>/stat`.
///
/// Unlike `lstart`, this has sub-second resolution and needs no child
/// process, but its tokens are not comparable with [`super::PsProbe`]
/// tokens. Every process guarding the same entity must use the same probe.
#[derive(Debug, Clone)]
pub struct ProcfsProbe {
    proc_root: PathBuf,
}

impl ProcfsProbe {
    pub fn new() -> Self {
        Self::with_root("/proc")
    }

    /// Read process entries from a different procfs mount.
    pub fn with_root(proc_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
        }
    }
}

impl Default for ProcfsProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl StartTimeProbe for ProcfsProbe {
    fn start_time_of(&self, pid: u32) -> ProbeOutcome {
        if pid == 0 {
            return ProbeOutcome::NotRunning;
        }

        let stat_path = self.proc_root.join(pid.to_string()).join("stat");
        let outcome = match std::fs::read_to_string(&stat_path) {
            Ok(content) if is_defunct(&content) => ProbeOutcome::NotRunning,
            Ok(content) => match parse_starttime(&content) {
                Some(start_time) => ProbeOutcome::Running(start_time),
                None => ProbeOutcome::Unavailable(format!(
                    "unexpected content in '{}'",
                    stat_path.display()
                )),
            },
            // ESRCH shows up when the process exits between open and read.
            Err(e) if e.kind() == ErrorKind::NotFound || e.raw_os_error() == Some(libc::ESRCH) => {
                ProbeOutcome::NotRunning
            }
            Err(e) => {
                ProbeOutcome::Unavailable(format!("failed to read '{}': {}", stat_path.display(), e))
            }
        };

        debug!(pid, ?outcome, "procfs probe");
        outcome
    }
}

/// A zombie (`Z`) or dead (`X`) process has exited even though its entry remains.
fn is_defunct(stat: &str) -> bool {
    stat.rsplit_once(')')
        .and_then(|(_, rest)| rest.split_whitespace().next())
        .is_some_and(|state| state == "Z" || state == "X")
}

/// Extract `starttime` from the contents of a `stat` file.
///
/// `comm` is wrapped in parentheses and may itself contain spaces or
/// parentheses, so fields are counted from the last `)`.
fn parse_starttime(stat: &str) -> Option<StartTime> {
    let (_, rest) = stat.rsplit_once(')')?;
    let ticks = rest.split_whitespace().nth(STARTTIME_FIELD)?;
    if !ticks.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    StartTime::new(ticks)
}
