//! The persisted lock record and its one-line encoding.

use crate::probe::{StartTime, parse_pid};
use serde::Serialize;
use std::fmt;

/// A claim on the singleton slot: who holds it and when that process started.
///
/// Encoded as a single line `"<pid>,<start_time>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockRecord {
    /// OS process identifier of the holder.
    pub holder_pid: u32,

    /// Start time of `holder_pid` as reported by the probe when the lock was taken.
    pub start_time: StartTime,
}

impl LockRecord {
    pub fn new(holder_pid: u32, start_time: StartTime) -> Self {
        Self {
            holder_pid,
            start_time,
        }
    }

    /// Serialize to the on-disk form.
    pub fn encode(&self) -> String {
        format!("{},{}", self.holder_pid, self.start_time)
    }

    /// Parse lock file content.
    ///
    /// Returns `None` for anything that is not exactly two comma-separated
    /// fields with a positive decimal PID and a non-empty start time. Empty
    /// content, a lone field, and garbage all mean "no claim".
    pub fn parse(content: &str) -> Option<Self> {
        let (pid, start_time) = content.trim().split_once(',')?;
        let holder_pid = parse_pid(pid)?;
        let start_time = StartTime::new(start_time)?;
        Some(Self::new(holder_pid, start_time))
    }
}

impl fmt::Display for LockRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PID {} (started {})", self.holder_pid, self.start_time)
    }
}
