//! Lock status reporting types.

use super::record::LockRecord;
use crate::probe::StartTime;
use serde::Serialize;
use std::fmt;

/// Why a recorded holder no longer counts as holding the lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StaleReason {
    /// No process with the recorded PID exists.
    NotRunning,
    /// The PID exists but belongs to a process started at a different time.
    PidReused { current_start_time: StartTime },
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaleReason::NotRunning => f.write_str("process is not running"),
            StaleReason::PidReused { current_start_time } => write!(
                f,
                "PID was reused by a process started {}",
                current_start_time
            ),
        }
    }
}

/// Outcome of corroborating the lock file against the process table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LockStatus {
    /// The lock file is missing, empty, or malformed.
    Unclaimed,
    /// The recorded holder is alive with a matching start time.
    Held { record: LockRecord },
    /// The recorded holder is gone.
    Stale {
        record: LockRecord,
        reason: StaleReason,
    },
    /// The OS could not be asked about the recorded holder.
    Unknown { record: LockRecord, error: String },
}

impl LockStatus {
    /// The record on disk, if any.
    pub fn record(&self) -> Option<&LockRecord> {
        match self {
            LockStatus::Unclaimed => None,
            LockStatus::Held { record }
            | LockStatus::Stale { record, .. }
            | LockStatus::Unknown { record, .. } => Some(record),
        }
    }

    pub fn is_held(&self) -> bool {
        matches!(self, LockStatus::Held { .. })
    }
}

impl fmt::Display for LockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockStatus::Unclaimed => f.write_str("unclaimed"),
            LockStatus::Held { record } => write!(f, "held by {}", record),
            LockStatus::Stale { record, reason } => {
                write!(f, "stale record for {} ({})", record, reason)
            }
            LockStatus::Unknown { record, error } => {
                write!(f, "unknown: cannot verify {} ({})", record, error)
            }
        }
    }
}
