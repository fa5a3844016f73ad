//! Process start-time probes.
//!
//! A probe answers one question: "when did process `pid` start?" The answer
//! is an opaque [`StartTime`] token that is only ever compared for equality.
//! Pairing a PID with its start time is what lets a lock record survive PID
//! reuse: a recycled PID belongs to a process with a different start time.
//!
//! Two OS-backed probes are provided:
//! - [`PsProbe`]: asks `ps -p <pid> -o lstart=` (portable across Unix hosts).
//! - [`ProcfsProbe`] (Linux only): reads `starttime` from `/proc/<pid>/stat`.
//!
//! Every probe reports "no such process" ([`ProbeOutcome::NotRunning`])
//! separately from "the OS could not be asked" ([`ProbeOutcome::Unavailable`]).
//! Whether an unavailable answer counts as absent is decided by the caller.

#[cfg(target_os = "linux")]
mod procfs;
mod ps;


use crate::config::ProbeKind;
use crate::error::{Result, SingletonError};
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(target_os = "linux")]
pub use procfs::ProcfsProbe;
pub use ps::PsProbe;

/// Opaque start-time token for a process.
///
/// Tokens never contain commas or line breaks, so they can be stored as the
/// second field of a one-line lock record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StartTime(String);

impl StartTime {
    /// Wrap a raw token, rejecting values that could not round-trip through a lock file.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() || raw.contains([',', '\n', '\r']) {
            return None;
        }
        Some(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StartTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of asking the OS about a process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The process exists and started at the given instant.
    Running(StartTime),
    /// No process with this PID exists.
    NotRunning,
    /// The OS could not be queried (tool missing, permission denied, unexpected output).
    Unavailable(String),
}

/// Source of process start times.
pub trait StartTimeProbe {
    /// Look up the start time of `pid`.
    ///
    /// PID 0 is never a valid lock holder and yields `NotRunning` without
    /// touching the OS.
    fn start_time_of(&self, pid: u32) -> ProbeOutcome;

    /// Start time of the calling process.
    ///
    /// A claim written without a start time could never be corroborated, so
    /// anything other than `Running` is an error here.
    fn current_start_time(&self) -> Result<StartTime> {
        let pid = std::process::id();
        match self.start_time_of(pid) {
            ProbeOutcome::Running(start_time) => Ok(start_time),
            ProbeOutcome::NotRunning => Err(SingletonError::Probe(format!(
                "own process (PID {pid}) not found in the process table"
            ))),
            ProbeOutcome::Unavailable(reason) => Err(SingletonError::Probe(reason)),
        }
    }
}

impl<P: StartTimeProbe + ?Sized> StartTimeProbe for Box<P> {
    fn start_time_of(&self, pid: u32) -> ProbeOutcome {
        (**self).start_time_of(pid)
    }
}

impl<P: StartTimeProbe + ?Sized> StartTimeProbe for &P {
    fn start_time_of(&self, pid: u32) -> ProbeOutcome {
        (**self).start_time_of(pid)
    }
}

/// Parse the textual PID field of a lock record.
///
/// Only plain decimal digits are accepted (no sign, no whitespace), and 0 is
/// rejected since it never names a real lock holder.
pub fn parse_pid(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u32>().ok().filter(|&pid| pid > 0)
}

/// Build the probe selected by configuration.
pub fn probe_for(kind: ProbeKind) -> Result<Box<dyn StartTimeProbe>> {
    match kind {
        ProbeKind::Ps => Ok(Box::new(PsProbe::new())),
        #[cfg(target_os = "linux")]
        ProbeKind::Procfs => Ok(Box::new(ProcfsProbe::new())),
        #[cfg(not(target_os = "linux"))]
        ProbeKind::Procfs => Err(SingletonError::Config(
            "the procfs probe is only available on Linux".to_string(),
        )),
    }
}
