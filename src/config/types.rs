//! Configuration types and defaults for pidguard.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which OS facility answers start-time queries.
///
/// Tokens from different probes are not comparable, so every process
/// guarding the same entity must be configured with the same probe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ProbeKind {
    /// `ps -p <pid> -o lstart=` (default, any Unix with a POSIX-ish `ps`).
    #[default]
    Ps,
    /// `/proc/<pid>/stat` (Linux only, no child process).
    Procfs,
}

/// How to treat a recorded holder whose liveness the OS could not report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ProbeFailurePolicy {
    /// Treat the holder as gone and reclaim the lock (fail open, default).
    #[default]
    AssumeAbsent,
    /// Treat the holder as still running and refuse to acquire (fail safe).
    AssumeHeld,
}

/// Default lock directory: the current working directory.
pub fn default_lock_dir() -> PathBuf {
    PathBuf::from(".")
}
