//! Error types for pidguard.
//!
//! Only `LockHeld` is an expected outcome of acquisition; the remaining
//! variants are fatal for the caller.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pidguard operations.
#[derive(Error, Debug)]
pub enum SingletonError {
    /// A live process with a matching start time holds the lock.
    #[error("process already running: PID {pid}")]
    LockHeld { pid: u32 },

    /// The lock file could not be written, cleared, or its directory created.
    #[error("lock file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The OS could not report a start time for this process.
    #[error("process probe failed: {0}")]
    Probe(String),

    /// Invalid identity, lock directory, or config file.
    #[error("{0}")]
    Config(String),

    /// The guarded command could not be started.
    #[error("command failed: {0}")]
    Command(String),
}

impl SingletonError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SingletonError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SingletonError::LockHeld { .. } => exit_codes::LOCK_HELD,
            SingletonError::Io { .. } => exit_codes::IO_FAILURE,
            SingletonError::Probe(_) => exit_codes::IO_FAILURE,
            SingletonError::Config(_) => exit_codes::USER_ERROR,
            SingletonError::Command(_) => exit_codes::USER_ERROR,
        }
    }

    /// True when another instance is active; callers treat this as a graceful exit.
    pub fn is_lock_held(&self) -> bool {
        matches!(self, SingletonError::LockHeld { .. })
    }
}

/// Result type alias for pidguard operations.
pub type Result<T> = std::result::Result<T, SingletonError>;
