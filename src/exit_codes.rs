//! Exit code constants for the pidguard CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config)
//! - 3: I/O or process-probe failure
//! - 4: Lock held by another live instance

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid identity, or unreadable config.
pub const USER_ERROR: i32 = 1;

/// The lock file could not be written or cleared, or the OS could not be queried.
pub const IO_FAILURE: i32 = 3;

/// Another live instance holds the lock.
pub const LOCK_HELD: i32 = 4;
