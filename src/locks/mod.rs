//! Single-instance locking.
//!
//! At most one process per guarded entity may hold the lock. The claim is a
//! one-line file, `<lock_dir>/.<identity>.pid`, containing
//! `"<pid>,<start_time>"`. An empty (or missing, or malformed) file means
//! unclaimed.
//!
//! # Corroboration
//!
//! A recorded claim only blocks acquisition if the OS still reports a
//! process with that PID *and* the same start time. A crashed holder leaves
//! its record behind, but the next attempt sees the PID as gone (or owned by
//! a newer process) and reclaims the lock.
//!
//! # RAII Guards
//!
//! A successful acquisition returns a [`SingletonGuard`]. Dropping it
//! truncates the lock file; the file itself is kept for the next run.

mod guard;
mod operations;
mod record;
mod store;
mod types;


// Re-export public API
pub use guard::SingletonGuard;
pub use operations::Singleton;
pub use record::LockRecord;
pub use store::{LockStore, lock_file_name, validate_identity};
pub use types::{LockStatus, StaleReason};
