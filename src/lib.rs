//! pidguard: run at most one instance of a job per host.
//!
//! A guarded entity claims a lock file, `<lock_dir>/.<identity>.pid`,
//! holding its PID and process start time. A later contender only backs off
//! if the OS still reports that same PID with that same start time, so a
//! crashed holder or a recycled PID never blocks the next run.
//!
//! ```no_run
//! use pidguard::config::SingletonConfig;
//! use pidguard::locks::Singleton;
//!
//! let singleton = Singleton::from_config(&SingletonConfig::new("nightly-backup"))?;
//! match singleton.run(|| { /* guarded work */ }) {
//!     Ok(()) => {}
//!     Err(e) if e.is_lock_held() => eprintln!("{}", e),
//!     Err(e) => return Err(e),
//! }
//! # Ok::<(), pidguard::error::SingletonError>(())
//! ```

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod locks;
pub mod probe;

#[cfg(test)]
pub(crate) mod test_support;
