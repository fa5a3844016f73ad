//! Termination signal handling for the pidguard binary.
//!
//! SIGINT, SIGTERM, and SIGHUP are recorded instead of killing the process,
//! so guarded bodies can notice them, return, and let the lock guard clear
//! the record on the way out.

use std::io;
use std::sync::atomic::{AtomicI32, Ordering};

/// Last termination signal received, or 0.
static PENDING: AtomicI32 = AtomicI32::new(0);

/// Exit code convention for "terminated by signal `signo`".
pub fn exit_code_for(signo: i32) -> i32 {
    128 + signo
}

/// The termination signal received so far, if any.
pub fn pending() -> Option<i32> {
    match PENDING.load(Ordering::SeqCst) {
        0 => None,
        signo => Some(signo),
    }
}

#[cfg(unix)]
extern "C" fn record_signal(signo: libc::c_int) {
    PENDING.store(signo, Ordering::SeqCst);
}

/// Install handlers for SIGINT, SIGTERM, and SIGHUP.
///
/// Handlers are reset to the default by `exec`, so spawned commands keep
/// ordinary signal behavior.
#[cfg(unix)]
pub fn install() -> io::Result<()> {
    for signo in [libc::SIGINT, libc::SIGTERM, libc::SIGHUP] {
        // The handler only stores to an atomic, which is async-signal-safe.
        let result = unsafe {
            let mut action: libc::sigaction = std::mem::zeroed();
            action.sa_sigaction = record_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;
            action.sa_flags = libc::SA_RESTART;
            libc::sigemptyset(&mut action.sa_mask);
            libc::sigaction(signo, &action, std::ptr::null_mut())
        };
        if result != 0 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

#[cfg(not(unix))]
pub fn install() -> io::Result<()> {
    Ok(())
}

/// Send `signo` to the process `pid`.
#[cfg(unix)]
pub fn forward(pid: u32, signo: i32) -> io::Result<()> {
    let pid = libc::pid_t::try_from(pid)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "PID out of range"))?;
    if unsafe { libc::kill(pid, signo) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_follows_shell_convention() {
        assert_eq!(exit_code_for(2), 130);
        assert_eq!(exit_code_for(15), 143);
    }

    #[cfg(unix)]
    #[test]
    fn forward_to_missing_process_fails() {
        // PIDs this large are never allocated on Linux or macOS.
        assert!(forward(u32::MAX / 2, 0).is_err());
    }
}
