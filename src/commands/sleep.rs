//! Implementation of the `pidguard sleep` command.

use crate::cli::SleepArgs;
use crate::signals;
use pidguard::error::Result;
use pidguard::exit_codes;
use pidguard::locks::Singleton;
use pidguard::probe::StartTimeProbe;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// How often the sleeping holder checks for a termination signal.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Execute the `pidguard sleep` command: hold the lock for a while, then release it.
///
/// A termination signal cuts the sleep short; the lock is still released
/// and the exit code reports the signal.
pub fn cmd_sleep<P: StartTimeProbe>(singleton: &Singleton<P>, args: SleepArgs) -> Result<i32> {
    let interrupted = singleton.run(|| {
        info!(seconds = args.seconds, "holding lock");
        sleep_until_signalled(Duration::from_secs(args.seconds))
    })?;

    match interrupted {
        Some(signo) => {
            warn!(signo, "interrupted, lock released");
            Ok(signals::exit_code_for(signo))
        }
        None => Ok(exit_codes::SUCCESS),
    }
}

/// Sleep for `duration`, returning early with the signal number if one arrives.
fn sleep_until_signalled(duration: Duration) -> Option<i32> {
    let deadline = Instant::now() + duration;
    loop {
        if let Some(signo) = signals::pending() {
            return Some(signo);
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return None;
        }
        thread::sleep(remaining.min(POLL_INTERVAL));
    }
}
