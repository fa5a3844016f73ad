//! Implementation of the `pidguard run` command.

use crate::cli::RunArgs;
use crate::signals;
use pidguard::error::{Result, SingletonError};
use pidguard::locks::Singleton;
use pidguard::probe::StartTimeProbe;
use std::process::{Child, Command, ExitStatus};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

/// Exit code reported when the child's status carries neither a code nor a signal.
const SIGNALLED_EXIT: i32 = 1;

/// How often the wrapper checks on the child and for termination signals.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Execute the `pidguard run` command.
///
/// The child inherits stdin/stdout/stderr. Its exit code becomes ours.
/// The lock names this wrapper's PID, so the wrapper must not exit before
/// the child: a termination signal is forwarded to the child and the lock
/// is released only once the child has been reaped.
pub fn cmd_run<P: StartTimeProbe>(singleton: &Singleton<P>, args: RunArgs) -> Result<i32> {
    let Some((program, program_args)) = args.command.split_first() else {
        return Err(SingletonError::Command("no command given".to_string()));
    };

    let status = singleton.run(|| -> Result<ExitStatus> {
        info!(%program, "starting guarded command");
        let child = Command::new(program)
            .args(program_args)
            .spawn()
            .map_err(|e| SingletonError::Command(format!("failed to start '{}': {}", program, e)))?;
        wait_forwarding_signals(child)
            .map_err(|e| SingletonError::Command(format!("failed to wait for '{}': {}", program, e)))
    })??;

    info!(%program, %status, "guarded command finished");
    Ok(exit_code_of(status))
}

/// Wait for `child`, passing on the first termination signal this process receives.
fn wait_forwarding_signals(mut child: Child) -> std::io::Result<ExitStatus> {
    let mut forwarded = false;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if !forwarded && let Some(signo) = signals::pending() {
            forwarded = true;
            warn!(pid = child.id(), signo, "forwarding signal to guarded command");
            forward_signal(&mut child, signo)?;
        }
        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(unix)]
fn forward_signal(child: &mut Child, signo: i32) -> std::io::Result<()> {
    match signals::forward(child.id(), signo) {
        // Already exited; try_wait picks it up next round.
        Err(e) if e.raw_os_error() == Some(libc::ESRCH) => Ok(()),
        other => other,
    }
}

#[cfg(not(unix))]
fn forward_signal(child: &mut Child, _signo: i32) -> std::io::Result<()> {
    child.kill()
}

#[cfg(unix)]
fn exit_code_of(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(signals::exit_code_for))
        .unwrap_or(SIGNALLED_EXIT)
}

#[cfg(not(unix))]
fn exit_code_of(status: ExitStatus) -> i32 {
    status.code().unwrap_or(SIGNALLED_EXIT)
}
