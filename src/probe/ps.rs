//! `ps`-backed start-time probe.

use super::{ProbeOutcome, StartTime, StartTimeProbe};
use std::ffi::OsString;
use std::process::{Command, Output};
use tracing::debug;

/// Queries `ps -p <pid> -o lstart=`.
///
/// `lstart` is the full start timestamp (e.g. `Thu Oct 15 19:41:02 2026`),
/// precise to the second, which is enough to tell a recycled PID apart.
/// `ps` renders it in the caller's time zone and locale, so both are pinned
/// to keep tokens identical across contenders with different environments.
#[derive(Debug, Clone)]
pub struct PsProbe {
    program: OsString,
}

impl PsProbe {
    pub fn new() -> Self {
        Self::with_program("ps")
    }

    /// Use a different `ps` executable (absolute path or name on `PATH`).
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, pid: u32) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-p", &pid.to_string(), "-o", "lstart="])
            .env("TZ", "UTC")
            .env("LC_ALL", "C")
            .env_remove("LC_TIME");
        cmd
    }
}

impl Default for PsProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl StartTimeProbe for PsProbe {
    fn start_time_of(&self, pid: u32) -> ProbeOutcome {
        if pid == 0 {
            return ProbeOutcome::NotRunning;
        }

        let output = match self.command(pid).output() {
            Ok(output) => output,
            Err(e) => {
                return ProbeOutcome::Unavailable(format!(
                    "failed to execute {}: {}",
                    self.program.to_string_lossy(),
                    e
                ));
            }
        };

        let outcome = classify_output(&output);
        debug!(pid, ?outcome, "ps probe");
        outcome
    }
}

/// Interpret a finished `ps` invocation.
///
/// `ps -p` exits non-zero with empty output when the PID does not exist;
/// anything on stderr means `ps` itself is unhappy (bad option, no /proc).
fn classify_output(output: &Output) -> ProbeOutcome {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = stdout.trim();
    let stderr = stderr.trim();

    if !stderr.is_empty() {
        return ProbeOutcome::Unavailable(format!("ps: {}", stderr));
    }
    if stdout.is_empty() {
        return ProbeOutcome::NotRunning;
    }
    if !output.status.success() {
        return ProbeOutcome::Unavailable(format!("ps exited with {}", output.status));
    }

    match StartTime::new(stdout) {
        Some(start_time) => ProbeOutcome::Running(start_time),
        None => ProbeOutcome::Unavailable(format!("unexpected ps output: {:?}", stdout)),
    }
}
