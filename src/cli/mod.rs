//! CLI argument parsing for pidguard.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Args, Parser, Subcommand};
use pidguard::config::{ProbeFailurePolicy, ProbeKind};
use std::path::PathBuf;

/// pidguard: run at most one instance of a job per host.
///
/// The lock is a file `<dir>/.<name>.pid` holding the PID and start time of
/// the current holder. A record left behind by a crashed run is detected
/// and reclaimed automatically.
#[derive(Parser, Debug)]
#[command(name = "pidguard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Identity of the guarded job (lock file is `.<NAME>.pid`).
    #[arg(short, long, global = true)]
    pub name: Option<String>,

    /// Directory holding the lock file [default: current directory].
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    /// YAML config file; command-line options override its values.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// How to look up process start times.
    #[arg(long, global = true, value_enum)]
    pub probe: Option<ProbeKind>,

    /// What to do when a recorded holder cannot be checked.
    #[arg(long, global = true, value_enum)]
    pub on_probe_failure: Option<ProbeFailurePolicy>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands for pidguard.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a command while holding the lock.
    ///
    /// Exits with the command's exit code, or 4 if another instance
    /// already holds the lock.
    Run(RunArgs),

    /// Hold the lock while sleeping (demonstration job).
    Sleep(SleepArgs),

    /// Show who holds the lock, if anyone.
    Status(StatusArgs),

    /// Clear a stale lock record.
    ///
    /// Refuses to clear a record whose holder is still running unless
    /// --force is given.
    Clear(ClearArgs),
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Program and arguments to run under the lock.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Arguments for the `sleep` command.
#[derive(Args, Debug)]
pub struct SleepArgs {
    /// How long to hold the lock.
    #[arg(short, long, default_value_t = 10)]
    pub seconds: u64,
}

/// Arguments for the `status` command.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the status as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `clear` command.
#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Clear even if the recorded holder is still running.
    #[arg(short, long)]
    pub force: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_with_trailing_command() {
        let cli = Cli::try_parse_from([
            "pidguard", "--name", "Job", "run", "--", "backup.sh", "--full", "-v",
        ])
        .unwrap();

        assert_eq!(cli.global.name.as_deref(), Some("Job"));
        match cli.command {
            Command::Run(args) => assert_eq!(args.command, ["backup.sh", "--full", "-v"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pidguard",
            "status",
            "--name",
            "Job",
            "--dir",
            "/tmp/locks",
            "--probe",
            "procfs",
            "--on-probe-failure",
            "assume-held",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.global.dir, Some(PathBuf::from("/tmp/locks")));
        assert_eq!(cli.global.probe, Some(ProbeKind::Procfs));
        assert_eq!(
            cli.global.on_probe_failure,
            Some(ProbeFailurePolicy::AssumeHeld)
        );
        assert!(matches!(cli.command, Command::Status(StatusArgs { json: true })));
    }

    #[test]
    fn sleep_defaults_to_ten_seconds() {
        let cli = Cli::try_parse_from(["pidguard", "-n", "Job", "sleep"]).unwrap();
        assert!(matches!(cli.command, Command::Sleep(SleepArgs { seconds: 10 })));
    }

    #[test]
    fn run_requires_a_command() {
        assert!(Cli::try_parse_from(["pidguard", "-n", "Job", "run"]).is_err());
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["pidguard", "-v", "-q", "status"]).is_err());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
