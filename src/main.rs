//! pidguard: single-instance runner for cron-style jobs.
//!
//! This is the main entry point for the `pidguard` CLI. It parses arguments,
//! dispatches to the appropriate command handler, and handles errors with
//! proper exit codes.

mod cli;
mod commands;
mod logging;
mod signals;

use cli::Cli;
use pidguard::exit_codes;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init_tracing(cli.global.verbose, cli.global.quiet);

    // Ctrl-C / SIGTERM must unwind through the lock guard, not kill us outright.
    if let Err(err) = signals::install() {
        eprintln!("Error: failed to install signal handlers: {}", err);
        return ExitCode::from(exit_codes::IO_FAILURE as u8);
    }

    match commands::dispatch(&cli.global, cli.command) {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) if err.is_lock_held() => {
            // Another instance is active: expected, not a crash.
            eprintln!("{}", err);
            ExitCode::from(exit_codes::LOCK_HELD as u8)
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
