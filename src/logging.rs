//! Tracing subscriber setup for the pidguard binary.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Default filter directive for the given verbosity flags.
fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialize the tracing subscriber.
///
/// Logs go to stderr so they never mix with command output on stdout.
/// `RUST_LOG`, when set, takes precedence over the verbosity flags.
/// Colors are only emitted when stderr is a terminal.
pub fn init_tracing(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    // Already initialized (e.g. in tests) is not an error worth reporting.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
