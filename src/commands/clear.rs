//! Implementation of the `pidguard clear` command.

use crate::cli::ClearArgs;
use pidguard::error::Result;
use pidguard::exit_codes;
use pidguard::locks::{LockStatus, Singleton};
use pidguard::probe::StartTimeProbe;

/// Execute the `pidguard clear` command.
pub fn cmd_clear<P: StartTimeProbe>(singleton: &Singleton<P>, args: ClearArgs) -> Result<i32> {
    let path = singleton.store().path();

    match singleton.force_clear(args.force)? {
        LockStatus::Unclaimed => println!("{}: nothing to clear", path.display()),
        previous => println!("{}: cleared ({})", path.display(), previous),
    }

    Ok(exit_codes::SUCCESS)
}
