//! Implementation of the `pidguard status` command.

use crate::cli::StatusArgs;
use pidguard::error::{Result, SingletonError};
use pidguard::exit_codes;
use pidguard::locks::Singleton;
use pidguard::probe::StartTimeProbe;
use serde_json::json;

/// Execute the `pidguard status` command.
///
/// Read-only: reports the corroborated lock state without acquiring.
pub fn cmd_status<P: StartTimeProbe>(singleton: &Singleton<P>, args: StatusArgs) -> Result<i32> {
    let path = singleton.store().path();
    let status = singleton.status();

    if args.json {
        let report = json!({
            "path": path,
            "status": status,
        });
        let text = serde_json::to_string_pretty(&report).map_err(|e| {
            SingletonError::Config(format!("failed to serialize status: {}", e))
        })?;
        println!("{}", text);
    } else {
        println!("{}: {}", path.display(), status);
    }

    Ok(exit_codes::SUCCESS)
}
