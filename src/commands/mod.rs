//! Command implementations for pidguard.
//!
//! This module resolves the effective configuration from the config file
//! and command-line overrides, then routes each subcommand to its handler.
//! Handlers return the process exit code on success.

mod clear;
mod run;
mod sleep;
mod status;

use crate::cli::{Command, GlobalArgs};
use pidguard::config::SingletonConfig;
use pidguard::error::{Result, SingletonError};
use pidguard::locks::Singleton;

/// Dispatch a command to its implementation.
pub fn dispatch(global: &GlobalArgs, command: Command) -> Result<i32> {
    let config = resolve_config(global)?;
    let singleton = Singleton::from_config(&config)?;

    match command {
        Command::Run(args) => run::cmd_run(&singleton, args),
        Command::Sleep(args) => sleep::cmd_sleep(&singleton, args),
        Command::Status(args) => status::cmd_status(&singleton, args),
        Command::Clear(args) => clear::cmd_clear(&singleton, args),
    }
}

/// Merge the optional config file with command-line overrides.
fn resolve_config(global: &GlobalArgs) -> Result<SingletonConfig> {
    let mut config = match &global.config {
        Some(path) => SingletonConfig::load(path)?,
        None => SingletonConfig::default(),
    };

    if let Some(name) = &global.name {
        config.identity = name.clone();
    }
    if let Some(dir) = &global.dir {
        config.lock_dir = dir.clone();
    }
    if let Some(probe) = global.probe {
        config.probe = probe;
    }
    if let Some(policy) = global.on_probe_failure {
        config.on_probe_failure = policy;
    }

    if config.identity.is_empty() {
        return Err(SingletonError::Config(
            "no job name given: pass --name or set `identity` in the config file".to_string(),
        ));
    }

    config.validate()?;
    Ok(config)
}
