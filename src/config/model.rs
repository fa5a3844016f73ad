//! SingletonConfig struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for one guarded entity.
///
/// Can be loaded from YAML; unknown fields are ignored and missing fields
/// take their defaults. `identity` may be left empty in a file and supplied
/// by the caller later, but a lock path cannot be derived until it is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingletonConfig {
    /// Stable name of the guarded entity; the lock file is `.<identity>.pid`.
    pub identity: String,

    /// Directory holding the lock file (default: current directory).
    #[serde(default = "default_lock_dir")]
    pub lock_dir: PathBuf,

    /// Start-time probe used to corroborate lock holders.
    pub probe: ProbeKind,

    /// Behavior when the probe cannot answer for a recorded holder.
    pub on_probe_failure: ProbeFailurePolicy,
}

impl Default for SingletonConfig {
    fn default() -> Self {
        Self {
            identity: String::new(),
            lock_dir: default_lock_dir(),
            probe: ProbeKind::default(),
            on_probe_failure: ProbeFailurePolicy::default(),
        }
    }
}

impl SingletonConfig {
    /// Config for `identity` with every other field at its default.
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            ..Self::default()
        }
    }

    pub fn with_lock_dir(mut self, lock_dir: impl Into<PathBuf>) -> Self {
        self.lock_dir = lock_dir.into();
        self
    }

    pub fn with_probe(mut self, probe: ProbeKind) -> Self {
        self.probe = probe;
        self
    }

    pub fn with_probe_failure_policy(mut self, policy: ProbeFailurePolicy) -> Self {
        self.on_probe_failure = policy;
        self
    }
}
