//! Config loading, validation, and path derivation.

use super::model::SingletonConfig;
use super::types::ProbeKind;
use crate::error::{Result, SingletonError};
use crate::locks::{lock_file_name, validate_identity};
use std::path::{Path, PathBuf};

impl SingletonConfig {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(SingletonConfig)` - Successfully loaded and validated config
    /// * `Err(SingletonError::Config)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SingletonError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: SingletonConfig = serde_yaml::from_str(yaml)
            .map_err(|e| SingletonError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            SingletonError::Config(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `identity`, when set, must be usable as a file name component
    /// - `lock_dir` must not be empty
    /// - `probe: procfs` requires Linux
    pub fn validate(&self) -> Result<()> {
        if !self.identity.is_empty() {
            validate_identity(&self.identity)?;
        }

        if self.lock_dir.as_os_str().is_empty() {
            return Err(SingletonError::Config(
                "config validation failed: lock_dir must not be empty".to_string(),
            ));
        }

        if self.probe == ProbeKind::Procfs && !cfg!(target_os = "linux") {
            return Err(SingletonError::Config(
                "config validation failed: probe 'procfs' is only available on Linux".to_string(),
            ));
        }

        Ok(())
    }

    /// Full path of the lock file for this entity.
    pub fn lock_path(&self) -> Result<PathBuf> {
        validate_identity(&self.identity)?;
        Ok(self.lock_dir.join(lock_file_name(&self.identity)))
    }
}
