//! Configuration for the dialog host
//!
//! Settings are read from a TOML file. When no path is given, the host looks
//! for `host.toml` in the platform-appropriate config directory under
//! `dev.hxyulin.dialog-host`:
//!
//! - **Linux**: `~/.config/dev.hxyulin.dialog-host/`
//! - **macOS**: `~/Library/Application Support/dev.hxyulin.dialog-host/`
//! - **Windows**: `%APPDATA%\dev.hxyulin.dialog-host\`
//!
//! # Example
//!
//! ```toml
//! outbound_queue_capacity = 1024
//! validator_timeout_ms = 30000
//! log_filter = "info,dialog_host=debug"
//! ```

use crate::error::{HostError, Result};
use crate::proxy::DEFAULT_OUTBOUND_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application identifier for config directories
pub const APP_ID: &str = "dev.hxyulin.dialog-host";

/// Config filename
pub const CONFIG_FILE: &str = "host.toml";

/// Default tracing filter
pub const DEFAULT_LOG_FILTER: &str = "info,dialog_host=debug";

/// Get the path to the default config file
pub fn config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID).join(CONFIG_FILE))
}

/// Host settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Capacity of the outbound message queue
    pub outbound_queue_capacity: usize,

    /// How long a close or navigation question waits for the remote's answer.
    /// `None` waits forever.
    pub validator_timeout_ms: Option<u64>,

    /// Tracing filter used when `RUST_LOG` is not set
    pub log_filter: String,

    /// Directory for daily rolling log files; stdout only when unset
    pub log_dir: Option<PathBuf>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            outbound_queue_capacity: DEFAULT_OUTBOUND_CAPACITY,
            validator_timeout_ms: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_dir: None,
        }
    }
}

impl HostConfig {
    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            HostError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: HostConfig = toml::from_str(&content)
            .map_err(|e| HostError::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the default location, falling back to defaults
    pub fn load_or_default() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load host config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| HostError::Serialization(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.outbound_queue_capacity == 0 {
            return Err(HostError::Config(
                "outbound_queue_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validator_timeout(&self) -> Option<Duration> {
        self.validator_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_have_no_timeout() {
        let config = HostConfig::default();
        assert_eq!(config.validator_timeout(), None);
        assert_eq!(config.outbound_queue_capacity, DEFAULT_OUTBOUND_CAPACITY);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "validator_timeout_ms = 250\n").unwrap();

        let config = HostConfig::load(&path).unwrap();
        assert_eq!(config.validator_timeout(), Some(Duration::from_millis(250)));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = HostConfig {
            outbound_queue_capacity: 16,
            validator_timeout_ms: Some(1000),
            log_filter: "warn".to_string(),
            log_dir: Some(dir.path().join("logs")),
        };

        config.save(&path).unwrap();
        assert_eq!(HostConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "outbound_queue_capacity = 0\n").unwrap();

        assert!(matches!(HostConfig::load(&path), Err(HostError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempdir().unwrap();
        let err = HostConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
