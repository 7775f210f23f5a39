//! Configuration system for fxrs
//!
//! This module provides a trait-based configuration system that supports:
//! - Type-safe config structs via serde
//! - TOML file format
//! - Auto-generation of default configs
//! - Manual reload capability
//!
//! # Example
//!
//! ```ignore
//! use serde::{Deserialize, Serialize};
//! use fxrs_core::ResourceConfig;
//!
//! #[derive(Default, Serialize, Deserialize)]
//! pub struct GarageConfig {
//!     pub max_vehicles: i32,
//!     pub plate_prefix: String,
//! }
//!
//! impl ResourceConfig for GarageConfig {
//!     const RESOURCE_NAME: &'static str = "garage";
//! }
//!
//! let config = GarageConfig::load().unwrap_or_default();
//! ```

mod loader;

use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::events::EventContext;

pub use loader::{
    configs_dir, core_config_path, core_config_path_in, fxrs_base_dir, resource_config_path,
    resource_config_path_in, HOME_ENV,
};

use loader::{load_or_create, read_toml, write_toml};

/// Configuration system errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write config file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML content
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config to TOML
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Neither `FXRS_HOME` nor the host executable location gave a base directory
    #[error("Config directory not available - set FXRS_HOME or check the host location")]
    NoConfigDirectory,
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Trait for per-resource configuration types.
///
/// Configs are stored at
/// `<base>/configs/resources/{RESOURCE_NAME}/{RESOURCE_NAME}.toml`.
/// The `*_in` variants take the base directory explicitly.
pub trait ResourceConfig: Default + Serialize + DeserializeOwned + Send + Sync {
    /// The resource name used for config file path resolution
    const RESOURCE_NAME: &'static str;

    /// Load config from file, creating default if missing.
    fn load() -> ConfigResult<Self> {
        Self::load_in(&fxrs_base_dir()?)
    }

    fn load_in(base: &Path) -> ConfigResult<Self> {
        load_or_create(&resource_config_path_in(base, Self::RESOURCE_NAME))
    }

    /// Save config to file.
    ///
    /// Creates parent directories if they don't exist.
    fn save(&self) -> ConfigResult<()> {
        self.save_in(&fxrs_base_dir()?)
    }

    fn save_in(&self, base: &Path) -> ConfigResult<()> {
        write_toml(&resource_config_path_in(base, Self::RESOURCE_NAME), self)
    }

    /// Reload config from file.
    ///
    /// Updates self with the current file contents.
    fn reload(&mut self) -> ConfigResult<()> {
        self.reload_in(&fxrs_base_dir()?)
    }

    fn reload_in(&mut self, base: &Path) -> ConfigResult<()> {
        *self = read_toml(&resource_config_path_in(base, Self::RESOURCE_NAME))?;
        tracing::debug!("Reloaded config for {}", Self::RESOURCE_NAME);
        Ok(())
    }
}

/// Core framework configuration.
///
/// Loaded from `<base>/configs/core.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Config version for future migration support
    pub version: u32,

    /// Enable debug logging
    pub debug: bool,

    /// Log listener failures
    pub log_event_errors: bool,

    /// Log every inbound and outbound event
    pub log_events: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            version: 1,
            debug: false,
            log_event_errors: true,
            log_events: false,
        }
    }
}

impl CoreConfig {
    /// Load core config from file, creating default if missing.
    pub fn load() -> ConfigResult<Self> {
        Self::load_in(&fxrs_base_dir()?)
    }

    pub fn load_in(base: &Path) -> ConfigResult<Self> {
        load_or_create(&core_config_path_in(base))
    }

    /// Save core config to file.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_in(&fxrs_base_dir()?)
    }

    pub fn save_in(&self, base: &Path) -> ConfigResult<()> {
        write_toml(&core_config_path_in(base), self)
    }

    /// Reload core config from file.
    pub fn reload(&mut self) -> ConfigResult<()> {
        self.reload_in(&fxrs_base_dir()?)
    }

    pub fn reload_in(&mut self, base: &Path) -> ConfigResult<()> {
        *self = read_toml(&core_config_path_in(base))?;
        tracing::debug!("Reloaded core config");
        Ok(())
    }

    /// Copy the logging switches into a dispatch context
    pub fn apply(&self, context: &EventContext) {
        context.set_log_event_errors(self.log_event_errors);
        context.set_log_events(self.log_events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxrs_engine::LoopbackHost;

    #[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
    struct GarageConfig {
        pub max_vehicles: i32,
        pub plate_prefix: String,
    }

    impl ResourceConfig for GarageConfig {
        const RESOURCE_NAME: &'static str = "garage";
    }

    #[test]
    fn test_core_config_default() {
        let config = CoreConfig::default();
        assert_eq!(config.version, 1);
        assert!(!config.debug);
        assert!(config.log_event_errors);
        assert!(!config.log_events);
    }

    #[test]
    fn test_missing_core_config_is_created() {
        let dir = tempfile::tempdir().unwrap();

        let config = CoreConfig::load_in(dir.path()).unwrap();
        assert_eq!(config, CoreConfig::default());
        assert!(core_config_path_in(dir.path()).exists());
    }

    #[test]
    fn test_partial_core_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = core_config_path_in(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "debug = true\nlog_events = true\n").unwrap();

        let config = CoreConfig::load_in(dir.path()).unwrap();
        assert!(config.debug);
        assert!(config.log_events);
        assert!(config.log_event_errors);
        assert_eq!(config.version, 1);
    }

    #[test]
    fn test_resource_config_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();

        let mut config = GarageConfig::load_in(dir.path()).unwrap();
        assert_eq!(config, GarageConfig::default());

        let updated = GarageConfig {
            max_vehicles: 4,
            plate_prefix: "FX".to_string(),
        };
        updated.save_in(dir.path()).unwrap();

        config.reload_in(dir.path()).unwrap();
        assert_eq!(config, updated);
        assert!(resource_config_path_in(dir.path(), "garage").exists());
    }

    #[test]
    fn test_malformed_config_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = resource_config_path_in(dir.path(), "garage");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "max_vehicles = \"many\"").unwrap();

        assert!(matches!(
            GarageConfig::load_in(dir.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_apply_sets_logger_switches() {
        let context = EventContext::new(LoopbackHost::shared());
        let config = CoreConfig {
            log_event_errors: false,
            log_events: true,
            ..CoreConfig::default()
        };

        config.apply(&context);
        assert!(!context.logger().logs_errors());
        assert!(context.logger().logs_events());
    }
}
