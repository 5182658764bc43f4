//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading calculator
//! settings from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{CalculatorConfig, CalculatorSettings};

/// Name of the settings file inside a configuration directory.
const CONFIG_FILE_NAME: &str = "calculator.yaml";

/// Loads and provides access to calculator configuration.
///
/// The `ConfigLoader` reads `calculator.yaml` from a directory and resolves
/// the effective settings for a tenant.
///
/// # File Structure
///
/// ```text
/// config/default/
/// └── calculator.yaml
/// ```
///
/// ```yaml
/// defaults:
///   gap_tolerance_minutes: 3
///   max_duration_hours: 16
/// tenants:
///   night_shift:
///     max_duration_hours: 20
/// ```
///
/// # Example
///
/// ```no_run
/// use working_time_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let settings = loader.settings_for(Some("night_shift"));
/// println!("Max duration: {}h", settings.max_duration_hours);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: CalculatorConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `calculator.yaml` is missing
    /// - The file contains invalid YAML
    /// - Any resolved setting is unusable (zero maximum duration)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let file = path.as_ref().join(CONFIG_FILE_NAME);
        let path_str = file.display().to_string();

        let content = fs::read_to_string(&file).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses configuration from YAML text. `origin` is only used in error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> EngineResult<Self> {
        let config: CalculatorConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        Self::from_config(config)
    }

    /// Builds a loader from an already assembled configuration.
    pub fn from_config(config: CalculatorConfig) -> EngineResult<Self> {
        validate(&config.defaults, "defaults")?;
        for (tenant, overrides) in &config.tenants {
            validate(
                &config.defaults.with_override(overrides),
                &format!("tenants.{}", tenant),
            )?;
        }
        Ok(Self { config })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Returns the settings used when no tenant override applies.
    pub fn defaults(&self) -> CalculatorSettings {
        self.config.defaults
    }

    /// Resolves the effective settings for a tenant.
    ///
    /// Unknown tenants, and `None`, resolve to the defaults.
    pub fn settings_for(&self, tenant: Option<&str>) -> CalculatorSettings {
        match tenant.and_then(|t| self.config.tenants.get(t)) {
            Some(overrides) => self.config.defaults.with_override(overrides),
            None => self.config.defaults,
        }
    }
}

fn validate(settings: &CalculatorSettings, scope: &str) -> EngineResult<()> {
    if settings.max_duration_hours == 0 {
        return Err(EngineError::InvalidConfig {
            field: format!("{}.max_duration_hours", scope),
            message: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}
