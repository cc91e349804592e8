//! Config loading, validation, and application.

use super::model::Config;
use crate::error::{CmdcapError, Result};
use crate::runner::CommandSpec;
use std::path::Path;
use std::time::Duration;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(CmdcapError::ConfigError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            CmdcapError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| CmdcapError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            CmdcapError::ConfigError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `timeout_seconds` must be finite, greater than 0, and fit in a `Duration`
    /// - `working_dir` must be non-empty
    /// - `environment` keys must be non-empty and must not contain `=`
    pub fn validate(&self) -> Result<()> {
        if let Some(secs) = self.timeout_seconds
            && (!secs.is_finite() || secs <= 0.0)
        {
            return Err(CmdcapError::ConfigError(format!(
                "timeout_seconds must be a positive number (found {})",
                secs
            )));
        }

        if let Some(secs) = self.timeout_seconds
            && Duration::try_from_secs_f64(secs).is_err()
        {
            return Err(CmdcapError::ConfigError(format!(
                "timeout_seconds is too large (found {})",
                secs
            )));
        }

        if let Some(dir) = &self.working_dir
            && dir.as_os_str().is_empty()
        {
            return Err(CmdcapError::ConfigError(
                "working_dir must not be empty".to_string(),
            ));
        }

        for key in self.environment.iter().flat_map(|env| env.keys()) {
            validate_env_key(key).map_err(CmdcapError::ConfigError)?;
        }

        Ok(())
    }

    /// `timeout_seconds` as a duration.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    /// Copy every setting this config defines onto `spec`.
    pub fn apply(&self, mut spec: CommandSpec) -> CommandSpec {
        if let Some(shell) = self.shell {
            spec.use_shell = shell;
        }
        if let Some(timeout) = self.timeout() {
            spec.timeout = Some(timeout);
        }
        if let Some(dir) = &self.working_dir {
            spec.working_dir = Some(dir.clone());
        }
        if let Some(env) = &self.environment {
            spec.environment = Some(env.clone());
        }
        spec
    }
}

/// Check that `key` can be used as an environment variable name.
pub(crate) fn validate_env_key(key: &str) -> std::result::Result<(), String> {
    if key.is_empty() {
        return Err("environment variable names must not be empty".to_string());
    }
    if key.contains('=') {
        return Err(format!(
            "environment variable name '{}' must not contain '='",
            key
        ));
    }
    Ok(())
}
