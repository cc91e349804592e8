//! Config struct definition.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default run settings loaded from YAML.
///
/// ```yaml
/// shell: false
/// timeout_seconds: 30
/// working_dir: /srv/app
/// environment:
///   PATH: /usr/bin:/bin
/// ```
///
/// Unset keys leave the corresponding run setting at its own default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Run commands through the platform shell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<bool>,

    /// Kill commands that run longer than this many seconds. May be fractional.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<f64>,

    /// Directory commands run in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,

    /// Complete environment for commands. Replaces the inherited environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<BTreeMap<String, String>>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}
