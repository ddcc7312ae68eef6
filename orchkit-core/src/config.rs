//! Optional user configuration file.
//!
//! # Storage layout
//!
//! ```text
//! ~/.orchkit/
//!   config.yaml
//! ```
//!
//! ```yaml
//! templates_dir: /opt/orchkit/templates
//! ai:
//!   model: gpt-4o-mini
//!   base_url: https://api.openai.com
//!   api_key: sk-...
//!   timeout_secs: 60
//! ```
//!
//! Every key is optional and a missing file is an empty config.
//!
//! # API pattern
//!
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Contents of `~/.orchkit/config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KitConfig {
    /// Template library root used when `--templates` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
    pub ai: AiConfig,
}

/// Defaults for the content-generation collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// `<home>/.orchkit/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".orchkit").join("config.yaml")
}

/// Load the config under `home`. Absent file → [`KitConfig::default`].
pub fn load_at(home: &Path) -> Result<KitConfig, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(KitConfig::default());
    }
    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    if contents.trim().is_empty() {
        return Ok(KitConfig::default());
    }
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<KitConfig, ConfigError> {
    load_at(&home()?)
}

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}
