//! Error types for orchkit-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Role;

/// Validation and configuration errors. All of them are raised before any
/// file in a target tree is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A `--backend-map` pair without `=` or with an empty side.
    #[error("invalid backend-map entry: '{0}' (expected role=backend)")]
    InvalidBackendEntry(String),

    #[error("unknown role '{0}'; expected: orchestrator, engineer, qa")]
    UnknownRole(String),

    #[error("unknown backend '{0}'; expected: claude, codex, gemini")]
    UnknownBackend(String),

    #[error("role '{0}' is mapped more than once")]
    DuplicateRole(Role),

    #[error("invalid stack name '{0}'; use letters, digits, '-', '_' or '.', not starting with '_' or '.'")]
    InvalidStackName(String),

    /// I/O failure while reading the user config file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load, with the file path.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}
