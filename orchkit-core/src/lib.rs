//! orchkit core library — domain types, backend-map parsing, user config, errors.
//!
//! - [`types`] — [`Role`], [`Backend`], [`BackendMap`], [`StackName`]
//! - [`error`] — [`ConfigError`]
//! - [`config`] — `~/.orchkit/config.yaml` loading

pub mod config;
pub mod error;
pub mod types;

pub use config::{AiConfig, KitConfig};
pub use error::ConfigError;
pub use types::{Backend, BackendMap, Role, StackName};
