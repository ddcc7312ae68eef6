//! Error types for orchkit-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Malformed template or failed evaluation, with the full tera cause chain.
    #[error("failed to render template '{name}': {message}")]
    Template { name: String, message: String },

    /// JSON serialization error (building tera context).
    #[error("context serialization error: {0}")]
    Serialization(#[from] tera::Error),

    /// A `.tera` source that is not valid UTF-8.
    #[error("template at {path} is not valid UTF-8")]
    NotUtf8 { path: PathBuf },

    /// Filesystem error while reading a template source.
    #[error("template io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
}
