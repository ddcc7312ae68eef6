//! Error types for orchkit-scaffold.

use std::path::PathBuf;

use thiserror::Error;

use orchkit_core::ConfigError;
use orchkit_renderer::RenderError;

/// All errors that can arise from planning or applying a scaffold.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// An error from the rendering engine; aborts the remaining plan.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Validation error from orchkit-core.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The template library root does not exist or is not a directory.
    #[error("template library not found at {path}")]
    LibraryNotFound { path: PathBuf },

    /// No template layer exists for the requested stack.
    #[error("stack templates not found for '{stack}' at {path} (available: {})", available.join(", "))]
    StackNotFound {
        stack: String,
        path: PathBuf,
        available: Vec<String>,
    },

    /// A required add-stack skeleton template is absent.
    #[error("skeleton template missing: {path}")]
    SkeletonMissing { path: PathBuf },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`ScaffoldError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ScaffoldError {
    ScaffoldError::Io {
        path: path.into(),
        source,
    }
}
