//! Error types for orchkit-docs.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the content-generation collaborator or from writing a
/// generated document.
///
/// Collaborator variants never escape the generators: they are logged and
/// replaced by default content. Only [`GenerateError::Io`] and
/// [`GenerateError::MissingApiKey`] reach the caller.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Neither an explicit key nor the environment supplied an API key.
    #[error("{env} not set and no API key provided")]
    MissingApiKey { env: &'static str },

    /// Transport failure (connect, timeout, TLS).
    #[error("chat request failed: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("chat endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The reply carried no message content.
    #[error("no content in chat completion response")]
    NoContent,

    /// The reply could not be parsed into the expected shape.
    #[error("malformed reply: {0}")]
    Malformed(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> GenerateError {
    GenerateError::Io {
        path: path.into(),
        source,
    }
}
