//! # orchkit-docs
//!
//! Phase and SRS document generators. Each builds its Markdown from a fixed
//! skeleton and may consult a [`ContentGenerator`] for replacement content;
//! an absent, failing or unparsable collaborator always falls back to the
//! built-in defaults, so a document is written either way.

pub mod client;
pub mod drafted;
pub mod error;
pub mod phase;
pub mod srs;

use std::path::{Path, PathBuf};

pub use client::{ChatClient, ChatClientOptions, ContentGenerator};
pub use drafted::Drafted;
pub use error::GenerateError;
pub use phase::{generate_phase, PhaseOptions, Story};
pub use srs::{generate_srs, SrsOptions, SrsTables};

/// A document written by one of the generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDoc {
    pub path: PathBuf,
    /// Whether collaborator content made it into the document.
    pub generated: bool,
}

pub(crate) fn write_document(path: &Path, body: &str) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| error::io_err(parent, e))?;
    }
    std::fs::write(path, body).map_err(|e| error::io_err(path, e))?;
    tracing::info!("wrote: {}", path.display());
    Ok(())
}
