//! Tera rendering engine — [`Renderer`] and the `.tera` suffix marker.
//!
//! Only sources whose file name ends in [`TEMPLATE_SUFFIX`] are rendered;
//! everything else in the template library is copied byte-for-byte.
//! Autoescaping is disabled since outputs are Markdown, YAML, JSON and
//! scripts, never HTML.

use std::error::Error as _;
use std::path::{Path, PathBuf};

use tera::Tera;

use crate::context::TemplateVars;
use crate::error::RenderError;

/// File-name suffix marking a source that needs rendering.
pub const TEMPLATE_SUFFIX: &str = ".tera";

/// `true` when `path` carries the [`TEMPLATE_SUFFIX`] marker.
pub fn is_template(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.len() > TEMPLATE_SUFFIX.len() && n.ends_with(TEMPLATE_SUFFIX))
}

/// Output path for a source path: the marker is stripped when present,
/// so `agents/qa.md.tera` becomes `agents/qa.md`.
pub fn output_name(path: &Path) -> PathBuf {
    if !is_template(path) {
        return path.to_path_buf();
    }
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| &n[..n.len() - TEMPLATE_SUFFIX.len()])
        .unwrap_or_default();
    path.with_file_name(name)
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Renders raw template text against one [`TemplateVars`].
///
/// Create once per invocation with [`Renderer::new`] and reuse; the tera
/// context is computed up front. Rendering is deterministic: the same text
/// and variables always produce the same output.
pub struct Renderer {
    context: tera::Context,
}

impl Renderer {
    pub fn new(vars: &TemplateVars) -> Result<Self, RenderError> {
        Ok(Renderer { context: vars.to_tera_context()? })
    }

    /// Render `raw` as a template named `name` (used in error messages).
    pub fn render(&self, name: &str, raw: &str) -> Result<String, RenderError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(name, raw)
            .map_err(|e| template_err(name, e))?;
        tera.render(name, &self.context)
            .map_err(|e| template_err(name, e))
    }

    /// Render the file at `source` when it carries the template marker,
    /// otherwise return its contents untouched.
    pub fn render_file(&self, source: &Path) -> Result<Vec<u8>, RenderError> {
        let raw = std::fs::read(source).map_err(|e| RenderError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;
        if !is_template(source) {
            return Ok(raw);
        }
        let text = String::from_utf8(raw).map_err(|_| RenderError::NotUtf8 {
            path: source.to_path_buf(),
        })?;
        let name = source.to_string_lossy().replace('\\', "/");
        Ok(self.render(&name, &text)?.into_bytes())
    }
}

/// Tera reports the useful detail in its source chain; flatten it.
fn template_err(name: &str, err: tera::Error) -> RenderError {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    RenderError::Template { name: name.to_string(), message }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
