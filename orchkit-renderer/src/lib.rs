//! # orchkit-renderer
//!
//! Builds the per-invocation [`TemplateVars`] and renders `.tera` sources
//! from the template library with them.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use orchkit_core::BackendMap;
//! use orchkit_renderer::{Renderer, TemplateVars};
//!
//! fn render_one(source: &Path) {
//!     let stack = "golang".parse().expect("valid stack");
//!     let vars = TemplateVars::new(&stack, Path::new("./evidence"), &BackendMap::default());
//!     if let Ok(renderer) = Renderer::new(&vars) {
//!         if let Ok(bytes) = renderer.render_file(source) {
//!             println!("{} bytes", bytes.len());
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::TemplateVars;
pub use engine::{is_template, output_name, Renderer, TEMPLATE_SUFFIX};
pub use error::RenderError;
