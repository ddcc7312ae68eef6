//! Plan executor.
//!
//! ## `apply_plan` — per item, in plan order
//!
//! 1. Create the destination's parent directories.
//! 2. Render the source (`.tera`) or read it verbatim.
//! 3. Destination exists and `force` is off → [`WriteResult::Skipped`].
//! 4. Write to `<dest>.orchkit.tmp`, then rename over the destination.
//! 5. Content starting with `#!` → mode `0755` (unix only).
//!
//! Items are not transactional as a group: the first error stops the run
//! and every item already written stays written.

use std::path::{Path, PathBuf};

use orchkit_renderer::Renderer;

use crate::error::{io_err, ScaffoldError};
use crate::plan::PlanItem;

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of one applied plan item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// Destination did not exist and was created.
    Written { path: PathBuf },
    /// Destination existed and was replaced because `force` was set.
    Overwritten { path: PathBuf },
    /// Destination existed and was left untouched.
    Skipped { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Overwritten { path }
            | WriteResult::Skipped { path } => path,
        }
    }
}

// ---------------------------------------------------------------------------
// apply_plan
// ---------------------------------------------------------------------------

/// Apply `items` in order. See the module docs for the per-item protocol.
pub fn apply_plan(items: &[PlanItem], force: bool) -> Result<Vec<WriteResult>, ScaffoldError> {
    let mut results = Vec::with_capacity(items.len());
    for item in items {
        results.push(apply_item(item, force)?);
    }
    Ok(results)
}

fn apply_item(item: &PlanItem, force: bool) -> Result<WriteResult, ScaffoldError> {
    let dest = item.dest.as_path();
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    let renderer = Renderer::new(&item.vars)?;
    let content = renderer.render_file(&item.source)?;

    let existed = dest.exists();
    if existed && !force {
        tracing::info!("skip (exists): {}", dest.display());
        return Ok(WriteResult::Skipped {
            path: dest.to_path_buf(),
        });
    }

    let tmp = PathBuf::from(format!("{}.orchkit.tmp", dest.display()));
    write_via_tmp(dest, &content, &tmp)?;
    if content.starts_with(b"#!") {
        mark_executable(dest)?;
    }

    tracing::info!("wrote: {}", dest.display());
    let path = dest.to_path_buf();
    Ok(if existed {
        WriteResult::Overwritten { path }
    } else {
        WriteResult::Written { path }
    })
}

fn write_via_tmp(path: &Path, content: &[u8], tmp: &Path) -> Result<(), ScaffoldError> {
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;
    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> Result<(), ScaffoldError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .map_err(|e| io_err(path, e))
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> Result<(), ScaffoldError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
