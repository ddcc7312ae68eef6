//! Template library layout.
//!
//! ```text
//! <root>/
//!   common/              common layer, applied by every init/upgrade
//!   stacks/
//!     <stack>/           stack layer, e.g. golang, dotnet
//!     _skeleton/         add-stack templates (never a valid stack name)
//!       agents/engineer.md.tera
//!       agents/qa.md.tera
//!       phase.md.tera
//! ```
//!
//! Relative paths inside a layer encode the destination under the target root.

use std::path::{Path, PathBuf};

use orchkit_core::StackName;

use crate::error::{io_err, ScaffoldError};

/// Handle on a template library root. The root is an explicit value so any
/// fixture directory can stand in for the bundled library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLibrary {
    root: PathBuf,
}

impl TemplateLibrary {
    /// Open the library at `root`, which must be an existing directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ScaffoldError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ScaffoldError::LibraryNotFound { path: root });
        }
        let root = root.canonicalize().map_err(|e| io_err(&root, e))?;
        Ok(TemplateLibrary { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/common`
    pub fn common_dir(&self) -> PathBuf {
        self.root.join("common")
    }

    /// `<root>/stacks/<stack>` — may not exist.
    pub fn stack_dir(&self, stack: &StackName) -> PathBuf {
        self.root.join("stacks").join(stack.as_str())
    }

    /// `<root>/stacks/_skeleton`
    pub fn skeleton_dir(&self) -> PathBuf {
        self.root.join("stacks").join("_skeleton")
    }

    pub fn has_stack(&self, stack: &StackName) -> bool {
        self.stack_dir(stack).is_dir()
    }

    /// Names of every stack layer, sorted. Reserved `_`/`.` entries are skipped.
    pub fn stacks(&self) -> Result<Vec<String>, ScaffoldError> {
        let dir = self.root.join("stacks");
        if !dir.exists() {
            return Ok(vec![]);
        }
        let mut names: Vec<String> = std::fs::read_dir(&dir)
            .map_err(|e| io_err(&dir, e))?
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.parse::<StackName>().is_ok())
            .collect();
        names.sort();
        Ok(names)
    }

    /// Error unless a layer exists for `stack`.
    pub fn require_stack(&self, stack: &StackName) -> Result<PathBuf, ScaffoldError> {
        let dir = self.stack_dir(stack);
        if dir.is_dir() {
            return Ok(dir);
        }
        Err(ScaffoldError::StackNotFound {
            stack: stack.to_string(),
            path: dir,
            available: self.stacks()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn open_rejects_missing_root() {
        let tmp = TempDir::new().unwrap();
        let err = TemplateLibrary::open(tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, ScaffoldError::LibraryNotFound { .. }));
    }

    #[test]
    fn stacks_lists_valid_layers_only() {
        let tmp = TempDir::new().unwrap();
        for dir in ["golang", "dotnet", "_skeleton"] {
            fs::create_dir_all(tmp.path().join("stacks").join(dir)).unwrap();
        }
        fs::write(tmp.path().join("stacks").join("README.md"), "x").unwrap();
        let lib = TemplateLibrary::open(tmp.path()).unwrap();
        assert_eq!(lib.stacks().unwrap(), vec!["dotnet", "golang"]);
    }

    #[test]
    fn require_stack_reports_available_layers() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("stacks").join("golang")).unwrap();
        let lib = TemplateLibrary::open(tmp.path()).unwrap();
        let err = lib.require_stack(&"rust".parse().unwrap()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'rust'"), "got: {msg}");
        assert!(msg.contains("golang"), "got: {msg}");
        assert!(lib.require_stack(&"golang".parse().unwrap()).is_ok());
    }
}
