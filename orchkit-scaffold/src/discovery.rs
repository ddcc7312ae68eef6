//! Template discovery — recursive listing of layer roots.

use std::path::{Path, PathBuf};

use crate::error::{io_err, ScaffoldError};

/// A regular file found under a layer root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// The root the file was found under.
    pub root: PathBuf,
    /// `root.join(relative)`.
    pub path: PathBuf,
    /// Path relative to `root`; encodes the destination under the target.
    pub relative: PathBuf,
}

/// List every regular file under each existing root, in root order and
/// sorted order within a root. Roots that do not exist are skipped.
pub fn discover<P: AsRef<Path>>(roots: &[P]) -> Result<Vec<TemplateFile>, ScaffoldError> {
    let mut out = Vec::new();
    for root in roots {
        let root = root.as_ref();
        if !root.is_dir() {
            tracing::debug!("skipping missing template root {}", root.display());
            continue;
        }
        walk(root, Path::new(""), &mut out)?;
    }
    Ok(out)
}

fn walk(root: &Path, rel: &Path, out: &mut Vec<TemplateFile>) -> Result<(), ScaffoldError> {
    let dir = root.join(rel);
    let mut entries = std::fs::read_dir(&dir)
        .map_err(|e| io_err(&dir, e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| io_err(&dir, e))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let relative = rel.join(entry.file_name());
        let meta = std::fs::metadata(&path).map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            walk(root, &relative, out)?;
        } else if meta.is_file() {
            tracing::debug!("discovered {}", path.display());
            out.push(TemplateFile {
                root: root.to_path_buf(),
                path,
                relative,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel).unwrap();
    }

    fn relatives(files: &[TemplateFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.relative.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn walks_nested_and_hidden_directories() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), ".claude/hooks/a.py");
        touch(tmp.path(), ".claude/agents/deep/nested/x.md.tera");
        touch(tmp.path(), "top.txt");

        let files = discover(&[tmp.path()]).unwrap();
        assert_eq!(
            relatives(&files),
            vec![".claude/agents/deep/nested/x.md.tera", ".claude/hooks/a.py", "top.txt"]
        );
        for f in &files {
            assert_eq!(f.path, tmp.path().join(&f.relative));
            assert_eq!(f.root, tmp.path());
        }
    }

    #[test]
    fn missing_roots_are_skipped() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "common/a.md");
        let files = discover(&[tmp.path().join("common"), tmp.path().join("absent")]).unwrap();
        assert_eq!(relatives(&files), vec!["a.md"]);
    }

    #[test]
    fn roots_are_visited_in_order() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "b/z.md");
        touch(tmp.path(), "a/y.md");
        let files = discover(&[tmp.path().join("b"), tmp.path().join("a")]).unwrap();
        assert_eq!(files[0].root, tmp.path().join("b"));
        assert_eq!(files[1].root, tmp.path().join("a"));
    }

    #[test]
    fn empty_directories_yield_nothing() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("empty/inner")).unwrap();
        assert!(discover(&[tmp.path()]).unwrap().is_empty());
    }
}
