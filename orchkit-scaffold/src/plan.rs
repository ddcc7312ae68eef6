//! Plan building — pair every discovered template with its destination.
//!
//! A plan is computed in full before any filesystem mutation. Each
//! [`PlanItem`] is immutable; whether it is written or skipped is decided
//! by the executor at apply time.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use orchkit_core::{BackendMap, StackName};
use orchkit_renderer::{output_name, TemplateVars};

use crate::discovery::discover;
use crate::error::ScaffoldError;
use crate::library::TemplateLibrary;

/// Stack assumed by `upgrade` when none is given or recorded in the target.
pub const DEFAULT_STACK: &str = "golang";

/// Evidence root used when the caller does not pass one.
pub const DEFAULT_EVIDENCE_ROOT: &str = "./evidence";

/// Inputs shared by every planning entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldCtx {
    pub target: PathBuf,
    pub stack: StackName,
    pub evidence_root: PathBuf,
    pub backend_map: BackendMap,
}

impl ScaffoldCtx {
    /// The variable context for this invocation.
    pub fn template_vars(&self) -> TemplateVars {
        TemplateVars::new(&self.stack, &self.evidence_root, &self.backend_map)
    }
}

// ---------------------------------------------------------------------------
// PlanItem
// ---------------------------------------------------------------------------

/// One planned file operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanItem {
    /// Destination inside the target tree, template marker stripped.
    pub dest: PathBuf,
    /// Source file inside the template library.
    pub source: PathBuf,
    /// Variables shared by every item of the plan.
    pub vars: Arc<TemplateVars>,
}

/// What the executor will do with an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Destination is absent; it will be created.
    Write,
    /// Destination exists and `force` is set; it will be replaced.
    Overwrite,
    /// Destination exists and `force` is not set; it is left untouched.
    Skip,
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disposition::Write => write!(f, "write"),
            Disposition::Overwrite => write!(f, "overwrite"),
            Disposition::Skip => write!(f, "skip"),
        }
    }
}

impl PlanItem {
    /// Disposition given the current state of the destination. Read-only.
    pub fn disposition(&self, force: bool) -> Disposition {
        match (self.dest.exists(), force) {
            (false, _) => Disposition::Write,
            (true, true) => Disposition::Overwrite,
            (true, false) => Disposition::Skip,
        }
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Plan the common layer plus the stack layer for `ctx.stack`.
///
/// A missing stack layer is not an error here; only common files are planned.
/// Callers that require the layer use [`plan_init`] or [`plan_upgrade`].
pub fn build_plan(
    library: &TemplateLibrary,
    ctx: &ScaffoldCtx,
) -> Result<Vec<PlanItem>, ScaffoldError> {
    let roots = [library.common_dir(), library.stack_dir(&ctx.stack)];
    plan_layers(&roots, ctx)
}

/// `init`: the stack layer must exist; fails before anything is planned.
pub fn plan_init(
    library: &TemplateLibrary,
    ctx: &ScaffoldCtx,
) -> Result<Vec<PlanItem>, ScaffoldError> {
    library.require_stack(&ctx.stack)?;
    build_plan(library, ctx)
}

/// `upgrade`: reapply the common layer, plus the stack layer when `stack`
/// is given (which must then exist).
///
/// Without `stack`, the variables use the stack recorded in the target's
/// `.claude/orch.yaml`, or [`DEFAULT_STACK`].
pub fn plan_upgrade(
    library: &TemplateLibrary,
    target: &Path,
    stack: Option<StackName>,
    evidence_root: &Path,
    backend_map: &BackendMap,
) -> Result<Vec<PlanItem>, ScaffoldError> {
    let mut roots = vec![library.common_dir()];
    let stack = match stack {
        Some(stack) => {
            roots.push(library.require_stack(&stack)?);
            stack
        }
        None => match recorded_stack(target) {
            Some(stack) => stack,
            None => DEFAULT_STACK.parse()?,
        },
    };
    let ctx = ScaffoldCtx {
        target: target.to_path_buf(),
        stack,
        evidence_root: evidence_root.to_path_buf(),
        backend_map: backend_map.clone(),
    };
    plan_layers(&roots, &ctx)
}

/// `add-stack`: the skeleton engineer/qa agents and starter phase, written
/// under the new stack's names. Every skeleton file must exist.
pub fn plan_add_stack(
    library: &TemplateLibrary,
    ctx: &ScaffoldCtx,
) -> Result<Vec<PlanItem>, ScaffoldError> {
    let skeleton = library.skeleton_dir();
    let stack = ctx.stack.as_str();
    let pairs = [
        (
            skeleton.join("agents").join("engineer.md.tera"),
            Path::new(".claude").join("agents").join(format!("{stack}-engineer.md")),
        ),
        (
            skeleton.join("agents").join("qa.md.tera"),
            Path::new(".claude").join("agents").join(format!("{stack}-qa.md")),
        ),
        (
            skeleton.join("phase.md.tera"),
            Path::new(".pm").join(format!("phase-{stack}-1.md")),
        ),
    ];
    if let Some((missing, _)) = pairs.iter().find(|(src, _)| !src.is_file()) {
        return Err(ScaffoldError::SkeletonMissing {
            path: missing.clone(),
        });
    }

    let vars = Arc::new(ctx.template_vars());
    Ok(pairs
        .into_iter()
        .map(|(source, rel)| PlanItem {
            dest: ctx.target.join(rel),
            source,
            vars: Arc::clone(&vars),
        })
        .collect())
}

fn plan_layers(roots: &[PathBuf], ctx: &ScaffoldCtx) -> Result<Vec<PlanItem>, ScaffoldError> {
    let vars = Arc::new(ctx.template_vars());
    let items = discover(roots)?
        .into_iter()
        .map(|file| {
            let dest = ctx.target.join(output_name(&file.relative));
            tracing::debug!("planned {} -> {}", file.path.display(), dest.display());
            PlanItem {
                dest,
                source: file.path,
                vars: Arc::clone(&vars),
            }
        })
        .collect();
    Ok(items)
}

/// The `stack:` key of `<target>/.claude/orch.yaml`, when present and valid.
pub fn recorded_stack(target: &Path) -> Option<StackName> {
    let path = target.join(".claude").join("orch.yaml");
    let contents = std::fs::read_to_string(&path).ok()?;
    let doc: serde_yaml::Value = match serde_yaml::from_str(&contents) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!("ignoring unreadable {}: {e}", path.display());
            return None;
        }
    };
    doc.get("stack")?.as_str()?.parse().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str, body: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    fn fixture_library() -> (TempDir, TemplateLibrary) {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "common/.claude/orch.yaml.tera", "stack: {{ stack }}\n");
        touch(tmp.path(), "common/.claude/hooks/h.py", "#!/usr/bin/env python3\n");
        touch(tmp.path(), "stacks/golang/.claude/agents/golang-engineer.md.tera", "x");
        touch(tmp.path(), "stacks/_skeleton/agents/engineer.md.tera", "e {{ stack }}");
        touch(tmp.path(), "stacks/_skeleton/agents/qa.md.tera", "q {{ stack }}");
        touch(tmp.path(), "stacks/_skeleton/phase.md.tera", "p {{ stack }}");
        let lib = TemplateLibrary::open(tmp.path()).unwrap();
        (tmp, lib)
    }

    fn ctx(target: &Path, stack: &str) -> ScaffoldCtx {
        ScaffoldCtx {
            target: target.to_path_buf(),
            stack: stack.parse().unwrap(),
            evidence_root: PathBuf::from(DEFAULT_EVIDENCE_ROOT),
            backend_map: BackendMap::default(),
        }
    }

    fn dests(items: &[PlanItem], target: &Path) -> Vec<String> {
        items
            .iter()
            .map(|i| {
                i.dest
                    .strip_prefix(target)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn destinations_mirror_layers_and_strip_marker() {
        let (_lib_dir, lib) = fixture_library();
        let target = TempDir::new().unwrap();
        let items = build_plan(&lib, &ctx(target.path(), "golang")).unwrap();
        assert_eq!(
            dests(&items, target.path()),
            vec![
                ".claude/hooks/h.py",
                ".claude/orch.yaml",
                ".claude/agents/golang-engineer.md",
            ]
        );
        assert!(items[1].source.ends_with("common/.claude/orch.yaml.tera"));
    }

    #[test]
    fn items_share_one_variable_context() {
        let (_lib_dir, lib) = fixture_library();
        let target = TempDir::new().unwrap();
        let items = build_plan(&lib, &ctx(target.path(), "golang")).unwrap();
        assert!(items.windows(2).all(|w| Arc::ptr_eq(&w[0].vars, &w[1].vars)));
        assert_eq!(items[0].vars.engineer_agent, "golang-engineer");
    }

    #[test]
    fn build_plan_tolerates_missing_stack_layer() {
        let (_lib_dir, lib) = fixture_library();
        let target = TempDir::new().unwrap();
        let items = build_plan(&lib, &ctx(target.path(), "dotnet")).unwrap();
        assert_eq!(items.len(), 2, "only common files planned");
    }

    #[test]
    fn plan_init_requires_stack_layer() {
        let (_lib_dir, lib) = fixture_library();
        let target = TempDir::new().unwrap();
        let err = plan_init(&lib, &ctx(target.path(), "dotnet")).unwrap_err();
        assert!(matches!(err, ScaffoldError::StackNotFound { .. }));
    }

    #[test]
    fn building_twice_is_identical() {
        let (_lib_dir, lib) = fixture_library();
        let target = TempDir::new().unwrap();
        let c = ctx(target.path(), "golang");
        assert_eq!(build_plan(&lib, &c).unwrap(), build_plan(&lib, &c).unwrap());
    }

    #[test]
    fn upgrade_without_stack_plans_common_only_with_recorded_stack() {
        let (_lib_dir, lib) = fixture_library();
        let target = TempDir::new().unwrap();
        touch(target.path(), ".claude/orch.yaml", "version: 1\nstack: dotnet\n");
        let items = plan_upgrade(
            &lib,
            target.path(),
            None,
            Path::new("./evidence"),
            &BackendMap::default(),
        )
        .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].vars.stack, "dotnet");
    }

    #[test]
    fn upgrade_without_stack_or_record_uses_default() {
        let (_lib_dir, lib) = fixture_library();
        let target = TempDir::new().unwrap();
        let items = plan_upgrade(
            &lib,
            target.path(),
            None,
            Path::new("./evidence"),
            &BackendMap::default(),
        )
        .unwrap();
        assert_eq!(items[0].vars.stack, DEFAULT_STACK);
    }

    #[test]
    fn upgrade_with_unknown_stack_fails() {
        let (_lib_dir, lib) = fixture_library();
        let target = TempDir::new().unwrap();
        let err = plan_upgrade(
            &lib,
            target.path(),
            Some("rust".parse().unwrap()),
            Path::new("./evidence"),
            &BackendMap::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ScaffoldError::StackNotFound { .. }));
    }

    #[test]
    fn add_stack_targets_named_files() {
        let (_lib_dir, lib) = fixture_library();
        let target = TempDir::new().unwrap();
        let items = plan_add_stack(&lib, &ctx(target.path(), "elixir")).unwrap();
        assert_eq!(
            dests(&items, target.path()),
            vec![
                ".claude/agents/elixir-engineer.md",
                ".claude/agents/elixir-qa.md",
                ".pm/phase-elixir-1.md",
            ]
        );
    }

    #[test]
    fn add_stack_requires_every_skeleton_file() {
        let (lib_dir, lib) = fixture_library();
        fs::remove_file(lib_dir.path().join("stacks/_skeleton/phase.md.tera")).unwrap();
        let target = TempDir::new().unwrap();
        let err = plan_add_stack(&lib, &ctx(target.path(), "elixir")).unwrap_err();
        assert!(matches!(err, ScaffoldError::SkeletonMissing { .. }));
    }

    #[test]
    fn disposition_follows_existence_and_force() {
        let (_lib_dir, lib) = fixture_library();
        let target = TempDir::new().unwrap();
        let items = build_plan(&lib, &ctx(target.path(), "golang")).unwrap();
        assert_eq!(items[0].disposition(false), Disposition::Write);
        touch(target.path(), ".claude/hooks/h.py", "local");
        assert_eq!(items[0].disposition(false), Disposition::Skip);
        assert_eq!(items[0].disposition(true), Disposition::Overwrite);
    }

    #[test]
    fn recorded_stack_ignores_invalid_values() {
        let target = TempDir::new().unwrap();
        assert!(recorded_stack(target.path()).is_none());
        touch(target.path(), ".claude/orch.yaml", "stack: ../etc\n");
        assert!(recorded_stack(target.path()).is_none());
        touch(target.path(), ".claude/orch.yaml", "stack: [\n");
        assert!(recorded_stack(target.path()).is_none());
    }
}
