//! `orchkit add-stack [target] <name> [--dry-run] [--force]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use orchkit_core::StackName;
use orchkit_scaffold::{apply_plan, plan_add_stack, ScaffoldCtx, DEFAULT_EVIDENCE_ROOT};

use super::{absolute_target, print_preview, print_results, GlobalOpts};

/// Add engineer/qa agents and a starter phase for a new stack, from the
/// library's skeleton.
#[derive(Args, Debug)]
pub struct AddStackArgs {
    /// Target repository root.
    pub target: PathBuf,

    /// Name of the new stack, e.g. `python`.
    pub name: StackName,

    /// List what would be written without touching the target.
    #[arg(long)]
    pub dry_run: bool,

    /// Overwrite files that already exist.
    #[arg(long)]
    pub force: bool,
}

impl AddStackArgs {
    pub fn run(self, global: &GlobalOpts) -> Result<()> {
        let library = global.library()?;
        let ctx = ScaffoldCtx {
            target: absolute_target(&self.target)?,
            stack: self.name,
            evidence_root: PathBuf::from(DEFAULT_EVIDENCE_ROOT),
            backend_map: Default::default(),
        };

        let items = plan_add_stack(&library, &ctx).context("cannot plan add-stack")?;
        if self.dry_run {
            print_preview(&items, self.force);
            return Ok(());
        }

        let results = apply_plan(&items, self.force)
            .with_context(|| format!("add-stack failed in '{}'", ctx.target.display()))?;
        print_results(&format!("Added stack '{}'", ctx.stack), &results);
        Ok(())
    }
}
