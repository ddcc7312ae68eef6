//! `orchkit init [target] --stack <s> [--backend-map ...] [--evidence-root ...] [--dry-run] [--force]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use orchkit_core::StackName;
use orchkit_scaffold::{apply_plan, plan_init, ScaffoldCtx};

use super::{absolute_target, print_preview, print_results, GlobalOpts, ScaffoldOpts};

/// Scaffold the common layer and a stack layer into a target repository.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Target repository root.
    #[arg(default_value = ".")]
    pub target: PathBuf,

    /// Stack layer to apply (a directory under `stacks/`).
    #[arg(long, short = 's')]
    pub stack: StackName,

    #[command(flatten)]
    pub scaffold: ScaffoldOpts,
}

impl InitArgs {
    pub fn run(self, global: &GlobalOpts) -> Result<()> {
        let library = global.library()?;
        let ctx = ScaffoldCtx {
            target: absolute_target(&self.target)?,
            backend_map: self.scaffold.backend_map(),
            stack: self.stack,
            evidence_root: self.scaffold.evidence_root.clone(),
        };

        let items = plan_init(&library, &ctx)
            .with_context(|| format!("cannot plan init of '{}'", ctx.stack))?;
        if self.scaffold.dry_run {
            print_preview(&items, self.scaffold.force);
            return Ok(());
        }

        let results = apply_plan(&items, self.scaffold.force)
            .with_context(|| format!("init failed in '{}'", ctx.target.display()))?;
        print_results(
            &format!("Initialized '{}' in {}", ctx.stack, ctx.target.display()),
            &results,
        );
        Ok(())
    }
}
