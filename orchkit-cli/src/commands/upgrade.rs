//! `orchkit upgrade [target] [--stack <s>] [--backend-map ...] [--evidence-root ...] [--dry-run] [--force]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use orchkit_core::StackName;
use orchkit_scaffold::{apply_plan, plan_upgrade};

use super::{absolute_target, print_preview, print_results, GlobalOpts, ScaffoldOpts};

/// Reapply the common layer (and optionally a stack layer) to an existing
/// target. Without `--force` only missing files are added.
#[derive(Args, Debug)]
pub struct UpgradeArgs {
    /// Target repository root.
    #[arg(default_value = ".")]
    pub target: PathBuf,

    /// Also reapply this stack layer.
    #[arg(long, short = 's')]
    pub stack: Option<StackName>,

    #[command(flatten)]
    pub scaffold: ScaffoldOpts,
}

impl UpgradeArgs {
    pub fn run(self, global: &GlobalOpts) -> Result<()> {
        let library = global.library()?;
        let target = absolute_target(&self.target)?;

        let items = plan_upgrade(
            &library,
            &target,
            self.stack.clone(),
            &self.scaffold.evidence_root,
            &self.scaffold.backend_map(),
        )
        .context("cannot plan upgrade")?;
        if self.scaffold.dry_run {
            print_preview(&items, self.scaffold.force);
            return Ok(());
        }

        let results = apply_plan(&items, self.scaffold.force)
            .with_context(|| format!("upgrade failed in '{}'", target.display()))?;
        print_results(&format!("Upgraded {}", target.display()), &results);
        Ok(())
    }
}
