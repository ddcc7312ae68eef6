//! `orchkit gen-phase [target] --stack <s> [--id] [--title] [--ai ...]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use orchkit_core::StackName;
use orchkit_docs::{generate_phase, ContentGenerator, PhaseOptions};

use super::{absolute_target, AiOpts};

/// Write a phase plan under `.pm/`.
#[derive(Args, Debug)]
pub struct GenPhaseArgs {
    /// Target repository root.
    #[arg(default_value = ".")]
    pub target: PathBuf,

    /// Stack the phase belongs to.
    #[arg(long, short = 's')]
    pub stack: StackName,

    /// Phase identifier [default: PHASE-<STACK>-1].
    #[arg(long)]
    pub id: Option<String>,

    /// Phase title [default: Starter phase].
    #[arg(long)]
    pub title: Option<String>,

    #[command(flatten)]
    pub ai: AiOpts,
}

impl GenPhaseArgs {
    pub fn run(self) -> Result<()> {
        let collaborator = self.ai.collaborator()?;
        let opts = PhaseOptions {
            target: absolute_target(&self.target)?,
            stack: self.stack,
            phase_id: self.id,
            title: self.title,
        };

        let doc = generate_phase(
            &opts,
            collaborator.as_ref().map(|c| c as &dyn ContentGenerator),
        )
        .context("failed to write phase document")?;
        println!("{} Phase file written to {}", "✓".green(), doc.path.display());
        if collaborator.is_some() && !doc.generated {
            println!("{} AI content unavailable; default stories used", "!".yellow());
        }
        Ok(())
    }
}
