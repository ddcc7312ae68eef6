//! `orchkit gen-srs [target] --project <name> [--version] [--status] [--interactive] [--ai ...]`

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::Input;

use orchkit_docs::{generate_srs, srs, ContentGenerator, SrsOptions};

use super::{absolute_target, AiOpts};

/// Write `docs/SRS.md`, a Software Requirements Specification skeleton.
#[derive(Args, Debug)]
pub struct GenSrsArgs {
    /// Target repository root.
    #[arg(default_value = ".")]
    pub target: PathBuf,

    /// Project name used in the title (prompted for with --interactive).
    #[arg(long, short = 'p')]
    pub project: Option<String>,

    /// Document version.
    #[arg(long = "version", value_name = "VERSION", default_value = srs::DEFAULT_VERSION)]
    pub doc_version: String,

    /// Document status.
    #[arg(long, default_value = srs::DEFAULT_STATUS)]
    pub status: String,

    /// Prompt for project name, version and status.
    #[arg(long, short = 'i')]
    pub interactive: bool,

    #[command(flatten)]
    pub ai: AiOpts,
}

impl GenSrsArgs {
    pub fn run(self) -> Result<()> {
        let project = self
            .project
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        if project.is_none() && !self.interactive {
            bail!("--project is required (or use --interactive)");
        }

        let collaborator = self.ai.collaborator()?;
        let mut opts = SrsOptions {
            target: absolute_target(&self.target)?,
            project: project.unwrap_or_default(),
            version: self.doc_version,
            status: self.status,
        };
        if self.interactive {
            prompt_for(&mut opts)?;
        }

        let doc = generate_srs(
            &opts,
            collaborator.as_ref().map(|c| c as &dyn ContentGenerator),
        )
        .context("failed to write SRS")?;
        println!("{} SRS written to {}", "✓".green(), doc.path.display());
        if collaborator.is_some() && !doc.generated {
            println!("{} AI content unavailable; default tables used", "!".yellow());
        }
        Ok(())
    }
}

fn prompt_for(opts: &mut SrsOptions) -> Result<()> {
    if opts.project.is_empty() {
        opts.project = Input::new()
            .with_prompt("Project name")
            .interact_text()
            .context("Failed to read project name")?;
    }
    opts.version = Input::new()
        .with_prompt("Version")
        .default(opts.version.clone())
        .interact_text()
        .context("Failed to read version")?;
    opts.status = Input::new()
        .with_prompt("Status")
        .default(opts.status.clone())
        .interact_text()
        .context("Failed to read status")?;
    Ok(())
}
