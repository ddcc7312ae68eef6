//! orchkit — scaffold agent orchestration files into a repository.
//!
//! # Usage
//!
//! ```text
//! orchkit init [target] --stack <s> [--backend-map <map>] [--evidence-root <path>] [--dry-run] [--force]
//! orchkit add-stack <target> <name> [--dry-run] [--force]
//! orchkit doctor [target] [--json]
//! orchkit upgrade [target] [--stack <s>] [--backend-map <map>] [--evidence-root <path>] [--dry-run] [--force]
//! orchkit gen-srs [target] --project <name> [--version <v>] [--status <s>] [--interactive] [--ai ...]
//! orchkit gen-phase [target] --stack <s> [--id <id>] [--title <t>] [--ai ...]
//! ```
//!
//! `--templates <dir>` (or `ORCHKIT_TEMPLATES`) selects the template library.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    add_stack::AddStackArgs, doctor::DoctorArgs, gen_phase::GenPhaseArgs, gen_srs::GenSrsArgs,
    init::InitArgs, upgrade::UpgradeArgs, GlobalOpts,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "orchkit",
    version,
    about = "Scaffold orchestrator/engineer/qa agent files, hooks and docs into a repository",
    long_about = None,
)]
struct Cli {
    /// Template library root (contains `common/` and `stacks/`).
    #[arg(long, global = true, env = "ORCHKIT_TEMPLATES", value_name = "DIR")]
    templates: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scaffold the common and stack template layers into a target.
    Init(InitArgs),

    /// Add agents and a starter phase for a new stack from the skeleton.
    AddStack(AddStackArgs),

    /// Check a target for the expected scaffolded files.
    Doctor(DoctorArgs),

    /// Reapply templates to an existing target.
    Upgrade(UpgradeArgs),

    /// Generate docs/SRS.md.
    GenSrs(GenSrsArgs),

    /// Generate a phase plan under .pm/.
    GenPhase(GenPhaseArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let global = GlobalOpts {
        templates: cli.templates,
    };
    match cli.command {
        Commands::Init(args) => args.run(&global),
        Commands::AddStack(args) => args.run(&global),
        Commands::Doctor(args) => args.run(),
        Commands::Upgrade(args) => args.run(&global),
        Commands::GenSrs(args) => args.run(),
        Commands::GenPhase(args) => args.run(),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
