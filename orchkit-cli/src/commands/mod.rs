//! Subcommand implementations and the option groups they share.

pub mod add_stack;
pub mod doctor;
pub mod gen_phase;
pub mod gen_srs;
pub mod init;
pub mod upgrade;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use orchkit_core::{config, BackendMap, KitConfig};
use orchkit_docs::{client, ChatClient, ChatClientOptions};
use orchkit_scaffold::{PlanItem, TemplateLibrary, WriteResult, DEFAULT_EVIDENCE_ROOT};

/// Options available to every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOpts {
    /// `--templates` / `ORCHKIT_TEMPLATES`.
    pub templates: Option<PathBuf>,
}

impl GlobalOpts {
    /// The template library: `--templates`, then `templates_dir` from the
    /// user config, then the library bundled with the workspace.
    pub fn library(&self) -> Result<TemplateLibrary> {
        let root = match &self.templates {
            Some(root) => root.clone(),
            None => user_config()?
                .templates_dir
                .unwrap_or_else(bundled_templates),
        };
        tracing::debug!("template library: {}", root.display());
        TemplateLibrary::open(&root)
            .with_context(|| format!("cannot open template library at '{}'", root.display()))
    }
}

fn bundled_templates() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("templates")
}

/// The user config file; an undeterminable home directory counts as empty.
pub fn user_config() -> Result<KitConfig> {
    match dirs::home_dir() {
        Some(home) => config::load_at(&home).context("failed to load ~/.orchkit/config.yaml"),
        None => Ok(KitConfig::default()),
    }
}

/// Absolute form of `target` without requiring it to exist.
pub fn absolute_target(target: &Path) -> Result<PathBuf> {
    if target.is_absolute() {
        return Ok(target.to_path_buf());
    }
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    Ok(cwd.join(target))
}

// ---------------------------------------------------------------------------
// Scaffold options
// ---------------------------------------------------------------------------

/// Options shared by `init` and `upgrade`.
#[derive(Args, Debug, Clone)]
pub struct ScaffoldOpts {
    /// Backend per role, e.g. `orchestrator=claude,engineer=codex,qa=gemini`.
    #[arg(long, value_name = "MAP")]
    pub backend_map: Option<BackendMap>,

    /// Root directory agents store evidence under.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_EVIDENCE_ROOT)]
    pub evidence_root: PathBuf,

    /// List what would be written without touching the target.
    #[arg(long)]
    pub dry_run: bool,

    /// Overwrite files that already exist.
    #[arg(long)]
    pub force: bool,
}

impl ScaffoldOpts {
    pub fn backend_map(&self) -> BackendMap {
        self.backend_map.clone().unwrap_or_default()
    }
}

/// Dry run: each item with the disposition the executor would choose.
pub fn print_preview(items: &[PlanItem], force: bool) {
    println!("{} {} file(s) planned", "[dry-run]".yellow(), items.len());
    for item in items {
        println!("  {:<9} {}", item.disposition(force).to_string(), item.dest.display());
    }
}

/// Summary of an applied plan.
pub fn print_results(what: &str, results: &[WriteResult]) {
    let count = |f: fn(&WriteResult) -> bool| results.iter().filter(|r| f(r)).count();
    let written = count(|r| matches!(r, WriteResult::Written { .. }));
    let overwritten = count(|r| matches!(r, WriteResult::Overwritten { .. }));
    let skipped = count(|r| matches!(r, WriteResult::Skipped { .. }));

    println!(
        "{} {what} ({written} written, {overwritten} overwritten, {skipped} skipped)",
        "✓".green()
    );
    for r in results {
        match r {
            WriteResult::Written { path } => println!("  {}  {}", "+".green(), path.display()),
            WriteResult::Overwritten { path } => {
                println!("  {}  {}", "~".yellow(), path.display())
            }
            WriteResult::Skipped { path } => {
                println!("  {}  {} (exists)", "·".bright_black(), path.display())
            }
        }
    }
    if skipped > 0 {
        println!("Use --force to overwrite existing files.");
    }
}

// ---------------------------------------------------------------------------
// Collaborator options
// ---------------------------------------------------------------------------

/// Options controlling the content-generation collaborator.
#[derive(Args, Debug, Clone, Default)]
pub struct AiOpts {
    /// Ask the chat-completions endpoint for document content.
    #[arg(long)]
    pub ai: bool,

    /// Chat model [default: gpt-4o-mini].
    #[arg(long, requires = "ai")]
    pub model: Option<String>,

    /// API base URL [default: https://api.openai.com].
    #[arg(long, requires = "ai")]
    pub base_url: Option<String>,

    /// API key; falls back to the config file, then OPENAI_API_KEY.
    #[arg(long, requires = "ai")]
    pub api_key: Option<String>,
}

impl AiOpts {
    /// Flags first, then the user config, then built-in defaults.
    pub fn client_options(&self, config: &KitConfig) -> ChatClientOptions {
        let ai = &config.ai;
        let defaults = ChatClientOptions::default();
        ChatClientOptions {
            model: self.model.clone().or_else(|| ai.model.clone()).unwrap_or(defaults.model),
            base_url: self
                .base_url
                .clone()
                .or_else(|| ai.base_url.clone())
                .unwrap_or(defaults.base_url),
            api_key: self.api_key.clone().or_else(|| ai.api_key.clone()),
            timeout: ai.timeout_secs.map(Duration::from_secs).unwrap_or(defaults.timeout),
        }
    }

    /// `None` without `--ai`. A missing API key is an error.
    pub fn collaborator(&self) -> Result<Option<ChatClient>> {
        if !self.ai {
            return Ok(None);
        }
        let opts = self.client_options(&user_config()?);
        let client = ChatClient::new(opts).with_context(|| {
            format!("--ai needs an API key (--api-key, ai.api_key or {})", client::API_KEY_ENV)
        })?;
        tracing::debug!("using model {} at {}", client.model(), client.endpoint());
        Ok(Some(client))
    }
}
