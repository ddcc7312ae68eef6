//! `orchkit doctor [target] [--json]`

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use orchkit_scaffold::{doctor, CheckOutcome, DoctorReport};

use super::absolute_target;

/// Verify that a target contains the scaffolded files.
#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Target repository root.
    #[arg(default_value = ".")]
    pub target: PathBuf,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct CheckRow {
    #[tabled(rename = "")]
    marker: String,
    #[tabled(rename = "check")]
    label: String,
    #[tabled(rename = "path")]
    path: String,
}

impl DoctorArgs {
    pub fn run(self) -> Result<()> {
        let target = absolute_target(&self.target)?;
        let report = doctor::run(&target);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_table(&report);
        }

        if !report.is_healthy() {
            bail!("{} required check(s) failed", report.failures);
        }
        Ok(())
    }
}

fn marker(check: &CheckOutcome) -> String {
    match (check.passed, check.required) {
        (true, _) => "✓".green().to_string(),
        (false, true) => "✗".red().to_string(),
        (false, false) => "!".yellow().to_string(),
    }
}

fn print_table(report: &DoctorReport) {
    let rows: Vec<CheckRow> = report
        .checks
        .iter()
        .map(|c| CheckRow {
            marker: marker(c),
            label: if c.required {
                c.label.clone()
            } else {
                format!("{} (optional)", c.label)
            },
            path: c.path.display().to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    if report.is_healthy() {
        println!("{} all required checks passed", "✓".green());
    } else {
        println!(
            "{} {} required check(s) failed. Run `orchkit init` or `orchkit upgrade` to restore them.",
            "✗".red(),
            report.failures
        );
    }
}
