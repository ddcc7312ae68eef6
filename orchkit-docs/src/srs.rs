//! Software Requirements Specification generator (`docs/SRS.md`).

use std::path::{Path, PathBuf};

use crate::client::ContentGenerator;
use crate::drafted::{draft, Drafted, Request};
use crate::error::GenerateError;
use crate::{write_document, GeneratedDoc};

pub const DEFAULT_VERSION: &str = "1.0";
pub const DEFAULT_STATUS: &str = "Baseline";

const SYSTEM_PROMPT: &str = "You draft Markdown SRS tables. Keep it concise and valid Markdown.";

const TABLE_HEADER: &str = "| ID | Title | Description | Rationale |\n| :--- | :--- | :--- | :--- |\n";

const DEFAULT_FUNCTIONAL_ROWS: &str = "| **PROD-001** | Core Capability | The system **MUST** deliver its primary value proposition. | Defines MVP scope. |\n";

const DEFAULT_USER_ROWS: &str = "| **USER-001** | CLI Help | The CLI **MUST** provide `--help` with examples. | Improves discoverability. |\n";

const FIXED_SECTIONS: &str = "\
\n---\n\n## 3. Architectural Requirements\n\n\
*Defines high-level, non-negotiable design principles and structural constraints.*\n\n\
| ID | Title | Description | Rationale |\n| :--- | :--- | :--- | :--- |\n\
| **ARCH-001** | Deterministic Scaffolding | The kit **MUST** be idempotent with `--force`. | Safe usage. |\n\
\n---\n\n## 4. Non-Functional Requirements (NFRs)\n\n\
*Defines the quality attributes and operational characteristics of the system.*\n\n\
| ID | Title | Description | Rationale |\n| :--- | :--- | :--- | :--- |\n\
| **NFR-001** | Security | Hooks **MUST** avoid unsafe commands and be reviewable. | Safety. |\n\
\n---\n\n## 5. Technology & Platform Requirements\n\n\
| ID | Title | Description | Rationale |\n| :--- | :--- | :--- | :--- |\n\
| **TECH-001** | Supported Platforms | The system **MUST** document its supported runtimes and platforms. | Compatibility. |\n\
\n---\n\n## 6. Operational & DevOps Requirements\n\n\
| ID | Title | Description | Rationale |\n| :--- | :--- | :--- | :--- |\n\
| **DEV-001** | Conventional Commits | Commits **MUST** follow Conventional Commits. | Enables changelogs. |\n";

/// Inputs for [`generate_srs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrsOptions {
    pub target: PathBuf,
    pub project: String,
    pub version: String,
    pub status: String,
}

impl SrsOptions {
    pub fn new(target: impl Into<PathBuf>, project: impl Into<String>) -> Self {
        SrsOptions {
            target: target.into(),
            project: project.into(),
            version: DEFAULT_VERSION.to_string(),
            status: DEFAULT_STATUS.to_string(),
        }
    }
}

/// The two collaborator-replaceable tables, each a complete Markdown table
/// (header, separator and rows).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrsTables {
    pub functional: String,
    pub user: String,
}

impl Default for SrsTables {
    fn default() -> Self {
        SrsTables {
            functional: format!("{TABLE_HEADER}{DEFAULT_FUNCTIONAL_ROWS}"),
            user: format!("{TABLE_HEADER}{DEFAULT_USER_ROWS}"),
        }
    }
}

/// `<target>/docs/SRS.md`.
pub fn srs_path(target: &Path) -> PathBuf {
    target.join("docs").join("SRS.md")
}

fn is_table_line(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

fn is_separator_row(line: &str) -> bool {
    let line = line.trim();
    line.contains('-') && line.chars().all(|c| matches!(c, '|' | ':' | '-' | ' '))
}

/// Normalise one table block: keep its own header when it has one,
/// otherwise prefix the standard header.
fn as_table(block: &[&str]) -> Option<String> {
    if block.is_empty() || !block.iter().all(|l| is_table_line(l)) {
        return None;
    }
    let mut out = String::new();
    if !block.get(1).is_some_and(|l| is_separator_row(l)) {
        out.push_str(TABLE_HEADER);
    }
    for line in block {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    Some(out)
}

/// Parse a reply holding two Markdown tables separated by a blank line.
/// Code-fence lines are ignored; blocks after the second are dropped.
pub fn parse_tables(reply: &str) -> Result<SrsTables, GenerateError> {
    let mut blocks: Vec<Vec<&str>> = vec![Vec::new()];
    for line in reply.lines().filter(|l| !l.trim_start().starts_with("```")) {
        if line.trim().is_empty() {
            if blocks.last().is_some_and(|b| !b.is_empty()) {
                blocks.push(Vec::new());
            }
        } else if let Some(current) = blocks.last_mut() {
            current.push(line);
        }
    }
    blocks.retain(|b| !b.is_empty());

    match blocks.as_slice() {
        [first, second, ..] => match (as_table(first), as_table(second)) {
            (Some(functional), Some(user)) => Ok(SrsTables { functional, user }),
            _ => Err(GenerateError::Malformed(
                "expected Markdown tables in the first two blocks".into(),
            )),
        },
        _ => Err(GenerateError::Malformed(format!(
            "expected two tables, found {} block(s)",
            blocks.len()
        ))),
    }
}

/// Render the whole document.
pub fn render_srs(opts: &SrsOptions, tables: &SrsTables) -> String {
    let project = &opts.project;
    let mut doc = format!(
        "# {project} - Software Requirements Specification\n\n**Version:** {}  \n**Status:** {}\n",
        opts.version, opts.status
    );
    doc.push_str(&format!(
        "\n## Introduction\n\n\
This document outlines the software requirements for **{project}**. It serves as the single source of truth for what the system must do, the constraints under which it must operate, and the rules governing its development and deployment.\n\n\
Each requirement has a **unique, stable ID** (e.g., `PROD-001`). These IDs **MUST** be used to link implementation stories and test cases back to these foundational requirements, ensuring complete traceability.\n\n\
The requirement keywords (`MUST`, `MUST NOT`, `SHOULD`, `SHOULD NOT`, `MAY`) are used as defined in RFC 2119.\n\n---\n"
    ));
    doc.push_str(
        "\n## 1. Product & Functional Requirements\n\n\
*Defines what the system does; its core features and capabilities.*\n\n",
    );
    doc.push_str(&tables.functional);
    doc.push_str(
        "\n---\n\n## 2. User Interaction Requirements\n\n\
*Defines how a user interacts with the system. Focuses on usability and user-facing workflows.*\n\n",
    );
    doc.push_str(&tables.user);
    doc.push_str(FIXED_SECTIONS);
    doc
}

/// The tables for `project`: the collaborator's when usable, otherwise
/// [`SrsTables::default`].
pub fn draft_tables(
    project: &str,
    collaborator: Option<&dyn ContentGenerator>,
) -> Drafted<SrsTables> {
    let prompt = format!(
        "Project: {project}. Provide a Product & Functional Requirements table with 5-8 rows using IDs PROD-001.., \
and a User Interaction table with 3-5 rows using IDs USER-001.. . \
Columns: ID, Title, Description (with MUST/SHOULD), Rationale. \
Output only the two Markdown tables without headings, separated by a blank line."
    );
    draft(
        collaborator,
        Request {
            prompt: &prompt,
            system: SYSTEM_PROMPT,
        },
        parse_tables,
        SrsTables::default,
    )
}

/// Build the SRS and write it to `docs/SRS.md` under `opts.target`.
pub fn generate_srs(
    opts: &SrsOptions,
    collaborator: Option<&dyn ContentGenerator>,
) -> Result<GeneratedDoc, GenerateError> {
    let tables = draft_tables(&opts.project, collaborator);
    let body = render_srs(opts, tables.get());
    let path = srs_path(&opts.target);
    write_document(&path, &body)?;
    Ok(GeneratedDoc {
        path,
        generated: tables.is_generated(),
    })
}
