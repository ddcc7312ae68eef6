//! Read-only health check of a scaffolded target tree.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// A static presence check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorCheck {
    pub label: String,
    pub path: PathBuf,
    /// Optional checks are reported but never counted as failures.
    pub required: bool,
}

impl DoctorCheck {
    fn required(label: &str, path: PathBuf) -> Self {
        DoctorCheck { label: label.to_string(), path, required: true }
    }
}

/// Result of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub label: String,
    pub path: PathBuf,
    pub required: bool,
    pub passed: bool,
}

/// Every outcome, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoctorReport {
    pub failures: usize,
    pub checks: Vec<CheckOutcome>,
}

impl DoctorReport {
    pub fn is_healthy(&self) -> bool {
        self.failures == 0
    }
}

/// The fixed presence checks for `target`.
pub fn static_checks(target: &Path) -> Vec<DoctorCheck> {
    let claude = target.join(".claude");
    let hooks = claude.join("hooks");
    vec![
        DoctorCheck::required("orch.yaml", claude.join("orch.yaml")),
        DoctorCheck::required("settings.json", claude.join("settings.json")),
        DoctorCheck::required("runner.py", claude.join("mcp").join("runner.py")),
        DoctorCheck::required("drivers dir", drivers_dir(target)),
        DoctorCheck::required(
            "hook: block_task_when_orchestrator.py",
            hooks.join("block_task_when_orchestrator.py"),
        ),
        DoctorCheck::required(
            "hook: inject_orchestration_context.py",
            hooks.join("inject_orchestration_context.py"),
        ),
        DoctorCheck::required("hook: on_subagent_stop.py", hooks.join("on_subagent_stop.py")),
        DoctorCheck::required(
            "agent: orchestrator-core.md",
            agents_dir(target).join("orchestrator-core.md"),
        ),
    ]
}

/// Run every check against `target`. Never mutates the tree.
pub fn run(target: &Path) -> DoctorReport {
    let mut checks: Vec<CheckOutcome> = static_checks(target)
        .into_iter()
        .map(|c| CheckOutcome {
            passed: c.path.exists(),
            label: c.label,
            path: c.path,
            required: c.required,
        })
        .collect();

    let drivers = drivers_dir(target);
    checks.push(CheckOutcome {
        label: "drivers present".to_string(),
        passed: has_driver_yaml(&drivers),
        path: drivers,
        required: true,
    });

    let agents = agents_dir(target);
    checks.push(CheckOutcome {
        label: "stack agents pair (engineer/qa)".to_string(),
        passed: has_agent_pair(&agents),
        path: agents,
        required: true,
    });

    let srs = target.join("docs").join("SRS.md");
    checks.push(CheckOutcome {
        label: "docs/SRS.md".to_string(),
        passed: srs.exists(),
        path: srs,
        required: false,
    });

    let failures = checks.iter().filter(|c| c.required && !c.passed).count();
    DoctorReport { failures, checks }
}

fn drivers_dir(target: &Path) -> PathBuf {
    target.join(".claude").join("mcp").join("drivers")
}

fn agents_dir(target: &Path) -> PathBuf {
    target.join(".claude").join("agents")
}

fn file_names(dir: &Path) -> Vec<String> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    }
}

fn has_driver_yaml(dir: &Path) -> bool {
    file_names(dir)
        .iter()
        .any(|n| n.ends_with(".yaml") || n.ends_with(".yml"))
}

fn has_agent_pair(dir: &Path) -> bool {
    let names = file_names(dir);
    names
        .iter()
        .filter_map(|n| n.strip_suffix("-engineer.md"))
        .any(|stack| names.iter().any(|n| *n == format!("{stack}-qa.md")))
}
