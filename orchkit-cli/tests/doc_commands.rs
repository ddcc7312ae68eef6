use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn orchkit(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("orchkit"));
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env_remove("OPENAI_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn gen_srs_writes_skeleton() {
    let home = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();

    orchkit(home.path())
        .arg("gen-srs")
        .arg(target.path())
        .args(["--project", "docloom", "--version", "0.3", "--status", "Draft"])
        .assert()
        .success()
        .stdout(contains("SRS written to"));

    let body = fs::read_to_string(target.path().join("docs/SRS.md")).unwrap();
    assert!(body.starts_with("# docloom - Software Requirements Specification"));
    assert!(body.contains("**Version:** 0.3"));
    assert!(body.contains("**Status:** Draft"));
    assert!(body.contains("## 1. Product & Functional Requirements"));
}

#[test]
fn gen_srs_requires_project_unless_interactive() {
    let home = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();

    orchkit(home.path())
        .arg("gen-srs")
        .arg(target.path())
        .assert()
        .failure()
        .stderr(contains("--project is required"));

    assert!(!target.path().join("docs").exists());
}

#[test]
fn gen_phase_writes_default_stories() {
    let home = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();

    orchkit(home.path())
        .arg("gen-phase")
        .arg(target.path())
        .args(["--stack", "go"])
        .assert()
        .success()
        .stdout(contains("phase-go-1.md"));

    let body = fs::read_to_string(target.path().join(".pm/phase-go-1.md")).unwrap();
    assert!(body.contains("PHASE-GO-1"));
    assert!(body.contains("STORY-1.1"));
}

#[test]
fn gen_phase_honours_id_and_title() {
    let home = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();

    orchkit(home.path())
        .arg("gen-phase")
        .arg(target.path())
        .args(["--stack", "go", "--id", "PHASE-GO-4", "--title", "Hardening"])
        .assert()
        .success();

    let body = fs::read_to_string(target.path().join(".pm/phase-go-4.md")).unwrap();
    assert!(body.starts_with("# [ ] PHASE-GO-4: Hardening"));
}

#[test]
fn ai_without_key_is_a_startup_error() {
    let home = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();

    orchkit(home.path())
        .arg("gen-phase")
        .arg(target.path())
        .args(["--stack", "go", "--ai"])
        .assert()
        .failure()
        .stderr(contains("OPENAI_API_KEY"));

    assert!(!target.path().join(".pm").exists());
}

#[test]
fn unreachable_collaborator_falls_back_to_defaults() {
    let home = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();

    // Port 9 on localhost refuses connections, so the request fails fast.
    orchkit(home.path())
        .arg("gen-srs")
        .arg(target.path())
        .args([
            "--project",
            "docloom",
            "--ai",
            "--api-key",
            "sk-test",
            "--base-url",
            "http://127.0.0.1:9",
        ])
        .assert()
        .success()
        .stdout(contains("default tables used"));

    let body = fs::read_to_string(target.path().join("docs/SRS.md")).unwrap();
    assert!(body.contains("PROD-001"));
    assert!(body.contains("USER-001"));
}
