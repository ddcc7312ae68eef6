//! Renders every `.tera` source in the bundled template library.

use std::fs;
use std::path::{Path, PathBuf};

use orchkit_core::BackendMap;
use orchkit_renderer::{is_template, output_name, Renderer, TemplateVars};

fn library_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("templates")
}

fn collect(dir: &Path, out: &mut Vec<PathBuf>) {
    for entry in fs::read_dir(dir).expect("read template dir") {
        let path = entry.expect("dir entry").path();
        if path.is_dir() {
            collect(&path, out);
        } else {
            out.push(path);
        }
    }
}

fn rendered_library(stack: &str, map: &str) -> Vec<(PathBuf, String)> {
    let vars = TemplateVars::new(
        &stack.parse().expect("stack"),
        Path::new("./evidence"),
        &BackendMap::parse(Some(map)).expect("map"),
    );
    let renderer = Renderer::new(&vars).expect("renderer");
    let mut files = Vec::new();
    collect(&library_root(), &mut files);
    files.sort();
    files
        .into_iter()
        .filter(|p| is_template(p))
        .map(|p| {
            let bytes = renderer
                .render_file(&p)
                .unwrap_or_else(|e| panic!("render failed for {}: {e}", p.display()));
            (output_name(&p), String::from_utf8(bytes).expect("utf8"))
        })
        .collect()
}

#[test]
fn every_template_renders_without_leftover_tags() {
    let outputs = rendered_library("golang", "engineer=codex,qa=gemini");
    assert!(outputs.len() >= 10, "expected the full library, got {}", outputs.len());
    for (path, content) in &outputs {
        assert!(
            !content.contains("{{") && !content.contains("{%"),
            "unrendered tag in {}",
            path.display()
        );
    }
}

#[test]
fn yaml_outputs_are_valid_yaml() {
    for (path, content) in rendered_library("dotnet", "orchestrator=gemini") {
        if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
            continue;
        }
        serde_yaml::from_str::<serde_yaml::Value>(&content).unwrap_or_else(|e| {
            panic!("{} rendered invalid YAML.\nError: {e}\nContent:\n{content}", path.display())
        });
    }
}

#[test]
fn orch_yaml_records_stack_and_backends() {
    let outputs = rendered_library("golang", "engineer=codex");
    let (_, orch) = outputs
        .iter()
        .find(|(p, _)| p.ends_with(".claude/orch.yaml"))
        .expect("orch.yaml in library");
    let doc: serde_yaml::Value = serde_yaml::from_str(orch).expect("yaml");
    assert_eq!(doc["stack"].as_str(), Some("golang"));
    assert_eq!(doc["agents"]["engineer"]["name"].as_str(), Some("golang-engineer"));
    assert_eq!(doc["agents"]["engineer"]["backend"].as_str(), Some("codex"));
    assert_eq!(doc["agents"]["qa"]["backend"].as_str(), Some("claude"));
    assert_eq!(doc["backend_order"].as_sequence().map(Vec::len), Some(3));
}

#[test]
fn driver_lists_only_roles_mapped_to_it() {
    let outputs = rendered_library("golang", "engineer=codex");
    let (_, codex) = outputs
        .iter()
        .find(|(p, _)| p.ends_with("drivers/codex.yaml"))
        .expect("codex driver");
    let doc: serde_yaml::Value = serde_yaml::from_str(codex).expect("yaml");
    let roles: Vec<&str> = doc["roles"]
        .as_sequence()
        .expect("roles list")
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(roles, vec!["engineer"]);
}

#[test]
fn settings_json_is_valid_json() {
    let path = library_root().join("common").join(".claude").join("settings.json");
    let content = fs::read_to_string(&path).expect("settings.json");
    serde_json::from_str::<serde_json::Value>(&content).expect("valid JSON");
}

#[test]
fn no_crlf_in_any_rendered_output() {
    for (path, content) in rendered_library("golang", "") {
        assert!(
            !content.contains('\r'),
            "{} contains CR char — line endings not normalised",
            path.display()
        );
    }
}
