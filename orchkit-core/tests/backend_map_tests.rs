//! Backend-map parsing tests for `orchkit-core`.
//!
//! Each `#[case]` is isolated — no shared state.

use orchkit_core::{Backend, BackendMap, ConfigError, Role};
use rstest::rstest;

// ---------------------------------------------------------------------------
// Accepted input
// ---------------------------------------------------------------------------

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("   "))]
fn absent_or_blank_input_is_empty_map(#[case] input: Option<&str>) {
    let map = BackendMap::parse(input).expect("parse");
    assert!(map.is_empty());
}

#[test]
fn full_map_parses_every_role() {
    let map = BackendMap::parse(Some("orchestrator=claude,engineer=codex,qa=gemini")).unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map.get(Role::Orchestrator), Some(Backend::Claude));
    assert_eq!(map.get(Role::Engineer), Some(Backend::Codex));
    assert_eq!(map.get(Role::Qa), Some(Backend::Gemini));
}

#[rstest]
#[case("orchestrator=claude,engineer=codex", "engineer=codex,orchestrator=claude")]
#[case("qa=gemini,engineer=claude,orchestrator=codex", "orchestrator=codex,qa=gemini,engineer=claude")]
#[case("engineer=codex", " engineer = codex ")]
fn parse_is_order_independent(#[case] a: &str, #[case] b: &str) {
    assert_eq!(
        BackendMap::parse(Some(a)).unwrap(),
        BackendMap::parse(Some(b)).unwrap()
    );
}

#[test]
fn partial_map_leaves_other_roles_unset() {
    let map = BackendMap::parse(Some("qa=codex")).unwrap();
    assert_eq!(map.get(Role::Qa), Some(Backend::Codex));
    assert_eq!(map.get(Role::Orchestrator), None);
}

// ---------------------------------------------------------------------------
// Rejected input
// ---------------------------------------------------------------------------

#[rstest]
#[case("orchestrator")]
#[case("orchestrator=claude,engineer")]
#[case("=claude")]
#[case("qa=")]
#[case("orchestrator=claude,")]
fn missing_separator_or_side_is_invalid_entry(#[case] input: &str) {
    let err = BackendMap::parse(Some(input)).unwrap_err();
    assert!(
        matches!(err, ConfigError::InvalidBackendEntry(_)),
        "{input:?} gave {err}"
    );
}

#[rstest]
#[case("reviewer=claude")]
#[case("orchestrator=claude,designer=codex")]
fn unknown_role_is_rejected(#[case] input: &str) {
    let err = BackendMap::parse(Some(input)).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownRole(_)), "got: {err}");
}

#[rstest]
#[case("engineer=gpt")]
#[case("qa=claude=codex")]
fn unknown_backend_is_rejected(#[case] input: &str) {
    let err = BackendMap::parse(Some(input)).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownBackend(_)), "got: {err}");
}

#[test]
fn duplicate_role_is_rejected() {
    let err = BackendMap::parse(Some("qa=claude,qa=codex")).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateRole(Role::Qa)), "got: {err}");
    assert!(err.to_string().contains("qa"));
}

#[test]
fn error_message_names_the_bad_entry() {
    let err = BackendMap::parse(Some("orchestrator=claude,bogus")).unwrap_err();
    assert!(err.to_string().contains("bogus"), "got: {err}");
}
