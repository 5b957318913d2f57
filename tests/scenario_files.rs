//! Scenario files shipped with the repository

use std::path::Path;

use api_parity::scenario::{AuthMode, filter_scenarios, load_scenarios};

#[test]
fn test_demo_scenarios_load() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/scenarios.toml");
    let scenarios = load_scenarios(&path).unwrap();
    assert_eq!(scenarios.len(), 5);

    let oauth = scenarios.iter().find(|s| s.name == "lookup_by_id_oauth2").unwrap();
    assert_eq!(oauth.auth, AuthMode::OAuth2);

    let smoke = filter_scenarios(scenarios, Some("lookup"));
    assert_eq!(smoke.len(), 2);
}

#[test]
fn test_missing_scenario_file_errors() {
    let err = load_scenarios(Path::new("does/not/exist.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read scenario file"));
}
