//! Env-file loading feeding the typed configuration

use std::fs;

use api_parity::config::{self, ParityConfig, System, env_file_path};

#[test]
fn test_env_file_populates_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = env_file_path(dir.path(), "svt");
    fs::write(
        &path,
        concat!(
            "APIPARITY_TEST_ENVIRONMENT=svt\n",
            "APIPARITY_TEST_HEADERS='{\"Content-Type\": \"application/json\"}'\n",
            "APIPARITY_TEST_MULESOFT_USERNAME=mule\n",
        ),
    )
    .unwrap();

    let loaded = config::load_env_file(dir.path(), "svt").unwrap();
    assert_eq!(loaded, path);

    // Prefixed so this test never collides with a real environment
    let config = ParityConfig::from_lookup(|key| std::env::var(format!("APIPARITY_TEST_{}", key)).ok()).unwrap();
    assert_eq!(config.environment.as_deref(), Some("svt"));
    assert_eq!(config.headers.get("content-type"), Some("application/json"));
    assert_eq!(config.credentials(System::Mulesoft).username.as_deref(), Some("mule"));
    assert!(config.credentials(System::Azure).username.is_none());
}
