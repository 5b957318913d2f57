//! Shared fixtures for integration tests

use std::collections::HashMap;

use api_parity::config::ParityConfig;

pub const JSON_HEADERS: &str = r#"{"Content-Type": "application/json", "Accept": "application/json"}"#;

/// Config pointing both backends at the given base URLs, plus extra variables
pub fn config_with(legacy_url: &str, gateway_url: &str, extra: &[(&str, &str)]) -> ParityConfig {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("HEADERS".to_string(), JSON_HEADERS.to_string());
    vars.insert("MULE_URL".to_string(), legacy_url.to_string());
    vars.insert("AZURE_URL".to_string(), gateway_url.to_string());
    for (key, value) in extra {
        vars.insert(key.to_string(), value.to_string());
    }
    ParityConfig::from_lookup(move |key| vars.get(key).cloned()).expect("valid test config")
}

/// Basic-auth credentials for both standard systems
pub const BASIC_CREDENTIALS: [(&str, &str); 4] = [
    ("MULESOFT_USERNAME", "mule"),
    ("MULESOFT_PASSWORD", "mule-pass"),
    ("AZURE_USERNAME", "azure"),
    ("AZURE_PASSWORD", "azure-pass"),
];
