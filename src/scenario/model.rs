use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

use crate::config::System;

/// How the Authorization header is produced for each side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Base header template only
    None,
    #[default]
    Basic,
    #[serde(alias = "oauth")]
    OAuth2,
}

/// One logical request fired at both backends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_method")]
    pub method: String,
    /// Appended to each backend's base URL
    #[serde(default)]
    pub path_suffix: String,
    #[serde(default)]
    pub params: Option<Value>,
    #[serde(default)]
    pub payload: Option<Value>,
    #[serde(default)]
    pub auth: AuthMode,
    /// Replaces Authorization on both sides after normal resolution
    #[serde(default)]
    pub authorization_override: Option<String>,
    #[serde(default = "default_legacy_system")]
    pub legacy_system: System,
    #[serde(default = "default_gateway_system")]
    pub gateway_system: System,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_method() -> String {
    "GET".to_string()
}

fn default_legacy_system() -> System {
    System::Mulesoft
}

fn default_gateway_system() -> System {
    System::Azure
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            method: default_method(),
            path_suffix: String::new(),
            params: None,
            payload: None,
            auth: AuthMode::default(),
            authorization_override: None,
            legacy_system: default_legacy_system(),
            gateway_system: default_gateway_system(),
            tags: Vec::new(),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn path_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.path_suffix = suffix.into();
        self
    }

    pub fn params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    pub fn payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn auth(mut self, auth: AuthMode) -> Self {
        self.auth = auth;
        self
    }

    pub fn authorization_override(mut self, value: impl Into<String>) -> Self {
        self.authorization_override = Some(value.into());
        self
    }

    pub fn systems(mut self, legacy: System, gateway: System) -> Self {
        self.legacy_system = legacy;
        self.gateway_system = gateway;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// The standard regression suite run when no scenario file is given
pub fn builtin_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("001_valid_request_200_ok")
            .describe("Valid request with basic auth returns matching 200 responses")
            .params(json!({"id": "211"}))
            .tag("positive"),
        Scenario::new("002_valid_request_oauth2_200_ok")
            .describe("Valid request with OAuth2 bearer tokens returns matching 200 responses")
            .params(json!({"id": "211"}))
            .auth(AuthMode::OAuth2)
            .tag("positive"),
        Scenario::new("003_invalid_url_endpoint_404_not_found")
            .describe("Unknown endpoint returns matching 404 responses")
            .path_suffix("test404")
            .params(json!({"id": "211"}))
            .tag("negative"),
        Scenario::new("004_invalid_credentials_401_unauthorized")
            .describe("Wrong basic-auth credentials are rejected the same way by both backends")
            .params(json!({"id": "211"}))
            .systems(System::Mulesoft401, System::Mulesoft401)
            .tag("negative"),
        Scenario::new("005_incorrect_auth_details_wrong_headers_400")
            .describe("Garbage Authorization header is rejected the same way by both backends")
            .params(json!({"id": "211"}))
            .authorization_override("Basic INVALID")
            .tag("negative"),
    ]
}

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    #[serde(default, rename = "scenario")]
    scenarios: Vec<Scenario>,
}

/// Parse `[[scenario]]` tables from TOML text
pub fn parse_scenarios(content: &str) -> Result<Vec<Scenario>> {
    let file: ScenarioFile = toml::from_str(content).context("Failed to parse scenario file")?;

    let mut seen = std::collections::HashSet::new();
    for scenario in &file.scenarios {
        if scenario.name.trim().is_empty() {
            anyhow::bail!("Scenario with empty name");
        }
        if !seen.insert(scenario.name.as_str()) {
            anyhow::bail!("Duplicate scenario name '{}'", scenario.name);
        }
        crate::api::parse_method(&scenario.method)
            .with_context(|| format!("Scenario '{}'", scenario.name))?;
    }

    Ok(file.scenarios)
}

/// Load scenarios from a TOML file
pub fn load_scenarios(path: &Path) -> Result<Vec<Scenario>> {
    debug!("Loading scenarios from: {:?}", path);
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file: {:?}", path))?;
    let scenarios = parse_scenarios(&content)
        .with_context(|| format!("Invalid scenario file: {:?}", path))?;
    debug!("Loaded {} scenarios", scenarios.len());
    Ok(scenarios)
}

/// Keep scenarios whose name contains `pattern`
pub fn filter_scenarios(scenarios: Vec<Scenario>, pattern: Option<&str>) -> Vec<Scenario> {
    match pattern {
        Some(pattern) => scenarios
            .into_iter()
            .filter(|s| s.name.contains(pattern))
            .collect(),
        None => scenarios,
    }
}
