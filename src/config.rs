use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::auth::{HeaderSet, TokenKey};

pub const DEFAULT_RESPONSE_TIME_THRESHOLD: f64 = 0.5;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_GRANT_TYPE: &str = "client_credentials";
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Logical system a credential set belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum System {
    Mulesoft,
    Azure,
    /// Deliberately wrong credentials for the 401 negative path
    Mulesoft401,
}

impl System {
    pub const ALL: [System; 3] = [System::Mulesoft, System::Azure, System::Mulesoft401];

    /// Environment variable prefix, e.g. `MULESOFT` in `MULESOFT_CLIENT_ID`
    pub fn env_prefix(&self) -> &'static str {
        match self {
            System::Mulesoft => "MULESOFT",
            System::Azure => "AZURE",
            System::Mulesoft401 => "MULESOFT401",
        }
    }
}

impl std::fmt::Display for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.env_prefix())
    }
}

impl FromStr for System {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "MULESOFT" => Ok(System::Mulesoft),
            "AZURE" => Ok(System::Azure),
            "MULESOFT401" => Ok(System::Mulesoft401),
            other => anyhow::bail!("Unknown system '{}' (expected mulesoft, azure or mulesoft401)", other),
        }
    }
}

impl TryFrom<String> for System {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<System> for String {
    fn from(system: System) -> Self {
        system.env_prefix().to_lowercase()
    }
}

/// Credentials for one system, resolved once at startup
#[derive(Debug, Clone, Default)]
pub struct SystemCredentials {
    pub token_url: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Outbound HTTP limits
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

/// Process-wide configuration, built once and passed by reference
#[derive(Debug, Clone)]
pub struct ParityConfig {
    pub environment: Option<String>,
    pub grant_type: String,
    pub headers: HeaderSet,
    pub token_type: String,
    pub legacy_url: Option<String>,
    pub gateway_url: Option<String>,
    pub response_time_threshold: f64,
    pub http: HttpSettings,
    systems: HashMap<System, SystemCredentials>,
}

impl ParityConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let headers_str = get("HEADERS")
            .ok_or_else(|| anyhow::anyhow!("Environment variable 'HEADERS' is not set or invalid"))?;
        let headers_json: Value = serde_json::from_str(&headers_str).with_context(|| {
            format!("Environment variable 'HEADERS' must be valid JSON.\nGot: {}", headers_str)
        })?;
        let headers = HeaderSet::from_json(&headers_json)
            .with_context(|| format!("Environment variable 'HEADERS' is not a header object: {}", headers_str))?;

        let response_time_threshold = match get("RESPONSE_TIME_THRESHOLD") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .ok_or_else(|| anyhow::anyhow!("RESPONSE_TIME_THRESHOLD must be a non-negative number, got '{}'", raw))?,
            None => DEFAULT_RESPONSE_TIME_THRESHOLD,
        };

        let http = HttpSettings {
            timeout: Duration::from_secs(parse_secs(get("HTTP_TIMEOUT_SECS"), "HTTP_TIMEOUT_SECS")?),
            connect_timeout: Duration::from_secs(parse_secs(
                get("HTTP_CONNECT_TIMEOUT_SECS"),
                "HTTP_CONNECT_TIMEOUT_SECS",
            )?),
        };

        let mut systems = HashMap::new();
        for system in System::ALL {
            let prefix = system.env_prefix();
            let credentials = SystemCredentials {
                token_url: get(&format!("{}_ACCESS_TOKEN_URL_FOR_OAUTH2_AUTH", prefix)),
                client_id: get(&format!("{}_CLIENT_ID", prefix)),
                client_secret: get(&format!("{}_CLIENT_SECRET", prefix)),
                username: get(&format!("{}_USERNAME", prefix)),
                password: get(&format!("{}_PASSWORD", prefix)),
            };
            debug!(
                "Resolved {} credentials (oauth2: {}, basic: {})",
                prefix,
                credentials.token_url.is_some(),
                credentials.username.is_some() && credentials.password.is_some()
            );
            systems.insert(system, credentials);
        }

        Ok(Self {
            environment: get("ENVIRONMENT"),
            grant_type: get("GRANT_TYPE").unwrap_or_else(|| DEFAULT_GRANT_TYPE.to_string()),
            headers,
            token_type: get("TOKEN_TYPE").unwrap_or_else(|| crate::auth::headers::DEFAULT_TOKEN_TYPE.to_string()),
            legacy_url: get("MULE_URL"),
            gateway_url: get("AZURE_URL"),
            response_time_threshold,
            http,
            systems,
        })
    }

    pub fn credentials(&self, system: System) -> &SystemCredentials {
        // Every variant is populated by from_lookup; this arm only covers hand-built configs.
        static EMPTY: SystemCredentials = SystemCredentials {
            token_url: None,
            client_id: None,
            client_secret: None,
            username: None,
            password: None,
        };
        self.systems.get(&system).unwrap_or(&EMPTY)
    }

    pub fn set_credentials(&mut self, system: System, credentials: SystemCredentials) {
        self.systems.insert(system, credentials);
    }

    /// Token cache key for `system`; an empty token URL means OAuth2 is not configured
    pub fn token_key(&self, system: System) -> TokenKey {
        let creds = self.credentials(system);
        TokenKey {
            client_id: creds.client_id.clone().unwrap_or_default(),
            client_secret: creds.client_secret.clone().unwrap_or_default(),
            token_url: creds.token_url.clone().unwrap_or_default(),
            grant_type: self.grant_type.clone(),
            system_name: system.env_prefix().to_string(),
        }
    }
}

fn parse_secs(raw: Option<String>, name: &str) -> Result<u64> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| anyhow::anyhow!("{} must be a positive whole number of seconds, got '{}'", name, raw)),
        None => Ok(DEFAULT_HTTP_TIMEOUT_SECS),
    }
}

/// Path of the env file for `env` inside `dir`
pub fn env_file_path(dir: &Path, env: &str) -> PathBuf {
    dir.join(format!(".env.{}", env))
}

/// Load `<dir>/.env.<env>` into the process environment
pub fn load_env_file(dir: &Path, env: &str) -> Result<PathBuf> {
    let path = env_file_path(dir, env);
    if !path.exists() {
        anyhow::bail!("Environment file {} not found.", path.display());
    }

    dotenvy::from_path(&path).map_err(|err| match err {
        dotenvy::Error::LineParse(line, index) => anyhow::anyhow!(
            "Failed to parse environment file '{}' at: {} (index {}). \
             Values containing JSON or spaces must be single-quoted, \
             e.g. HEADERS='{{\"Content-Type\": \"application/json\"}}'",
            path.display(),
            line,
            index
        ),
        other => anyhow::Error::new(other)
            .context(format!("Failed to load environment file '{}'", path.display())),
    })?;

    info!("Loaded environment file: {}", path.display());
    Ok(path)
}
