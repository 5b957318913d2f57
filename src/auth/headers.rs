//! Authorization header construction
//!
//! Both builders copy the base template and overlay `Authorization`. The
//! template is session-wide and shared by every scenario, so it is taken by
//! shared reference and never written to.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::error::{ParityError, Result};

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// Ordered header name → value mapping
///
/// Lookups and overwrites match names case-insensitively, insertion order is
/// kept for logging and for the request itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a header set from a JSON object of string values
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            ParityError::Config(format!("header template must be a JSON object, got: {}", value))
        })?;

        let mut headers = Self::new();
        for (name, value) in object {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Number(_) | Value::Bool(_) => value.to_string(),
                other => {
                    return Err(ParityError::Config(format!(
                        "header '{}' must be a string, got: {}",
                        name, other
                    )));
                }
            };
            headers.insert(name.clone(), value);
        }
        Ok(headers)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Set a header, replacing any existing entry with the same name in place
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Lower-cased `Content-Type`, empty when absent
    pub fn content_type(&self) -> String {
        self.get(CONTENT_TYPE).unwrap_or_default().to_lowercase()
    }

    /// Copy of this set with `Authorization` overlaid
    pub fn with_authorization(&self, value: impl Into<String>) -> Self {
        let mut headers = self.clone();
        headers.insert(AUTHORIZATION, value);
        headers
    }

    /// Rendering safe for logs: credentials in `Authorization` are masked
    pub fn redacted(&self) -> String {
        let parts: Vec<String> = self
            .iter()
            .map(|(name, value)| {
                if name.eq_ignore_ascii_case(AUTHORIZATION) {
                    let scheme = value.split_whitespace().next().unwrap_or("");
                    format!("{}: {} ***", name, scheme)
                } else {
                    format!("{}: {}", name, value)
                }
            })
            .collect();
        format!("{{{}}}", parts.join(", "))
    }
}

/// Basic-Auth header: `Authorization: Basic base64(username:password)`
///
/// Missing credentials are a configuration choice, reported as a skip.
pub fn basic_auth_header(
    base_headers: &HeaderSet,
    username: Option<&str>,
    password: Option<&str>,
) -> Result<HeaderSet> {
    let (username, password) = match (non_empty(username), non_empty(password)) {
        (Some(u), Some(p)) => (u, p),
        _ => {
            return Err(ParityError::Skipped(
                "missing username or password for basic auth".to_string(),
            ));
        }
    };

    let encoded = STANDARD.encode(format!("{}:{}", username, password));
    Ok(base_headers.with_authorization(format!("Basic {}", encoded)))
}

/// Bearer header: `Authorization: <token_type> <token>`
pub fn bearer_header(base_headers: &HeaderSet, token: &str, token_type: Option<&str>) -> HeaderSet {
    let token_type = non_empty(token_type).unwrap_or(DEFAULT_TOKEN_TYPE);
    base_headers.with_authorization(format!("{} {}", token_type, token))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
