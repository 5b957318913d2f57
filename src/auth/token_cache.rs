//! OAuth2 client-credentials token cache
//!
//! One entry per distinct credential tuple, kept for the lifetime of the cache.
//! There is no TTL tracking: a token that expires server-side mid-run stays
//! cached until `clear` is called.

use std::collections::HashMap;

use log::{debug, info};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::{ParityError, Result};

/// Full argument tuple identifying a cached token
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TokenKey {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub grant_type: String,
    pub system_name: String,
}

impl std::fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKey")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("token_url", &self.token_url)
            .field("grant_type", &self.grant_type)
            .field("system_name", &self.system_name)
            .finish()
    }
}

/// Memoizes access tokens per `TokenKey`
///
/// The lock is held across the token request so concurrent callers with the
/// same key trigger a single fetch.
#[derive(Debug, Default)]
pub struct TokenCache {
    tokens: Mutex<HashMap<TokenKey, String>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached token for `key`, fetching it on first use
    pub async fn get_token(&self, http: &reqwest::Client, key: &TokenKey) -> Result<String> {
        if key.token_url.is_empty() {
            return Err(ParityError::Skipped(format!(
                "No token URL configured for {}. Skipping OAuth test.",
                key.system_name
            )));
        }

        let mut tokens = self.tokens.lock().await;
        if let Some(token) = tokens.get(key) {
            debug!("Using cached {} token", key.system_name);
            return Ok(token.clone());
        }

        let token = fetch_access_token(http, key).await?;
        tokens.insert(key.clone(), token.clone());
        Ok(token)
    }

    pub async fn len(&self) -> usize {
        self.tokens.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.lock().await.is_empty()
    }

    /// Drop every cached token
    pub async fn clear(&self) {
        self.tokens.lock().await.clear();
    }
}

async fn fetch_access_token(http: &reqwest::Client, key: &TokenKey) -> Result<String> {
    info!("Fetching {} token...", key.system_name);

    let response = http
        .post(&key.token_url)
        .form(&[
            ("client_id", key.client_id.as_str()),
            ("client_secret", key.client_secret.as_str()),
            ("grant_type", key.grant_type.as_str()),
        ])
        .send()
        .await?;

    let status = response.status().as_u16();
    debug!("Token request status: {}", status);
    let body = response.text().await?;

    if status != 200 {
        return Err(ParityError::TokenRequestFailed {
            system: key.system_name.clone(),
            status,
            body,
        });
    }

    let token = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|data| {
            data.get("access_token")
                .and_then(|t| t.as_str())
                .filter(|t| !t.is_empty())
                .map(|t| t.to_string())
        });

    token.ok_or_else(|| ParityError::MissingAccessToken {
        system: key.system_name.clone(),
        body,
    })
}
