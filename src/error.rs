//! Error taxonomy for parity checks
//!
//! Every failure a scenario can hit maps to one variant here. `Skipped` is the
//! odd one out: it means an auth mode is not configured for this environment,
//! which the runner reports separately from real failures.

use thiserror::Error;

/// Which backend a value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Legacy,
    Gateway,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Legacy => write!(f, "legacy"),
            Side::Gateway => write!(f, "gateway"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ParityError {
    /// Configuration for an auth mode is intentionally absent
    #[error("skipped: {0}")]
    Skipped(String),

    #[error("Failed to fetch {system} token → {status}: {body}")]
    TokenRequestFailed {
        system: String,
        status: u16,
        body: String,
    },

    #[error("No access_token found in {system} response → {body}")]
    MissingAccessToken { system: String, body: String },

    #[error("Status code mismatch: legacy={legacy}, gateway={gateway}")]
    StatusMismatch { legacy: u16, gateway: u16 },

    #[error("JSON schema mismatch: legacy keys={legacy:?}, gateway keys={gateway:?}")]
    JsonKeyMismatch {
        legacy: Vec<String>,
        gateway: Vec<String>,
    },

    #[error("XML tag mismatch: legacy tags={legacy:?}, gateway tags={gateway:?}")]
    XmlTagMismatch {
        legacy: Vec<String>,
        gateway: Vec<String>,
    },

    #[error("Raw text mismatch: legacy={legacy}, gateway={gateway}")]
    TextMismatch { legacy: String, gateway: String },

    #[error("Malformed XML in {side} response: {reason}")]
    MalformedXml { side: Side, reason: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ParityError {
    /// True when the scenario should be reported as skipped rather than failed
    pub fn is_skip(&self) -> bool {
        matches!(self, ParityError::Skipped(_))
    }

    /// True for cross-backend shape or status disagreements
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            ParityError::StatusMismatch { .. }
                | ParityError::JsonKeyMismatch { .. }
                | ParityError::XmlTagMismatch { .. }
                | ParityError::TextMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ParityError>;
