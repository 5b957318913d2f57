//! Single-request dispatch with method-appropriate payload encoding
//!
//! Encoding rules, keyed on the request `Content-Type` (lower-cased substring):
//!
//! | method        | content type contains | payload goes to     |
//! |---------------|-----------------------|---------------------|
//! | GET           | anything              | query string        |
//! | DELETE        | `json`                | JSON body           |
//! | DELETE        | otherwise             | dropped             |
//! | anything else | `application/json`    | JSON body           |
//! | anything else | otherwise             | form-encoded body   |

use std::time::{Duration, Instant};

use log::info;
use reqwest::Method;
use serde_json::Value;

use super::client::ApiClient;
use super::response::CapturedResponse;
use crate::auth::HeaderSet;
use crate::error::{ParityError, Result};

/// Where a request payload is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadEncoding {
    Query,
    Json,
    Form,
    Omitted,
}

/// Pick the payload encoding for `method` given a lower-cased content type
pub fn payload_encoding(method: &Method, content_type: &str) -> PayloadEncoding {
    if *method == Method::GET {
        PayloadEncoding::Query
    } else if *method == Method::DELETE {
        if content_type.contains("json") {
            PayloadEncoding::Json
        } else {
            PayloadEncoding::Omitted
        }
    } else if content_type.contains("application/json") {
        PayloadEncoding::Json
    } else {
        PayloadEncoding::Form
    }
}

/// Parse an HTTP method name case-insensitively
pub fn parse_method(method: &str) -> Result<Method> {
    Method::from_bytes(method.trim().to_ascii_uppercase().as_bytes())
        .map_err(|_| ParityError::Config(format!("invalid HTTP method '{}'", method)))
}

/// A response paired with the wall-clock time the call took
#[derive(Debug, Clone)]
pub struct TimedResponse {
    pub response: CapturedResponse,
    pub elapsed: Duration,
}

impl TimedResponse {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

impl ApiClient {
    /// Send one request and return the response whatever its status
    pub async fn dispatch(
        &self,
        method: &str,
        url: &str,
        headers: &HeaderSet,
        payload: Option<&Value>,
    ) -> Result<CapturedResponse> {
        let method = parse_method(method)?;
        let content_type = headers.content_type();
        let encoding = payload_encoding(&method, &content_type);

        info!(
            "🔹 {} {} | Payload: {} | Headers: {}",
            method,
            url,
            payload.map(|p| p.to_string()).unwrap_or_else(|| "None".to_string()),
            headers.redacted()
        );

        let mut request = self.http_client().request(method, url);
        for (name, value) in headers.iter() {
            request = request.header(name, value);
        }

        if let Some(payload) = payload {
            request = match encoding {
                PayloadEncoding::Query => request.query(payload),
                PayloadEncoding::Json => request.json(payload),
                PayloadEncoding::Form => request.form(payload),
                PayloadEncoding::Omitted => request,
            };
        }

        let response = CapturedResponse::capture(request.send().await?).await?;
        info!("🔹 Status: {} | Response: {}", response.status(), response.log_body());
        Ok(response)
    }

    /// `dispatch` timed on a monotonic clock; `payload` wins over `params` when both are given
    pub async fn timed_request(
        &self,
        method: &str,
        url: &str,
        headers: &HeaderSet,
        params: Option<&Value>,
        payload: Option<&Value>,
    ) -> Result<TimedResponse> {
        let start = Instant::now();
        let response = self.dispatch(method, url, headers, payload.or(params)).await?;
        let elapsed = start.elapsed();
        Ok(TimedResponse { response, elapsed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_always_uses_query_string() {
        for content_type in ["application/json", "application/x-www-form-urlencoded", "text/xml", ""] {
            assert_eq!(payload_encoding(&Method::GET, content_type), PayloadEncoding::Query);
        }
    }

    #[test]
    fn test_delete_json_or_nothing() {
        assert_eq!(payload_encoding(&Method::DELETE, "application/json"), PayloadEncoding::Json);
        assert_eq!(payload_encoding(&Method::DELETE, "application/vnd.api+json"), PayloadEncoding::Json);
        assert_eq!(
            payload_encoding(&Method::DELETE, "application/x-www-form-urlencoded"),
            PayloadEncoding::Omitted
        );
    }

    #[test]
    fn test_other_methods_json_or_form() {
        for method in [Method::POST, Method::PUT, Method::PATCH] {
            assert_eq!(payload_encoding(&method, "application/json; charset=utf-8"), PayloadEncoding::Json);
            // Only the exact media type selects JSON outside DELETE
            assert_eq!(payload_encoding(&method, "application/vnd.api+json"), PayloadEncoding::Form);
            assert_eq!(payload_encoding(&method, ""), PayloadEncoding::Form);
        }
    }

    #[test]
    fn test_parse_method_is_case_insensitive() {
        assert_eq!(parse_method("get").unwrap(), Method::GET);
        assert_eq!(parse_method("Delete").unwrap(), Method::DELETE);
        assert_eq!(parse_method("patch").unwrap(), Method::PATCH);
        assert!(parse_method("NOT A METHOD").is_err());
    }
}
