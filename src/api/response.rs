use serde_json::{Map, Value};

use crate::auth::HeaderSet;
use crate::error::Result;

/// A backend response with its body already read
///
/// Non-2xx statuses are ordinary data here; negative-path scenarios inspect
/// 4xx/5xx bodies the same way as successful ones.
#[derive(Debug, Clone)]
pub struct CapturedResponse {
    status: u16,
    headers: HeaderSet,
    body: String,
}

impl CapturedResponse {
    pub fn new(status: u16, headers: HeaderSet, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    pub(crate) async fn capture(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let mut headers = HeaderSet::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str(), value);
            }
        }
        let body = response.text().await?;
        Ok(Self::new(status, headers, body))
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Lower-cased `Content-Type`, empty when absent
    pub fn content_type(&self) -> String {
        self.headers.content_type()
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    pub fn json(&self) -> std::result::Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Body as a JSON object, `None` if it does not decode to one
    pub fn json_object(&self) -> Option<Map<String, Value>> {
        match self.json() {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        }
    }

    /// Body for log lines: compact JSON when it decodes, trimmed text otherwise
    pub fn log_body(&self) -> String {
        match self.json() {
            Ok(value) => value.to_string(),
            Err(_) => self.body.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(content_type: &str, body: &str) -> CapturedResponse {
        let mut headers = HeaderSet::new();
        headers.insert("content-type", content_type);
        CapturedResponse::new(200, headers, body)
    }

    #[test]
    fn test_json_object_only_for_objects() {
        assert!(response("application/json", r#"{"a":1}"#).json_object().is_some());
        assert!(response("application/json", "[1,2]").json_object().is_none());
        assert!(response("text/plain", "Unauthorized").json_object().is_none());
    }

    #[test]
    fn test_content_type_lookup_is_case_insensitive() {
        let resp = response("Application/XML; charset=UTF-8", "<a/>");
        assert_eq!(resp.content_type(), "application/xml; charset=utf-8");
        assert_eq!(resp.header("Content-Type"), Some("Application/XML; charset=UTF-8"));
    }
}
