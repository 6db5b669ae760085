//! HTTP response values.

use std::collections::HashMap;

use serde_json::{json, Value};

/// An HTTP response.
///
/// Immutable value: middleware stages produce new responses. The status code
/// is kept as a string; the transport adaptation layer owns the translation
/// to a numeric convention.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// HTTP status code.
    pub status_code: String,
    /// Response body.
    pub body: Value,
    /// Response headers.
    pub headers: HashMap<String, String>,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            status_code: "500".to_string(),
            body: json!({}),
            headers: HashMap::new(),
        }
    }
}

impl Response {
    /// Creates a response with the given status code and an empty body.
    pub fn new(status_code: impl Into<String>) -> Self {
        Self {
            status_code: status_code.into(),
            ..Self::default()
        }
    }

    /// Creates a 200 response with the given body.
    pub fn ok(body: Value) -> Self {
        Self::new("200").with_body(body)
    }

    /// Creates a 204 response.
    pub fn created() -> Self {
        Self::new("204")
    }

    /// Creates a 400 response with a `{"message": ...}` body.
    pub fn fail(message: impl Into<String>) -> Self {
        Self::fail_with_status(message, "400")
    }

    /// Creates a failure response with an explicit status code.
    pub fn fail_with_status(message: impl Into<String>, status_code: impl Into<String>) -> Self {
        Self::new(status_code).with_body(json!({ "message": message.into() }))
    }

    /// Creates the canonical not-found response.
    pub fn not_found() -> Self {
        Self::fail_with_status("not found", "404")
    }

    /// Sets the status code.
    #[must_use]
    pub fn status(mut self, status_code: impl Into<String>) -> Self {
        self.status_code = status_code.into();
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Merges a header set into the response; the argument wins on collision.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }
}
