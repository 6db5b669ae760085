//! Translation between the gateway event envelope and the core shapes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use lithic_router::{Body, Method, Request, Response, Router, SimpleRequest};

use crate::error::GatewayError;

/// An inbound gateway proxy event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    /// HTTP method name.
    pub http_method: String,
    /// Request path.
    pub path: String,
    /// Raw request body, if any.
    #[serde(default)]
    pub body: Option<String>,
    /// Query string parameters, if any.
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

/// The outbound gateway proxy result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResult {
    /// Numeric HTTP status code.
    pub status_code: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Serialized response body.
    pub body: String,
}

/// Converts an inbound event into the core request shape.
///
/// The body is carried as raw text; deserialization is the job of the
/// router's body-parsing middleware stage.
pub fn event_to_request(event: GatewayEvent) -> Result<SimpleRequest, GatewayError> {
    let method = Method::from_str(&event.http_method)
        .ok_or_else(|| GatewayError::UnsupportedMethod(event.http_method.clone()))?;

    let body = match event.body {
        Some(text) if !text.is_empty() => Body::Text(text),
        _ => Body::Empty,
    };

    Ok(Request {
        method,
        path: event.path,
        body,
        query_params: event.query_string_parameters.unwrap_or_default(),
        path_params: None,
    })
}

/// Converts a core response into the gateway result shape.
///
/// The body is serialized to a JSON string and the status-code string is
/// mapped to the transport's numeric convention; a non-numeric code is
/// reported as 500.
pub fn response_to_result(response: Response) -> Result<GatewayResult, GatewayError> {
    let status_code = match response.status_code.parse::<u16>() {
        Ok(code) => code,
        Err(_) => {
            warn!(status = %response.status_code, "non-numeric status code, mapping to 500");
            500
        }
    };

    let body = serde_json::to_string(&response.body)?;

    Ok(GatewayResult {
        status_code,
        headers: response.headers,
        body,
    })
}

/// Dispatches a gateway event through a router and produces the gateway
/// result: envelope in, envelope out.
pub async fn handle_event(
    router: &Router,
    event: GatewayEvent,
) -> Result<GatewayResult, GatewayError> {
    let request = event_to_request(event)?;
    let response = router.handle_request(request).await?;
    response_to_result(response)
}
