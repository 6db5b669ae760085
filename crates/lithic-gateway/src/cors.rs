//! Permissive CORS headers as an optional response-middleware stage.

use std::collections::HashMap;

use lithic_router::{response_stage, ResponseMiddleware};

/// The fixed permissive cross-origin header set.
pub fn cors_headers() -> HashMap<String, String> {
    [
        (
            "Access-Control-Allow-Headers",
            "Content-Type, Accept, Origin, Referer, User-Agent",
        ),
        ("Access-Control-Allow-Methods", "POST, GET, OPTIONS, DELETE"),
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Expose-Headers", "*"),
        ("Access-Control-Max-Age", "86400"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .collect()
}

/// A response middleware stage merging [`cors_headers`] into every response.
///
/// Purely additive; existing headers with other names are kept, colliding
/// CORS header names take the permissive value.
pub fn enable_cors() -> ResponseMiddleware {
    response_stage(|response| async move { Ok(response.headers(cors_headers())) })
}
