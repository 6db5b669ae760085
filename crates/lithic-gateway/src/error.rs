//! Error types for gateway adaptation.

use lithic_router::RouterError;
use thiserror::Error;

/// Errors raised while translating between the gateway envelope and the
/// core request/response shapes, or propagated from dispatch.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The event carried a method the router does not support.
    #[error("unsupported http method: {0}")]
    UnsupportedMethod(String),

    /// A failure propagated out of the router core.
    #[error(transparent)]
    Router(#[from] RouterError),

    /// The response body could not be serialized for the transport.
    #[error("failed to serialize response body: {0}")]
    Serialize(#[from] serde_json::Error),
}
