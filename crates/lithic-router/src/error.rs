//! Error types for routing.

use thiserror::Error;

/// Router-specific errors.
///
/// An unmatched request is not an error: resolution degrades to the terminal
/// not-found route and dispatch still yields a well-formed `Response`.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A path pattern failed to compile.
    #[error("invalid path pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A body claimed to be structured data but failed to parse.
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// A handler or middleware stage failed.
    #[error("handler failed: {0}")]
    Handler(Box<dyn std::error::Error + Send + Sync>),
}

impl RouterError {
    /// Wraps an arbitrary error raised inside a handler or middleware stage.
    pub fn handler(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Handler(err.into())
    }
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
