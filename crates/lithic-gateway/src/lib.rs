//! # lithic-gateway
//!
//! Transport adaptation for `lithic-router`: converts an inbound gateway
//! proxy event into the core request shape, dispatches it, and converts the
//! response back into the gateway's result envelope. Also ships the optional
//! permissive CORS response-middleware stage.
//!
//! ```ignore
//! use lithic_gateway::{enable_cors, handle_event, GatewayEvent};
//! use lithic_router::Router;
//!
//! let router = Router::new()
//!     .get("/ping", ping)
//!     .register_response_middleware(enable_cors());
//!
//! let result = handle_event(&router, event).await?;
//! ```

mod cors;
mod envelope;
mod error;

pub use cors::{cors_headers, enable_cors};
pub use envelope::{event_to_request, handle_event, response_to_result, GatewayEvent, GatewayResult};
pub use error::GatewayError;
