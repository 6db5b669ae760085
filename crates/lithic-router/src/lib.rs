//! # lithic-router
//!
//! A minimal HTTP request router for stateless request handlers.
//!
//! This crate provides:
//! - Path pattern matching with `:name` parameters and percent-decoding
//! - A combinator algebra over routes: first-match-wins alternation and
//!   prefix-scoped grouping
//! - Ordered, async-capable request/response middleware pipelines
//! - A router that resolves exactly one route per request and degrades to a
//!   well-formed not-found response when nothing matches
//!
//! ## Quick Start
//!
//! ```ignore
//! use lithic_router::{Request, Response, Result, Router, SimpleRequest};
//! use serde_json::json;
//!
//! async fn ping(_req: SimpleRequest) -> Result<Response> {
//!     Ok(Response::ok(json!({"pong": true})))
//! }
//!
//! async fn get_user(req: SimpleRequest) -> Result<Response> {
//!     Ok(Response::ok(json!({"id": req.param("id")})))
//! }
//!
//! let router = Router::new()
//!     .get("/ping", ping)
//!     .get("/users/:id", get_user);
//!
//! let response = router.handle_request(Request::get("/users/42")).await?;
//! ```
//!
//! ## Route groups
//!
//! Routes can be declared individually, grouped under a path prefix, or
//! combined with the pure combinators directly:
//!
//! ```ignore
//! use lithic_router::{and, handle, route_method, Method, RouteGroup, Router};
//!
//! let api = RouteGroup::new("/api")
//!     .get("/users/:id", get_user)
//!     .post("/users", create_user);
//!
//! let router = Router::new().with_group(api);
//! ```
//!
//! Registration order is the tie-break: when two routes could match the same
//! request, the one registered earliest wins, so list specific routes before
//! catch-alls.
//!
//! ## Middleware
//!
//! The request pipeline starts with a body-parsing stage that turns non-empty
//! text bodies into structured JSON; further stages are appended and applied
//! left-to-right. The response pipeline starts empty.
//!
//! ```ignore
//! use lithic_router::{response_stage, Router};
//!
//! let router = Router::new()
//!     .get("/ping", ping)
//!     .register_response_middleware(response_stage(|res| async move {
//!         Ok(res.header("X-Request-Id", "abc"))
//!     }));
//! ```

mod combine;
mod error;
mod group;
mod middleware;
mod path;
mod request;
mod response;
mod route;
mod router;

pub use combine::{and, handle, handle_methods, not_found_route};
pub use error::{Result, RouterError};
pub use group::RouteGroup;
pub use middleware::{
    parse_body, request_stage, response_stage, RequestMiddleware, ResponseMiddleware,
};
pub use path::Matcher;
pub use request::{Body, Method, Request, SimpleRequest};
pub use response::Response;
pub use route::{match_request, route_method, Handler, MatchContext, MatchResult, Resolution, Route};
pub use router::Router;
