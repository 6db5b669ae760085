//! Explicit route registration for a group of handlers.

use std::collections::BTreeSet;
use std::future::Future;

use crate::combine::handle_methods;
use crate::error::Result;
use crate::request::{Method, SimpleRequest};
use crate::response::Response;
use crate::route::{route_method, Route};

/// An ordered collection of `(method, path, handler)` entries under a shared
/// path prefix.
///
/// This is the registration-time surface: plain code builds the route list
/// at startup, in the order it wants matching-prioritized, and turns it into
/// a single grouped [`Route`].
///
/// # Example
///
/// ```ignore
/// let users = RouteGroup::new("/users")
///     .get("/:id", get_user)
///     .post("", create_user);
///
/// let router = Router::new().with_group(users);
/// ```
pub struct RouteGroup {
    prefix: String,
    methods: BTreeSet<Method>,
    routes: Vec<Route>,
}

impl RouteGroup {
    /// Creates a group with the given path prefix, accepting every supported
    /// method.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            methods: Method::all(),
            routes: Vec::new(),
        }
    }

    /// Restricts the methods this group accepts.
    #[must_use]
    pub fn allow_methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.methods = methods.into_iter().collect();
        self
    }

    /// Adds a GET route.
    #[must_use]
    pub fn get<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(SimpleRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response>> + Send + 'static,
    {
        self.route(Method::Get, path, handler)
    }

    /// Adds a POST route.
    #[must_use]
    pub fn post<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(SimpleRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response>> + Send + 'static,
    {
        self.route(Method::Post, path, handler)
    }

    /// Adds a PUT route.
    #[must_use]
    pub fn put<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(SimpleRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response>> + Send + 'static,
    {
        self.route(Method::Put, path, handler)
    }

    /// Adds a DELETE route.
    #[must_use]
    pub fn delete<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(SimpleRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response>> + Send + 'static,
    {
        self.route(Method::Delete, path, handler)
    }

    /// Adds an OPTIONS route.
    #[must_use]
    pub fn options<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(SimpleRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response>> + Send + 'static,
    {
        self.route(Method::Options, path, handler)
    }

    /// Adds a route with an explicit method.
    #[must_use]
    pub fn route<F, Fut>(mut self, method: Method, path: &str, handler: F) -> Self
    where
        F: Fn(SimpleRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response>> + Send + 'static,
    {
        self.routes.push(route_method(method, path, handler));
        self
    }

    /// Produces the single grouped route.
    pub fn into_route(self) -> Route {
        handle_methods(&self.prefix, self.methods, self.routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Request;
    use crate::route::{match_request, MatchContext};
    use serde_json::json;

    async fn user(req: SimpleRequest) -> Result<Response> {
        Ok(Response::ok(json!({ "id": req.param("id") })))
    }

    async fn ping(_req: SimpleRequest) -> Result<Response> {
        Ok(Response::ok(json!({"pong": true})))
    }

    #[tokio::test]
    async fn test_group_builds_prefixed_route() {
        let route = RouteGroup::new("/api")
            .get("/users/:id", user)
            .get("/ping", ping)
            .into_route();

        let request = Request::get("/api/users/7");
        let resolution = route.resolve(&request, &MatchContext::base()).unwrap();
        assert_eq!(resolution.context.path, "/api/users/:id");

        let result = match_request(&request, &resolution.context).unwrap();
        let response = (resolution.handler)(request.with_path_params(result.kv))
            .await
            .unwrap();
        assert_eq!(response.body, json!({"id": "7"}));
    }

    #[tokio::test]
    async fn test_group_method_restriction() {
        let route = RouteGroup::new("")
            .allow_methods([Method::Get])
            .get("/ping", ping)
            .post("/ping", ping)
            .into_route();

        let request = Request::post("/ping");
        let resolution = route.resolve(&request, &MatchContext::base()).unwrap();
        let response = (resolution.handler)(request).await.unwrap();
        assert_eq!(response.status_code, "404");
    }
}
