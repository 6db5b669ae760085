//! Router orchestration.

use std::future::Future;

use tracing::info;

use crate::combine::and;
use crate::error::Result;
use crate::group::RouteGroup;
use crate::middleware::{parse_body, RequestMiddleware, ResponseMiddleware};
use crate::request::{Method, SimpleRequest};
use crate::response::Response;
use crate::route::{match_request, route_method, MatchContext, Route};

/// The dispatch orchestrator: the combined route set plus the two middleware
/// pipelines.
///
/// Registration (`with_routes`, `with_group`, middleware registration) is a
/// build phase that must complete before the first call to
/// [`Router::handle_request`]; after that the router is immutable
/// configuration and every dispatch is independent.
pub struct Router {
    verbose: bool,
    routes: Vec<Route>,
    request_middleware: Vec<RequestMiddleware>,
    response_middleware: Vec<ResponseMiddleware>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Creates a router with no routes. The request pipeline starts with the
    /// body-parsing stage; the response pipeline starts empty.
    pub fn new() -> Self {
        Self {
            verbose: false,
            routes: Vec::new(),
            request_middleware: vec![parse_body()],
            response_middleware: Vec::new(),
        }
    }

    /// Enables diagnostic logging of raw incoming requests.
    #[must_use]
    pub fn with_logging(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Appends routes, preserving registration order.
    #[must_use]
    pub fn with_routes(mut self, routes: impl IntoIterator<Item = Route>) -> Self {
        self.routes.extend(routes);
        self
    }

    /// Appends a route group.
    #[must_use]
    pub fn with_group(self, group: RouteGroup) -> Self {
        let route = group.into_route();
        self.with_routes([route])
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

    /// Appends a request middleware stage.
    #[must_use]
    pub fn register_request_middleware(mut self, stage: RequestMiddleware) -> Self {
        self.request_middleware.push(stage);
        self
    }

    /// Appends a response middleware stage.
    #[must_use]
    pub fn register_response_middleware(mut self, stage: ResponseMiddleware) -> Self {
        self.response_middleware.push(stage);
        self
    }

    /// Dispatches a request through the full pipeline.
    ///
    /// Request middleware runs first, then route resolution against the base
    /// context, then a second matching pass against the resolved context to
    /// extract path parameters, then the handler, then response middleware.
    /// An unmatched request yields the not-found response; handler and
    /// middleware errors propagate to the caller.
    pub async fn handle_request(&self, raw: SimpleRequest) -> Result<Response> {
        if self.verbose {
            info!(method = %raw.method, path = %raw.path, "incoming request");
        }

        let mut request = raw;
        for stage in &self.request_middleware {
            request = stage(request).await?;
        }

        let resolution = and(self.routes.clone()).resolve(&request, &MatchContext::base())?;

        // Second, explicit pass: acceptance testing only needs a verdict, but
        // parameter extraction needs the concrete resolved pattern.
        let result = match_request(&request, &resolution.context)?;
        let request = request.with_path_params(result.kv);

        let mut response = (resolution.handler)(request).await?;
        for stage in &self.response_middleware {
            response = stage(response).await?;
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RouterError;
    use crate::middleware::{request_stage, response_stage};
    use crate::request::{Body, Request};
    use serde_json::json;

    async fn ping(_req: SimpleRequest) -> Result<Response> {
        Ok(Response::ok(json!({"pong": true})))
    }

    async fn echo_user(req: SimpleRequest) -> Result<Response> {
        Ok(Response::ok(json!({ "id": req.param("id") })))
    }

    #[tokio::test]
    async fn test_ping_end_to_end() {
        let router = Router::new().get("/ping", ping);

        let res = router.handle_request(Request::get("/ping")).await.unwrap();
        assert_eq!(res.status_code, "200");
        assert_eq!(res.body, json!({"pong": true}));
        assert!(res.headers.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_method_is_not_found() {
        let router = Router::new().get("/ping", ping);

        let res = router.handle_request(Request::post("/ping")).await.unwrap();
        assert_eq!(res.status_code, "404");
    }

    #[tokio::test]
    async fn test_path_params_reach_handler() {
        let router = Router::new().get("/users/:id", echo_user);

        let res = router
            .handle_request(Request::get("/users/42"))
            .await
            .unwrap();
        assert_eq!(res.body, json!({"id": "42"}));
    }

    #[tokio::test]
    async fn test_default_pipeline_parses_body() {
        let router = Router::new().post("/echo", |req: SimpleRequest| async move {
            Ok(Response::ok(req.body.as_json().cloned().unwrap_or_default()))
        });

        let req = Request::post("/echo").body(Body::text(r#"{"n": 1}"#));
        let res = router.handle_request(req).await.unwrap();
        assert_eq!(res.body, json!({"n": 1}));
    }

    #[tokio::test]
    async fn test_malformed_body_propagates() {
        let router = Router::new().post("/echo", ping);

        let req = Request::post("/echo").body(Body::text("{not json"));
        let err = router.handle_request(req).await.unwrap_err();
        assert!(matches!(err, RouterError::MalformedBody(_)));
    }

    #[tokio::test]
    async fn test_handler_errors_propagate() {
        let router = Router::new().get("/boom", |_req: SimpleRequest| async {
            Err(RouterError::handler("backing store unavailable"))
        });

        let err = router.handle_request(Request::get("/boom")).await.unwrap_err();
        assert!(matches!(err, RouterError::Handler(_)));
    }

    #[tokio::test]
    async fn test_request_middleware_runs_in_order() {
        let router = Router::new()
            .get("/tagged", |req: SimpleRequest| async move {
                Ok(Response::ok(json!({ "tag": req.query("tag") })))
            })
            .register_request_middleware(request_stage(|req: SimpleRequest| async move {
                Ok(req.query_param("tag", "one"))
            }))
            .register_request_middleware(request_stage(|req: SimpleRequest| async move {
                Ok(req.query_param("tag", "two"))
            }));

        let res = router
            .handle_request(Request::get("/tagged"))
            .await
            .unwrap();
        assert_eq!(res.body, json!({"tag": "two"}));
    }

    #[tokio::test]
    async fn test_response_middleware_runs_in_order() {
        let router = Router::new()
            .get("/ping", ping)
            .register_response_middleware(response_stage(|res: Response| async move {
                Ok(res.header("X", "1"))
            }))
            .register_response_middleware(response_stage(|res: Response| async move {
                Ok(res.header("X", "2"))
            }));

        let res = router.handle_request(Request::get("/ping")).await.unwrap();
        assert_eq!(res.headers.get("X"), Some(&"2".to_string()));
    }
}
