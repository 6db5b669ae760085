//! Routes, match contexts, and the matching pass.

use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::Result;
use crate::path::{decode_param, Matcher};
use crate::request::{Method, SimpleRequest};
use crate::response::Response;

/// A boxed async handler bound to one route.
pub type Handler = Arc<dyn Fn(SimpleRequest) -> BoxFuture<'static, Result<Response>> + Send + Sync>;

/// The acceptance criteria of a route or route group: the method set and the
/// effective path pattern, after any enclosing group has narrowed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchContext {
    /// Accepted HTTP methods.
    pub methods: BTreeSet<Method>,
    /// Effective path pattern.
    pub path: String,
}

impl MatchContext {
    /// The root context routes are resolved against: every supported method,
    /// empty path prefix.
    pub fn base() -> Self {
        Self {
            methods: Method::all(),
            path: String::new(),
        }
    }
}

/// The verdict of testing a concrete request against a [`MatchContext`].
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Whether the request satisfies the context.
    pub matched: bool,
    /// Extracted path parameters, present only on a match.
    pub kv: Option<HashMap<String, String>>,
}

impl MatchResult {
    fn miss() -> Self {
        Self {
            matched: false,
            kv: None,
        }
    }
}

/// Tests a request against a match context and extracts path parameters.
///
/// The method must be in the context's set and the path must match the
/// compiled pattern in full. Captured values are percent-decoded unless
/// empty; when a parameter name appears again with an empty or missing
/// capture, an already-set value is kept.
pub fn match_request(request: &SimpleRequest, context: &MatchContext) -> Result<MatchResult> {
    if !context.methods.contains(&request.method) {
        return Ok(MatchResult::miss());
    }

    let matcher = Matcher::compile(&context.path)?;
    let Some(captures) = matcher.test(&request.path) else {
        return Ok(MatchResult::miss());
    };

    let mut kv = HashMap::new();
    for (name, raw) in matcher.param_names().iter().zip(captures) {
        let value = raw.map(|v| decode_param(&v));
        let blank = value.as_deref().map_or(true, str::is_empty);
        if !blank || !kv.contains_key(name) {
            kv.insert(name.clone(), value.unwrap_or_default());
        }
    }

    Ok(MatchResult {
        matched: true,
        kv: Some(kv),
    })
}

/// The outcome of evaluating a [`Route`]: the bound dispatch function plus
/// the match context describing the route's combined acceptance criteria.
#[derive(Clone)]
pub struct Resolution {
    /// Handler to invoke if this resolution is dispatched.
    pub handler: Handler,
    /// Combined acceptance criteria of the resolved route.
    pub context: MatchContext,
}

/// A composable routing unit.
///
/// A route is stateless and pure: it is evaluated once per incoming request
/// against the context narrowed by any enclosing group, and yields the
/// handler plus the effective match context.
#[derive(Clone)]
pub struct Route {
    eval: Arc<dyn Fn(&SimpleRequest, &MatchContext) -> Result<Resolution> + Send + Sync>,
}

impl Route {
    /// Creates a route from an evaluation function.
    pub fn new<F>(eval: F) -> Self
    where
        F: Fn(&SimpleRequest, &MatchContext) -> Result<Resolution> + Send + Sync + 'static,
    {
        Self {
            eval: Arc::new(eval),
        }
    }

    /// Evaluates this route against a request and its parent context.
    pub fn resolve(&self, request: &SimpleRequest, parent: &MatchContext) -> Result<Resolution> {
        (self.eval)(request, parent)
    }
}

/// Builds the leaf route: one method, one path pattern, one handler.
///
/// The exposed context joins the parent prefix with the route's own pattern
/// and intersects the parent's method set with the route's single method.
pub fn route_method<F, Fut>(method: Method, path: &str, handler: F) -> Route
where
    F: Fn(SimpleRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response>> + Send + 'static,
{
    let path = path.to_string();
    let handler: Handler = Arc::new(move |request| Box::pin(handler(request)));

    Route::new(move |_request, parent| {
        let methods = if parent.methods.contains(&method) {
            BTreeSet::from([method])
        } else {
            BTreeSet::new()
        };

        Ok(Resolution {
            handler: handler.clone(),
            context: MatchContext {
                methods,
                path: format!("{}{}", parent.path, path),
            },
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Request;
    use serde_json::json;

    async fn ping(_req: SimpleRequest) -> Result<Response> {
        Ok(Response::ok(json!({"pong": true})))
    }

    fn ctx(methods: BTreeSet<Method>, path: &str) -> MatchContext {
        MatchContext {
            methods,
            path: path.to_string(),
        }
    }

    #[test]
    fn test_match_request_extracts_params() {
        let req = Request::get("/a/5/b/foo%20bar");
        let context = ctx(Method::all(), "/a/:x/b/:y");
        let result = match_request(&req, &context).unwrap();
        assert!(result.matched);
        let kv = result.kv.unwrap();
        assert_eq!(kv.get("x").map(String::as_str), Some("5"));
        assert_eq!(kv.get("y").map(String::as_str), Some("foo bar"));
    }

    #[test]
    fn test_match_request_rejects_method() {
        let req = Request::post("/a/5");
        let context = ctx(BTreeSet::from([Method::Get]), "/a/:x");
        let result = match_request(&req, &context).unwrap();
        assert!(!result.matched);
        assert!(result.kv.is_none());
    }

    #[test]
    fn test_match_request_rejects_path() {
        let req = Request::get("/b/5");
        let context = ctx(Method::all(), "/a/:x");
        assert!(!match_request(&req, &context).unwrap().matched);
    }

    #[test]
    fn test_route_method_joins_parent_prefix() {
        let route = route_method(Method::Get, "/users/:id", ping);
        let parent = ctx(Method::all(), "/api");
        let resolution = route
            .resolve(&Request::get("/api/users/1"), &parent)
            .unwrap();
        assert_eq!(resolution.context.path, "/api/users/:id");
        assert_eq!(resolution.context.methods, BTreeSet::from([Method::Get]));
    }

    #[test]
    fn test_route_method_respects_parent_method_set() {
        let route = route_method(Method::Get, "/users", ping);
        let parent = ctx(BTreeSet::from([Method::Post]), "");
        let resolution = route.resolve(&Request::get("/users"), &parent).unwrap();
        // GET is not allowed by the parent, so the context accepts nothing.
        assert!(resolution.context.methods.is_empty());
    }
}
