//! Middleware stages for request/response processing.
//!
//! Both pipelines are ordered, left-to-right compositions: the output of one
//! stage is the sole input of the next. Every stage is async-capable, and a
//! stage that errors aborts the whole dispatch.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::Result;
use crate::request::{Body, SimpleRequest};
use crate::response::Response;

/// A pre-dispatch transform applied to the request.
pub type RequestMiddleware =
    Arc<dyn Fn(SimpleRequest) -> BoxFuture<'static, Result<SimpleRequest>> + Send + Sync>;

/// A post-dispatch transform applied to the response.
pub type ResponseMiddleware =
    Arc<dyn Fn(Response) -> BoxFuture<'static, Result<Response>> + Send + Sync>;

/// Wraps an async function as a request middleware stage.
pub fn request_stage<F, Fut>(stage: F) -> RequestMiddleware
where
    F: Fn(SimpleRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<SimpleRequest>> + Send + 'static,
{
    Arc::new(move |request| Box::pin(stage(request)))
}

/// Wraps an async function as a response middleware stage.
pub fn response_stage<F, Fut>(stage: F) -> ResponseMiddleware
where
    F: Fn(Response) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response>> + Send + 'static,
{
    Arc::new(move |response| Box::pin(stage(response)))
}

/// The default body-parsing stage.
///
/// A non-empty text body is parsed as JSON; empty and already-structured
/// bodies pass through untouched. A text body that fails to parse surfaces
/// as [`crate::RouterError::MalformedBody`].
pub fn parse_body() -> RequestMiddleware {
    request_stage(|request: SimpleRequest| async move {
        if let Body::Text(text) = &request.body {
            if !text.is_empty() {
                let value: Value = serde_json::from_str(text)?;
                return Ok(request.map_body(|_| Body::Json(value)));
            }
        }
        Ok(request)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Request;
    use serde_json::json;

    #[tokio::test]
    async fn test_parse_body_text() {
        let req = Request::post("/users").body(Body::text(r#"{"name":"ada"}"#));
        let parsed = parse_body()(req).await.unwrap();
        assert_eq!(parsed.body, Body::Json(json!({"name": "ada"})));
    }

    #[tokio::test]
    async fn test_parse_body_leaves_empty_untouched() {
        let req = Request::get("/users");
        let parsed = parse_body()(req.clone()).await.unwrap();
        assert_eq!(parsed, req);

        let req = Request::post("/users").body(Body::text(""));
        let parsed = parse_body()(req.clone()).await.unwrap();
        assert_eq!(parsed, req);
    }

    #[tokio::test]
    async fn test_parse_body_leaves_structured_untouched() {
        let req = Request::post("/users").body(Body::json(json!({"n": 1})));
        let parsed = parse_body()(req.clone()).await.unwrap();
        assert_eq!(parsed, req);
    }

    #[tokio::test]
    async fn test_parse_body_rejects_malformed_json() {
        let req = Request::post("/users").body(Body::text("{not json"));
        assert!(parse_body()(req).await.is_err());
    }

    #[tokio::test]
    async fn test_stage_wrappers() {
        let stage = request_stage(|req: SimpleRequest| async move {
            Ok(req.query_param("seen", "yes"))
        });
        let req = stage(Request::get("/")).await.unwrap();
        assert_eq!(req.query("seen"), Some("yes"));

        let stage = response_stage(|res: Response| async move { Ok(res.header("X-Stage", "1")) });
        let res = stage(Response::ok(json!({}))).await.unwrap();
        assert_eq!(res.headers.get("X-Stage"), Some(&"1".to_string()));
    }
}
