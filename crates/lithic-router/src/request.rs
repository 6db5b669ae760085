//! HTTP request values.

use std::collections::{BTreeSet, HashMap};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

/// HTTP request methods supported by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    /// GET method
    Get,
    /// POST method
    Post,
    /// PUT method
    Put,
    /// DELETE method
    Delete,
    /// OPTIONS method
    Options,
}

impl Method {
    /// Parses a method from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "DELETE" => Some(Self::Delete),
            "OPTIONS" => Some(Self::Options),
            _ => None,
        }
    }

    /// Returns the method as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
        }
    }

    /// Returns the full supported method set.
    pub fn all() -> BTreeSet<Self> {
        BTreeSet::from([Self::Get, Self::Post, Self::Put, Self::Options, Self::Delete])
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The semantic states of a request body as it moves through the pipeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Body {
    /// No body.
    #[default]
    Empty,
    /// A raw text payload, as delivered by the transport layer.
    Text(String),
    /// A structured payload, produced by the body-parsing middleware.
    Json(Value),
}

impl Body {
    /// Creates a text body.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Creates a structured body.
    pub fn json(value: Value) -> Self {
        Self::Json(value)
    }

    /// Returns the raw text, if this is a text body.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the structured value, if this is a structured body.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns true for an empty body.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// An HTTP request, generic over the semantic type of its body.
///
/// Requests are immutable values: middleware and the router produce new
/// `Request`s rather than mutating in place. `path_params` stays unset until
/// route resolution fills it.
#[derive(Debug, Clone, PartialEq)]
pub struct Request<T = Body> {
    /// HTTP method.
    pub method: Method,
    /// Request path.
    pub path: String,
    /// Request body.
    pub body: T,
    /// Query string parameters.
    pub query_params: HashMap<String, String>,
    /// Path parameters extracted during route resolution.
    pub path_params: Option<HashMap<String, String>>,
}

/// A request carrying the pipeline's untyped [`Body`].
pub type SimpleRequest = Request<Body>;

impl Request<Body> {
    /// Creates a new request with an empty body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: Body::Empty,
            query_params: HashMap::new(),
            path_params: None,
        }
    }

    /// Creates a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Creates a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Deserializes the body into a typed request.
    ///
    /// This is the typed boundary for handlers that want a concrete body
    /// shape: text is parsed as JSON, structured values are converted, an
    /// empty body deserializes from `null`.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<Request<T>> {
        let Self {
            method,
            path,
            body,
            query_params,
            path_params,
        } = self;

        let body = match body {
            Body::Json(value) => serde_json::from_value(value)?,
            Body::Text(text) => serde_json::from_str(&text)?,
            Body::Empty => serde_json::from_value(Value::Null)?,
        };

        Ok(Request {
            method,
            path,
            body,
            query_params,
            path_params,
        })
    }
}

impl<T> Request<T> {
    /// Sets a query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    /// Gets a query parameter.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query_params.get(key).map(String::as_str)
    }

    /// Gets an extracted path parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.path_params
            .as_ref()
            .and_then(|params| params.get(key))
            .map(String::as_str)
    }

    /// Returns a new request with the given path parameters merged in.
    #[must_use]
    pub fn with_path_params(mut self, params: Option<HashMap<String, String>>) -> Self {
        self.path_params = params;
        self
    }

    /// Transforms the body, keeping everything else.
    pub fn map_body<U>(self, f: impl FnOnce(T) -> U) -> Request<U> {
        Request {
            method: self.method,
            path: self.path,
            body: f(self.body),
            query_params: self.query_params,
            path_params: self.path_params,
        }
    }
}
