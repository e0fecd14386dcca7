use super::body::{parse_form, parse_json};
use crate::error::FrameworkError;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::str::FromStr;

/// HTTP request with a fully buffered body
///
/// The server collects the body before dispatch, so a `Request` is a plain
/// in-memory value: handlers can read the body through `&self` and tests can
/// build one without a socket.
pub struct Request {
    parts: http::request::Parts,
    body: Bytes,
    params: HashMap<String, String>,
}

impl Request {
    pub fn new(parts: http::request::Parts, body: Bytes) -> Self {
        Self {
            parts,
            body,
            params: HashMap::new(),
        }
    }

    /// Build from an `http::Request` whose body is already buffered
    pub fn from_http(req: http::Request<Bytes>) -> Self {
        let (parts, body) = req.into_parts();
        Self::new(parts, body)
    }

    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    /// Get the request method
    pub fn method(&self) -> &http::Method {
        &self.parts.method
    }

    /// Get the request path
    pub fn path(&self) -> &str {
        self.parts.uri.path()
    }

    /// Get the raw query string, if any
    pub fn query(&self) -> Option<&str> {
        self.parts.uri.query()
    }

    /// Get a route parameter by name (e.g., /todos/{id})
    pub fn param(&self, name: &str) -> Result<&str, FrameworkError> {
        self.params
            .get(name)
            .map(|s| s.as_str())
            .ok_or_else(|| FrameworkError::param(name))
    }

    /// Get a route parameter parsed into `T`
    ///
    /// Fails with `ParamParse` (400) when the value does not parse.
    pub fn param_as<T: FromStr>(&self, name: &str) -> Result<T, FrameworkError> {
        let raw = self.param(name)?;
        raw.parse()
            .map_err(|_| FrameworkError::param_parse(raw, std::any::type_name::<T>()))
    }

    /// Get all route parameters
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Get a header value by name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get the Content-Type header
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Raw body bytes
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Parse the request body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FrameworkError> {
        parse_json(&self.body)
    }

    /// Parse the request body as form-urlencoded
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// #[derive(Deserialize)]
    /// struct TaskForm { task: String }
    ///
    /// pub async fn store(req: Request) -> Response {
    ///     let form: TaskForm = req.form()?;
    ///     // ...
    /// }
    /// ```
    pub fn form<T: DeserializeOwned>(&self) -> Result<T, FrameworkError> {
        parse_form(&self.body)
    }

    /// Parse the request body based on Content-Type header
    ///
    /// - `application/x-www-form-urlencoded` -> Form parsing
    /// - Otherwise -> JSON parsing
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, FrameworkError> {
        match self.content_type() {
            Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => self.form(),
            _ => self.json(),
        }
    }

    /// Get a clone of typed state mounted on the router with `Router::state`
    pub fn state<T: Clone + Send + Sync + 'static>(&self) -> Result<T, FrameworkError> {
        self.parts
            .extensions
            .get::<T>()
            .cloned()
            .ok_or_else(FrameworkError::state_not_found::<T>)
    }

    pub fn extensions_mut(&mut self) -> &mut http::Extensions {
        &mut self.parts.extensions
    }
}
