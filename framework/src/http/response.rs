use crate::error::FrameworkError;
use bytes::Bytes;
use http_body_util::Full;
use serde::Serialize;
use std::collections::HashMap;

/// HTTP response builder
#[derive(Debug)]
pub struct HttpResponse {
    status: u16,
    body: String,
    headers: Vec<(String, String)>,
}

/// Response type alias - allows using `?` operator for early returns
pub type Response = Result<HttpResponse, HttpResponse>;

impl HttpResponse {
    pub fn new() -> Self {
        Self {
            status: 200,
            body: String::new(),
            headers: Vec::new(),
        }
    }

    /// Create a response with a plain text body
    pub fn text(body: impl Into<String>) -> Self {
        Self::new()
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(body)
    }

    /// Create an HTML response
    pub fn html(body: impl Into<String>) -> Self {
        Self::new()
            .header("Content-Type", "text/html; charset=utf-8")
            .body(body)
    }

    /// Create a JSON response from a serde_json::Value
    pub fn json(body: serde_json::Value) -> Self {
        Self::new()
            .header("Content-Type", "application/json")
            .body(body.to_string())
    }

    /// Create a JSON response by serializing any `Serialize` value
    pub fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, FrameworkError> {
        let body = serde_json::to_string(value)
            .map_err(|e| FrameworkError::internal(format!("Failed to serialize response: {}", e)))?;
        Ok(Self::new()
            .header("Content-Type", "application/json")
            .body(body))
    }

    /// Set the HTTP status code
    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Add a header to the response
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Wrap this response in Ok() for use as Response type
    pub fn ok(self) -> Response {
        Ok(self)
    }

    pub fn status_code(&self) -> u16 {
        self.status
    }

    pub fn body_str(&self) -> &str {
        &self.body
    }

    /// First header with the given name (case-insensitive)
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Convert to hyper response
    pub fn into_hyper(self) -> hyper::Response<Full<Bytes>> {
        let mut builder = hyper::Response::builder().status(self.status);

        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }

        match builder.body(Full::new(Bytes::from(self.body))) {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = %err, "handler produced an invalid response");
                let mut response =
                    hyper::Response::new(Full::new(Bytes::from_static(b"Internal Server Error")));
                *response.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
                response
            }
        }
    }
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Extension trait for Response to enable method chaining on macros
pub trait ResponseExt {
    fn status(self, code: u16) -> Self;
    fn header(self, name: impl Into<String>, value: impl Into<String>) -> Self;
}

impl ResponseExt for Response {
    fn status(self, code: u16) -> Self {
        self.map(|r| r.status(code))
    }

    fn header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.map(|r| r.header(name, value))
    }
}

/// HTTP 302 redirect to a path
pub struct Redirect {
    location: String,
}

impl Redirect {
    /// Create a redirect to a specific URL/path
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            location: path.into(),
        }
    }

    /// Create a redirect to a named route
    pub fn route(name: &str) -> RedirectRouteBuilder {
        RedirectRouteBuilder {
            name: name.to_string(),
            params: HashMap::new(),
        }
    }
}

impl From<Redirect> for Response {
    fn from(redirect: Redirect) -> Response {
        Ok(HttpResponse::new()
            .status(302)
            .header("Location", redirect.location))
    }
}

/// Builder for redirects to named routes with parameters
pub struct RedirectRouteBuilder {
    name: String,
    params: HashMap<String, String>,
}

impl RedirectRouteBuilder {
    /// Add a route parameter value
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }
}

impl From<RedirectRouteBuilder> for Response {
    fn from(redirect: RedirectRouteBuilder) -> Response {
        let url = crate::routing::route_with_params(&redirect.name, &redirect.params)
            .ok_or_else(|| {
                HttpResponse::text(format!("Route '{}' not found", redirect.name)).status(500)
            })?;
        Redirect::to(url).into()
    }
}

/// Auto-convert FrameworkError to HttpResponse
///
/// This enables using the `?` operator in controller handlers to propagate
/// framework errors as JSON error responses.
impl From<FrameworkError> for HttpResponse {
    fn from(err: FrameworkError) -> HttpResponse {
        let status = err.status_code();
        let body = match &err {
            FrameworkError::ParamError { param_name } => serde_json::json!({
                "error": format!("Missing required parameter: {}", param_name)
            }),
            FrameworkError::ParamParse { param, expected_type } => serde_json::json!({
                "error": "Invalid parameter",
                "param": param,
                "expected": expected_type
            }),
            _ => serde_json::json!({ "error": err.to_string() }),
        };
        HttpResponse::json(body).status(status)
    }
}
