use crate::http::{HttpResponse, Request};
use crate::middleware::{Middleware, MiddlewareRegistry};
use crate::routing::Router;
use crate::server::dispatch;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// In-process client that dispatches requests through a router
///
/// Requests run through the same matching, state injection and global
/// middleware as the real server; only the socket is skipped.
pub struct TestClient {
    router: Arc<Router>,
    middleware: MiddlewareRegistry,
}

impl TestClient {
    pub fn new(router: impl Into<Router>) -> Self {
        Self {
            router: Arc::new(router.into()),
            middleware: MiddlewareRegistry::new(),
        }
    }

    pub fn middleware<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.middleware = self.middleware.append(middleware);
        self
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send("GET", uri, None, Bytes::new()).await
    }

    /// POST with an empty body
    pub async fn post(&self, uri: &str) -> TestResponse {
        self.send("POST", uri, None, Bytes::new()).await
    }

    /// POST `application/x-www-form-urlencoded` fields
    pub async fn post_form<T: Serialize + ?Sized>(&self, uri: &str, form: &T) -> TestResponse {
        let body = serde_urlencoded::to_string(form).unwrap_or_default();
        self.send(
            "POST",
            uri,
            Some("application/x-www-form-urlencoded"),
            Bytes::from(body),
        )
        .await
    }

    /// POST a JSON document
    pub async fn post_json<T: Serialize + ?Sized>(&self, uri: &str, json: &T) -> TestResponse {
        let body = serde_json::to_vec(json).unwrap_or_default();
        self.send("POST", uri, Some("application/json"), Bytes::from(body))
            .await
    }

    /// Send a request with an arbitrary method, content type and body
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        content_type: Option<&str>,
        body: Bytes,
    ) -> TestResponse {
        let mut builder = http::Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }

        let request = match builder.body(body) {
            Ok(request) => Request::from_http(request),
            Err(err) => {
                return TestResponse::from(
                    HttpResponse::text(format!("invalid test request: {}", err)).status(400),
                )
            }
        };

        dispatch(&self.router, &self.middleware, request)
            .await
            .into()
    }
}

/// Captured response: status, headers and body text
#[derive(Debug, Clone)]
pub struct TestResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl TestResponse {
    /// Case-insensitive header lookup (last value wins)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    /// Deserialize the body as JSON, panicking with the body on failure
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_str(&self.body).unwrap_or_else(|err| {
            panic!("response body is not valid JSON ({}): {}", err, self.body)
        })
    }
}

impl From<HttpResponse> for TestResponse {
    fn from(response: HttpResponse) -> Self {
        Self {
            status: response.status_code(),
            headers: response.headers().to_vec(),
            body: response.body_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Response;
    use crate::middleware::Next;
    use async_trait::async_trait;
    use serde::Deserialize;

    #[derive(Clone)]
    struct Greeting(&'static str);

    #[derive(Deserialize)]
    struct NameInput {
        name: String,
    }

    async fn greet(req: Request) -> Response {
        let greeting = req.state::<Greeting>()?;
        let input: NameInput = req.input()?;
        Ok(HttpResponse::text(format!("{}, {}", greeting.0, input.name)))
    }

    async fn show(req: Request) -> Response {
        let id: u32 = req.param_as("id")?;
        crate::json_response!({ "id": id })
    }

    struct Stamp;

    #[async_trait]
    impl Middleware for Stamp {
        async fn handle(&self, request: Request, next: Next) -> Response {
            match next.run(request).await {
                Ok(response) => Ok(response.header("x-stamp", "1")),
                Err(response) => Err(response.header("x-stamp", "1")),
            }
        }
    }

    fn client() -> TestClient {
        let router: Router = Router::new()
            .post("/greet", greet)
            .get("/items/{id}", show)
            .into();
        TestClient::new(router.state(Greeting("Hello"))).middleware(Stamp)
    }

    #[tokio::test]
    async fn test_form_and_json_bodies_reach_handler() {
        let client = client();

        let form = client.post_form("/greet", &[("name", "Ada")]).await;
        assert_eq!(form.status, 200);
        assert_eq!(form.text(), "Hello, Ada");

        let json = client
            .post_json("/greet", &serde_json::json!({ "name": "Grace" }))
            .await;
        assert_eq!(json.text(), "Hello, Grace");
    }

    #[tokio::test]
    async fn test_params_and_middleware() {
        let response = client().get("/items/7").await;
        assert_eq!(response.status, 200);
        assert_eq!(response.header("X-Stamp"), Some("1"));
        assert_eq!(response.json::<serde_json::Value>()["id"], 7);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404_through_middleware() {
        let response = client().get("/nope").await;
        assert_eq!(response.status, 404);
        assert_eq!(response.text(), "404 Not Found");
        assert_eq!(response.header("x-stamp"), Some("1"));
    }
}
