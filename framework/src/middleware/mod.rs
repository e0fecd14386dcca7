//! Request middleware
//!
//! Middleware wraps handler execution. Each middleware receives the request
//! and a [`Next`] continuation; it can inspect or replace the request, call
//! `next.run(request)` and post-process the response, or answer on its own.
//!
//! ```rust,ignore
//! pub struct Timing;
//!
//! #[async_trait]
//! impl Middleware for Timing {
//!     async fn handle(&self, request: Request, next: Next) -> Response {
//!         let started = Instant::now();
//!         let response = next.run(request).await;
//!         tracing::debug!(elapsed = ?started.elapsed());
//!         response
//!     }
//! }
//! ```

mod registry;

pub use registry::MiddlewareRegistry;

use crate::http::{Request, Response};
use crate::routing::BoxedHandler;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// A request interceptor
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(&self, request: Request, next: Next) -> Response;
}

/// Shared, type-erased middleware
pub type BoxedMiddleware = Arc<dyn Middleware>;

pub fn into_boxed<M: Middleware + 'static>(middleware: M) -> BoxedMiddleware {
    Arc::new(middleware)
}

/// The rest of the chain: remaining middleware followed by the handler
#[derive(Clone)]
pub struct Next {
    inner: Arc<dyn Fn(Request) -> BoxFuture + Send + Sync>,
}

impl Next {
    fn new(inner: impl Fn(Request) -> BoxFuture + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Continue down the chain
    pub async fn run(self, request: Request) -> Response {
        (self.inner)(request).await
    }
}

/// Ordered middleware wrapped around a single handler
#[derive(Default)]
pub struct MiddlewareChain {
    middleware: Vec<BoxedMiddleware>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, middleware: impl IntoIterator<Item = BoxedMiddleware>) {
        self.middleware.extend(middleware);
    }

    /// Run the chain; the first registered middleware is the outermost
    pub async fn execute(self, request: Request, handler: Arc<BoxedHandler>) -> Response {
        let innermost = Next::new(move |req| handler(req));

        let next = self
            .middleware
            .into_iter()
            .rev()
            .fold(innermost, |next, middleware| {
                Next::new(move |req| {
                    let middleware = middleware.clone();
                    let next = next.clone();
                    Box::pin(async move { middleware.handle(req, next).await })
                })
            });

        next.run(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use bytes::Bytes;

    struct Tag(&'static str);

    #[async_trait]
    impl Middleware for Tag {
        async fn handle(&self, request: Request, next: Next) -> Response {
            let response = next.run(request).await?;
            let seen = response.header_value("x-trail").unwrap_or("").to_string();
            Ok(response.header("x-trail", format!("{}{}", seen, self.0)))
        }
    }

    struct Block;

    #[async_trait]
    impl Middleware for Block {
        async fn handle(&self, _request: Request, _next: Next) -> Response {
            Err(HttpResponse::text("blocked").status(403))
        }
    }

    fn handler() -> Arc<BoxedHandler> {
        let handler: BoxedHandler =
            Box::new(|_req| Box::pin(async { HttpResponse::text("handled").ok() }));
        Arc::new(handler)
    }

    fn request() -> Request {
        Request::from_http(http::Request::new(Bytes::new()))
    }

    #[tokio::test]
    async fn test_chain_runs_outermost_first() {
        let mut chain = MiddlewareChain::new();
        chain.extend([into_boxed(Tag("a")), into_boxed(Tag("b"))]);

        let response = chain.execute(request(), handler()).await.unwrap();
        assert_eq!(response.body_str(), "handled");
        // inner middleware post-processes first, so the last header written is the outer one
        let trail: Vec<_> = response
            .headers()
            .iter()
            .filter(|(k, _)| k == "x-trail")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(trail, vec!["b", "ba"]);
    }

    #[tokio::test]
    async fn test_middleware_can_short_circuit() {
        let mut chain = MiddlewareChain::new();
        chain.extend([into_boxed(Block), into_boxed(Tag("never"))]);

        let response = chain.execute(request(), handler()).await.unwrap_err();
        assert_eq!(response.status_code(), 403);
        assert_eq!(response.body_str(), "blocked");
    }

    #[tokio::test]
    async fn test_empty_chain_calls_handler() {
        let response = MiddlewareChain::new()
            .execute(request(), handler())
            .await
            .unwrap();
        assert_eq!(response.body_str(), "handled");
    }
}
