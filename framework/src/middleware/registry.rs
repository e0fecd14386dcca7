//! Global middleware configuration
//!
//! Global middleware runs on every matched request, in registration order,
//! before the route handler.

use super::{into_boxed, BoxedMiddleware, Middleware};

/// Ordered list of global middleware
///
/// # Example
///
/// ```rust,ignore
/// let registry = MiddlewareRegistry::new().append(LoggingMiddleware);
/// Server::from_config(router)
///     .with_middleware(registry)
///     .run_until(shutdown_signal())
///     .await;
/// ```
#[derive(Clone, Default)]
pub struct MiddlewareRegistry {
    global: Vec<BoxedMiddleware>,
}

impl MiddlewareRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append middleware that runs after everything already registered
    pub fn append<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.global.push(into_boxed(middleware));
        self
    }

    /// Concatenate another registry after this one
    pub fn merge(mut self, other: MiddlewareRegistry) -> Self {
        self.global.extend(other.global);
        self
    }

    pub fn global_middleware(&self) -> &[BoxedMiddleware] {
        &self.global
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpResponse, Request, Response};
    use crate::middleware::Next;
    use async_trait::async_trait;

    struct Named(&'static str);

    #[async_trait]
    impl Middleware for Named {
        async fn handle(&self, _request: Request, _next: Next) -> Response {
            HttpResponse::text(self.0).ok()
        }
    }

    #[tokio::test]
    async fn test_merge_keeps_registration_order() {
        let app = MiddlewareRegistry::new().append(Named("first"));
        let merged = app.merge(MiddlewareRegistry::new().append(Named("second")));

        let mut names = Vec::new();
        for middleware in merged.global_middleware() {
            let next = Next::new(|_req| Box::pin(async { HttpResponse::text("handler").ok() }));
            let request = Request::from_http(http::Request::new(bytes::Bytes::new()));
            let response = middleware.handle(request, next).await.unwrap();
            names.push(response.body_str().to_string());
        }

        assert_eq!(names, vec!["first", "second"]);
    }
}
