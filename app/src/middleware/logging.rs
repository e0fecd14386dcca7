//! Request logging middleware

use framework::{async_trait, Middleware, Next, Request, Response};
use std::time::Instant;

/// Logs method, path, status and elapsed time for every request
pub struct LoggingMiddleware;

#[async_trait]
impl Middleware for LoggingMiddleware {
    async fn handle(&self, request: Request, next: Next) -> Response {
        let method = request.method().clone();
        let path = request.path().to_string();
        let started = Instant::now();

        let response = next.run(request).await;

        let status = match &response {
            Ok(r) | Err(r) => r.status_code(),
        };
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        if status >= 500 {
            tracing::warn!(%method, %path, status, elapsed_ms, "request failed");
        } else {
            tracing::info!(%method, %path, status, elapsed_ms, "request");
        }

        response
    }
}
