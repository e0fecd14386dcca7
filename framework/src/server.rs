use crate::config::{Config, ServerConfig};
use crate::error::FrameworkError;
use crate::http::{collect_body, HttpResponse, Request};
use crate::middleware::{MiddlewareChain, MiddlewareRegistry};
use crate::routing::{BoxedHandler, Router};
use bytes::Bytes;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use hyper_util::server::graceful::GracefulShutdown;
use std::collections::HashMap;
use std::convert::Infallible;
use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// How long in-flight connections get to finish after a shutdown signal
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Server {
    router: Arc<Router>,
    middleware: MiddlewareRegistry,
    host: String,
    port: u16,
    max_body_size: usize,
}

impl Server {
    /// Build a server from the registered `ServerConfig`
    pub fn from_config(router: impl Into<Router>) -> Self {
        let config = Config::get::<ServerConfig>().unwrap_or_else(ServerConfig::from_env);
        Self {
            router: Arc::new(router.into()),
            middleware: MiddlewareRegistry::new(),
            host: config.host,
            port: config.port,
            max_body_size: config.max_body_size,
        }
    }

    /// Append a whole registry of global middleware
    pub fn with_middleware(mut self, registry: MiddlewareRegistry) -> Self {
        self.middleware = self.middleware.merge(registry);
        self
    }

    fn addr(&self) -> Result<SocketAddr, FrameworkError> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            FrameworkError::internal(format!("Invalid SERVER_HOST '{}'", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Serve until `shutdown` resolves, then drain in-flight connections
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), FrameworkError>
    where
        F: Future<Output = ()>,
    {
        let addr = self.addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| FrameworkError::internal(format!("Failed to bind {}: {}", addr, e)))?;

        tracing::info!(%addr, "server listening on http://{}", addr);

        let router = self.router;
        let middleware = Arc::new(self.middleware);
        let max_body_size = self.max_body_size;
        let graceful = GracefulShutdown::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(conn) => conn,
                        Err(err) => {
                            tracing::warn!(error = %err, "failed to accept connection");
                            continue;
                        }
                    };

                    let router = router.clone();
                    let middleware = middleware.clone();
                    let service = service_fn(move |req: hyper::Request<hyper::body::Incoming>| {
                        let router = router.clone();
                        let middleware = middleware.clone();
                        async move {
                            Ok::<_, Infallible>(
                                handle_request(&router, &middleware, max_body_size, req).await,
                            )
                        }
                    });

                    let conn = http1::Builder::new().serve_connection(TokioIo::new(stream), service);
                    let conn = graceful.watch(conn);
                    tokio::spawn(async move {
                        if let Err(err) = conn.await {
                            tracing::debug!(%peer, error = %err, "error serving connection");
                        }
                    });
                }
                _ = &mut shutdown => {
                    tracing::info!("shutdown signal received, draining connections");
                    break;
                }
            }
        }

        drop(listener);
        if tokio::time::timeout(DRAIN_TIMEOUT, graceful.shutdown())
            .await
            .is_err()
        {
            tracing::warn!("connections still open after {:?}, closing", DRAIN_TIMEOUT);
        }
        Ok(())
    }
}

async fn handle_request(
    router: &Router,
    middleware: &MiddlewareRegistry,
    max_body_size: usize,
    req: hyper::Request<hyper::body::Incoming>,
) -> hyper::Response<Full<Bytes>> {
    let (parts, body) = req.into_parts();
    let body = match collect_body(body, max_body_size).await {
        Ok(body) => body,
        Err(err) => {
            let response = HttpResponse::from(err);
            tracing::warn!(
                method = %parts.method,
                path = %parts.uri.path(),
                status = response.status_code(),
                "request body rejected"
            );
            return response.into_hyper();
        }
    };

    dispatch(router, middleware, Request::new(parts, body))
        .await
        .into_hyper()
}

/// Route a buffered request through global middleware to its handler
///
/// Unmatched requests still pass through the middleware, ending in a 404.
/// Used by the server loop and by `testing::TestClient`.
pub async fn dispatch(
    router: &Router,
    middleware: &MiddlewareRegistry,
    mut request: Request,
) -> HttpResponse {
    let (handler, params) = router
        .match_route(request.method(), request.path())
        .unwrap_or_else(|| (not_found(), HashMap::new()));

    request.extensions_mut().extend(router.shared_state().clone());
    let request = request.with_params(params);

    let mut chain = MiddlewareChain::new();
    chain.extend(middleware.global_middleware().iter().cloned());

    // Both Ok and Err carry an HttpResponse
    chain
        .execute(request, handler)
        .await
        .unwrap_or_else(|e| e)
}

fn not_found() -> Arc<BoxedHandler> {
    let handler: BoxedHandler =
        Box::new(|_req| Box::pin(async { Err(HttpResponse::text("404 Not Found").status(404)) }));
    Arc::new(handler)
}
