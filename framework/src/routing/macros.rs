//! Declarative route definitions
//!
//! ```rust,ignore
//! use framework::{get, group, post, routes};
//!
//! routes! {
//!     get!("/", controllers::todo::index).name("todos.index"),
//!
//!     group!("/todos", {
//!         post!("/", controllers::todo::store).name("todos.store"),
//!         post!("/{id}/delete", controllers::todo::destroy).name("todos.destroy"),
//!     }),
//! }
//! ```

use crate::http::{Request, Response};
use crate::routing::router::{register_route_name, BoxedHandler, Router};
use std::future::Future;
use std::sync::Arc;

/// Const function to validate route paths start with '/'
///
/// # Panics
///
/// Panics at compile time if the path is empty or doesn't start with '/'.
pub const fn validate_route_path(path: &'static str) -> &'static str {
    let bytes = path.as_bytes();
    if bytes.is_empty() || bytes[0] != b'/' {
        panic!("Route path must start with '/'")
    }
    path
}

/// HTTP method for route definitions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A route definition produced by `get!`/`post!`
pub struct RouteDef {
    method: HttpMethod,
    path: &'static str,
    handler: Arc<BoxedHandler>,
    name: Option<&'static str>,
}

impl RouteDef {
    pub fn new<H, Fut>(method: HttpMethod, path: &'static str, handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let boxed: BoxedHandler = Box::new(move |req| Box::pin(handler(req)));
        Self {
            method,
            path,
            handler: Arc::new(boxed),
            name: None,
        }
    }

    /// Name this route for URL generation
    pub fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Register this route definition with a router
    pub fn register(self, router: Router) -> Router {
        self.register_under("", router)
    }

    fn register_under(self, prefix: &str, mut router: Router) -> Router {
        // A group's root route maps onto the bare prefix: "/todos" + "/" -> "/todos"
        let full_path = match (prefix.is_empty(), self.path) {
            (true, path) => path.to_string(),
            (false, "/") => prefix.to_string(),
            (false, path) => format!("{}{}", prefix, path),
        };

        match self.method {
            HttpMethod::Get => router.insert_get(&full_path, self.handler),
            HttpMethod::Post => router.insert_post(&full_path, self.handler),
        }

        if let Some(name) = self.name {
            register_route_name(name, &full_path);
        }

        router
    }
}

/// Create a GET route definition with compile-time path validation
#[macro_export]
macro_rules! get {
    ($path:expr, $handler:expr) => {{
        const _: &str = $crate::validate_route_path($path);
        $crate::RouteDef::new($crate::HttpMethod::Get, $path, $handler)
    }};
}

/// Create a POST route definition with compile-time path validation
#[macro_export]
macro_rules! post {
    ($path:expr, $handler:expr) => {{
        const _: &str = $crate::validate_route_path($path);
        $crate::RouteDef::new($crate::HttpMethod::Post, $path, $handler)
    }};
}

/// Routes sharing a path prefix
pub struct GroupDef {
    prefix: &'static str,
    routes: Vec<RouteDef>,
}

impl GroupDef {
    /// Use the `group!` macro instead for compile-time validation.
    #[doc(hidden)]
    pub fn __new_unchecked(prefix: &'static str) -> Self {
        Self {
            prefix,
            routes: Vec::new(),
        }
    }

    /// Add a route to this group
    pub fn route(mut self, route: RouteDef) -> Self {
        self.routes.push(route);
        self
    }

    /// Register all routes in this group with the router
    pub fn register(self, router: Router) -> Router {
        let prefix = self.prefix;
        self.routes
            .into_iter()
            .fold(router, |router, route| route.register_under(prefix, router))
    }
}

/// Define a route group with a shared prefix
///
/// # Compile Error
///
/// Fails to compile if prefix doesn't start with '/'.
#[macro_export]
macro_rules! group {
    ($prefix:expr, { $( $route:expr ),* $(,)? }) => {{
        const _: &str = $crate::validate_route_path($prefix);
        let mut group = $crate::GroupDef::__new_unchecked($prefix);
        $(
            group = group.route($route);
        )*
        group
    }};
}

/// Define the application's routes
///
/// Generates a `pub fn register() -> Router` function in the calling module.
#[macro_export]
macro_rules! routes {
    ( $( $route:expr ),* $(,)? ) => {
        pub fn register() -> $crate::Router {
            let mut router = $crate::Router::new();
            $(
                router = $route.register(router);
            )*
            router
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::http::{HttpResponse, Request, Response};
    use crate::routing::route;

    async fn ok(_req: Request) -> Response {
        HttpResponse::text("ok").ok()
    }

    mod app_routes {
        use super::ok;

        crate::routes! {
            crate::get!("/macro-test", ok).name("macro_test.index"),
            crate::group!("/macro-test/items", {
                crate::post!("/", ok).name("macro_test.items.store"),
                crate::post!("/{id}/delete", ok).name("macro_test.items.delete"),
            }),
        }
    }

    #[test]
    fn test_routes_macro_registers_group_paths() {
        let router = app_routes::register();

        assert!(router
            .match_route(&http::Method::GET, "/macro-test")
            .is_some());
        assert!(router
            .match_route(&http::Method::POST, "/macro-test/items")
            .is_some());
        assert!(router
            .match_route(&http::Method::POST, "/macro-test/items/3/delete")
            .is_some());
        assert!(router
            .match_route(&http::Method::POST, "/macro-test/items/")
            .is_none());
    }

    #[test]
    fn test_group_route_names_include_prefix() {
        let _ = app_routes::register();
        assert_eq!(
            route("macro_test.items.delete", &[("id", "5")]),
            Some("/macro-test/items/5/delete".to_string())
        );
        assert_eq!(
            route("macro_test.items.store", &[]),
            Some("/macro-test/items".to_string())
        );
    }
}
