use crate::http::{Request, Response};
use matchit::Router as MatchitRouter;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, OnceLock, RwLock};

/// Global registry mapping route names to path patterns
static ROUTE_REGISTRY: OnceLock<RwLock<HashMap<String, String>>> = OnceLock::new();

/// Register a route name -> path mapping
pub fn register_route_name(name: &str, path: &str) {
    let registry = ROUTE_REGISTRY.get_or_init(|| RwLock::new(HashMap::new()));
    if let Ok(mut map) = registry.write() {
        map.insert(name.to_string(), path.to_string());
    }
}

/// Generate a URL for a named route with parameters
///
/// # Example
/// ```rust,ignore
/// let url = route("todos.complete", &[("id", "12")]);
/// assert_eq!(url, Some("/todos/12/complete".to_string()));
/// ```
pub fn route(name: &str, params: &[(&str, &str)]) -> Option<String> {
    let registry = ROUTE_REGISTRY.get()?.read().ok()?;
    let pattern = registry.get(name)?;
    Some(fill_pattern(
        pattern,
        params.iter().map(|(k, v)| (*k, *v)),
    ))
}

/// Generate URL with HashMap parameters (used internally by Redirect)
pub fn route_with_params(name: &str, params: &HashMap<String, String>) -> Option<String> {
    let registry = ROUTE_REGISTRY.get()?.read().ok()?;
    let pattern = registry.get(name)?;
    Some(fill_pattern(
        pattern,
        params.iter().map(|(k, v)| (k.as_str(), v.as_str())),
    ))
}

fn fill_pattern<'a>(pattern: &str, params: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    params.fold(pattern.to_string(), |url, (key, value)| {
        url.replace(&format!("{{{}}}", key), value)
    })
}

/// Type alias for route handlers
pub type BoxedHandler =
    Box<dyn Fn(Request) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync>;

/// HTTP router keyed by method, backed by matchit
///
/// Values mounted with [`Router::state`] are copied into every matched
/// request and read back in handlers with `req.state::<T>()`.
pub struct Router {
    get_routes: MatchitRouter<Arc<BoxedHandler>>,
    post_routes: MatchitRouter<Arc<BoxedHandler>>,
    state: http::Extensions,
}

impl Router {
    pub fn new() -> Self {
        Self {
            get_routes: MatchitRouter::new(),
            post_routes: MatchitRouter::new(),
            state: http::Extensions::new(),
        }
    }

    /// Mount a typed state value shared by all handlers
    ///
    /// ```rust,ignore
    /// let router = routes::register().state(todos);
    /// // in a handler:
    /// let todos = req.state::<Todos>()?;
    /// ```
    pub fn state<T: Clone + Send + Sync + 'static>(mut self, value: T) -> Self {
        self.state.insert(value);
        self
    }

    /// All mounted state values
    pub fn shared_state(&self) -> &http::Extensions {
        &self.state
    }

    fn insert(
        routes: &mut MatchitRouter<Arc<BoxedHandler>>,
        path: &str,
        handler: Arc<BoxedHandler>,
    ) {
        if let Err(err) = routes.insert(path, handler) {
            tracing::warn!(path, error = %err, "route registration conflict, route ignored");
        }
    }

    pub(crate) fn insert_get(&mut self, path: &str, handler: Arc<BoxedHandler>) {
        Self::insert(&mut self.get_routes, path, handler);
    }

    pub(crate) fn insert_post(&mut self, path: &str, handler: Arc<BoxedHandler>) {
        Self::insert(&mut self.post_routes, path, handler);
    }

    fn boxed<H, Fut>(handler: H) -> Arc<BoxedHandler>
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let handler: BoxedHandler = Box::new(move |req| Box::pin(handler(req)));
        Arc::new(handler)
    }

    /// Register a GET route
    pub fn get<H, Fut>(mut self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.insert_get(path, Self::boxed(handler));
        RouteBuilder::new(self, path)
    }

    /// Register a POST route
    pub fn post<H, Fut>(mut self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.insert_post(path, Self::boxed(handler));
        RouteBuilder::new(self, path)
    }

    /// Match a request and return the handler with extracted params
    pub fn match_route(
        &self,
        method: &http::Method,
        path: &str,
    ) -> Option<(Arc<BoxedHandler>, HashMap<String, String>)> {
        let router = match *method {
            http::Method::GET => &self.get_routes,
            http::Method::POST => &self.post_routes,
            _ => return None,
        };

        router.at(path).ok().map(|matched| {
            let params: HashMap<String, String> = matched
                .params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            (matched.value.clone(), params)
        })
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder returned after registering a route, enabling .name() chaining
pub struct RouteBuilder {
    pub(crate) router: Router,
    last_path: String,
}

impl RouteBuilder {
    fn new(router: Router, path: &str) -> Self {
        Self {
            router,
            last_path: path.to_string(),
        }
    }

    /// Name the most recently registered route
    pub fn name(self, name: &str) -> Router {
        register_route_name(name, &self.last_path);
        self.router
    }

    /// Register a GET route (for chaining without .name())
    pub fn get<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.get(path, handler)
    }

    /// Register a POST route (for chaining without .name())
    pub fn post<H, Fut>(self, path: &str, handler: H) -> RouteBuilder
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.router.post(path, handler)
    }
}

impl From<RouteBuilder> for Router {
    fn from(builder: RouteBuilder) -> Self {
        builder.router
    }
}
