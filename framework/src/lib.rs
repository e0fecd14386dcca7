//! A small hyper-based web framework
//!
//! Routing, middleware, typed router state, layered configuration, a SeaORM
//! connection layer and a migration-aware application runner.

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod http;
pub mod logging;
pub mod middleware;
pub mod routing;
pub mod server;
pub mod testing;

pub use app::{shutdown_signal, Application, NoMigrator};
pub use config::{AppConfig, Config, Environment, ServerConfig};
pub use database::{DatabaseConfig, DatabaseDriver, DbConnection};
pub use error::FrameworkError;
pub use crate::http::{HttpResponse, Redirect, RedirectRouteBuilder, Request, Response, ResponseExt};
pub use middleware::{Middleware, MiddlewareRegistry, Next};
pub use routing::{route, validate_route_path, GroupDef, HttpMethod, RouteDef, Router};
pub use server::Server;

pub use async_trait::async_trait;

#[doc(hidden)]
pub use serde_json;
