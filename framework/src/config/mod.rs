//! Configuration
//!
//! `.env` files are loaded with environment-based precedence, then typed
//! config structs are registered in a process-wide repository keyed by type.
//!
//! ```rust,ignore
//! use framework::{Config, ServerConfig};
//!
//! Config::init(std::path::Path::new("."));
//! let server = Config::get::<ServerConfig>().unwrap_or_default();
//! println!("listening on port {}", server.port);
//! ```

pub mod env;
pub mod providers;
pub mod repository;

pub use env::{env, env_optional, load_dotenv, DotenvReport, Environment};
pub use providers::{AppConfig, ServerConfig};

use crate::database::DatabaseConfig;
use std::any::Any;
use std::path::Path;

/// Facade over the config repository
pub struct Config;

impl Config {
    /// Load `.env` files and register the framework's own configs
    ///
    /// Call once at startup, before anything reads config. The returned
    /// report is logged once the subscriber is installed.
    pub fn init(project_root: &Path) -> DotenvReport {
        let report = env::load_dotenv(project_root);

        repository::register(AppConfig::from_env());
        repository::register(ServerConfig::from_env());
        repository::register(DatabaseConfig::from_env());

        report
    }

    /// Get a typed config struct
    pub fn get<T: Any + Send + Sync + Clone + 'static>() -> Option<T> {
        repository::get::<T>()
    }

    /// Register (or replace) a config struct
    ///
    /// ```rust,ignore
    /// #[derive(Clone)]
    /// struct StoreConfig { driver: StoreDriver }
    ///
    /// Config::register(StoreConfig { driver: StoreDriver::Sql });
    /// ```
    pub fn register<T: Any + Send + Sync + 'static>(config: T) {
        repository::register(config);
    }

    pub fn has<T: Any + 'static>() -> bool {
        repository::has::<T>()
    }

    /// Environment from `AppConfig`, or detected from `APP_ENV`
    pub fn environment() -> Environment {
        Config::get::<AppConfig>()
            .map(|c| c.environment)
            .unwrap_or_else(Environment::detect)
    }

    pub fn is_production() -> bool {
        Self::environment().is_production()
    }

    pub fn is_debug() -> bool {
        Config::get::<AppConfig>().map(|c| c.debug).unwrap_or(false)
    }
}
