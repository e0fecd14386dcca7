use crate::config::env::{env, Environment};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application name, reported in startup logs
    pub name: String,
    pub environment: Environment,
    pub debug: bool,
    /// Fallback filter directive when `RUST_LOG` is unset
    pub log_level: String,
}

impl AppConfig {
    /// Build config from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::detect();
        Self {
            name: env("APP_NAME", "Tasklist".to_string()),
            debug: env("APP_DEBUG", !environment.is_production()),
            log_level: env("LOG_LEVEL", "info".to_string()),
            environment,
        }
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
