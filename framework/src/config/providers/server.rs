use crate::config::env::{env, env_optional};

/// Default request body limit (1 MiB)
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    /// `SERVER_PORT`, then `PORT`, then 3000
    pub port: u16,
    /// Maximum request body size in bytes; larger bodies get 413
    pub max_body_size: usize,
}

impl ServerConfig {
    /// Build config from environment variables
    pub fn from_env() -> Self {
        let port = env_optional("SERVER_PORT")
            .or_else(|| env_optional("PORT"))
            .unwrap_or(3000);

        Self {
            host: env("SERVER_HOST", "127.0.0.1".to_string()),
            port,
            max_body_size: env("SERVER_MAX_BODY_SIZE", DEFAULT_MAX_BODY_SIZE),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}
