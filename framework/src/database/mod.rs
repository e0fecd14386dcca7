//! Database connection layer over SeaORM
//!
//! ```rust,ignore
//! let config = Config::get::<DatabaseConfig>().unwrap_or_default();
//! let db = DbConnection::connect(&config).await?;
//! ```

pub mod config;
pub mod connection;

pub use config::{DatabaseConfig, DatabaseDriver};
pub use connection::DbConnection;

pub use sea_orm;
