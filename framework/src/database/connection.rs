//! Database connection management

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection};
use std::path::Path;
use std::time::Duration;

use crate::database::config::DatabaseConfig;
use crate::error::FrameworkError;

/// Owned handle to a SeaORM connection pool
///
/// Cloning is cheap; all clones share one pool. Call [`DbConnection::close`]
/// once on shutdown.
///
/// ```rust,ignore
/// let db = DbConnection::connect(&config).await?;
/// let rows = todos::Entity::find().all(db.inner()).await?;
/// db.close().await?;
/// ```
#[derive(Clone)]
pub struct DbConnection {
    inner: DatabaseConnection,
}

impl DbConnection {
    /// Open a pool from config
    ///
    /// SQLite database files (and their parent directories) are created if
    /// missing.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, FrameworkError> {
        let url = sqlite_url(&config.url).unwrap_or_else(|| config.url.clone());

        let mut opt = ConnectOptions::new(&url);
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .sqlx_logging(config.logging);

        let inner = Database::connect(opt).await.map_err(|e| {
            FrameworkError::database(format!(
                "failed to connect to {}: {}",
                config.redacted_url(),
                e
            ))
        })?;

        tracing::info!(url = %config.redacted_url(), "database connected");
        Ok(Self { inner })
    }

    /// Underlying SeaORM connection
    pub fn inner(&self) -> &DatabaseConnection {
        &self.inner
    }

    pub fn backend(&self) -> DatabaseBackend {
        self.inner.get_database_backend()
    }

    /// Round-trip a trivial query
    pub async fn ping(&self) -> Result<(), FrameworkError> {
        self.inner.ping().await.map_err(FrameworkError::from)
    }

    /// Close the pool, waiting for checked-out connections to return
    pub async fn close(self) -> Result<(), FrameworkError> {
        self.inner.close().await.map_err(FrameworkError::from)?;
        tracing::info!("database connection closed");
        Ok(())
    }
}

/// Rewrite `sqlite://path` to the create-if-missing form
fn sqlite_url(url: &str) -> Option<String> {
    let path = url.strip_prefix("sqlite://")?;
    let path = path.trim_start_matches("./");

    if path.starts_with(":memory:") {
        return None;
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                tracing::warn!(path, error = %err, "could not create database directory");
            }
        }
    }

    Some(format!("sqlite:{}?mode=rwc", path))
}

impl AsRef<DatabaseConnection> for DbConnection {
    fn as_ref(&self) -> &DatabaseConnection {
        &self.inner
    }
}

impl std::ops::Deref for DbConnection {
    type Target = DatabaseConnection;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_url_rewrite() {
        assert_eq!(sqlite_url("sqlite::memory:"), None);
        assert_eq!(sqlite_url("sqlite://:memory:"), None);
        assert_eq!(sqlite_url("postgres://localhost/db"), None);
        assert_eq!(
            sqlite_url("sqlite://./tasklist-test.db"),
            Some("sqlite:tasklist-test.db?mode=rwc".to_string())
        );
    }

    #[tokio::test]
    async fn test_connect_in_memory_and_close() {
        let db = DbConnection::connect(&DatabaseConfig::sqlite_memory())
            .await
            .unwrap();
        assert_eq!(db.backend(), DatabaseBackend::Sqlite);
        db.ping().await.unwrap();
        db.close().await.unwrap();
    }
}
