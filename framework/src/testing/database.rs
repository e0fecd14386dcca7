use crate::database::{DatabaseConfig, DbConnection};
use crate::error::FrameworkError;
use sea_orm_migration::MigratorTrait;

/// Isolated in-memory SQLite database with all migrations applied
///
/// Each instance owns a private database that disappears when the last
/// connection clone is dropped.
pub struct TestDatabase {
    db: DbConnection,
}

impl TestDatabase {
    pub async fn fresh<M: MigratorTrait>() -> Result<Self, FrameworkError> {
        let db = DbConnection::connect(&DatabaseConfig::sqlite_memory()).await?;
        M::up(db.inner(), None).await?;
        Ok(Self { db })
    }

    /// Shared handle to the underlying pool
    pub fn connection(&self) -> DbConnection {
        self.db.clone()
    }

    pub async fn close(self) -> Result<(), FrameworkError> {
        self.db.close().await
    }
}
