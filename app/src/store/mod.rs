//! Todo persistence
//!
//! [`TodoStore`] is the storage contract the handlers depend on. Two
//! adapters implement it over the same `todos` table:
//!
//! - [`EntityTodoStore`] goes through SeaORM entities and active models
//! - [`SqlTodoStore`] runs hand-written SQL statements
//!
//! Every operation is a single statement per row touched. Unknown ids are
//! reported as `None`/`false`, never as errors.

mod entity;
mod sql;

pub use entity::EntityTodoStore;
pub use sql::SqlTodoStore;

use crate::config::{StoreConfig, StoreDriver};
use crate::models::Todo;
use async_trait::async_trait;
use framework::{Config, DbConnection, FrameworkError};
use std::sync::Arc;

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Insert a todo with the trimmed task; `None` (and no write) when blank
    async fn create(&self, raw_task: &str) -> Result<Option<Todo>, FrameworkError>;

    /// All todos, newest first (ties broken by id, highest first)
    async fn list(&self) -> Result<Vec<Todo>, FrameworkError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Todo>, FrameworkError>;

    /// Flip `completed` in place; `None` when the id does not exist
    async fn toggle_completion(&self, id: i32) -> Result<Option<Todo>, FrameworkError>;

    /// Replace the task text
    ///
    /// The text is trimmed like on create. A blank result, or an unknown id,
    /// leaves the table untouched and yields `None`.
    async fn update_task(&self, id: i32, raw_task: &str) -> Result<Option<Todo>, FrameworkError>;

    /// Whether a row was removed
    async fn delete(&self, id: i32) -> Result<bool, FrameworkError>;
}

/// Shared store handle mounted as router state
pub type Todos = Arc<dyn TodoStore>;

/// Build the adapter selected by `driver`
pub fn connect(driver: StoreDriver, db: DbConnection) -> Todos {
    match driver {
        StoreDriver::Orm => Arc::new(EntityTodoStore::new(db)),
        StoreDriver::Sql => Arc::new(SqlTodoStore::new(db)),
    }
}

/// Build the adapter named by the registered `StoreConfig`
pub fn from_config(db: DbConnection) -> Todos {
    let driver = Config::get::<StoreConfig>().unwrap_or_default().driver;
    tracing::info!(%driver, "todo store ready");
    connect(driver, db)
}
