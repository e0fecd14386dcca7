use super::TodoStore;
use crate::models::todos::{self, normalize_task, Model, Todo};
use async_trait::async_trait;
use framework::{DbConnection, FrameworkError};
use sea_orm::{ConnectionTrait, DatabaseBackend, FromQueryResult, Statement, Value};
use std::borrow::Cow;

const COLUMNS: &str = "id, task, completed, created_at";

/// `TodoStore` running hand-written SQL
///
/// Statements are written with Postgres `$n` placeholders and rewritten to
/// SQLite's numbered `?n` form when needed.
#[derive(Clone)]
pub struct SqlTodoStore {
    db: DbConnection,
}

impl SqlTodoStore {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn statement(&self, sql: &str, values: Vec<Value>) -> Statement {
        let backend = self.db.backend();
        let sql = match backend {
            DatabaseBackend::Postgres => Cow::Borrowed(sql),
            _ => Cow::Owned(numbered_placeholders(sql)),
        };
        Statement::from_sql_and_values(backend, sql.as_ref(), values)
    }

    async fn fetch_one(&self, sql: &str, values: Vec<Value>) -> Result<Option<Todo>, FrameworkError> {
        let model = Model::find_by_statement(self.statement(sql, values))
            .one(self.db.inner())
            .await?;
        Ok(model.map(Todo::from))
    }
}

/// Rewrite `$1`, `$2`... to `?1`, `?2`...
fn numbered_placeholders(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut chars = sql.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '$' && chars.peek().is_some_and(char::is_ascii_digit) {
            out.push('?');
        } else {
            out.push(c);
        }
    }
    out
}

#[async_trait]
impl TodoStore for SqlTodoStore {
    async fn create(&self, raw_task: &str) -> Result<Option<Todo>, FrameworkError> {
        let Some(task) = normalize_task(raw_task) else {
            return Ok(None);
        };

        let sql = format!(
            "INSERT INTO todos (task, completed, created_at) VALUES ($1, $2, $3) RETURNING {}",
            COLUMNS
        );
        self.fetch_one(&sql, vec![task.into(), false.into(), todos::now().into()])
            .await
    }

    async fn list(&self) -> Result<Vec<Todo>, FrameworkError> {
        let sql = format!(
            "SELECT {} FROM todos ORDER BY created_at DESC, id DESC",
            COLUMNS
        );
        let models = Model::find_by_statement(self.statement(&sql, vec![]))
            .all(self.db.inner())
            .await?;
        Ok(models.into_iter().map(Todo::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Todo>, FrameworkError> {
        let sql = format!("SELECT {} FROM todos WHERE id = $1", COLUMNS);
        self.fetch_one(&sql, vec![id.into()]).await
    }

    async fn toggle_completion(&self, id: i32) -> Result<Option<Todo>, FrameworkError> {
        let sql = format!(
            "UPDATE todos SET completed = NOT completed WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        self.fetch_one(&sql, vec![id.into()]).await
    }

    async fn update_task(&self, id: i32, raw_task: &str) -> Result<Option<Todo>, FrameworkError> {
        let Some(task) = normalize_task(raw_task) else {
            return Ok(None);
        };

        let sql = format!(
            "UPDATE todos SET task = $1 WHERE id = $2 RETURNING {}",
            COLUMNS
        );
        self.fetch_one(&sql, vec![task.into(), id.into()]).await
    }

    async fn delete(&self, id: i32) -> Result<bool, FrameworkError> {
        let result = self
            .db
            .execute(self.statement("DELETE FROM todos WHERE id = $1", vec![id.into()]))
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_placeholders() {
        assert_eq!(
            numbered_placeholders("UPDATE todos SET task = $1 WHERE id = $2"),
            "UPDATE todos SET task = ?1 WHERE id = ?2"
        );
        assert_eq!(
            numbered_placeholders("SELECT '$' || task FROM todos WHERE id = $10"),
            "SELECT '$' || task FROM todos WHERE id = ?10"
        );
    }
}
