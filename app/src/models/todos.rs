//! Todo model
//!
//! The table mapping lives in `entities::todos`; this module holds the
//! domain value handed to views and serialized by the API.

pub use super::entities::todos::{ActiveModel, Column, Entity, Model};

use chrono::{DateTime, Timelike, Utc};
use sea_orm::entity::prelude::ActiveModelBehavior;
use serde::{Deserialize, Serialize};

impl ActiveModelBehavior for ActiveModel {}

/// A single task list item
///
/// Serializes as `{"id":1,"task":"...","completed":false,"createdAt":"..."}`
/// with an RFC 3339 UTC timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i32,
    pub task: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Model> for Todo {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            task: model.task,
            completed: model.completed,
            created_at: model.created_at.and_utc(),
        }
    }
}

/// Trim a raw task; `None` when nothing is left
pub fn normalize_task(raw: &str) -> Option<&str> {
    let task = raw.trim();
    (!task.is_empty()).then_some(task)
}

/// Creation timestamp as stored, truncated to microseconds
///
/// Both Postgres and SQLite keep microsecond precision, so a value read back
/// compares equal to the one written.
pub fn now() -> chrono::NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond((now.nanosecond() / 1_000) * 1_000)
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_normalize_task() {
        assert_eq!(normalize_task("  Trimmed todo  "), Some("Trimmed todo"));
        assert_eq!(normalize_task("buy milk"), Some("buy milk"));
        assert_eq!(normalize_task(""), None);
        assert_eq!(normalize_task(" \t\n "), None);
    }

    #[test]
    fn test_todo_serializes_camel_case() {
        let created_at = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap();
        let todo = Todo::from(Model {
            id: 7,
            task: "Write tests".to_string(),
            completed: true,
            created_at,
        });

        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "task": "Write tests",
                "completed": true,
                "createdAt": "2024-03-01T09:30:00Z"
            })
        );
    }

    #[test]
    fn test_now_has_microsecond_precision() {
        assert_eq!(now().nanosecond() % 1_000, 0);
    }
}
