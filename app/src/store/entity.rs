use super::TodoStore;
use crate::models::todos::{self, normalize_task, ActiveModel, Column, Entity, Todo};
use async_trait::async_trait;
use framework::{DbConnection, FrameworkError};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

/// `TodoStore` backed by SeaORM entities
#[derive(Clone)]
pub struct EntityTodoStore {
    db: DbConnection,
}

impl EntityTodoStore {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoStore for EntityTodoStore {
    async fn create(&self, raw_task: &str) -> Result<Option<Todo>, FrameworkError> {
        let Some(task) = normalize_task(raw_task) else {
            return Ok(None);
        };

        let model = ActiveModel {
            task: Set(task.to_string()),
            completed: Set(false),
            created_at: Set(todos::now()),
            ..Default::default()
        }
        .insert(self.db.inner())
        .await?;

        Ok(Some(model.into()))
    }

    async fn list(&self) -> Result<Vec<Todo>, FrameworkError> {
        let models = Entity::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(self.db.inner())
            .await?;

        Ok(models.into_iter().map(Todo::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Todo>, FrameworkError> {
        let model = Entity::find_by_id(id).one(self.db.inner()).await?;
        Ok(model.map(Todo::from))
    }

    async fn toggle_completion(&self, id: i32) -> Result<Option<Todo>, FrameworkError> {
        // UPDATE todos SET completed = NOT completed WHERE id = ?
        let result = Entity::update_many()
            .col_expr(Column::Completed, Expr::col(Column::Completed).not())
            .filter(Column::Id.eq(id))
            .exec(self.db.inner())
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn update_task(&self, id: i32, raw_task: &str) -> Result<Option<Todo>, FrameworkError> {
        let Some(task) = normalize_task(raw_task) else {
            return Ok(None);
        };

        let result = Entity::update_many()
            .col_expr(Column::Task, Expr::value(task))
            .filter(Column::Id.eq(id))
            .exec(self.db.inner())
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn delete(&self, id: i32) -> Result<bool, FrameworkError> {
        let result = Entity::delete_by_id(id).exec(self.db.inner()).await?;
        Ok(result.rows_affected > 0)
    }
}
