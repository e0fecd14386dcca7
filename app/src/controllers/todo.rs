//! Task list handlers
//!
//! Form endpoints always answer with a redirect to the index: blank input,
//! unknown ids and store failures are no-ops from the browser's point of
//! view. Failures are logged.

use crate::store::Todos;
use crate::views;
use framework::{http, HttpResponse, Redirect, Request, Response};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct TaskInput {
    #[serde(default)]
    task: String,
}

/// Task text from a form or JSON body; missing or undecodable input is blank
fn task_input(req: &Request) -> String {
    req.input::<TaskInput>()
        .map(|input| input.task)
        .unwrap_or_default()
}

/// Numeric `{id}`; anything else can never match a row
fn todo_id(req: &Request) -> Option<i32> {
    req.param_as::<i32>("id").ok()
}

fn back_to_index() -> Response {
    Redirect::route("todos.index").into()
}

/// GET /
pub async fn index(req: Request) -> Response {
    let todos = req.state::<Todos>()?;

    match todos.list().await {
        Ok(list) => http::html(views::todos::index(&list, None)?),
        Err(err) => {
            tracing::error!(error = %err, "failed to load todos");
            http::html(views::todos::index(&[], Some("Failed to load todos"))?)
        }
    }
}

/// GET /api/todos
pub async fn api_index(req: Request) -> Response {
    let todos = req.state::<Todos>()?;

    match todos.list().await {
        Ok(list) => Ok(HttpResponse::serialize(&list)?),
        Err(err) => {
            tracing::error!(error = %err, "failed to fetch todos");
            Err(HttpResponse::json(serde_json::json!({ "error": "Failed to fetch todos" })).status(500))
        }
    }
}

/// POST /todos
pub async fn store(req: Request) -> Response {
    let todos = req.state::<Todos>()?;
    let task = task_input(&req);

    match todos.create(&task).await {
        Ok(Some(todo)) => tracing::debug!(id = todo.id, "todo created"),
        Ok(None) => tracing::debug!("blank task ignored"),
        Err(err) => tracing::error!(error = %err, "failed to create todo"),
    }

    back_to_index()
}

/// POST /todos/{id}/complete
pub async fn complete(req: Request) -> Response {
    let todos = req.state::<Todos>()?;
    let Some(id) = todo_id(&req) else {
        return back_to_index();
    };

    match todos.toggle_completion(id).await {
        Ok(Some(todo)) => tracing::debug!(id, completed = todo.completed, "todo toggled"),
        Ok(None) => tracing::debug!(id, "toggle skipped, no such todo"),
        Err(err) => tracing::error!(id, error = %err, "failed to toggle todo"),
    }

    back_to_index()
}

/// POST /todos/{id}/update
pub async fn update(req: Request) -> Response {
    let todos = req.state::<Todos>()?;
    let Some(id) = todo_id(&req) else {
        return back_to_index();
    };
    let task = task_input(&req);

    match todos.update_task(id, &task).await {
        Ok(Some(_)) => tracing::debug!(id, "todo updated"),
        Ok(None) => tracing::debug!(id, "update skipped"),
        Err(err) => tracing::error!(id, error = %err, "failed to update todo"),
    }

    back_to_index()
}

/// POST /todos/{id}/delete
pub async fn destroy(req: Request) -> Response {
    let todos = req.state::<Todos>()?;
    let Some(id) = todo_id(&req) else {
        return back_to_index();
    };

    match todos.delete(id).await {
        Ok(true) => tracing::debug!(id, "todo deleted"),
        Ok(false) => tracing::debug!(id, "delete skipped, no such todo"),
        Err(err) => tracing::error!(id, error = %err, "failed to delete todo"),
    }

    back_to_index()
}
