//! Route behaviour through the full router and middleware stack

use async_trait::async_trait;
use framework::testing::{TestClient, TestDatabase};
use framework::{expect, FrameworkError};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use tasklist::config::StoreDriver;
use tasklist::middleware::LoggingMiddleware;
use tasklist::migrations::Migrator;
use tasklist::models::Todo;
use tasklist::routes;
use tasklist::store::{self, TodoStore, Todos};

struct App {
    _db: TestDatabase,
    todos: Todos,
    client: TestClient,
}

async fn app() -> App {
    let db = TestDatabase::fresh::<Migrator>().await.unwrap();
    let todos = store::connect(StoreDriver::Orm, db.connection());
    let client = TestClient::new(routes::build(todos.clone())).middleware(LoggingMiddleware);
    App {
        _db: db,
        todos,
        client,
    }
}

#[tokio::test]
async fn health_check_reports_ok() {
    let app = app().await;

    let response = app.client.get("/health").await;
    assert_eq!(response.status, 200);
    assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn index_renders_empty_state() {
    let app = app().await;

    let response = app.client.get("/").await;
    assert_eq!(response.status, 200);
    expect!(response.header("content-type").unwrap_or_default()).to_contain("text/html");
    expect!(response.text()).to_contain("No todos yet");
}

#[tokio::test]
async fn index_lists_todos() {
    let app = app().await;
    app.todos.create("Test todo 1").await.unwrap();
    app.todos.create("Test <b>todo</b> 2").await.unwrap();

    let response = app.client.get("/").await;
    assert_eq!(response.status, 200);
    expect!(response.text()).to_contain("Test todo 1");
    expect!(response.text()).to_contain("Test &lt;b&gt;todo&lt;&#x2F;b&gt; 2");
}

#[tokio::test]
async fn create_from_form_redirects_home() {
    let app = app().await;

    let response = app
        .client
        .post_form("/todos", &[("task", "New test todo")])
        .await;
    assert_eq!(response.status, 302);
    assert_eq!(response.location(), Some("/"));

    let todos = app.todos.list().await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].task, "New test todo");
    expect!(todos[0].completed).to_be_false();
}

#[tokio::test]
async fn create_accepts_json_and_trims() {
    let app = app().await;

    let response = app
        .client
        .post_json("/todos", &json!({ "task": "  Trimmed todo  " }))
        .await;
    assert_eq!(response.status, 302);

    let todos = app.todos.list().await.unwrap();
    assert_eq!(todos[0].task, "Trimmed todo");
}

#[tokio::test]
async fn create_ignores_blank_and_missing_task() {
    let app = app().await;

    for response in [
        app.client.post_form("/todos", &[("task", "")]).await,
        app.client.post_form("/todos", &[("task", "   ")]).await,
        app.client.post("/todos").await,
        app.client.post_json("/todos", &json!({ "task": 42 })).await,
    ] {
        assert_eq!(response.status, 302);
        assert_eq!(response.location(), Some("/"));
    }

    expect!(app.todos.list().await.unwrap()).to_be_empty();
}

#[tokio::test]
async fn complete_toggles_back_and_forth() {
    let app = app().await;
    let todo = app.todos.create("Toggle me").await.unwrap().unwrap();
    let uri = format!("/todos/{}/complete", todo.id);

    let response = app.client.post(&uri).await;
    assert_eq!(response.status, 302);
    expect!(app.todos.find_by_id(todo.id).await.unwrap().unwrap().completed).to_be_true();

    app.client.post(&uri).await;
    expect!(app.todos.find_by_id(todo.id).await.unwrap().unwrap().completed).to_be_false();
}

#[tokio::test]
async fn unknown_or_malformed_ids_still_redirect() {
    let app = app().await;
    app.todos.create("bystander").await.unwrap();

    for uri in [
        "/todos/99999/complete",
        "/todos/99999/delete",
        "/todos/99999/update",
        "/todos/abc/complete",
        "/todos/abc/delete",
        "/todos/12abc/update",
    ] {
        let response = app.client.post_form(uri, &[("task", "renamed")]).await;
        assert_eq!(response.status, 302, "{}", uri);
        assert_eq!(response.location(), Some("/"), "{}", uri);
    }

    let todos = app.todos.list().await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].task, "bystander");
    expect!(todos[0].completed).to_be_false();
}

#[tokio::test]
async fn delete_removes_todo() {
    let app = app().await;
    let todo = app.todos.create("To be deleted").await.unwrap().unwrap();

    let response = app
        .client
        .post(&format!("/todos/{}/delete", todo.id))
        .await;
    assert_eq!(response.status, 302);
    expect!(app.todos.find_by_id(todo.id).await.unwrap()).to_be_none();
}

#[tokio::test]
async fn update_trims_and_ignores_blank() {
    let app = app().await;
    let todo = app.todos.create("Original").await.unwrap().unwrap();
    let uri = format!("/todos/{}/update", todo.id);

    let response = app.client.post_form(&uri, &[("task", "  Edited  ")]).await;
    assert_eq!(response.status, 302);
    assert_eq!(
        app.todos.find_by_id(todo.id).await.unwrap().unwrap().task,
        "Edited"
    );

    app.client.post_form(&uri, &[("task", "  ")]).await;
    assert_eq!(
        app.todos.find_by_id(todo.id).await.unwrap().unwrap().task,
        "Edited"
    );
}

#[tokio::test]
async fn api_returns_empty_array() {
    let app = app().await;

    let response = app.client.get("/api/todos").await;
    assert_eq!(response.status, 200);
    assert_eq!(response.header("content-type"), Some("application/json"));
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn api_returns_todos_newest_first() {
    let app = app().await;
    let first = app.todos.create("First todo").await.unwrap().unwrap();
    let second = app.todos.create("Second todo").await.unwrap().unwrap();

    let response = app.client.get("/api/todos").await;
    assert_eq!(response.status, 200);

    let body = response.json::<Value>();
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    for key in ["id", "task", "completed", "createdAt"] {
        expect!(items[0].get(key)).to_be_some();
    }
    assert_eq!(items[0]["id"], json!(second.id));
    assert_eq!(items[0]["task"], json!("Second todo"));
    assert_eq!(items[1]["id"], json!(first.id));

    let decoded: Vec<Todo> = response.json();
    assert_eq!(decoded, vec![second, first]);
}

#[tokio::test]
async fn unknown_routes_are_404() {
    let app = app().await;

    let missing = app.client.get("/missing").await;
    assert_eq!(missing.status, 404);
    assert_eq!(missing.text(), "404 Not Found");

    let wrong_method = app.client.get("/todos").await;
    assert_eq!(wrong_method.status, 404);
}

#[tokio::test]
async fn sql_store_serves_the_same_routes() {
    let db = TestDatabase::fresh::<Migrator>().await.unwrap();
    let todos = store::connect(StoreDriver::Sql, db.connection());
    let client = TestClient::new(routes::build(todos.clone()));

    client.post_form("/todos", &[("task", "via sql")]).await;
    let created = todos.list().await.unwrap().remove(0);
    client
        .post(&format!("/todos/{}/complete", created.id))
        .await;

    let body: Vec<Todo> = client.get("/api/todos").await.json();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0].task, "via sql");
    expect!(body[0].completed).to_be_true();
}

/// Store whose every operation fails
struct FailingStore;

fn unavailable() -> FrameworkError {
    FrameworkError::database("connection refused")
}

#[async_trait]
impl TodoStore for FailingStore {
    async fn create(&self, _raw_task: &str) -> Result<Option<Todo>, FrameworkError> {
        Err(unavailable())
    }

    async fn list(&self) -> Result<Vec<Todo>, FrameworkError> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: i32) -> Result<Option<Todo>, FrameworkError> {
        Err(unavailable())
    }

    async fn toggle_completion(&self, _id: i32) -> Result<Option<Todo>, FrameworkError> {
        Err(unavailable())
    }

    async fn update_task(&self, _id: i32, _raw_task: &str) -> Result<Option<Todo>, FrameworkError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: i32) -> Result<bool, FrameworkError> {
        Err(unavailable())
    }
}

#[tokio::test]
async fn store_failures_degrade_gracefully() {
    let client = TestClient::new(routes::build(Arc::new(FailingStore)));

    let index = client.get("/").await;
    assert_eq!(index.status, 200);
    expect!(index.text()).to_contain("Failed to load todos");
    expect!(index.text()).to_contain("No todos yet");

    let api = client.get("/api/todos").await;
    assert_eq!(api.status, 500);
    assert_eq!(api.json::<Value>(), json!({ "error": "Failed to fetch todos" }));

    for uri in ["/todos", "/todos/1/complete", "/todos/1/update", "/todos/1/delete"] {
        let response = client.post_form(uri, &[("task", "anything")]).await;
        assert_eq!(response.status, 302, "{}", uri);
        assert_eq!(response.location(), Some("/"), "{}", uri);
    }

    let health = client.get("/health").await;
    assert_eq!(health.status, 200);
}
