use framework::{get, group, post, routes, DbConnection, FrameworkError, Router};

use crate::controllers;
use crate::store::{self, Todos};

routes! {
    get!("/", controllers::todo::index).name("todos.index"),
    get!("/health", controllers::health::show).name("health"),
    get!("/api/todos", controllers::todo::api_index).name("api.todos.index"),

    group!("/todos", {
        post!("/", controllers::todo::store).name("todos.store"),
        post!("/{id}/complete", controllers::todo::complete).name("todos.complete"),
        post!("/{id}/update", controllers::todo::update).name("todos.update"),
        post!("/{id}/delete", controllers::todo::destroy).name("todos.destroy"),
    }),
}

/// All routes with `todos` mounted as request state
pub fn build(todos: Todos) -> Router {
    register().state(todos)
}

/// Router over the store selected by `TODO_STORE`
pub fn from_config(db: DbConnection) -> Result<Router, FrameworkError> {
    Ok(build(store::from_config(db)))
}
