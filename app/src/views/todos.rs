//! Task list page

use crate::models::Todo;
use framework::FrameworkError;
use serde::Serialize;
use std::sync::LazyLock;
use tera::{Context, Tera};

const INDEX: &str = "todos/index.html";

/// Templates are embedded at compile time; `.html` names are autoescaped
static TEMPLATES: LazyLock<Result<Tera, tera::Error>> = LazyLock::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_template(INDEX, include_str!("../../templates/todos/index.html"))?;
    Ok(tera)
});

#[derive(Serialize)]
struct Row<'a> {
    id: i32,
    task: &'a str,
    completed: bool,
    created_at: String,
    created_label: String,
}

impl<'a> From<&'a Todo> for Row<'a> {
    fn from(todo: &'a Todo) -> Self {
        Self {
            id: todo.id,
            task: &todo.task,
            completed: todo.completed,
            created_at: todo.created_at.to_rfc3339(),
            created_label: todo.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

fn render(name: &str, context: &Context) -> Result<String, FrameworkError> {
    let tera = TEMPLATES
        .as_ref()
        .map_err(|e| FrameworkError::internal(format!("Failed to load templates: {}", e)))?;

    tera.render(name, context)
        .map_err(|e| FrameworkError::internal(format!("Failed to render {}: {}", name, e)))
}

/// Render the full task list document
///
/// `error` is shown as a banner above the list.
pub fn index(todos: &[Todo], error: Option<&str>) -> Result<String, FrameworkError> {
    let rows: Vec<Row<'_>> = todos.iter().map(Row::from).collect();

    let mut context = Context::new();
    context.insert("todos", &rows);
    context.insert("error", &error);

    render(INDEX, &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use framework::expect;

    fn todo(id: i32, task: &str, completed: bool) -> Todo {
        Todo {
            id,
            task: task.to_string(),
            completed,
            created_at: Utc.with_ymd_and_hms(2024, 5, 4, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_state() {
        let html = index(&[], None).unwrap();
        expect!(html.clone()).to_contain("No todos yet");
        expect!(html.clone()).to_contain("action=\"/todos\"");
        expect!(html).to_not_contain("class=\"error\"");
    }

    #[test]
    fn test_items_have_controls() {
        let html = index(&[todo(3, "Water plants", false), todo(1, "Done", true)], None).unwrap();

        expect!(html.clone()).to_contain("Water plants");
        expect!(html.clone()).to_contain("action=\"/todos/3/complete\"");
        expect!(html.clone()).to_contain("action=\"/todos/3/update\"");
        expect!(html.clone()).to_contain("action=\"/todos/3/delete\"");
        expect!(html.clone()).to_contain("<li class=\"completed\" data-id=\"1\">");
        expect!(html.clone()).to_contain("<time datetime=\"2024-05-04T12:00:00+00:00\">2024-05-04 12:00</time>");
        expect!(html).to_not_contain("No todos yet");
    }

    #[test]
    fn test_task_text_is_escaped() {
        let html = index(&[todo(1, "<script>alert('x')</script> & \"more\"", false)], None).unwrap();

        expect!(html.clone()).to_not_contain("<script>");
        expect!(html.clone())
            .to_contain("&lt;script&gt;alert(&#x27;x&#x27;)&lt;&#x2F;script&gt; &amp; &quot;more&quot;");
        expect!(html).to_contain("value=\"&lt;script&gt;");
    }

    #[test]
    fn test_error_banner() {
        let html = index(&[], Some("Failed to load <todos>")).unwrap();
        expect!(html).to_contain("<p class=\"error\" role=\"alert\">Failed to load &lt;todos&gt;</p>");
    }
}
