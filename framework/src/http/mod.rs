mod body;
mod request;
mod response;

pub use body::{collect_body, parse_form, parse_json};
pub use request::Request;
pub use response::{HttpResponse, Redirect, RedirectRouteBuilder, Response, ResponseExt};

/// Create a text response
pub fn text(body: impl Into<String>) -> Response {
    Ok(HttpResponse::text(body))
}

/// Create a JSON response from a serde_json::Value
pub fn json(body: serde_json::Value) -> Response {
    Ok(HttpResponse::json(body))
}

/// Create an HTML response
pub fn html(body: impl Into<String>) -> Response {
    Ok(HttpResponse::html(body))
}

/// Build a JSON `Response` inline with `serde_json::json!` syntax
///
/// ```rust,ignore
/// pub async fn show(_req: Request) -> Response {
///     json_response!({ "status": "ok" })
/// }
/// ```
#[macro_export]
macro_rules! json_response {
    ($($json:tt)+) => {
        $crate::http::json($crate::serde_json::json!($($json)+))
    };
}
