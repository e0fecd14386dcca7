use framework::{json_response, Request, Response};

/// Liveness probe; never touches the database
pub async fn show(_req: Request) -> Response {
    json_response!({ "status": "ok" })
}
