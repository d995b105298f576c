use axum::Json;
use serde_json::{Value, json};

/// Handler for `GET /ping`: liveness check with a static payload.
pub async fn ping() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}
