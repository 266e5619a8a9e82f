//! API index endpoint.

use axum::Json;
use serde_json::{json, Value};

/// GET /api/1.0/ - Discovery stub.
pub async fn api_index() -> Json<Value> {
    Json(json!({}))
}
