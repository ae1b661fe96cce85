//! Liveness check.

use axum::Json;
use serde_json::{Value, json};

/// Returns `{ "ok": true }` while the process is serving. Upstreams are not
/// contacted.
pub async fn healthz() -> Json<Value> {
    Json(json!({ "ok": true }))
}
