// ============================
// accounts-backend/src/handlers/mod.rs
// ============================
//! HTTP handlers. Each one validates its payload, calls a service and
//! maps the outcome onto a status code and body.

pub mod groups;
pub mod sessions;
pub mod users;

use axum::Json;
use serde_json::{json, Value};

/// Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
