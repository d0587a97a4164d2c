//! Liveness probe — `GET /health`.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// `GET /health`
///
/// Always `{"status":"ok"}` once the router is serving. Does not touch storage.
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}
