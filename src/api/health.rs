//! Root identity message and the storage health check.

use super::AppState;
use crate::core::health::{StorageStatus, check_storage};
use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: StorageStatus,
}

/// Fixed identity message so clients can tell the API is up.
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "DryFruto API" }))
}

pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = check_storage(&state.db).await;
    if database.is_connected() {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                database,
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unhealthy",
                database,
            }),
        )
    }
}
