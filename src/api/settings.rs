//! Site-settings read and merge-patch handlers.

use super::AppState;
use crate::{core::settings, errors::Result, models::SiteSettings};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;

pub async fn get_handler(State(state): State<AppState>) -> Result<Json<SiteSettings>> {
    Ok(Json(settings::get_settings(&state.db).await?))
}

/// Takes the raw body so malformed patches become validation errors.
pub async fn put_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<SiteSettings>> {
    let Json(body) = payload?;
    let patch = settings::parse_patch(body)?;
    Ok(Json(settings::update_settings(&state.db, patch).await?))
}
