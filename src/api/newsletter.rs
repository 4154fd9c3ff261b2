//! Newsletter signup handlers.

use super::AppState;
use crate::{
    core::newsletter,
    errors::Result,
    models::{SubscribeRequest, Subscriber},
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

pub async fn subscribe_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SubscribeRequest>, JsonRejection>,
) -> Result<Json<Subscriber>> {
    let Json(request) = payload?;
    Ok(Json(newsletter::subscribe(&state.db, &request.email).await?))
}

pub async fn list_handler(State(state): State<AppState>) -> Result<Json<Vec<Subscriber>>> {
    Ok(Json(newsletter::list_subscribers(&state.db).await?))
}
