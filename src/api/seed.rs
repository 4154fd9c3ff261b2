//! `POST /api/seed-data`: backfill the bundled dataset.

use super::AppState;
use crate::{
    core::seed::{self, SeedReport},
    errors::Result,
};
use axum::{Json, extract::State};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    message: &'static str,
    #[serde(flatten)]
    report: SeedReport,
}

pub async fn seed_handler(State(state): State<AppState>) -> Result<Json<SeedResponse>> {
    let report = seed::seed(&state.db, &state.seed_data).await?;
    let message = if report.already_seeded {
        "Data already seeded"
    } else {
        "Data seeded successfully"
    };
    Ok(Json(SeedResponse { message, report }))
}
