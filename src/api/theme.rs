//! Theme export download and import upload.

use super::AppState;
use crate::{
    core::theme::{self, ImportSummary},
    errors::Result,
    models::ThemeExportBundle,
};
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::header,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct ExportParams {
    name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    success: bool,
    message: String,
    imported: ImportSummary,
}

/// Lowercase ASCII alphanumerics joined by single dashes.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("theme");
    }
    slug
}

fn attachment_filename(bundle: &ThemeExportBundle) -> String {
    let date = chrono::DateTime::parse_from_rfc3339(&bundle.export_date)
        .map_or_else(|_| chrono::Utc::now().format("%Y%m%d").to_string(), |d| {
            d.format("%Y%m%d").to_string()
        });
    format!("{}-{date}.json", slugify(&bundle.theme_name))
}

pub async fn export_handler(
    State(state): State<AppState>,
    Query(params): Query<ExportParams>,
) -> Result<Response> {
    let bundle = theme::export_bundle(&state.db, params.name.as_deref()).await?;
    let disposition = format!("attachment; filename=\"{}\"", attachment_filename(&bundle));
    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(bundle)).into_response())
}

pub async fn import_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<ImportResponse>> {
    let Json(body) = payload?;
    let bundle = theme::parse_bundle(body)?;
    let imported = theme::import_bundle(&state.db, &bundle).await?;
    let message = if bundle.theme_name.is_empty() {
        "Theme imported successfully".to_string()
    } else {
        format!("Theme '{}' imported successfully", bundle.theme_name)
    };
    Ok(Json(ImportResponse {
        success: true,
        message,
        imported,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("DryFruto Theme"), "dryfruto-theme");
        assert_eq!(slugify("  Autumn / Harvest!! "), "autumn-harvest");
        assert_eq!(slugify("***"), "theme");
    }

    #[test]
    fn test_attachment_filename_uses_export_date() {
        let bundle = ThemeExportBundle {
            export_version: "1.0".to_string(),
            export_date: "2025-03-07T10:00:00+00:00".to_string(),
            theme_name: "Spring Sale".to_string(),
            site_settings: crate::models::SiteSettings::default(),
            categories: Vec::new(),
            products: Vec::new(),
            hero_slides: Vec::new(),
            testimonials: Vec::new(),
            gift_boxes: Vec::new(),
        };
        assert_eq!(attachment_filename(&bundle), "spring-sale-20250307.json");
    }
}
