//! HTTP surface: the axum router, its shared state and the middleware stack.

use crate::{
    config::{AppConfig, seed::SeedDataset},
    errors::{Error, Result},
    models::{Category, GiftBox, HeroSlide, Testimonial},
};
use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, post},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

mod catalog;
mod data;
pub mod error;
mod health;
mod newsletter;
mod seed;
mod settings;
mod theme;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Store handle
    pub db: DatabaseConnection,
    /// Dataset used by `POST /api/seed-data`
    pub seed_data: Arc<SeedDataset>,
}

impl AppState {
    /// Bundles a connection and a seed dataset.
    #[must_use]
    pub fn new(db: DatabaseConnection, seed_data: SeedDataset) -> Self {
        Self {
            db,
            seed_data: Arc::new(seed_data),
        }
    }
}

/// All routes under `/api`, without middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api", get(health::root_handler))
        .route("/api/", get(health::root_handler))
        .route("/api/health", get(health::health_handler))
        .merge(catalog::routes::<Category>("/api/categories"))
        .merge(catalog::product_routes("/api/products"))
        .merge(catalog::routes::<HeroSlide>("/api/hero-slides"))
        .merge(catalog::routes::<Testimonial>("/api/testimonials"))
        .merge(catalog::routes::<GiftBox>("/api/gift-boxes"))
        .route(
            "/api/site-settings",
            get(settings::get_handler).put(settings::put_handler),
        )
        .route("/api/seed-data", post(seed::seed_handler))
        .route("/api/export-theme", get(theme::export_handler))
        .route("/api/import-theme", post(theme::import_handler))
        .route("/api/export-data", get(data::export_handler))
        .route("/api/import-data", post(data::import_handler))
        .route(
            "/api/data-history",
            get(data::history_handler).delete(data::clear_history_handler),
        )
        .route("/api/data-history/:id", delete(data::delete_history_handler))
        .route(
            "/api/newsletter",
            get(newsletter::list_handler).post(newsletter::subscribe_handler),
        )
        .with_state(state)
}

/// Builds the CORS layer from the configured origins.
///
/// # Errors
/// Returns `Error::Config` if an origin is not a valid header value.
pub fn cors_layer(config: &AppConfig) -> Result<CorsLayer> {
    let origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|e| Error::Config {
                    message: format!("Invalid CORS origin '{origin}': {e}"),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

/// The router with CORS and request tracing applied.
pub fn service(state: AppState, config: &AppConfig) -> Result<Router> {
    Ok(router(state)
        .layer(cors_layer(config)?)
        .layer(TraceLayer::new_for_http()))
}
