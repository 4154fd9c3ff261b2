//! REST handlers for the catalog collections.
//!
//! The handlers are generic over [`CatalogItem`]; [`super::router`] registers
//! one instantiation per collection.

use super::AppState;
use crate::{
    core::catalog,
    errors::Result,
    models::{CatalogItem, Product},
};
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Default, Deserialize)]
pub struct ProductFilter {
    category: Option<String>,
}

pub async fn list_handler<T: CatalogItem>(State(state): State<AppState>) -> Result<Json<Vec<T>>> {
    Ok(Json(catalog::list(&state.db).await?))
}

pub async fn list_products_handler(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>> {
    let products = match filter.category.as_deref().filter(|c| !c.is_empty()) {
        Some(category) => catalog::list_products_in_category(&state.db, category).await?,
        None => catalog::list(&state.db).await?,
    };
    Ok(Json(products))
}

pub async fn get_handler<T: CatalogItem>(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<T>> {
    Ok(Json(catalog::get(&state.db, &key).await?))
}

pub async fn create_handler<T: CatalogItem>(
    State(state): State<AppState>,
    payload: std::result::Result<Json<T>, JsonRejection>,
) -> Result<Json<T>> {
    let Json(record) = payload?;
    Ok(Json(catalog::create(&state.db, record).await?))
}

pub async fn update_handler<T: CatalogItem>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<T>, JsonRejection>,
) -> Result<Json<T>> {
    let Json(record) = payload?;
    Ok(Json(catalog::update(&state.db, &id, record).await?))
}

pub async fn delete_handler<T: CatalogItem>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    catalog::delete::<T>(&state.db, &id).await?;
    Ok(Json(json!({ "message": format!("{} record {id} deleted", T::COLLECTION) })))
}

/// List/create on `path`, get/update/delete on `path/:key`.
pub fn routes<T: CatalogItem>(path: &str) -> Router<AppState> {
    Router::new()
        .route(path, get(list_handler::<T>).post(create_handler::<T>))
        .merge(item_routes::<T>(path))
}

/// Same as [`routes`] but the list accepts `?category=<slug>`.
pub fn product_routes(path: &str) -> Router<AppState> {
    Router::new()
        .route(
            path,
            get(list_products_handler).post(create_handler::<Product>),
        )
        .merge(item_routes::<Product>(path))
}

fn item_routes<T: CatalogItem>(path: &str) -> Router<AppState> {
    Router::new().route(
        &format!("{path}/:key"),
        get(get_handler::<T>)
            .put(update_handler::<T>)
            .delete(delete_handler::<T>),
    )
}
