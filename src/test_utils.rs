//! Shared test utilities for the storefront API.
//!
//! This module provides common helper functions for setting up test databases
//! and building catalog records and settings with sensible defaults.

use crate::{
    errors::Result,
    models::{Category, GiftBox, Product, SiteSettings},
};
use sea_orm::DatabaseConnection;
use std::collections::BTreeMap;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a category; the name is derived from the slug.
pub fn test_category(id: &str, slug: &str) -> Category {
    Category {
        id: id.to_string(),
        name: format!("Category {slug}"),
        slug: slug.to_string(),
        image: format!("https://images.example.com/{slug}.jpg"),
        icon: String::new(),
    }
}

/// Builds a product in the given category.
///
/// # Defaults
/// * `base_price`: 100.0
/// * `price_variants`: 250g at 250.0 and 500g at 480.0
pub fn test_product(id: &str, slug: &str, category: &str) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {slug}"),
        slug: slug.to_string(),
        category: category.to_string(),
        product_type: "Mixed".to_string(),
        base_price: 100.0,
        sku: format!("SKU-{id}"),
        short_description: "Test product".to_string(),
        benefits: vec!["Rich in fibre".to_string()],
        price_variants: BTreeMap::from([
            ("250g".to_string(), 250.0),
            ("500g".to_string(), 480.0),
        ]),
        ..Default::default()
    }
}

/// Builds a gift box with the given price.
pub fn test_gift_box(id: &str, price: f64) -> GiftBox {
    GiftBox {
        id: id.to_string(),
        name: format!("Gift box {id}"),
        image: String::new(),
        price,
    }
}

/// A small settings document with scalars and lists populated.
pub fn test_settings() -> SiteSettings {
    SiteSettings {
        business_name: Some("Test Fruits".to_string()),
        slogan: Some("Fresh every day".to_string()),
        email: Some("hello@example.com".to_string()),
        bulk_order_product_types: Some(vec!["Almonds".to_string(), "Cashews".to_string()]),
        bulk_order_benefits: Some(vec!["Wholesale pricing".to_string()]),
        ..Default::default()
    }
}
