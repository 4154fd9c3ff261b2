//! Seed dataset loading from TOML.
//!
//! The default dataset is compiled into the binary; `SEED_DATA_PATH` can point
//! at a replacement file with the same layout.

use crate::config::AppConfig;
use crate::errors::{Error, Result};
use crate::models::{Category, GiftBox, HeroSlide, Product, SiteSettings, Testimonial};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_SEED_DATA: &str = include_str!("../../seed/seed_data.toml");

/// Structure of a seed file: the settings document plus every catalog collection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedDataset {
    /// Initial site settings
    pub site_settings: SiteSettings,
    /// Initial categories
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Initial products
    #[serde(default)]
    pub products: Vec<Product>,
    /// Initial hero slides
    #[serde(default)]
    pub hero_slides: Vec<HeroSlide>,
    /// Initial testimonials
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    /// Initial gift boxes
    #[serde(default)]
    pub gift_boxes: Vec<GiftBox>,
}

/// Parses a seed dataset from TOML text.
///
/// # Errors
/// Returns `Error::Config` if the TOML is invalid or required fields are missing.
pub fn parse_dataset(contents: &str) -> Result<SeedDataset> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse seed data: {e}"),
    })
}

/// The dataset shipped with the binary.
pub fn default_dataset() -> Result<SeedDataset> {
    parse_dataset(DEFAULT_SEED_DATA)
}

/// Loads a seed dataset from a TOML file.
///
/// # Errors
/// Returns `Error::Config` if the file cannot be read or parsed.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<SeedDataset> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading seed data from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read seed data file {}: {e}", path_ref.display()),
    })?;
    parse_dataset(&contents)
}

/// Loads the dataset named by the configuration, or the built-in one.
pub fn configured_dataset(config: &AppConfig) -> Result<SeedDataset> {
    config
        .seed_data_path
        .as_ref()
        .map_or_else(default_dataset, load_dataset)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_default_dataset_cardinality() {
        let dataset = default_dataset().unwrap();
        assert_eq!(dataset.categories.len(), 6);
        assert_eq!(dataset.products.len(), 12);
        assert_eq!(dataset.hero_slides.len(), 3);
        assert_eq!(dataset.testimonials.len(), 6);
        assert_eq!(dataset.gift_boxes.len(), 6);
        assert_eq!(
            dataset.site_settings.business_name.as_deref(),
            Some("DryFruto")
        );
        assert_eq!(
            dataset
                .site_settings
                .bulk_order_product_types
                .as_ref()
                .map(Vec::len),
            Some(6)
        );
    }

    #[test]
    fn test_default_dataset_ids_and_slugs_are_unique() {
        let dataset = default_dataset().unwrap();
        let mut ids: Vec<_> = dataset.products.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 12);

        let mut slugs: Vec<_> = dataset.categories.iter().map(|c| c.slug.as_str()).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), 6);
    }

    #[test]
    fn test_parse_minimal_dataset() {
        let dataset = parse_dataset(
            r#"
            [siteSettings]
            businessName = "Test Shop"

            [[giftBoxes]]
            id = "gift-1"
            name = "Hamper"
            price = 999.0
            "#,
        )
        .unwrap();
        assert!(dataset.categories.is_empty());
        assert_eq!(dataset.gift_boxes.len(), 1);
        assert_eq!(dataset.gift_boxes[0].name, "Hamper");
    }

    #[test]
    fn test_parse_invalid_dataset() {
        let result = parse_dataset("[[categories]]\nid = 12");
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_dataset("does/not/exist.toml");
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }
}
