//! Theme export bundle - a portable snapshot of the settings and the whole catalog.

use super::{Category, GiftBox, HeroSlide, Product, SiteSettings, Testimonial};
use serde::{Deserialize, Serialize};

/// Format identifier written into every export.
pub const EXPORT_VERSION: &str = "1.0";

/// Full-state snapshot used for theme export and import. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeExportBundle {
    /// Bundle format identifier
    pub export_version: String,
    /// RFC 3339 capture time; optional on import
    #[serde(default)]
    pub export_date: String,
    /// Label of the exported theme; optional on import
    #[serde(default)]
    pub theme_name: String,
    /// The site-settings document
    pub site_settings: SiteSettings,
    /// All categories in store order
    pub categories: Vec<Category>,
    /// All products in store order
    pub products: Vec<Product>,
    /// All hero slides in store order
    pub hero_slides: Vec<HeroSlide>,
    /// All testimonials in store order
    pub testimonials: Vec<Testimonial>,
    /// All gift boxes in store order
    pub gift_boxes: Vec<GiftBox>,
}

impl ThemeExportBundle {
    /// Top-level keys an importable bundle must carry.
    pub const REQUIRED_KEYS: [&'static str; 7] = [
        "exportVersion",
        "siteSettings",
        "categories",
        "products",
        "heroSlides",
        "testimonials",
        "giftBoxes",
    ];
}
