//! Data backup snapshot and the change report of a merge import.
//!
//! Unlike [`super::ThemeExportBundle`], every collection of a snapshot is
//! optional: an import only touches what the file carries.

use super::{Category, Collection, GiftBox, HeroSlide, Product, SiteSettings, Testimonial};
use serde::{Deserialize, Serialize};

/// Format identifier written into every data export.
pub const DATA_EXPORT_VERSION: &str = "1.0";

/// Backup of the whole store, as downloaded from `GET /api/export-data`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataSnapshot {
    /// RFC 3339 capture time
    pub export_date: String,
    /// Snapshot format identifier
    pub version: String,
    /// Categories in store order
    pub categories: Vec<Category>,
    /// Products in store order
    pub products: Vec<Product>,
    /// Hero slides in store order
    pub hero_slides: Vec<HeroSlide>,
    /// Testimonials in store order
    pub testimonials: Vec<Testimonial>,
    /// Gift boxes in store order
    pub gift_boxes: Vec<GiftBox>,
    /// The settings document; `null` before seeding
    pub site_settings: Option<SiteSettings>,
}

/// Records added and updated in one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollectionChanges {
    /// Records that did not exist before
    pub added: u64,
    /// Existing records that were overwritten
    pub updated: u64,
}

impl CollectionChanges {
    /// Counts one record as added or updated.
    pub fn record(&mut self, added: bool) {
        if added {
            self.added += 1;
        } else {
            self.updated += 1;
        }
    }
}

/// Whether the settings document was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SettingsChanges {
    /// True if the file carried settings
    pub updated: bool,
}

/// Per-collection outcome of `POST /api/import-data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportChanges {
    /// Category changes
    pub categories: CollectionChanges,
    /// Product changes
    pub products: CollectionChanges,
    /// Hero slide changes
    pub hero_slides: CollectionChanges,
    /// Testimonial changes
    pub testimonials: CollectionChanges,
    /// Gift box changes
    pub gift_boxes: CollectionChanges,
    /// Settings change
    pub site_settings: SettingsChanges,
}

impl ImportChanges {
    /// Mutable counters for `collection`.
    pub fn collection_mut(&mut self, collection: Collection) -> &mut CollectionChanges {
        match collection {
            Collection::Categories => &mut self.categories,
            Collection::Products => &mut self.products,
            Collection::HeroSlides => &mut self.hero_slides,
            Collection::Testimonials => &mut self.testimonials,
            Collection::GiftBoxes => &mut self.gift_boxes,
        }
    }

    /// Total records added across collections.
    #[must_use]
    pub const fn total_added(&self) -> u64 {
        self.categories.added
            + self.products.added
            + self.hero_slides.added
            + self.testimonials.added
            + self.gift_boxes.added
    }

    /// Total records updated across collections.
    #[must_use]
    pub const fn total_updated(&self) -> u64 {
        self.categories.updated
            + self.products.updated
            + self.hero_slides.updated
            + self.testimonials.updated
            + self.gift_boxes.updated
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_collections_default_to_empty() {
        let snapshot: DataSnapshot =
            serde_json::from_value(json!({"version": "1.0", "categories": []})).unwrap();
        assert!(snapshot.products.is_empty());
        assert!(snapshot.site_settings.is_none());
    }

    #[test]
    fn test_changes_serialize_with_client_keys() {
        let mut changes = ImportChanges::default();
        changes.collection_mut(Collection::GiftBoxes).record(true);
        changes.collection_mut(Collection::GiftBoxes).record(false);
        changes.site_settings.updated = true;

        let value = serde_json::to_value(changes).unwrap();
        assert_eq!(value["giftBoxes"], json!({"added": 1, "updated": 1}));
        assert_eq!(value["heroSlides"], json!({"added": 0, "updated": 0}));
        assert_eq!(value["siteSettings"], json!({"updated": true}));
        assert_eq!(changes.total_added(), 1);
        assert_eq!(changes.total_updated(), 1);
    }
}
