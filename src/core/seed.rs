//! Seed loader - backfills empty collections from the fixed dataset.
//!
//! Each collection is checked on its own: a non-empty collection is left alone,
//! an empty one receives the dataset records. Inserts skip ids that already
//! exist, so two loaders racing on the same empty collection cannot create
//! duplicates.

use crate::{
    config::seed::SeedDataset,
    core::{catalog, history, settings},
    errors::Result,
    models::{CatalogItem, Collection, HistoryAction},
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Record totals per governed collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedCounts {
    /// Categories stored
    pub categories: u64,
    /// Products stored
    pub products: u64,
    /// Hero slides stored
    pub hero_slides: u64,
    /// Testimonials stored
    pub testimonials: u64,
    /// Gift boxes stored
    pub gift_boxes: u64,
    /// 1 once the settings document exists
    pub site_settings: u64,
}

impl SeedCounts {
    fn get(&self, collection: Collection) -> u64 {
        match collection {
            Collection::Categories => self.categories,
            Collection::Products => self.products,
            Collection::HeroSlides => self.hero_slides,
            Collection::Testimonials => self.testimonials,
            Collection::GiftBoxes => self.gift_boxes,
        }
    }

    /// True when every governed collection holds at least one record.
    #[must_use]
    pub fn all_populated(&self) -> bool {
        self.site_settings > 0 && Collection::ALL.iter().all(|c| self.get(*c) > 0)
    }
}

/// Outcome of a seed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    /// True when nothing needed seeding
    pub already_seeded: bool,
    /// Collections that were empty and received the dataset
    pub seeded: Vec<String>,
    /// Record totals after the run
    #[serde(flatten)]
    pub counts: SeedCounts,
}

/// Current record totals for every governed collection.
pub async fn current_counts(db: &DatabaseConnection) -> Result<SeedCounts> {
    Ok(SeedCounts {
        categories: catalog::count(db, Collection::Categories).await?,
        products: catalog::count(db, Collection::Products).await?,
        hero_slides: catalog::count(db, Collection::HeroSlides).await?,
        testimonials: catalog::count(db, Collection::Testimonials).await?,
        gift_boxes: catalog::count(db, Collection::GiftBoxes).await?,
        site_settings: u64::from(settings::settings_exist(db).await?),
    })
}

async fn backfill<T: CatalogItem>(
    db: &DatabaseConnection,
    before: &SeedCounts,
    records: &[T],
    seeded: &mut Vec<String>,
) -> Result<()> {
    if before.get(T::COLLECTION) > 0 {
        debug!("{} already populated, skipping", T::COLLECTION);
        return Ok(());
    }
    let inserted = catalog::insert_missing(db, records).await?;
    info!("Seeded {} {} records", inserted, T::COLLECTION);
    seeded.push(T::COLLECTION.to_string());
    Ok(())
}

/// Inserts the dataset into every collection that is currently empty.
///
/// # Errors
/// Returns `Error::Database` if the storage backend fails; collections seeded
/// before the failure stay seeded and a retry backfills the rest.
#[instrument(skip(db, dataset))]
pub async fn seed(db: &DatabaseConnection, dataset: &SeedDataset) -> Result<SeedReport> {
    let before = current_counts(db).await?;
    if before.all_populated() {
        info!("Database already seeded");
        return Ok(SeedReport {
            already_seeded: true,
            seeded: Vec::new(),
            counts: before,
        });
    }

    let mut seeded = Vec::new();
    backfill(db, &before, &dataset.categories, &mut seeded).await?;
    backfill(db, &before, &dataset.products, &mut seeded).await?;
    backfill(db, &before, &dataset.hero_slides, &mut seeded).await?;
    backfill(db, &before, &dataset.testimonials, &mut seeded).await?;
    backfill(db, &before, &dataset.gift_boxes, &mut seeded).await?;

    if before.site_settings == 0 {
        settings::insert_if_absent(db, &dataset.site_settings).await?;
        seeded.push("siteSettings".to_string());
    }

    let counts = current_counts(db).await?;
    if !seeded.is_empty() {
        history::record(db, HistoryAction::Seed, None, serde_json::to_value(counts)?).await?;
    }
    info!("Seeding finished: {:?}", seeded);
    Ok(SeedReport {
        already_seeded: false,
        seeded,
        counts,
    })
}
