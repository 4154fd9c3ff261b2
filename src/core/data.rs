//! Data backup and merge import.
//!
//! Export snapshots the settings document and every catalog collection in one
//! read transaction. Import merges a snapshot into the store: records are
//! matched by id, existing ones are overwritten in place and new ones are
//! appended. The whole import is one transaction. Both record an entry in the
//! change history.

use crate::{
    core::{catalog, history, settings},
    errors::{Error, Result},
    models::{
        CatalogItem, Collection, DATA_EXPORT_VERSION, DataSnapshot, HistoryAction, ImportChanges,
    },
};
use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde_json::{Value, json};
use tracing::{info, instrument, warn};

/// A snapshot together with the file name it is offered under.
#[derive(Debug, Clone, PartialEq)]
pub struct DataExport {
    /// `dryfruto_data_<YYYY-MM-DD>.json`
    pub filename: String,
    /// The exported data
    pub snapshot: DataSnapshot,
}

/// Download name for a snapshot taken at `date`.
#[must_use]
pub fn export_filename(date: DateTime<Utc>) -> String {
    format!("dryfruto_data_{}.json", date.format("%Y-%m-%d"))
}

fn snapshot_counts(snapshot: &DataSnapshot) -> Value {
    json!({
        "categories": snapshot.categories.len(),
        "products": snapshot.products.len(),
        "heroSlides": snapshot.hero_slides.len(),
        "testimonials": snapshot.testimonials.len(),
        "giftBoxes": snapshot.gift_boxes.len(),
        "siteSettings": u8::from(snapshot.site_settings.is_some()),
    })
}

/// Snapshots the whole store and records an `export` history entry.
#[instrument(skip(db))]
pub async fn export_data(db: &DatabaseConnection) -> Result<DataExport> {
    let now = Utc::now();
    let txn = db.begin().await?;
    let snapshot = DataSnapshot {
        export_date: now.to_rfc3339(),
        version: DATA_EXPORT_VERSION.to_string(),
        categories: catalog::list(&txn).await?,
        products: catalog::list(&txn).await?,
        hero_slides: catalog::list(&txn).await?,
        testimonials: catalog::list(&txn).await?,
        gift_boxes: catalog::list(&txn).await?,
        site_settings: settings::find_settings(&txn).await?,
    };
    let filename = export_filename(now);
    history::record(
        &txn,
        HistoryAction::Export,
        Some(filename.clone()),
        snapshot_counts(&snapshot),
    )
    .await?;
    txn.commit().await?;

    info!("Exported data as {}", filename);
    Ok(DataExport { filename, snapshot })
}

fn assign_missing_ids<T: CatalogItem>(records: &mut [T]) {
    for record in records.iter_mut().filter(|r| r.id().trim().is_empty()) {
        record.set_id(uuid::Uuid::new_v4().to_string());
    }
}

/// Parses an uploaded data file.
///
/// Every collection is optional; a `null` value counts as absent. Records
/// without an id receive a fresh one.
///
/// # Errors
/// Returns `Error::Validation` if the file is not a JSON object, a collection
/// is not an array, a record fails to parse, or ids or slugs repeat.
pub fn parse_data_file(bytes: &[u8]) -> Result<DataSnapshot> {
    let body: Value = serde_json::from_slice(bytes)
        .map_err(|e| Error::validation(format!("Data file is not valid JSON: {e}")))?;
    let Value::Object(mut object) = body else {
        return Err(Error::validation("Data file must be a JSON object"));
    };
    object.retain(|_, value| !value.is_null());

    for collection in Collection::ALL {
        if object
            .get(collection.as_str())
            .is_some_and(|value| !value.is_array())
        {
            return Err(Error::validation(format!("{collection} must be an array")));
        }
    }
    if object
        .get("siteSettings")
        .is_some_and(|value| !value.is_object())
    {
        return Err(Error::validation("siteSettings must be an object"));
    }

    let mut snapshot: DataSnapshot = serde_json::from_value(Value::Object(object))
        .map_err(|e| Error::validation(format!("Invalid data file: {e}")))?;
    if !snapshot.version.is_empty() && snapshot.version != DATA_EXPORT_VERSION {
        warn!(
            "Importing data file with version {} (current {})",
            snapshot.version, DATA_EXPORT_VERSION
        );
    }

    assign_missing_ids(&mut snapshot.categories);
    assign_missing_ids(&mut snapshot.products);
    assign_missing_ids(&mut snapshot.hero_slides);
    assign_missing_ids(&mut snapshot.testimonials);
    assign_missing_ids(&mut snapshot.gift_boxes);

    catalog::validate_batch(&snapshot.categories)?;
    catalog::validate_batch(&snapshot.products)?;
    catalog::validate_batch(&snapshot.hero_slides)?;
    catalog::validate_batch(&snapshot.testimonials)?;
    catalog::validate_batch(&snapshot.gift_boxes)?;
    Ok(snapshot)
}

async fn merge_collection<T: CatalogItem, C: ConnectionTrait>(
    conn: &C,
    records: &[T],
    changes: &mut ImportChanges,
) -> Result<()> {
    let counter = changes.collection_mut(T::COLLECTION);
    for record in records {
        let added = catalog::upsert(conn, record).await?;
        counter.record(added);
    }
    Ok(())
}

/// Merges `snapshot` into the store and records an `import` history entry.
///
/// # Errors
/// Returns `Error::Conflict` if an incoming slug belongs to a different stored
/// record, or `Error::Database` on storage failure. Nothing is written in
/// either case.
#[instrument(skip(db, snapshot))]
pub async fn import_data(
    db: &DatabaseConnection,
    snapshot: DataSnapshot,
    filename: Option<String>,
) -> Result<ImportChanges> {
    let mut changes = ImportChanges::default();
    let txn = db.begin().await?;

    if let Some(site_settings) = snapshot.site_settings {
        settings::merge_or_insert(&txn, site_settings).await?;
        changes.site_settings.updated = true;
    }
    merge_collection(&txn, &snapshot.categories, &mut changes).await?;
    merge_collection(&txn, &snapshot.products, &mut changes).await?;
    merge_collection(&txn, &snapshot.hero_slides, &mut changes).await?;
    merge_collection(&txn, &snapshot.testimonials, &mut changes).await?;
    merge_collection(&txn, &snapshot.gift_boxes, &mut changes).await?;

    history::record(
        &txn,
        HistoryAction::Import,
        filename,
        serde_json::to_value(changes)?,
    )
    .await?;
    txn.commit().await?;

    info!(
        "Imported data: {} added, {} updated",
        changes.total_added(),
        changes.total_updated()
    );
    Ok(changes)
}
