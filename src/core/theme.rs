//! Theme export and import.
//!
//! Export captures the settings document and every catalog collection in one
//! read transaction. Import validates the whole bundle before writing, then
//! replaces the settings and each collection one after another. Each step is
//! atomic on its own; the import as a whole is not, so a failure part-way
//! reports which steps already completed.

use crate::{
    core::{catalog, settings},
    errors::{Error, Result},
    models::{
        CatalogItem, Category, Collection, EXPORT_VERSION, GiftBox, HeroSlide, Product,
        Testimonial, ThemeExportBundle,
    },
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

/// Fallback label when neither the caller nor the settings provide one.
pub const DEFAULT_THEME_NAME: &str = "Custom Theme";

/// Number of records written per collection by a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Categories imported
    pub categories: usize,
    /// Products imported
    pub products: usize,
    /// Hero slides imported
    pub hero_slides: usize,
    /// Testimonials imported
    pub testimonials: usize,
    /// Gift boxes imported
    pub gift_boxes: usize,
}

/// Picks the export label: explicit name, then `"<businessName> Theme"`, then the default.
#[must_use]
pub fn resolve_theme_name(requested: Option<&str>, business_name: Option<&str>) -> String {
    if let Some(name) = requested.map(str::trim).filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    business_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map_or_else(|| DEFAULT_THEME_NAME.to_string(), |n| format!("{n} Theme"))
}

/// Builds a full-state snapshot of the store.
///
/// # Errors
/// Returns `Error::SettingsNotFound` if the store was never seeded.
#[instrument(skip(db))]
pub async fn export_bundle(
    db: &DatabaseConnection,
    theme_name: Option<&str>,
) -> Result<ThemeExportBundle> {
    let txn = db.begin().await?;
    let site_settings = settings::get_settings(&txn).await?;
    let categories = catalog::list(&txn).await?;
    let products = catalog::list(&txn).await?;
    let hero_slides = catalog::list(&txn).await?;
    let testimonials = catalog::list(&txn).await?;
    let gift_boxes = catalog::list(&txn).await?;
    txn.commit().await?;

    let theme_name = resolve_theme_name(theme_name, site_settings.business_name.as_deref());
    info!("Exported theme '{}'", theme_name);

    Ok(ThemeExportBundle {
        export_version: EXPORT_VERSION.to_string(),
        export_date: chrono::Utc::now().to_rfc3339(),
        theme_name,
        site_settings,
        categories,
        products,
        hero_slides,
        testimonials,
        gift_boxes,
    })
}

/// Checks the raw JSON shape of an import bundle and parses it.
///
/// # Errors
/// Returns `Error::Validation` if a required key is missing, has the wrong
/// JSON type, or any record fails to parse or repeats an id or slug.
pub fn parse_bundle(body: Value) -> Result<ThemeExportBundle> {
    let Some(object) = body.as_object() else {
        return Err(Error::validation("Import bundle must be a JSON object"));
    };

    let missing: Vec<&str> = ThemeExportBundle::REQUIRED_KEYS
        .into_iter()
        .filter(|key| !object.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(Error::validation(format!(
            "Import bundle is missing required keys: {}",
            missing.join(", ")
        )));
    }

    if !object["exportVersion"].is_string() {
        return Err(Error::validation("exportVersion must be a string"));
    }
    if !object["siteSettings"].is_object() {
        return Err(Error::validation("siteSettings must be an object"));
    }
    for collection in Collection::ALL {
        if !object[collection.as_str()].is_array() {
            return Err(Error::validation(format!("{collection} must be an array")));
        }
    }

    let bundle: ThemeExportBundle = serde_json::from_value(body)
        .map_err(|e| Error::validation(format!("Invalid import bundle: {e}")))?;

    if bundle.export_version != EXPORT_VERSION {
        warn!(
            "Importing bundle with export version {} (current {})",
            bundle.export_version, EXPORT_VERSION
        );
    }

    catalog::validate_batch(&bundle.categories)?;
    catalog::validate_batch(&bundle.products)?;
    catalog::validate_batch(&bundle.hero_slides)?;
    catalog::validate_batch(&bundle.testimonials)?;
    catalog::validate_batch(&bundle.gift_boxes)?;
    Ok(bundle)
}

/// Records a finished import step, or turns a failure into `PartialImport`
/// once earlier steps have already written.
fn checkpoint<T>(result: Result<T>, step: &str, completed: &mut Vec<String>) -> Result<T> {
    match result {
        Ok(value) => {
            completed.push(step.to_string());
            Ok(value)
        }
        Err(source) if completed.is_empty() => Err(source),
        Err(source) => Err(Error::PartialImport {
            completed: std::mem::take(completed),
            source: Box::new(source),
        }),
    }
}

async fn replace_collection<T: CatalogItem>(
    db: &DatabaseConnection,
    records: &[T],
    completed: &mut Vec<String>,
) -> Result<usize> {
    let result = catalog::replace_all(db, records).await;
    checkpoint(result, T::COLLECTION.as_str(), completed)
}

/// Overwrites the settings document and every catalog collection with the
/// bundle contents. Settings are replaced, not merged.
///
/// # Errors
/// Returns `Error::PartialImport` naming the completed steps if storage fails
/// after the first step, or the plain storage error if the first step fails.
#[instrument(skip(db, bundle), fields(theme = %bundle.theme_name))]
pub async fn import_bundle(
    db: &DatabaseConnection,
    bundle: &ThemeExportBundle,
) -> Result<ImportSummary> {
    let mut completed = Vec::new();

    let result = settings::replace_settings(db, &bundle.site_settings).await;
    checkpoint(result, "siteSettings", &mut completed)?;

    let summary = ImportSummary {
        categories: replace_collection::<Category>(db, &bundle.categories, &mut completed).await?,
        products: replace_collection::<Product>(db, &bundle.products, &mut completed).await?,
        hero_slides: replace_collection::<HeroSlide>(db, &bundle.hero_slides, &mut completed)
            .await?,
        testimonials: replace_collection::<Testimonial>(db, &bundle.testimonials, &mut completed)
            .await?,
        gift_boxes: replace_collection::<GiftBox>(db, &bundle.gift_boxes, &mut completed).await?,
    };

    info!("Theme import completed: {:?}", summary);
    Ok(summary)
}
