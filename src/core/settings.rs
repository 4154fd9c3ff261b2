//! Site settings business logic - the singleton settings document.
//!
//! The document is read and written as one row, so a merge-update is a single
//! read-modify-write inside a transaction and readers always see either the old
//! or the new document. Concurrent updates resolve as last write wins.

use crate::{
    entities::{SiteSettings as SiteSettingsEntity, site_settings},
    errors::{Error, Result},
    models::SiteSettings,
};
use sea_orm::{Set, TransactionTrait, prelude::*, sea_query::OnConflict};
use serde_json::Value;
use tracing::{info, instrument};

fn to_active_model(document: &SiteSettings) -> Result<site_settings::ActiveModel> {
    Ok(site_settings::ActiveModel {
        id: Set(site_settings::SITE_SETTINGS_KEY.to_string()),
        document: Set(serde_json::to_value(document)?),
        updated_at: Set(chrono::Utc::now().naive_utc()),
    })
}

async fn find_document<C: ConnectionTrait>(conn: &C) -> Result<Option<SiteSettings>> {
    SiteSettingsEntity::find_by_id(site_settings::SITE_SETTINGS_KEY)
        .one(conn)
        .await?
        .map(|row| serde_json::from_value(row.document).map_err(Into::into))
        .transpose()
}

async fn write_document<C: ConnectionTrait>(conn: &C, document: &SiteSettings) -> Result<()> {
    SiteSettingsEntity::insert(to_active_model(document)?)
        .on_conflict(
            OnConflict::column(site_settings::Column::Id)
                .update_columns([
                    site_settings::Column::Document,
                    site_settings::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

/// Parses a request body into a settings patch.
///
/// Unknown fields are ignored; a body that is not an object or has a
/// recognised field of the wrong type is rejected.
///
/// # Errors
/// Returns `Error::Validation` describing the first problem found.
pub fn parse_patch(body: Value) -> Result<SiteSettings> {
    if !body.is_object() {
        return Err(Error::validation("Site settings patch must be a JSON object"));
    }
    serde_json::from_value(body)
        .map_err(|e| Error::validation(format!("Invalid site settings patch: {e}")))
}

/// Returns the current settings document.
///
/// # Errors
/// Returns `Error::SettingsNotFound` if the store was never seeded.
pub async fn get_settings<C: ConnectionTrait>(conn: &C) -> Result<SiteSettings> {
    find_document(conn).await?.ok_or(Error::SettingsNotFound)
}

/// Returns the current settings document, or `None` before seeding.
pub async fn find_settings<C: ConnectionTrait>(conn: &C) -> Result<Option<SiteSettings>> {
    find_document(conn).await
}

/// True once a settings document exists.
pub async fn settings_exist<C: ConnectionTrait>(conn: &C) -> Result<bool> {
    Ok(SiteSettingsEntity::find_by_id(site_settings::SITE_SETTINGS_KEY)
        .one(conn)
        .await?
        .is_some())
}

/// Merges `patch` into the stored document and returns the full result.
///
/// # Errors
/// Returns `Error::SettingsNotFound` if the store was never seeded; nothing is
/// written in that case.
#[instrument(skip(db, patch))]
pub async fn update_settings(db: &DatabaseConnection, patch: SiteSettings) -> Result<SiteSettings> {
    let txn = db.begin().await?;
    let mut document = find_document(&txn).await?.ok_or(Error::SettingsNotFound)?;
    document.merge(patch);
    write_document(&txn, &document).await?;
    txn.commit().await?;

    info!("Site settings updated");
    Ok(document)
}

/// Overwrites the whole document; fields absent from `document` are cleared.
#[instrument(skip(db, document))]
pub async fn replace_settings(db: &DatabaseConnection, document: &SiteSettings) -> Result<()> {
    write_document(db, document).await?;
    info!("Site settings replaced");
    Ok(())
}

/// Merges `patch` into the stored document, or stores it as the document when
/// none exists yet.
pub(crate) async fn merge_or_insert<C: ConnectionTrait>(
    conn: &C,
    patch: SiteSettings,
) -> Result<SiteSettings> {
    let document = match find_document(conn).await? {
        Some(mut document) => {
            document.merge(patch);
            document
        }
        None => patch,
    };
    write_document(conn, &document).await?;
    Ok(document)
}

/// Writes `document` only if no settings exist yet. Returns whether it was written.
pub(crate) async fn insert_if_absent<C: ConnectionTrait>(
    conn: &C,
    document: &SiteSettings,
) -> Result<bool> {
    let inserted = SiteSettingsEntity::insert(to_active_model(document)?)
        .on_conflict(
            OnConflict::column(site_settings::Column::Id)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(inserted > 0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::models::{PageName, PageStyles, Theme};
    use crate::test_utils::*;
    use sea_orm::ConnectionTrait;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_before_seed_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(matches!(
            get_settings(&db).await.unwrap_err(),
            Error::SettingsNotFound
        ));
        assert!(!settings_exist(&db).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_before_seed_writes_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let result = update_settings(&db, test_settings()).await;
        assert!(matches!(result.unwrap_err(), Error::SettingsNotFound));
        assert!(!settings_exist(&db).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_then_get_reflects_change() -> Result<()> {
        let db = setup_test_db().await?;
        replace_settings(&db, &test_settings()).await?;

        let patch = parse_patch(json!({"bulkOrderBenefits": ["a", "b"]}))?;
        let returned = update_settings(&db, patch).await?;
        let stored = get_settings(&db).await?;

        assert_eq!(returned, stored);
        assert_eq!(
            stored.bulk_order_benefits,
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(stored.business_name, test_settings().business_name);
        assert_eq!(
            stored.bulk_order_product_types,
            test_settings().bulk_order_product_types
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_theme_subsection_isolation() -> Result<()> {
        let db = setup_test_db().await?;
        replace_settings(&db, &test_settings()).await?;

        update_settings(
            &db,
            parse_patch(json!({"theme": {
                "colors": {"primary": "#1e40af"},
                "typography": {"fontFamily": "Roboto, sans-serif"}
            }}))?,
        )
        .await?;
        update_settings(
            &db,
            parse_patch(json!({"theme": {"colors": {"primary": "#111"}}}))?,
        )
        .await?;

        let theme = get_settings(&db).await?.theme.unwrap();
        assert_eq!(theme.colors.unwrap()["primary"], "#111");
        assert_eq!(
            theme.typography.unwrap()["fontFamily"],
            "Roboto, sans-serif"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_page_styles_all_pages_persist() -> Result<()> {
        let db = setup_test_db().await?;
        replace_settings(&db, &test_settings()).await?;

        let mut body = serde_json::Map::new();
        for page in PageName::ALL {
            body.insert(page.as_str().to_string(), json!({"bg": "#fff"}));
        }
        update_settings(&db, parse_patch(json!({ "pageStyles": body }))?).await?;

        let page_styles = get_settings(&db).await?.page_styles.unwrap();
        assert_eq!(page_styles.pages().count(), PageName::ALL.len());
        assert_eq!(page_styles.get(PageName::ProductDetail).unwrap()["bg"], "#fff");
        Ok(())
    }

    #[tokio::test]
    async fn test_replace_clears_absent_fields() -> Result<()> {
        let db = setup_test_db().await?;
        replace_settings(&db, &test_settings()).await?;

        let mut page_styles = PageStyles::default();
        page_styles.set(PageName::Home, [("heroBg".to_string(), "#000".to_string())].into());
        let replacement = SiteSettings {
            theme: Some(Theme::default()),
            page_styles: Some(page_styles.clone()),
            ..Default::default()
        };
        replace_settings(&db, &replacement).await?;

        let stored = get_settings(&db).await?;
        assert_eq!(stored, replacement);
        assert!(stored.business_name.is_none());
        assert!(stored.bulk_order_benefits.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_if_absent_keeps_existing() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(insert_if_absent(&db, &test_settings()).await?);

        let other = SiteSettings {
            business_name: Some("Other".to_string()),
            ..Default::default()
        };
        assert!(!insert_if_absent(&db, &other).await?);
        assert_eq!(get_settings(&db).await?, test_settings());
        Ok(())
    }

    #[test]
    fn test_parse_patch_rejects_non_objects_and_bad_types() {
        assert!(matches!(
            parse_patch(json!(["not", "an", "object"])).unwrap_err(),
            Error::Validation { .. }
        ));
        assert!(matches!(
            parse_patch(json!({"bulkOrderBenefits": "not a list"})).unwrap_err(),
            Error::Validation { .. }
        ));
        assert!(matches!(
            parse_patch(json!({"theme": {"colors": {"primary": 12}}})).unwrap_err(),
            Error::Validation { .. }
        ));
    }

    #[test]
    fn test_parse_patch_ignores_unknown_fields() {
        let patch = parse_patch(json!({"futureField": 1, "slogan": "Eat Well"})).unwrap();
        assert_eq!(patch.slogan.as_deref(), Some("Eat Well"));
    }

    #[tokio::test]
    async fn test_storage_error_surfaces_as_database_error() -> Result<()> {
        let db = setup_test_db().await?;
        db.execute_unprepared("DROP TABLE site_settings").await?;
        assert!(matches!(
            get_settings(&db).await.unwrap_err(),
            Error::Database(_)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_merge_or_insert() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(find_settings(&db).await?.is_none());

        let patch = SiteSettings {
            slogan: Some("First".to_string()),
            ..Default::default()
        };
        merge_or_insert(&db, patch).await?;
        assert_eq!(
            find_settings(&db).await?.unwrap().slogan.as_deref(),
            Some("First")
        );

        let patch = SiteSettings {
            phone: Some("+91 90000 00000".to_string()),
            ..Default::default()
        };
        let merged = merge_or_insert(&db, patch).await?;
        assert_eq!(merged.slogan.as_deref(), Some("First"));
        assert_eq!(merged.phone.as_deref(), Some("+91 90000 00000"));
        Ok(())
    }
}
