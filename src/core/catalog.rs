//! Catalog business logic - list, lookup and authoring of catalog records.
//!
//! All five collections share the `catalog_records` table; the functions here
//! are generic over [`CatalogItem`] so every collection gets the same
//! semantics. Records are kept in insertion order via the `position` column.

use crate::{
    entities::{CatalogRecord, catalog_record},
    errors::{Error, Result},
    models::{CatalogItem, Collection, Product},
};
use sea_orm::{
    DeleteMany, PaginatorTrait, QueryOrder, Select, Set, TransactionTrait, prelude::*,
    sea_query::OnConflict,
};
use std::collections::HashSet;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Rows per multi-row INSERT. Each row binds six values, so a batch stays well
/// under SQLite's bound-parameter limit.
const INSERT_BATCH_SIZE: usize = 100;

fn collection_query(collection: Collection) -> Select<CatalogRecord> {
    CatalogRecord::find().filter(catalog_record::Column::Collection.eq(collection.as_str()))
}

fn primary_key(collection: Collection, id: &str) -> (String, String) {
    (collection.as_str().to_string(), id.to_string())
}

fn decode<T: CatalogItem>(row: catalog_record::Model) -> Result<T> {
    serde_json::from_value(row.body).map_err(Into::into)
}

fn to_active_model<T: CatalogItem>(record: &T, position: i64) -> Result<catalog_record::ActiveModel> {
    Ok(catalog_record::ActiveModel {
        collection: Set(T::COLLECTION.as_str().to_string()),
        record_id: Set(record.id().to_string()),
        slug: Set(record.slug().map(ToString::to_string)),
        position: Set(position),
        body: Set(serde_json::to_value(record)?),
        updated_at: Set(chrono::Utc::now().naive_utc()),
    })
}

/// Replaces the body of a stored row, keeping its key and position.
fn overwrite<T: CatalogItem>(
    existing: catalog_record::Model,
    record: &T,
) -> Result<catalog_record::ActiveModel> {
    let mut active: catalog_record::ActiveModel = existing.into();
    active.slug = Set(record.slug().map(ToString::to_string));
    active.body = Set(serde_json::to_value(record)?);
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    Ok(active)
}

/// Rejects records whose slug is present but blank.
fn validate_slug<T: CatalogItem>(record: &T) -> Result<()> {
    if record.slug().is_some_and(|slug| slug.trim().is_empty()) {
        return Err(Error::validation(format!(
            "{} records require a non-empty slug",
            T::COLLECTION
        )));
    }
    Ok(())
}

async fn find_row<C: ConnectionTrait>(
    conn: &C,
    collection: Collection,
    key: &str,
) -> Result<Option<catalog_record::Model>> {
    if let Some(row) = CatalogRecord::find_by_id(primary_key(collection, key))
        .one(conn)
        .await?
    {
        return Ok(Some(row));
    }
    collection_query(collection)
        .filter(catalog_record::Column::Slug.eq(key))
        .one(conn)
        .await
        .map_err(Into::into)
}

async fn next_position<C: ConnectionTrait>(conn: &C, collection: Collection) -> Result<i64> {
    let last = collection_query(collection)
        .order_by_desc(catalog_record::Column::Position)
        .one(conn)
        .await?;
    Ok(last.map_or(0, |row| row.position + 1))
}

/// Fails with `Error::Conflict` if another record already owns the id (when
/// `check_id` is set) or the slug.
async fn ensure_unique<T: CatalogItem, C: ConnectionTrait>(
    conn: &C,
    record: &T,
    check_id: bool,
) -> Result<()> {
    if check_id
        && CatalogRecord::find_by_id(primary_key(T::COLLECTION, record.id()))
            .one(conn)
            .await?
            .is_some()
    {
        return Err(Error::Conflict {
            collection: T::COLLECTION.to_string(),
            field: "id",
            value: record.id().to_string(),
        });
    }

    if let Some(slug) = record.slug() {
        let taken = collection_query(T::COLLECTION)
            .filter(catalog_record::Column::Slug.eq(slug))
            .filter(catalog_record::Column::RecordId.ne(record.id()))
            .one(conn)
            .await?;
        if taken.is_some() {
            return Err(Error::Conflict {
                collection: T::COLLECTION.to_string(),
                field: "slug",
                value: slug.to_string(),
            });
        }
    }
    Ok(())
}

/// Every record needs an id, and ids and slugs must be unique in the collection.
pub(crate) fn validate_batch<T: CatalogItem>(records: &[T]) -> Result<()> {
    let mut ids = HashSet::new();
    let mut slugs = HashSet::new();
    for record in records {
        if record.id().trim().is_empty() {
            return Err(Error::validation(format!(
                "Every {} record needs an id",
                T::COLLECTION
            )));
        }
        if !ids.insert(record.id()) {
            return Err(Error::validation(format!(
                "Duplicate {} id '{}'",
                T::COLLECTION,
                record.id()
            )));
        }
        if let Some(slug) = record.slug() {
            if slug.trim().is_empty() {
                return Err(Error::validation(format!(
                    "{} record '{}' needs a slug",
                    T::COLLECTION,
                    record.id()
                )));
            }
            if !slugs.insert(slug) {
                return Err(Error::validation(format!(
                    "Duplicate {} slug '{slug}'",
                    T::COLLECTION
                )));
            }
        }
    }
    Ok(())
}

/// Lists every record of a collection in insertion order.
pub async fn list<T: CatalogItem, C: ConnectionTrait>(conn: &C) -> Result<Vec<T>> {
    collection_query(T::COLLECTION)
        .order_by_asc(catalog_record::Column::Position)
        .all(conn)
        .await?
        .into_iter()
        .map(decode)
        .collect()
}

/// Lists the products whose `category` references the given category slug.
pub async fn list_products_in_category<C: ConnectionTrait>(
    conn: &C,
    category_slug: &str,
) -> Result<Vec<Product>> {
    let products = list::<Product, C>(conn).await?;
    Ok(products
        .into_iter()
        .filter(|product| product.category == category_slug)
        .collect())
}

/// Finds a record by id, falling back to slug.
///
/// # Errors
/// Returns `Error::RecordNotFound` if neither matches.
pub async fn get<T: CatalogItem, C: ConnectionTrait>(conn: &C, key: &str) -> Result<T> {
    let row = find_row(conn, T::COLLECTION, key)
        .await?
        .ok_or_else(|| Error::RecordNotFound {
            collection: T::COLLECTION.to_string(),
            key: key.to_string(),
        })?;
    decode(row)
}

/// Number of records in a collection.
pub async fn count<C: ConnectionTrait>(conn: &C, collection: Collection) -> Result<u64> {
    collection_query(collection)
        .count(conn)
        .await
        .map_err(Into::into)
}

/// Adds a record at the end of its collection.
///
/// A record with an empty id gets a fresh UUID.
///
/// # Errors
/// Returns `Error::Conflict` if the id or slug is taken and
/// `Error::Validation` if a required slug is blank.
#[instrument(skip(db, record), fields(collection = %T::COLLECTION))]
pub async fn create<T: CatalogItem>(db: &DatabaseConnection, mut record: T) -> Result<T> {
    if record.id().trim().is_empty() {
        record.set_id(Uuid::new_v4().to_string());
    }
    validate_slug(&record)?;

    let txn = db.begin().await?;
    ensure_unique(&txn, &record, true).await?;
    let position = next_position(&txn, T::COLLECTION).await?;
    CatalogRecord::insert(to_active_model(&record, position)?)
        .exec_without_returning(&txn)
        .await?;
    txn.commit().await?;

    info!("Created {} record '{}'", T::COLLECTION, record.id());
    Ok(record)
}

/// Replaces all fields of an existing record, keeping its id and position.
///
/// # Errors
/// Returns `Error::RecordNotFound` if no record has this id and
/// `Error::Conflict` if the new slug belongs to another record.
#[instrument(skip(db, record), fields(collection = %T::COLLECTION))]
pub async fn update<T: CatalogItem>(db: &DatabaseConnection, id: &str, mut record: T) -> Result<T> {
    record.set_id(id.to_string());
    validate_slug(&record)?;

    let txn = db.begin().await?;
    let existing = CatalogRecord::find_by_id(primary_key(T::COLLECTION, id))
        .one(&txn)
        .await?
        .ok_or_else(|| Error::RecordNotFound {
            collection: T::COLLECTION.to_string(),
            key: id.to_string(),
        })?;
    ensure_unique(&txn, &record, false).await?;

    overwrite(existing, &record)?.update(&txn).await?;
    txn.commit().await?;

    info!("Updated {} record '{}'", T::COLLECTION, id);
    Ok(record)
}

/// Hard-deletes a record by id.
///
/// # Errors
/// Returns `Error::RecordNotFound` if no record has this id.
#[instrument(skip(db), fields(collection = %T::COLLECTION))]
pub async fn delete<T: CatalogItem>(db: &DatabaseConnection, id: &str) -> Result<()> {
    let result = CatalogRecord::delete_by_id(primary_key(T::COLLECTION, id))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(Error::RecordNotFound {
            collection: T::COLLECTION.to_string(),
            key: id.to_string(),
        });
    }
    info!("Deleted {} record '{}'", T::COLLECTION, id);
    Ok(())
}

/// Replaces a whole collection with `records`, in order, inside one transaction.
#[instrument(skip(db, records), fields(collection = %T::COLLECTION, count = records.len()))]
pub async fn replace_all<T: CatalogItem>(db: &DatabaseConnection, records: &[T]) -> Result<usize> {
    let txn = db.begin().await?;
    collection_query_delete(T::COLLECTION).exec(&txn).await?;

    let rows = records
        .iter()
        .zip(0_i64..)
        .map(|(record, position)| to_active_model(record, position))
        .collect::<Result<Vec<_>>>()?;
    for batch in rows.chunks(INSERT_BATCH_SIZE) {
        CatalogRecord::insert_many(batch.to_vec())
            .exec_without_returning(&txn)
            .await?;
    }
    txn.commit().await?;

    debug!("Replaced {} with {} records", T::COLLECTION, records.len());
    Ok(records.len())
}

fn collection_query_delete(collection: Collection) -> DeleteMany<CatalogRecord> {
    CatalogRecord::delete_many().filter(catalog_record::Column::Collection.eq(collection.as_str()))
}

/// Inserts `records` in order, skipping any id that already exists.
/// Returns the number of rows actually inserted.
pub(crate) async fn insert_missing<T: CatalogItem, C: ConnectionTrait>(
    conn: &C,
    records: &[T],
) -> Result<u64> {
    if records.is_empty() {
        return Ok(0);
    }
    let start = next_position(conn, T::COLLECTION).await?;
    let rows = records
        .iter()
        .zip(start..)
        .map(|(record, position)| to_active_model(record, position))
        .collect::<Result<Vec<_>>>()?;

    let mut inserted = 0;
    for batch in rows.chunks(INSERT_BATCH_SIZE) {
        inserted += CatalogRecord::insert_many(batch.to_vec())
            .on_conflict(
                OnConflict::columns([
                    catalog_record::Column::Collection,
                    catalog_record::Column::RecordId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;
    }
    Ok(inserted)
}

/// Inserts `record` at the end of its collection, or overwrites the record
/// with the same id in place. Returns `true` when the record was new.
///
/// # Errors
/// Returns `Error::Conflict` if the slug belongs to a different record.
pub(crate) async fn upsert<T: CatalogItem, C: ConnectionTrait>(
    conn: &C,
    record: &T,
) -> Result<bool> {
    ensure_unique(conn, record, false).await?;
    let existing = CatalogRecord::find_by_id(primary_key(T::COLLECTION, record.id()))
        .one(conn)
        .await?;

    if let Some(existing) = existing {
        overwrite(existing, record)?.update(conn).await?;
        return Ok(false);
    }
    let position = next_position(conn, T::COLLECTION).await?;
    CatalogRecord::insert(to_active_model(record, position)?)
        .exec_without_returning(conn)
        .await?;
    Ok(true)
}
