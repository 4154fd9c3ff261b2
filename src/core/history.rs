//! Change history - an audit trail of data exports, imports and seeding.
//!
//! Entries are written by [`crate::core::data`] and [`crate::core::seed`] and
//! can be listed or pruned by the admin.

use crate::{
    entities::{DataHistory, DataHistoryColumn, data_history},
    errors::{Error, Result},
    models::{HistoryAction, HistoryEntry},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde_json::Value;
use tracing::{info, instrument, warn};

const COLLECTION: &str = "dataHistory";

fn to_entry(row: data_history::Model) -> Option<HistoryEntry> {
    let Some(action) = HistoryAction::parse(&row.action) else {
        warn!("Skipping history entry {} with unknown action '{}'", row.id, row.action);
        return None;
    };
    Some(HistoryEntry {
        id: row.id,
        timestamp: row.timestamp,
        action,
        filename: row.filename,
        summary: row.summary,
    })
}

/// Appends an entry to the history.
pub async fn record<C: ConnectionTrait>(
    conn: &C,
    action: HistoryAction,
    filename: Option<String>,
    summary: Value,
) -> Result<HistoryEntry> {
    let row = data_history::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        timestamp: Set(chrono::Utc::now()),
        action: Set(action.as_str().to_string()),
        filename: Set(filename),
        summary: Set(summary),
    }
    .insert(conn)
    .await?;

    info!("Recorded {} history entry {}", action, row.id);
    Ok(HistoryEntry {
        id: row.id,
        timestamp: row.timestamp,
        action,
        filename: row.filename,
        summary: row.summary,
    })
}

/// All entries, newest first.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<HistoryEntry>> {
    Ok(DataHistory::find()
        .order_by_desc(DataHistoryColumn::Timestamp)
        .all(db)
        .await?
        .into_iter()
        .filter_map(to_entry)
        .collect())
}

/// Removes one entry.
///
/// # Errors
/// Returns `Error::RecordNotFound` if no entry has that id.
#[instrument(skip(db))]
pub async fn delete(db: &DatabaseConnection, id: &str) -> Result<()> {
    let result = DataHistory::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::RecordNotFound {
            collection: COLLECTION.to_string(),
            key: id.to_string(),
        });
    }
    info!("Deleted history entry {}", id);
    Ok(())
}

/// Removes every entry and returns how many there were.
#[instrument(skip(db))]
pub async fn clear(db: &DatabaseConnection) -> Result<u64> {
    let result = DataHistory::delete_many().exec(db).await?;
    info!("Cleared {} history entries", result.rows_affected);
    Ok(result.rows_affected)
}
