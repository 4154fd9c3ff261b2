//! Storage reachability check used by the health endpoint.

use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::warn;

/// Whether the storage backend answered a ping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageStatus {
    /// The backend answered
    Connected,
    /// The backend did not answer
    Disconnected,
}

impl StorageStatus {
    /// True when the backend answered.
    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// Pings the database. Never fails; an error is reported as `Disconnected`.
pub async fn check_storage(db: &DatabaseConnection) -> StorageStatus {
    match db.ping().await {
        Ok(()) => StorageStatus::Connected,
        Err(e) => {
            warn!("Storage health check failed: {}", e);
            StorageStatus::Disconnected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Result;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_in_memory_database_is_connected() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(check_storage(&db).await, StorageStatus::Connected);
        Ok(())
    }

    #[tokio::test]
    async fn test_closed_connection_is_disconnected() -> Result<()> {
        let db = setup_test_db().await?;
        let handle = db.clone();
        db.close().await?;
        assert_eq!(check_storage(&handle).await, StorageStatus::Disconnected);
        Ok(())
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(StorageStatus::Connected).ok(),
            Some(serde_json::json!("connected"))
        );
    }
}
