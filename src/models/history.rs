//! Change-history entries written by data export, import and seeding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// What produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    /// A data export was downloaded
    Export,
    /// A data file was imported
    Import,
    /// The seed dataset was loaded
    Seed,
}

impl HistoryAction {
    /// Value stored in the `action` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Export => "export",
            Self::Import => "import",
            Self::Seed => "seed",
        }
    }

    /// Parses a stored `action` value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "export" => Some(Self::Export),
            "import" => Some(Self::Import),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the change history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Unique identifier
    pub id: String,
    /// When the action happened
    pub timestamp: DateTime<Utc>,
    /// What happened
    pub action: HistoryAction,
    /// Exported or uploaded file name
    pub filename: Option<String>,
    /// Counts or per-collection changes
    pub summary: Value,
}
