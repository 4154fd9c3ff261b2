//! Data history entity - Audit trail of data exports, imports and seeding.
//!
//! `action` is one of `"export"`, `"import"` or `"seed"`; `summary` holds the
//! counts or per-collection changes reported by that action.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Data history database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "data_history")]
pub struct Model {
    /// UUID of the entry
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// When the action happened
    pub timestamp: DateTimeUtc,
    /// Kind of action: `"export"`, `"import"` or `"seed"`
    pub action: String,
    /// Exported or uploaded file name, if any
    pub filename: Option<String>,
    /// Counts or changes reported by the action
    pub summary: Json,
}

/// History entries have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
