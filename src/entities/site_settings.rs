//! Site settings entity - Singleton row holding the whole settings document.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed key of the only row in this table.
pub const SITE_SETTINGS_KEY: &str = "site_settings";

/// Site settings database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "site_settings")]
pub struct Model {
    /// Always [`SITE_SETTINGS_KEY`]
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// The `SiteSettings` document serialized as JSON
    pub document: Json,
    /// When the document was last written
    pub updated_at: DateTime,
}

/// `SiteSettings` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
