//! Catalog record entity - One row per category, product, hero slide,
//! testimonial or gift box.
//!
//! The typed record is stored as JSON in `body`; `slug` and `position` are
//! lifted into columns so lookups and ordering stay in SQL. The composite
//! primary key makes ids unique per collection, which also keeps racing seed
//! calls from inserting the same record twice.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Catalog record database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "catalog_records")]
pub struct Model {
    /// Collection name (e.g. `"categories"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub collection: String,
    /// Record identifier, unique within the collection
    #[sea_orm(primary_key, auto_increment = false)]
    pub record_id: String,
    /// URL slug for collections that have one
    pub slug: Option<String>,
    /// Insertion order within the collection
    pub position: i64,
    /// The full typed record serialized as JSON
    pub body: Json,
    /// When the record was last written
    pub updated_at: DateTime,
}

/// Catalog records have no relationships; `products.category` is a soft reference
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
