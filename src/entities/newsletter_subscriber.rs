//! Newsletter subscriber entity - One row per subscribed email address.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Newsletter subscriber database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "newsletter_subscribers")]
pub struct Model {
    /// UUID assigned on subscription
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Normalized (trimmed, lowercase) address
    #[sea_orm(unique)]
    pub email: String,
    /// When the address was subscribed
    pub subscribed_at: DateTimeUtc,
}

/// Subscribers have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
