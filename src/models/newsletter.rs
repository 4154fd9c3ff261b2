//! Newsletter subscription record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A subscribed email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    /// Unique identifier
    pub id: String,
    /// Normalized address
    pub email: String,
    /// When the address subscribed
    pub subscribed_at: DateTime<Utc>,
}

/// Body of `POST /api/newsletter`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscribeRequest {
    /// Address to subscribe
    #[serde(default)]
    pub email: String,
}
