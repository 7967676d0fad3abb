//! Feed purchase models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A feed purchase or usage record for the herd
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub feed_type: String,
    pub quantity_kg: Decimal,
    pub cost: Decimal,
    pub supplier: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
