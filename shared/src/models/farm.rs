//! Farm models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A farm or parcel of land under management
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farm {
    pub id: Uuid,
    pub name: String,
    pub size_acres: Decimal,
    pub location: Option<String>,
    pub soil_type: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
