//! Milk production models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One day's milk yield for one animal.
/// At most one record exists per animal per date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilkProduction {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub date: NaiveDate,
    pub morning_liters: Decimal,
    pub evening_liters: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MilkProduction {
    /// Combined yield for the day; derived at read time, never stored
    pub fn total_liters(&self) -> Decimal {
        self.morning_liters + self.evening_liters
    }
}
