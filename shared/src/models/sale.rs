//! Crop sale models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sale of produce from a crop season
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropSale {
    pub id: Uuid,
    pub season_id: Uuid,
    pub date: NaiveDate,
    pub quantity_kg: Decimal,
    pub price_per_kg: Decimal,
    /// Always `quantity_kg * price_per_kg`; recomputed on every write
    pub total_amount: Decimal,
    pub buyer: Option<String>,
    pub payment_status: SalePaymentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Settlement state of a crop sale
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SalePaymentStatus {
    Paid,
    Pending,
    Partial,
}

impl std::fmt::Display for SalePaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SalePaymentStatus::Paid => write!(f, "Paid"),
            SalePaymentStatus::Pending => write!(f, "Pending"),
            SalePaymentStatus::Partial => write!(f, "Partial"),
        }
    }
}

/// Total sale value from quantity and unit price.
/// Stored totals are derived from this, never taken from the caller.
pub fn sale_total(quantity_kg: Decimal, price_per_kg: Decimal) -> Decimal {
    quantity_kg * price_per_kg
}
