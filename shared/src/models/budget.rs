//! Budget models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A planning period with income and expense targets.
/// Actuals are computed from the transaction log, never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub target_income: Decimal,
    pub target_expense: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Budget {
    /// Planned surplus for the period
    pub fn expected_profit(&self) -> Decimal {
        self.target_income - self.target_expense
    }
}
