//! Animal health models

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A veterinary or husbandry event for one animal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthRecord {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub record_type: HealthRecordType,
    pub date: NaiveDate,
    pub description: String,
    pub veterinarian: Option<String>,
    pub cost: Decimal,
    /// When a follow-up (booster, re-check) is scheduled
    pub next_due_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl HealthRecord {
    /// Whether the follow-up falls within `days` of today.
    /// There is no lower bound, so overdue follow-ups stay due.
    pub fn is_due_within(&self, today: NaiveDate, days: i64) -> bool {
        match self.next_due_date {
            Some(due) => due <= today + Duration::days(days),
            None => false,
        }
    }

    /// Whether the follow-up falls within the next week
    pub fn is_due_soon(&self, today: NaiveDate) -> bool {
        self.is_due_within(today, 7)
    }
}

/// Kinds of health events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HealthRecordType {
    Vaccination,
    Treatment,
    Checkup,
    Injury,
    Other,
}

impl std::fmt::Display for HealthRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthRecordType::Vaccination => write!(f, "Vaccination"),
            HealthRecordType::Treatment => write!(f, "Treatment"),
            HealthRecordType::Checkup => write!(f, "Checkup"),
            HealthRecordType::Injury => write!(f, "Injury"),
            HealthRecordType::Other => write!(f, "Other"),
        }
    }
}
