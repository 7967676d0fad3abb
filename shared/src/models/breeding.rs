//! Breeding and pregnancy models

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AnimalType;

/// A breeding event and the pregnancy it may lead to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pregnancy {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub breeding_date: NaiveDate,
    /// Tag of the sire, when known
    pub bull_tag: Option<String>,
    /// Projected from the breeding date at creation and frozen afterwards;
    /// only an explicit edit changes it
    pub expected_delivery: Option<NaiveDate>,
    pub actual_delivery: Option<NaiveDate>,
    pub status: PregnancyStatus,
    pub offspring_count: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Pregnancy {
    /// Whether delivery is expected within `days` of today.
    /// Closed pregnancies are never due; overdue open ones stay due.
    pub fn is_due_within(&self, today: NaiveDate, days: i64) -> bool {
        if !self.status.is_open() {
            return false;
        }
        match self.expected_delivery {
            Some(expected) => expected <= today + Duration::days(days),
            None => false,
        }
    }

    /// Whether delivery is expected within the next week
    pub fn is_due_within_week(&self, today: NaiveDate) -> bool {
        self.is_due_within(today, 7)
    }
}

/// Projected delivery date from the breeding date and species gestation
pub fn projected_delivery(animal_type: &AnimalType, breeding_date: NaiveDate) -> NaiveDate {
    breeding_date + Duration::days(animal_type.gestation_days())
}

/// Progress of a pregnancy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PregnancyStatus {
    Bred,
    Confirmed,
    DueSoon,
    Delivered,
    Failed,
}

impl PregnancyStatus {
    /// Bred, confirmed, and due-soon pregnancies are still awaiting delivery
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            PregnancyStatus::Bred | PregnancyStatus::Confirmed | PregnancyStatus::DueSoon
        )
    }
}

impl std::fmt::Display for PregnancyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PregnancyStatus::Bred => write!(f, "Bred"),
            PregnancyStatus::Confirmed => write!(f, "Confirmed"),
            PregnancyStatus::DueSoon => write!(f, "Due Soon"),
            PregnancyStatus::Delivered => write!(f, "Delivered"),
            PregnancyStatus::Failed => write!(f, "Failed"),
        }
    }
}
