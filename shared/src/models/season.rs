//! Crop season models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A growing cycle of one crop on one farm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropSeason {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub crop_type: CropType,
    pub crop_variety: Option<String>,
    pub planting_date: NaiveDate,
    pub expected_harvest_date: NaiveDate,
    /// Meaningful once the season reaches `Harvested`
    pub actual_harvest_date: Option<NaiveDate>,
    pub area_planted_acres: Decimal,
    pub expected_yield_kg: Option<Decimal>,
    pub actual_yield_kg: Option<Decimal>,
    pub status: SeasonStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CropSeason {
    /// Days until the expected harvest, clamped at zero.
    /// A harvested season has nothing left to wait for.
    pub fn days_to_harvest(&self, today: NaiveDate) -> i64 {
        if self.status == SeasonStatus::Harvested {
            return 0;
        }
        (self.expected_harvest_date - today).num_days().max(0)
    }

    /// Whether the expected harvest falls within the next week.
    /// Overdue seasons clamp to zero days and stay due.
    pub fn is_harvest_due(&self, today: NaiveDate) -> bool {
        self.days_to_harvest(today) <= 7
    }
}

/// Crops grown on the farm
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CropType {
    Sugarcane,
    Maize,
    Beans,
    Vegetables,
    Other,
}

impl std::fmt::Display for CropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropType::Sugarcane => write!(f, "Sugarcane"),
            CropType::Maize => write!(f, "Maize"),
            CropType::Beans => write!(f, "Beans"),
            CropType::Vegetables => write!(f, "Vegetables"),
            CropType::Other => write!(f, "Other"),
        }
    }
}

/// Lifecycle stage of a crop season
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SeasonStatus {
    Planned,
    Planted,
    Harvested,
    Failed,
}

impl SeasonStatus {
    /// Planned and planted seasons still have a crop in play
    pub fn is_active(&self) -> bool {
        matches!(self, SeasonStatus::Planned | SeasonStatus::Planted)
    }
}

impl std::fmt::Display for SeasonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeasonStatus::Planned => write!(f, "Planned"),
            SeasonStatus::Planted => write!(f, "Planted"),
            SeasonStatus::Harvested => write!(f, "Harvested"),
            SeasonStatus::Failed => write!(f, "Failed"),
        }
    }
}
