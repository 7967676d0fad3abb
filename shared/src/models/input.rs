//! Crop input models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An input applied to a crop season (seeds, fertilizer, labor, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropInput {
    pub id: Uuid,
    pub season_id: Uuid,
    pub input_type: InputType,
    pub date: NaiveDate,
    pub description: String,
    /// Free-text quantity with unit (e.g. "50 kg", "2 bags")
    pub quantity: Option<String>,
    pub cost: Decimal,
    pub supplier: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Categories of crop inputs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Seeds,
    Fertilizer,
    Pesticide,
    Water,
    Labor,
    Other,
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputType::Seeds => write!(f, "Seeds"),
            InputType::Fertilizer => write!(f, "Fertilizer"),
            InputType::Pesticide => write!(f, "Pesticide"),
            InputType::Water => write!(f, "Water"),
            InputType::Labor => write!(f, "Labor"),
            InputType::Other => write!(f, "Other"),
        }
    }
}
