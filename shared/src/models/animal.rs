//! Livestock models

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An animal in the herd
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
    pub id: Uuid,
    pub animal_type: AnimalType,
    /// Ear-tag identifier, unique across the herd
    pub tag_number: String,
    pub name: Option<String>,
    pub breed: Option<String>,
    pub gender: Gender,
    pub date_of_birth: Option<NaiveDate>,
    pub date_acquired: NaiveDate,
    pub acquisition_cost: Decimal,
    pub status: AnimalStatus,
    pub mother_tag: Option<String>,
    pub father_tag: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Animal {
    /// Whole months of age, day-of-month ignored.
    /// None when the date of birth is unrecorded.
    pub fn age_in_months(&self, today: NaiveDate) -> Option<i32> {
        let dob = self.date_of_birth?;
        let months =
            (today.year() - dob.year()) * 12 + (today.month() as i32 - dob.month() as i32);
        Some(months.max(0))
    }

    /// Whether the animal has reached breeding age for its species.
    /// Unknown age is treated as not mature.
    pub fn is_mature(&self, today: NaiveDate) -> bool {
        match self.age_in_months(today) {
            Some(age) => age >= self.animal_type.maturity_months(),
            None => false,
        }
    }
}

/// Species kept on the farm
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnimalType {
    Cow,
    Sheep,
}

impl AnimalType {
    /// Gestation length in days
    pub fn gestation_days(&self) -> i64 {
        match self {
            AnimalType::Cow => 283,
            AnimalType::Sheep => 150,
        }
    }

    /// Age in months at which the species is considered mature
    pub fn maturity_months(&self) -> i32 {
        match self {
            AnimalType::Cow => 15,
            AnimalType::Sheep => 7,
        }
    }
}

impl std::fmt::Display for AnimalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnimalType::Cow => write!(f, "Cow"),
            AnimalType::Sheep => write!(f, "Sheep"),
        }
    }
}

/// Animal sex
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

/// Whether the animal is still part of the herd
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnimalStatus {
    Active,
    Sold,
    Deceased,
}

impl std::fmt::Display for AnimalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnimalStatus::Active => write!(f, "Active"),
            AnimalStatus::Sold => write!(f, "Sold"),
            AnimalStatus::Deceased => write!(f, "Deceased"),
        }
    }
}
