//! Due-soon selectors over record snapshots
//!
//! Pure filters: they take the records, an explicit `today`, and a horizon in
//! days, and keep the input order so callers decide how lists are sorted.

use chrono::NaiveDate;
use serde::Serialize;

use shared::models::{Animal, CropSeason, HealthRecord, Pregnancy};

/// A health follow-up worth surfacing, paired with its animal
#[derive(Debug, Clone, Serialize)]
pub struct HealthAlert {
    pub record: HealthRecord,
    pub animal: Animal,
}

/// A pregnancy approaching delivery, paired with its animal
#[derive(Debug, Clone, Serialize)]
pub struct PregnancyAlert {
    pub pregnancy: Pregnancy,
    pub animal: Animal,
}

/// Health records whose follow-up falls within the horizon.
/// Overdue follow-ups are included; there is no lower bound.
pub fn health_due(records: &[HealthRecord], today: NaiveDate, horizon_days: i64) -> Vec<HealthRecord> {
    records
        .iter()
        .filter(|r| r.is_due_within(today, horizon_days))
        .cloned()
        .collect()
}

/// Open pregnancies expected to deliver within the horizon
pub fn pregnancies_due(
    pregnancies: &[Pregnancy],
    today: NaiveDate,
    horizon_days: i64,
) -> Vec<Pregnancy> {
    pregnancies
        .iter()
        .filter(|p| p.is_due_within(today, horizon_days))
        .cloned()
        .collect()
}

/// Active seasons whose expected harvest falls within the horizon.
/// Overdue unharvested seasons clamp to zero days and stay due.
pub fn harvests_due(seasons: &[CropSeason], today: NaiveDate, horizon_days: i64) -> Vec<CropSeason> {
    seasons
        .iter()
        .filter(|s| s.status.is_active() && s.days_to_harvest(today) <= horizon_days)
        .cloned()
        .collect()
}
