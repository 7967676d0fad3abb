//! Dairy herd service covering animals, milk, health, breeding, and feed

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::models::{
    projected_delivery, Animal, AnimalStatus, AnimalType, FeedRecord, Gender, HealthRecord,
    HealthRecordType, MilkProduction, Pregnancy, PregnancyStatus,
};
use shared::rollup;
use shared::types::DateRange;
use shared::validation;

use super::alerts::{self, HealthAlert, PregnancyAlert};
use crate::config::{AlertsConfig, Config, DisplayConfig};
use crate::error::{AppError, AppResult};
use crate::store::FarmStore;

/// Dairy service for managing the herd and its daily records
#[derive(Clone)]
pub struct DairyService {
    store: FarmStore,
    alerts: AlertsConfig,
    display: DisplayConfig,
}

/// Input for registering an animal
#[derive(Debug, Deserialize)]
pub struct CreateAnimalInput {
    pub animal_type: AnimalType,
    pub tag_number: String,
    pub name: Option<String>,
    pub breed: Option<String>,
    pub gender: Gender,
    pub date_of_birth: Option<NaiveDate>,
    /// Defaults to today
    pub date_acquired: Option<NaiveDate>,
    /// Defaults to zero
    pub acquisition_cost: Option<Decimal>,
    /// Defaults to `Active`
    pub status: Option<AnimalStatus>,
    pub mother_tag: Option<String>,
    pub father_tag: Option<String>,
    pub notes: Option<String>,
}

/// Input for editing an animal; every field is written back
#[derive(Debug, Deserialize)]
pub struct UpdateAnimalInput {
    pub animal_type: AnimalType,
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
}

/// Animal listing filter; unset fields match everything
#[derive(Debug, Default, Deserialize)]
pub struct AnimalFilter {
    pub animal_type: Option<AnimalType>,
    pub status: Option<AnimalStatus>,
}

/// Input for recording a day's milk for one animal
#[derive(Debug, Deserialize)]
pub struct RecordMilkInput {
    pub animal_id: Uuid,
    /// Defaults to today
    pub date: Option<NaiveDate>,
    pub morning_liters: Option<Decimal>,
    pub evening_liters: Option<Decimal>,
    pub notes: Option<String>,
}

/// Input for adding a health record
#[derive(Debug, Deserialize)]
pub struct RecordHealthInput {
    pub animal_id: Uuid,
    pub record_type: HealthRecordType,
    /// Defaults to today
    pub date: Option<NaiveDate>,
    pub description: String,
    pub veterinarian: Option<String>,
    /// Defaults to zero
    pub cost: Option<Decimal>,
    pub next_due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Input for editing a health record
#[derive(Debug, Deserialize)]
pub struct UpdateHealthInput {
    pub animal_id: Uuid,
    pub record_type: HealthRecordType,
    pub date: NaiveDate,
    pub description: String,
    pub veterinarian: Option<String>,
    pub cost: Decimal,
    pub next_due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Input for recording a breeding
#[derive(Debug, Deserialize)]
pub struct RecordPregnancyInput {
    pub animal_id: Uuid,
    /// Defaults to today
    pub breeding_date: Option<NaiveDate>,
    pub bull_tag: Option<String>,
    /// Projected from breeding date and gestation when omitted
    pub expected_delivery: Option<NaiveDate>,
    pub actual_delivery: Option<NaiveDate>,
    /// Defaults to `Bred`
    pub status: Option<PregnancyStatus>,
    pub offspring_count: Option<i32>,
    pub notes: Option<String>,
}

/// Input for editing a pregnancy.
/// Leaving `expected_delivery` unset keeps the stored projection.
#[derive(Debug, Deserialize)]
pub struct UpdatePregnancyInput {
    pub animal_id: Uuid,
    pub breeding_date: NaiveDate,
    pub bull_tag: Option<String>,
    pub expected_delivery: Option<NaiveDate>,
    pub actual_delivery: Option<NaiveDate>,
    pub status: PregnancyStatus,
    pub offspring_count: i32,
    pub notes: Option<String>,
}

/// Input for recording a feed purchase or use
#[derive(Debug, Deserialize)]
pub struct RecordFeedInput {
    /// Defaults to today
    pub date: Option<NaiveDate>,
    pub feed_type: String,
    pub quantity_kg: Decimal,
    pub cost: Decimal,
    pub supplier: Option<String>,
    pub notes: Option<String>,
}

/// Input for editing a feed record
#[derive(Debug, Deserialize)]
pub struct UpdateFeedInput {
    pub date: NaiveDate,
    pub feed_type: String,
    pub quantity_kg: Decimal,
    pub cost: Decimal,
    pub supplier: Option<String>,
    pub notes: Option<String>,
}

/// Milk records over a window with their combined volume
#[derive(Debug, Serialize)]
pub struct MilkSummary {
    pub records: Vec<MilkProduction>,
    pub total_liters: Decimal,
}

/// Feed cost and volume over the trailing 30 days
#[derive(Debug, Serialize)]
pub struct FeedSummary {
    pub total_cost: Decimal,
    pub total_quantity_kg: Decimal,
}

/// Everything the animal detail page shows
#[derive(Debug, Serialize)]
pub struct AnimalSummary {
    pub animal: Animal,
    pub age_in_months: Option<i32>,
    pub recent_milk: Vec<MilkProduction>,
    pub milk_last_30_days: Decimal,
    pub health_records: Vec<HealthRecord>,
    pub pregnancies: Vec<Pregnancy>,
}

/// Dairy home page rollup
#[derive(Debug, Serialize)]
pub struct DairyOverview {
    pub cow_count: usize,
    pub sheep_count: usize,
    pub today_liters: Decimal,
    pub health_alerts: Vec<HealthAlert>,
    pub pregnancy_alerts: Vec<PregnancyAlert>,
}

impl DairyService {
    /// Create a new DairyService instance
    pub fn new(store: FarmStore, config: &Config) -> Self {
        Self {
            store,
            alerts: config.alerts.clone(),
            display: config.display.clone(),
        }
    }

    // ========================================================================
    // Animals
    // ========================================================================

    /// Register an animal; tag numbers are unique across the herd
    pub fn create_animal(&self, input: CreateAnimalInput) -> AppResult<Animal> {
        // Validate input
        validation::validate_tag_number(&input.tag_number)
            .map_err(|msg| AppError::validation("tag_number", msg))?;
        let acquisition_cost = input.acquisition_cost.unwrap_or(Decimal::ZERO);
        validation::validate_amount(acquisition_cost)
            .map_err(|msg| AppError::validation("acquisition_cost", msg))?;

        let now = Utc::now();
        let animal = Animal {
            id: Uuid::new_v4(),
            animal_type: input.animal_type,
            tag_number: input.tag_number,
            name: input.name,
            breed: input.breed,
            gender: input.gender,
            date_of_birth: input.date_of_birth,
            date_acquired: input.date_acquired.unwrap_or_else(|| Utc::now().date_naive()),
            acquisition_cost,
            status: input.status.unwrap_or(AnimalStatus::Active),
            mother_tag: input.mother_tag,
            father_tag: input.father_tag,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_animal(animal)
    }

    /// Edit an animal
    pub fn update_animal(&self, animal_id: Uuid, input: UpdateAnimalInput) -> AppResult<Animal> {
        // Validate input
        validation::validate_tag_number(&input.tag_number)
            .map_err(|msg| AppError::validation("tag_number", msg))?;
        validation::validate_amount(input.acquisition_cost)
            .map_err(|msg| AppError::validation("acquisition_cost", msg))?;

        let existing = self.store.get_animal(animal_id)?;
        let animal = Animal {
            id: animal_id,
            animal_type: input.animal_type,
            tag_number: input.tag_number,
            name: input.name,
            breed: input.breed,
            gender: input.gender,
            date_of_birth: input.date_of_birth,
            date_acquired: input.date_acquired,
            acquisition_cost: input.acquisition_cost,
            status: input.status,
            mother_tag: input.mother_tag,
            father_tag: input.father_tag,
            notes: input.notes,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        self.store.update_animal(animal)
    }

    /// Get an animal by ID
    pub fn get_animal(&self, animal_id: Uuid) -> AppResult<Animal> {
        self.store.get_animal(animal_id)
    }

    /// Animals matching the filter, most recently added first
    pub fn list_animals(&self, filter: &AnimalFilter) -> Vec<Animal> {
        let mut animals = self.store.list_animals();
        if let Some(animal_type) = &filter.animal_type {
            animals.retain(|a| a.animal_type == *animal_type);
        }
        if let Some(status) = &filter.status {
            animals.retain(|a| a.status == *status);
        }
        animals
    }

    // ========================================================================
    // Milk Production
    // ========================================================================

    /// Record a day's milk. One record exists per animal per day, so a
    /// second call for the same pair overwrites the volumes in place and
    /// keeps the original record's identity.
    pub fn record_milk(&self, input: RecordMilkInput) -> AppResult<MilkProduction> {
        // Validate input
        let morning = input.morning_liters.unwrap_or(Decimal::ZERO);
        let evening = input.evening_liters.unwrap_or(Decimal::ZERO);
        validation::validate_quantity(morning)
            .map_err(|msg| AppError::validation("morning_liters", msg))?;
        validation::validate_quantity(evening)
            .map_err(|msg| AppError::validation("evening_liters", msg))?;

        self.store.get_animal(input.animal_id)?;
        let date = input.date.unwrap_or_else(|| Utc::now().date_naive());
        let notes = input.notes;

        if let Some(existing) = self.store.find_milk_by_day(input.animal_id, date) {
            tracing::debug!(
                "Overwriting milk record for animal {} on {}",
                input.animal_id,
                date
            );
            return self.store.update_milk(MilkProduction {
                id: existing.id,
                animal_id: input.animal_id,
                date,
                morning_liters: morning,
                evening_liters: evening,
                notes,
                created_at: existing.created_at,
            });
        }

        let record = MilkProduction {
            id: Uuid::new_v4(),
            animal_id: input.animal_id,
            date,
            morning_liters: morning,
            evening_liters: evening,
            notes: notes.clone(),
            created_at: Utc::now(),
        };
        match self.store.insert_milk(record) {
            // Another writer can land the same (animal, date) between the
            // lookup and the insert; fold into an update of that row.
            Err(AppError::DuplicateEntry(_)) => {
                let existing = self
                    .store
                    .find_milk_by_day(input.animal_id, date)
                    .ok_or_else(|| AppError::NotFound("Milk record".to_string()))?;
                self.store.update_milk(MilkProduction {
                    id: existing.id,
                    animal_id: input.animal_id,
                    date,
                    morning_liters: morning,
                    evening_liters: evening,
                    notes,
                    created_at: existing.created_at,
                })
            }
            other => other,
        }
    }

    /// Milk records over the trailing window, optionally for one animal.
    /// Totals cover the whole window even when the listing is capped.
    pub fn milk_summary(
        &self,
        today: NaiveDate,
        days: i64,
        animal_id: Option<Uuid>,
    ) -> AppResult<MilkSummary> {
        if let Some(id) = animal_id {
            self.store.get_animal(id)?;
        }

        let window = DateRange::last_n_days(today, days);
        let mut records: Vec<MilkProduction> = self
            .store
            .list_milk()
            .into_iter()
            .filter(|r| window.contains(r.date))
            .filter(|r| animal_id.map_or(true, |id| r.animal_id == id))
            .collect();
        let total_liters: Decimal = records.iter().map(|r| r.total_liters()).sum();
        records.truncate(self.display.page_limit);

        Ok(MilkSummary {
            records,
            total_liters,
        })
    }

    // ========================================================================
    // Health Records
    // ========================================================================

    /// Add a health record for an animal
    pub fn record_health(&self, input: RecordHealthInput) -> AppResult<HealthRecord> {
        // Validate input
        validation::validate_description(&input.description)
            .map_err(|msg| AppError::validation("description", msg))?;
        let cost = input.cost.unwrap_or(Decimal::ZERO);
        validation::validate_amount(cost).map_err(|msg| AppError::validation("cost", msg))?;

        self.store.get_animal(input.animal_id)?;

        let record = HealthRecord {
            id: Uuid::new_v4(),
            animal_id: input.animal_id,
            record_type: input.record_type,
            date: input.date.unwrap_or_else(|| Utc::now().date_naive()),
            description: input.description,
            veterinarian: input.veterinarian,
            cost,
            next_due_date: input.next_due_date,
            notes: input.notes,
            created_at: Utc::now(),
        };
        self.store.insert_health_record(record)
    }

    /// Edit a health record
    pub fn update_health(&self, record_id: Uuid, input: UpdateHealthInput) -> AppResult<HealthRecord> {
        // Validate input
        validation::validate_description(&input.description)
            .map_err(|msg| AppError::validation("description", msg))?;
        validation::validate_amount(input.cost)
            .map_err(|msg| AppError::validation("cost", msg))?;

        let existing = self.store.get_health_record(record_id)?;
        self.store.get_animal(input.animal_id)?;

        let record = HealthRecord {
            id: record_id,
            animal_id: input.animal_id,
            record_type: input.record_type,
            date: input.date,
            description: input.description,
            veterinarian: input.veterinarian,
            cost: input.cost,
            next_due_date: input.next_due_date,
            notes: input.notes,
            created_at: existing.created_at,
        };
        self.store.update_health_record(record)
    }

    /// Health records, newest first, optionally for one animal
    pub fn list_health_records(&self, animal_id: Option<Uuid>) -> AppResult<Vec<HealthRecord>> {
        if let Some(id) = animal_id {
            self.store.get_animal(id)?;
        }
        let mut records = self.store.list_health_records();
        if let Some(id) = animal_id {
            records.retain(|r| r.animal_id == id);
        }
        Ok(records)
    }

    // ========================================================================
    // Breeding
    // ========================================================================

    /// Record a breeding. When no expected delivery is given it is projected
    /// from the breeding date and the species gestation, then kept as-is for
    /// the life of the record.
    pub fn record_pregnancy(&self, input: RecordPregnancyInput) -> AppResult<Pregnancy> {
        // Validate input
        let offspring_count = input.offspring_count.unwrap_or(0);
        validation::validate_count(offspring_count)
            .map_err(|msg| AppError::validation("offspring_count", msg))?;

        let animal = self.store.get_animal(input.animal_id)?;
        let breeding_date = input.breeding_date.unwrap_or_else(|| Utc::now().date_naive());

        let expected_delivery = input
            .expected_delivery
            .or_else(|| Some(projected_delivery(&animal.animal_type, breeding_date)));

        let pregnancy = Pregnancy {
            id: Uuid::new_v4(),
            animal_id: input.animal_id,
            breeding_date,
            bull_tag: input.bull_tag,
            expected_delivery,
            actual_delivery: input.actual_delivery,
            status: input.status.unwrap_or(PregnancyStatus::Bred),
            offspring_count,
            notes: input.notes,
            created_at: Utc::now(),
        };
        self.store.insert_pregnancy(pregnancy)
    }

    /// Edit a pregnancy. The stored expected delivery survives edits,
    /// including a changed breeding date, unless a new value is supplied.
    pub fn update_pregnancy(
        &self,
        pregnancy_id: Uuid,
        input: UpdatePregnancyInput,
    ) -> AppResult<Pregnancy> {
        // Validate input
        validation::validate_count(input.offspring_count)
            .map_err(|msg| AppError::validation("offspring_count", msg))?;

        let existing = self.store.get_pregnancy(pregnancy_id)?;
        self.store.get_animal(input.animal_id)?;

        let expected_delivery = input.expected_delivery.or(existing.expected_delivery);

        let pregnancy = Pregnancy {
            id: pregnancy_id,
            animal_id: input.animal_id,
            breeding_date: input.breeding_date,
            bull_tag: input.bull_tag,
            expected_delivery,
            actual_delivery: input.actual_delivery,
            status: input.status,
            offspring_count: input.offspring_count,
            notes: input.notes,
            created_at: existing.created_at,
        };
        self.store.update_pregnancy(pregnancy)
    }

    /// Pregnancies, most recent breeding first, optionally for one animal
    pub fn list_pregnancies(&self, animal_id: Option<Uuid>) -> AppResult<Vec<Pregnancy>> {
        if let Some(id) = animal_id {
            self.store.get_animal(id)?;
        }
        let mut pregnancies = self.store.list_pregnancies();
        if let Some(id) = animal_id {
            pregnancies.retain(|p| p.animal_id == id);
        }
        Ok(pregnancies)
    }

    // ========================================================================
    // Feed
    // ========================================================================

    /// Record feed bought or used
    pub fn record_feed(&self, input: RecordFeedInput) -> AppResult<FeedRecord> {
        // Validate input
        validation::validate_name(&input.feed_type)
            .map_err(|msg| AppError::validation("feed_type", msg))?;
        validation::validate_quantity(input.quantity_kg)
            .map_err(|msg| AppError::validation("quantity_kg", msg))?;
        validation::validate_amount(input.cost)
            .map_err(|msg| AppError::validation("cost", msg))?;

        let record = FeedRecord {
            id: Uuid::new_v4(),
            date: input.date.unwrap_or_else(|| Utc::now().date_naive()),
            feed_type: input.feed_type,
            quantity_kg: input.quantity_kg,
            cost: input.cost,
            supplier: input.supplier,
            notes: input.notes,
            created_at: Utc::now(),
        };
        self.store.insert_feed_record(record)
    }

    /// Edit a feed record
    pub fn update_feed(&self, record_id: Uuid, input: UpdateFeedInput) -> AppResult<FeedRecord> {
        // Validate input
        validation::validate_name(&input.feed_type)
            .map_err(|msg| AppError::validation("feed_type", msg))?;
        validation::validate_quantity(input.quantity_kg)
            .map_err(|msg| AppError::validation("quantity_kg", msg))?;
        validation::validate_amount(input.cost)
            .map_err(|msg| AppError::validation("cost", msg))?;

        let existing = self.store.get_feed_record(record_id)?;
        let record = FeedRecord {
            id: record_id,
            date: input.date,
            feed_type: input.feed_type,
            quantity_kg: input.quantity_kg,
            cost: input.cost,
            supplier: input.supplier,
            notes: input.notes,
            created_at: existing.created_at,
        };
        self.store.update_feed_record(record)
    }

    /// All feed records, newest first
    pub fn list_feed_records(&self) -> Vec<FeedRecord> {
        self.store.list_feed_records()
    }

    /// Feed cost and volume over the trailing 30 days
    pub fn feed_summary(&self, today: NaiveDate) -> FeedSummary {
        let window = DateRange::last_n_days(today, 30);
        let records = self.store.list_feed_records();
        let in_window: Vec<&FeedRecord> =
            records.iter().filter(|r| window.contains(r.date)).collect();

        FeedSummary {
            total_cost: in_window.iter().map(|r| r.cost).sum(),
            total_quantity_kg: in_window.iter().map(|r| r.quantity_kg).sum(),
        }
    }

    // ========================================================================
    // Rollups
    // ========================================================================

    /// Animal detail: the animal with its recent milk, health history,
    /// and pregnancies
    pub fn animal_summary(&self, animal_id: Uuid, today: NaiveDate) -> AppResult<AnimalSummary> {
        let animal = self.store.get_animal(animal_id)?;
        let age_in_months = animal.age_in_months(today);

        let animal_milk: Vec<MilkProduction> = self
            .store
            .list_milk()
            .into_iter()
            .filter(|r| r.animal_id == animal_id)
            .collect();
        let window = DateRange::last_n_days(today, 30);
        let milk_last_30_days = rollup::total_milk(&animal_milk, &window);
        let mut recent_milk = animal_milk;
        recent_milk.truncate(self.display.history_limit);

        let mut health_records: Vec<HealthRecord> = self
            .store
            .list_health_records()
            .into_iter()
            .filter(|r| r.animal_id == animal_id)
            .collect();
        health_records.truncate(self.display.history_limit);

        let pregnancies: Vec<Pregnancy> = self
            .store
            .list_pregnancies()
            .into_iter()
            .filter(|p| p.animal_id == animal_id)
            .collect();

        Ok(AnimalSummary {
            animal,
            age_in_months,
            recent_milk,
            milk_last_30_days,
            health_records,
            pregnancies,
        })
    }

    /// Dairy home page: herd counts, today's milk, and upcoming care
    pub fn overview(&self, today: NaiveDate) -> DairyOverview {
        let animals = self.store.list_animals();
        let cow_count = animals
            .iter()
            .filter(|a| a.status == AnimalStatus::Active && a.animal_type == AnimalType::Cow)
            .count();
        let sheep_count = animals
            .iter()
            .filter(|a| a.status == AnimalStatus::Active && a.animal_type == AnimalType::Sheep)
            .count();

        let today_liters: Decimal = self
            .store
            .list_milk()
            .iter()
            .filter(|r| r.date == today)
            .map(|r| r.total_liters())
            .sum();

        let health = self.store.list_health_records();
        let mut health_alerts: Vec<HealthAlert> =
            alerts::health_due(&health, today, self.alerts.health_horizon_days)
                .into_iter()
                .filter_map(|record| {
                    let animal = animals.iter().find(|a| a.id == record.animal_id)?.clone();
                    Some(HealthAlert { record, animal })
                })
                .collect();
        health_alerts.truncate(self.display.recent_limit);

        let pregnancies = self.store.list_pregnancies();
        let mut pregnancy_alerts: Vec<PregnancyAlert> =
            alerts::pregnancies_due(&pregnancies, today, self.alerts.pregnancy_horizon_days)
                .into_iter()
                .filter_map(|pregnancy| {
                    let animal = animals.iter().find(|a| a.id == pregnancy.animal_id)?.clone();
                    Some(PregnancyAlert { pregnancy, animal })
                })
                .collect();
        pregnancy_alerts.truncate(self.display.recent_limit);

        DairyOverview {
            cow_count,
            sheep_count,
            today_liters,
            health_alerts,
            pregnancy_alerts,
        }
    }
}
