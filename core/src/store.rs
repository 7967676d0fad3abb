//! In-process entity store backing the domain services
//!
//! Every record table sits behind one lock, so each write is a single atomic
//! unit and readers always see whole records. The store also owns the
//! constraints a relational schema would carry: the one-record-per-animal-
//! per-day rule for milk, unique animal tags, and each entity's listing
//! order.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use uuid::Uuid;

use shared::models::{
    Animal, Budget, CropInput, CropSale, CropSeason, Farm, FeedRecord, HealthRecord,
    MilkProduction, Pregnancy, Transaction,
};

use crate::error::{AppError, AppResult};

#[derive(Debug, Default)]
struct StoreInner {
    farms: Vec<Farm>,
    seasons: Vec<CropSeason>,
    inputs: Vec<CropInput>,
    sales: Vec<CropSale>,
    animals: Vec<Animal>,
    milk_records: Vec<MilkProduction>,
    health_records: Vec<HealthRecord>,
    pregnancies: Vec<Pregnancy>,
    feed_records: Vec<FeedRecord>,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    /// Unique index backing the one-record-per-animal-per-day rule
    milk_by_day: HashMap<(Uuid, NaiveDate), Uuid>,
}

/// Cloneable handle to the farm records store
#[derive(Debug, Clone, Default)]
pub struct FarmStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl FarmStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // Writers mutate only after their checks pass, so a poisoned lock still
    // holds consistent data and can be recovered.
    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ========================================================================
    // Farms
    // ========================================================================

    pub fn insert_farm(&self, farm: Farm) -> AppResult<Farm> {
        let mut inner = self.write();
        inner.farms.push(farm.clone());
        Ok(farm)
    }

    pub fn update_farm(&self, mut farm: Farm) -> AppResult<Farm> {
        let mut inner = self.write();
        let slot = inner
            .farms
            .iter_mut()
            .find(|f| f.id == farm.id)
            .ok_or_else(|| AppError::NotFound("Farm".to_string()))?;
        farm.created_at = slot.created_at;
        *slot = farm.clone();
        Ok(farm)
    }

    pub fn get_farm(&self, farm_id: Uuid) -> AppResult<Farm> {
        let inner = self.read();
        inner
            .farms
            .iter()
            .find(|f| f.id == farm_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Farm".to_string()))
    }

    /// All farms, ordered by name
    pub fn list_farms(&self) -> Vec<Farm> {
        let inner = self.read();
        let mut farms = inner.farms.clone();
        farms.sort_by(|a, b| a.name.cmp(&b.name));
        farms
    }

    // ========================================================================
    // Crop Seasons
    // ========================================================================

    pub fn insert_season(&self, season: CropSeason) -> AppResult<CropSeason> {
        let mut inner = self.write();
        inner.seasons.push(season.clone());
        Ok(season)
    }

    pub fn update_season(&self, mut season: CropSeason) -> AppResult<CropSeason> {
        let mut inner = self.write();
        let slot = inner
            .seasons
            .iter_mut()
            .find(|s| s.id == season.id)
            .ok_or_else(|| AppError::NotFound("Crop season".to_string()))?;
        season.created_at = slot.created_at;
        *slot = season.clone();
        Ok(season)
    }

    pub fn get_season(&self, season_id: Uuid) -> AppResult<CropSeason> {
        let inner = self.read();
        inner
            .seasons
            .iter()
            .find(|s| s.id == season_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Crop season".to_string()))
    }

    /// All seasons, newest planting first
    pub fn list_seasons(&self) -> Vec<CropSeason> {
        let inner = self.read();
        let mut seasons = inner.seasons.clone();
        seasons.sort_by(|a, b| b.planting_date.cmp(&a.planting_date));
        seasons
    }

    // ========================================================================
    // Crop Inputs
    // ========================================================================

    pub fn insert_input(&self, input: CropInput) -> AppResult<CropInput> {
        let mut inner = self.write();
        inner.inputs.push(input.clone());
        Ok(input)
    }

    pub fn update_input(&self, mut input: CropInput) -> AppResult<CropInput> {
        let mut inner = self.write();
        let slot = inner
            .inputs
            .iter_mut()
            .find(|i| i.id == input.id)
            .ok_or_else(|| AppError::NotFound("Crop input".to_string()))?;
        input.created_at = slot.created_at;
        *slot = input.clone();
        Ok(input)
    }

    pub fn get_input(&self, input_id: Uuid) -> AppResult<CropInput> {
        let inner = self.read();
        inner
            .inputs
            .iter()
            .find(|i| i.id == input_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Crop input".to_string()))
    }

    /// Inputs applied to one season, newest first
    pub fn list_inputs_for_season(&self, season_id: Uuid) -> Vec<CropInput> {
        let inner = self.read();
        let mut inputs: Vec<CropInput> = inner
            .inputs
            .iter()
            .filter(|i| i.season_id == season_id)
            .cloned()
            .collect();
        inputs.sort_by(|a, b| b.date.cmp(&a.date));
        inputs
    }

    // ========================================================================
    // Crop Sales
    // ========================================================================

    pub fn insert_sale(&self, sale: CropSale) -> AppResult<CropSale> {
        let mut inner = self.write();
        inner.sales.push(sale.clone());
        Ok(sale)
    }

    pub fn update_sale(&self, mut sale: CropSale) -> AppResult<CropSale> {
        let mut inner = self.write();
        let slot = inner
            .sales
            .iter_mut()
            .find(|s| s.id == sale.id)
            .ok_or_else(|| AppError::NotFound("Crop sale".to_string()))?;
        sale.created_at = slot.created_at;
        *slot = sale.clone();
        Ok(sale)
    }

    pub fn get_sale(&self, sale_id: Uuid) -> AppResult<CropSale> {
        let inner = self.read();
        inner
            .sales
            .iter()
            .find(|s| s.id == sale_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Crop sale".to_string()))
    }

    /// Sales out of one season, newest first
    pub fn list_sales_for_season(&self, season_id: Uuid) -> Vec<CropSale> {
        let inner = self.read();
        let mut sales: Vec<CropSale> = inner
            .sales
            .iter()
            .filter(|s| s.season_id == season_id)
            .cloned()
            .collect();
        sales.sort_by(|a, b| b.date.cmp(&a.date));
        sales
    }

    // ========================================================================
    // Animals
    // ========================================================================

    /// Insert an animal; tag numbers are unique across the herd
    pub fn insert_animal(&self, animal: Animal) -> AppResult<Animal> {
        let mut inner = self.write();
        if inner
            .animals
            .iter()
            .any(|a| a.tag_number == animal.tag_number)
        {
            return Err(AppError::DuplicateEntry("tag number".to_string()));
        }
        inner.animals.push(animal.clone());
        Ok(animal)
    }

    pub fn update_animal(&self, mut animal: Animal) -> AppResult<Animal> {
        let mut inner = self.write();
        if inner
            .animals
            .iter()
            .any(|a| a.id != animal.id && a.tag_number == animal.tag_number)
        {
            return Err(AppError::DuplicateEntry("tag number".to_string()));
        }
        let slot = inner
            .animals
            .iter_mut()
            .find(|a| a.id == animal.id)
            .ok_or_else(|| AppError::NotFound("Animal".to_string()))?;
        animal.created_at = slot.created_at;
        *slot = animal.clone();
        Ok(animal)
    }

    pub fn get_animal(&self, animal_id: Uuid) -> AppResult<Animal> {
        let inner = self.read();
        inner
            .animals
            .iter()
            .find(|a| a.id == animal_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Animal".to_string()))
    }

    /// All animals, most recently added first
    pub fn list_animals(&self) -> Vec<Animal> {
        let inner = self.read();
        let mut animals = inner.animals.clone();
        animals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        animals
    }

    // ========================================================================
    // Milk Production
    // ========================================================================

    /// Insert a milk record; at most one exists per animal per date
    pub fn insert_milk(&self, record: MilkProduction) -> AppResult<MilkProduction> {
        let mut inner = self.write();
        let key = (record.animal_id, record.date);
        if inner.milk_by_day.contains_key(&key) {
            return Err(AppError::DuplicateEntry(
                "milk record for this animal and date".to_string(),
            ));
        }
        inner.milk_by_day.insert(key, record.id);
        inner.milk_records.push(record.clone());
        Ok(record)
    }

    /// Replace a milk record in place, keeping the unique index consistent
    pub fn update_milk(&self, mut record: MilkProduction) -> AppResult<MilkProduction> {
        let mut inner = self.write();
        let old = inner
            .milk_records
            .iter()
            .find(|r| r.id == record.id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Milk record".to_string()))?;
        let key = (record.animal_id, record.date);
        if let Some(existing_id) = inner.milk_by_day.get(&key) {
            if *existing_id != record.id {
                return Err(AppError::DuplicateEntry(
                    "milk record for this animal and date".to_string(),
                ));
            }
        }
        record.created_at = old.created_at;
        inner.milk_by_day.remove(&(old.animal_id, old.date));
        inner.milk_by_day.insert(key, record.id);
        if let Some(slot) = inner.milk_records.iter_mut().find(|r| r.id == record.id) {
            *slot = record.clone();
        }
        Ok(record)
    }

    /// The record for one animal on one date, if any
    pub fn find_milk_by_day(&self, animal_id: Uuid, date: NaiveDate) -> Option<MilkProduction> {
        let inner = self.read();
        let id = inner.milk_by_day.get(&(animal_id, date))?;
        inner.milk_records.iter().find(|r| r.id == *id).cloned()
    }

    /// All milk records, newest first
    pub fn list_milk(&self) -> Vec<MilkProduction> {
        let inner = self.read();
        let mut records = inner.milk_records.clone();
        records.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        records
    }

    // ========================================================================
    // Health Records
    // ========================================================================

    pub fn insert_health_record(&self, record: HealthRecord) -> AppResult<HealthRecord> {
        let mut inner = self.write();
        inner.health_records.push(record.clone());
        Ok(record)
    }

    pub fn update_health_record(&self, mut record: HealthRecord) -> AppResult<HealthRecord> {
        let mut inner = self.write();
        let slot = inner
            .health_records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| AppError::NotFound("Health record".to_string()))?;
        record.created_at = slot.created_at;
        *slot = record.clone();
        Ok(record)
    }

    pub fn get_health_record(&self, record_id: Uuid) -> AppResult<HealthRecord> {
        let inner = self.read();
        inner
            .health_records
            .iter()
            .find(|r| r.id == record_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Health record".to_string()))
    }

    /// All health records, newest first
    pub fn list_health_records(&self) -> Vec<HealthRecord> {
        let inner = self.read();
        let mut records = inner.health_records.clone();
        records.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        records
    }

    // ========================================================================
    // Pregnancies
    // ========================================================================

    pub fn insert_pregnancy(&self, pregnancy: Pregnancy) -> AppResult<Pregnancy> {
        let mut inner = self.write();
        inner.pregnancies.push(pregnancy.clone());
        Ok(pregnancy)
    }

    pub fn update_pregnancy(&self, mut pregnancy: Pregnancy) -> AppResult<Pregnancy> {
        let mut inner = self.write();
        let slot = inner
            .pregnancies
            .iter_mut()
            .find(|p| p.id == pregnancy.id)
            .ok_or_else(|| AppError::NotFound("Pregnancy".to_string()))?;
        pregnancy.created_at = slot.created_at;
        *slot = pregnancy.clone();
        Ok(pregnancy)
    }

    pub fn get_pregnancy(&self, pregnancy_id: Uuid) -> AppResult<Pregnancy> {
        let inner = self.read();
        inner
            .pregnancies
            .iter()
            .find(|p| p.id == pregnancy_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Pregnancy".to_string()))
    }

    /// All pregnancies, most recent breeding first
    pub fn list_pregnancies(&self) -> Vec<Pregnancy> {
        let inner = self.read();
        let mut pregnancies = inner.pregnancies.clone();
        pregnancies.sort_by(|a, b| b.breeding_date.cmp(&a.breeding_date));
        pregnancies
    }

    // ========================================================================
    // Feed Records
    // ========================================================================

    pub fn insert_feed_record(&self, record: FeedRecord) -> AppResult<FeedRecord> {
        let mut inner = self.write();
        inner.feed_records.push(record.clone());
        Ok(record)
    }

    pub fn update_feed_record(&self, mut record: FeedRecord) -> AppResult<FeedRecord> {
        let mut inner = self.write();
        let slot = inner
            .feed_records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| AppError::NotFound("Feed record".to_string()))?;
        record.created_at = slot.created_at;
        *slot = record.clone();
        Ok(record)
    }

    pub fn get_feed_record(&self, record_id: Uuid) -> AppResult<FeedRecord> {
        let inner = self.read();
        inner
            .feed_records
            .iter()
            .find(|r| r.id == record_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Feed record".to_string()))
    }

    /// All feed records, newest first
    pub fn list_feed_records(&self) -> Vec<FeedRecord> {
        let inner = self.read();
        let mut records = inner.feed_records.clone();
        records.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        records
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    pub fn insert_transaction(&self, transaction: Transaction) -> AppResult<Transaction> {
        let mut inner = self.write();
        inner.transactions.push(transaction.clone());
        Ok(transaction)
    }

    pub fn update_transaction(&self, mut transaction: Transaction) -> AppResult<Transaction> {
        let mut inner = self.write();
        let slot = inner
            .transactions
            .iter_mut()
            .find(|t| t.id == transaction.id)
            .ok_or_else(|| AppError::NotFound("Transaction".to_string()))?;
        transaction.created_at = slot.created_at;
        *slot = transaction.clone();
        Ok(transaction)
    }

    /// Transactions are the only deletable entity
    pub fn delete_transaction(&self, transaction_id: Uuid) -> AppResult<()> {
        let mut inner = self.write();
        let position = inner
            .transactions
            .iter()
            .position(|t| t.id == transaction_id)
            .ok_or_else(|| AppError::NotFound("Transaction".to_string()))?;
        inner.transactions.remove(position);
        Ok(())
    }

    pub fn get_transaction(&self, transaction_id: Uuid) -> AppResult<Transaction> {
        let inner = self.read();
        inner
            .transactions
            .iter()
            .find(|t| t.id == transaction_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Transaction".to_string()))
    }

    /// All transactions, newest first
    pub fn list_transactions(&self) -> Vec<Transaction> {
        let inner = self.read();
        let mut transactions = inner.transactions.clone();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        transactions
    }

    // ========================================================================
    // Budgets
    // ========================================================================

    pub fn insert_budget(&self, budget: Budget) -> AppResult<Budget> {
        let mut inner = self.write();
        inner.budgets.push(budget.clone());
        Ok(budget)
    }

    pub fn update_budget(&self, mut budget: Budget) -> AppResult<Budget> {
        let mut inner = self.write();
        let slot = inner
            .budgets
            .iter_mut()
            .find(|b| b.id == budget.id)
            .ok_or_else(|| AppError::NotFound("Budget".to_string()))?;
        budget.created_at = slot.created_at;
        *slot = budget.clone();
        Ok(budget)
    }

    pub fn get_budget(&self, budget_id: Uuid) -> AppResult<Budget> {
        let inner = self.read();
        inner
            .budgets
            .iter()
            .find(|b| b.id == budget_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Budget".to_string()))
    }

    /// All budgets, latest period first
    pub fn list_budgets(&self) -> Vec<Budget> {
        let inner = self.read();
        let mut budgets = inner.budgets.clone();
        budgets.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        budgets
    }
}
