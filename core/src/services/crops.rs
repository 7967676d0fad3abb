//! Crop production service for farms, growing seasons, inputs, and sales

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::models::{
    sale_total, CropInput, CropSale, CropSeason, CropType, Farm, InputType, SalePaymentStatus,
    SeasonStatus,
};
use shared::types::DateRange;
use shared::validation;

use super::alerts;
use crate::config::{AlertsConfig, Config, DisplayConfig};
use crate::error::{AppError, AppResult};
use crate::store::FarmStore;

/// Crop service for managing farms and their growing seasons
#[derive(Clone)]
pub struct CropService {
    store: FarmStore,
    alerts: AlertsConfig,
    display: DisplayConfig,
}

/// Input for creating a farm
#[derive(Debug, Deserialize)]
pub struct CreateFarmInput {
    pub name: String,
    pub size_acres: Decimal,
    pub location: Option<String>,
    pub soil_type: Option<String>,
    pub notes: Option<String>,
}

/// Input for editing a farm; every field is written back
#[derive(Debug, Deserialize)]
pub struct UpdateFarmInput {
    pub name: String,
    pub size_acres: Decimal,
    pub location: Option<String>,
    pub soil_type: Option<String>,
    pub notes: Option<String>,
}

/// Input for creating a crop season
#[derive(Debug, Deserialize)]
pub struct CreateSeasonInput {
    pub farm_id: Uuid,
    pub crop_type: CropType,
    pub crop_variety: Option<String>,
    pub planting_date: NaiveDate,
    pub expected_harvest_date: NaiveDate,
    pub actual_harvest_date: Option<NaiveDate>,
    pub area_planted_acres: Decimal,
    pub expected_yield_kg: Option<Decimal>,
    pub actual_yield_kg: Option<Decimal>,
    /// Defaults to `Planned`
    pub status: Option<SeasonStatus>,
    pub notes: Option<String>,
}

/// Input for editing a crop season; every field is written back
#[derive(Debug, Deserialize)]
pub struct UpdateSeasonInput {
    pub farm_id: Uuid,
    pub crop_type: CropType,
    pub crop_variety: Option<String>,
    pub planting_date: NaiveDate,
    pub expected_harvest_date: NaiveDate,
    pub actual_harvest_date: Option<NaiveDate>,
    pub area_planted_acres: Decimal,
    pub expected_yield_kg: Option<Decimal>,
    pub actual_yield_kg: Option<Decimal>,
    pub status: SeasonStatus,
    pub notes: Option<String>,
}

/// Season listing filter; unset fields match everything
#[derive(Debug, Default, Deserialize)]
pub struct SeasonFilter {
    pub farm_id: Option<Uuid>,
    pub status: Option<SeasonStatus>,
    pub crop_type: Option<CropType>,
}

/// Input for recording an input applied to a season
#[derive(Debug, Deserialize)]
pub struct RecordCropInput {
    pub season_id: Uuid,
    pub input_type: InputType,
    /// Defaults to today
    pub date: Option<NaiveDate>,
    pub description: String,
    pub quantity: Option<String>,
    pub cost: Decimal,
    pub supplier: Option<String>,
    pub notes: Option<String>,
}

/// Input for editing a recorded crop input
#[derive(Debug, Deserialize)]
pub struct UpdateCropInput {
    pub season_id: Uuid,
    pub input_type: InputType,
    pub date: NaiveDate,
    pub description: String,
    pub quantity: Option<String>,
    pub cost: Decimal,
    pub supplier: Option<String>,
    pub notes: Option<String>,
}

/// Input for recording a crop sale
#[derive(Debug, Deserialize)]
pub struct RecordSaleInput {
    pub season_id: Uuid,
    /// Defaults to today
    pub date: Option<NaiveDate>,
    pub quantity_kg: Decimal,
    pub price_per_kg: Decimal,
    pub buyer: Option<String>,
    /// Defaults to `Paid`
    pub payment_status: Option<SalePaymentStatus>,
    pub notes: Option<String>,
}

/// Input for editing a crop sale
#[derive(Debug, Deserialize)]
pub struct UpdateSaleInput {
    pub season_id: Uuid,
    pub date: NaiveDate,
    pub quantity_kg: Decimal,
    pub price_per_kg: Decimal,
    pub buyer: Option<String>,
    pub payment_status: SalePaymentStatus,
    pub notes: Option<String>,
}

/// Money in and out of one season
#[derive(Debug, Clone, Serialize)]
pub struct SeasonFinancials {
    pub total_input_cost: Decimal,
    pub total_revenue: Decimal,
    pub profit: Decimal,
}

/// Crops home page rollup
#[derive(Debug, Serialize)]
pub struct CropsOverview {
    pub farm_count: usize,
    pub total_acres: Decimal,
    pub active_season_count: usize,
    pub harvests_due: Vec<CropSeason>,
    pub recent_harvests: Vec<CropSeason>,
}

impl CropService {
    /// Create a new CropService instance
    pub fn new(store: FarmStore, config: &Config) -> Self {
        Self {
            store,
            alerts: config.alerts.clone(),
            display: config.display.clone(),
        }
    }

    // ========================================================================
    // Farms
    // ========================================================================

    /// Register a farm
    pub fn create_farm(&self, input: CreateFarmInput) -> AppResult<Farm> {
        // Validate input
        validation::validate_name(&input.name)
            .map_err(|msg| AppError::validation("name", msg))?;
        validation::validate_quantity(input.size_acres)
            .map_err(|msg| AppError::validation("size_acres", msg))?;

        let farm = Farm {
            id: Uuid::new_v4(),
            name: input.name,
            size_acres: input.size_acres,
            location: input.location,
            soil_type: input.soil_type,
            notes: input.notes,
            created_at: Utc::now(),
        };
        self.store.insert_farm(farm)
    }

    /// Edit a farm
    pub fn update_farm(&self, farm_id: Uuid, input: UpdateFarmInput) -> AppResult<Farm> {
        // Validate input
        validation::validate_name(&input.name)
            .map_err(|msg| AppError::validation("name", msg))?;
        validation::validate_quantity(input.size_acres)
            .map_err(|msg| AppError::validation("size_acres", msg))?;

        let existing = self.store.get_farm(farm_id)?;
        let farm = Farm {
            id: farm_id,
            name: input.name,
            size_acres: input.size_acres,
            location: input.location,
            soil_type: input.soil_type,
            notes: input.notes,
            created_at: existing.created_at,
        };
        self.store.update_farm(farm)
    }

    /// Get a farm by ID
    pub fn get_farm(&self, farm_id: Uuid) -> AppResult<Farm> {
        self.store.get_farm(farm_id)
    }

    /// All farms, ordered by name
    pub fn list_farms(&self) -> Vec<Farm> {
        self.store.list_farms()
    }

    // ========================================================================
    // Crop Seasons
    // ========================================================================

    /// Start a growing season on a farm
    pub fn create_season(&self, input: CreateSeasonInput) -> AppResult<CropSeason> {
        // Validate input
        validation::validate_quantity(input.area_planted_acres)
            .map_err(|msg| AppError::validation("area_planted_acres", msg))?;
        if let Some(expected) = input.expected_yield_kg {
            validation::validate_quantity(expected)
                .map_err(|msg| AppError::validation("expected_yield_kg", msg))?;
        }
        if let Some(actual) = input.actual_yield_kg {
            validation::validate_quantity(actual)
                .map_err(|msg| AppError::validation("actual_yield_kg", msg))?;
        }
        validation::validate_date_order(input.planting_date, input.expected_harvest_date)
            .map_err(|msg| AppError::validation("expected_harvest_date", msg))?;

        self.store.get_farm(input.farm_id)?;

        let status = input.status.unwrap_or(SeasonStatus::Planned);
        if status == SeasonStatus::Harvested && input.actual_harvest_date.is_none() {
            tracing::warn!(
                "Season of {} marked harvested without an actual harvest date",
                input.crop_type
            );
        }

        let now = Utc::now();
        let season = CropSeason {
            id: Uuid::new_v4(),
            farm_id: input.farm_id,
            crop_type: input.crop_type,
            crop_variety: input.crop_variety,
            planting_date: input.planting_date,
            expected_harvest_date: input.expected_harvest_date,
            actual_harvest_date: input.actual_harvest_date,
            area_planted_acres: input.area_planted_acres,
            expected_yield_kg: input.expected_yield_kg,
            actual_yield_kg: input.actual_yield_kg,
            status,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_season(season)
    }

    /// Edit a crop season
    pub fn update_season(&self, season_id: Uuid, input: UpdateSeasonInput) -> AppResult<CropSeason> {
        // Validate input
        validation::validate_quantity(input.area_planted_acres)
            .map_err(|msg| AppError::validation("area_planted_acres", msg))?;
        if let Some(expected) = input.expected_yield_kg {
            validation::validate_quantity(expected)
                .map_err(|msg| AppError::validation("expected_yield_kg", msg))?;
        }
        if let Some(actual) = input.actual_yield_kg {
            validation::validate_quantity(actual)
                .map_err(|msg| AppError::validation("actual_yield_kg", msg))?;
        }
        validation::validate_date_order(input.planting_date, input.expected_harvest_date)
            .map_err(|msg| AppError::validation("expected_harvest_date", msg))?;

        let existing = self.store.get_season(season_id)?;
        self.store.get_farm(input.farm_id)?;

        if input.status == SeasonStatus::Harvested && input.actual_harvest_date.is_none() {
            tracing::warn!(
                "Season {} marked harvested without an actual harvest date",
                season_id
            );
        }

        let season = CropSeason {
            id: season_id,
            farm_id: input.farm_id,
            crop_type: input.crop_type,
            crop_variety: input.crop_variety,
            planting_date: input.planting_date,
            expected_harvest_date: input.expected_harvest_date,
            actual_harvest_date: input.actual_harvest_date,
            area_planted_acres: input.area_planted_acres,
            expected_yield_kg: input.expected_yield_kg,
            actual_yield_kg: input.actual_yield_kg,
            status: input.status,
            notes: input.notes,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        self.store.update_season(season)
    }

    /// Get a crop season by ID
    pub fn get_season(&self, season_id: Uuid) -> AppResult<CropSeason> {
        self.store.get_season(season_id)
    }

    /// Seasons matching the filter, newest planting first
    pub fn list_seasons(&self, filter: &SeasonFilter) -> Vec<CropSeason> {
        let mut seasons = self.store.list_seasons();
        if let Some(farm_id) = filter.farm_id {
            seasons.retain(|s| s.farm_id == farm_id);
        }
        if let Some(status) = &filter.status {
            seasons.retain(|s| s.status == *status);
        }
        if let Some(crop_type) = &filter.crop_type {
            seasons.retain(|s| s.crop_type == *crop_type);
        }
        seasons
    }

    // ========================================================================
    // Crop Inputs
    // ========================================================================

    /// Record seeds, fertilizer, labor, or other input applied to a season
    pub fn record_input(&self, input: RecordCropInput) -> AppResult<CropInput> {
        // Validate input
        validation::validate_description(&input.description)
            .map_err(|msg| AppError::validation("description", msg))?;
        validation::validate_amount(input.cost)
            .map_err(|msg| AppError::validation("cost", msg))?;

        self.store.get_season(input.season_id)?;

        let record = CropInput {
            id: Uuid::new_v4(),
            season_id: input.season_id,
            input_type: input.input_type,
            date: input.date.unwrap_or_else(|| Utc::now().date_naive()),
            description: input.description,
            quantity: input.quantity,
            cost: input.cost,
            supplier: input.supplier,
            notes: input.notes,
            created_at: Utc::now(),
        };
        self.store.insert_input(record)
    }

    /// Edit a recorded crop input
    pub fn update_input(&self, input_id: Uuid, input: UpdateCropInput) -> AppResult<CropInput> {
        // Validate input
        validation::validate_description(&input.description)
            .map_err(|msg| AppError::validation("description", msg))?;
        validation::validate_amount(input.cost)
            .map_err(|msg| AppError::validation("cost", msg))?;

        let existing = self.store.get_input(input_id)?;
        self.store.get_season(input.season_id)?;

        let record = CropInput {
            id: input_id,
            season_id: input.season_id,
            input_type: input.input_type,
            date: input.date,
            description: input.description,
            quantity: input.quantity,
            cost: input.cost,
            supplier: input.supplier,
            notes: input.notes,
            created_at: existing.created_at,
        };
        self.store.update_input(record)
    }

    /// Inputs applied to one season, newest first
    pub fn list_inputs(&self, season_id: Uuid) -> AppResult<Vec<CropInput>> {
        self.store.get_season(season_id)?;
        Ok(self.store.list_inputs_for_season(season_id))
    }

    // ========================================================================
    // Crop Sales
    // ========================================================================

    /// Record a sale out of a season. The total is always quantity times
    /// price; any caller-supplied total is ignored.
    pub fn record_sale(&self, input: RecordSaleInput) -> AppResult<CropSale> {
        // Validate input
        validation::validate_quantity(input.quantity_kg)
            .map_err(|msg| AppError::validation("quantity_kg", msg))?;
        validation::validate_amount(input.price_per_kg)
            .map_err(|msg| AppError::validation("price_per_kg", msg))?;

        self.store.get_season(input.season_id)?;

        let sale = CropSale {
            id: Uuid::new_v4(),
            season_id: input.season_id,
            date: input.date.unwrap_or_else(|| Utc::now().date_naive()),
            quantity_kg: input.quantity_kg,
            price_per_kg: input.price_per_kg,
            total_amount: sale_total(input.quantity_kg, input.price_per_kg),
            buyer: input.buyer,
            payment_status: input.payment_status.unwrap_or(SalePaymentStatus::Paid),
            notes: input.notes,
            created_at: Utc::now(),
        };
        self.store.insert_sale(sale)
    }

    /// Edit a crop sale, recomputing the total
    pub fn update_sale(&self, sale_id: Uuid, input: UpdateSaleInput) -> AppResult<CropSale> {
        // Validate input
        validation::validate_quantity(input.quantity_kg)
            .map_err(|msg| AppError::validation("quantity_kg", msg))?;
        validation::validate_amount(input.price_per_kg)
            .map_err(|msg| AppError::validation("price_per_kg", msg))?;

        let existing = self.store.get_sale(sale_id)?;
        self.store.get_season(input.season_id)?;

        let sale = CropSale {
            id: sale_id,
            season_id: input.season_id,
            date: input.date,
            quantity_kg: input.quantity_kg,
            price_per_kg: input.price_per_kg,
            total_amount: sale_total(input.quantity_kg, input.price_per_kg),
            buyer: input.buyer,
            payment_status: input.payment_status,
            notes: input.notes,
            created_at: existing.created_at,
        };
        self.store.update_sale(sale)
    }

    /// Sales out of one season, newest first
    pub fn list_sales(&self, season_id: Uuid) -> AppResult<Vec<CropSale>> {
        self.store.get_season(season_id)?;
        Ok(self.store.list_sales_for_season(season_id))
    }

    // ========================================================================
    // Rollups
    // ========================================================================

    /// Input cost, sale revenue, and profit for one season
    pub fn season_financials(&self, season_id: Uuid) -> AppResult<SeasonFinancials> {
        self.store.get_season(season_id)?;

        let total_input_cost: Decimal = self
            .store
            .list_inputs_for_season(season_id)
            .iter()
            .map(|i| i.cost)
            .sum();
        let total_revenue: Decimal = self
            .store
            .list_sales_for_season(season_id)
            .iter()
            .map(|s| s.total_amount)
            .sum();

        Ok(SeasonFinancials {
            total_input_cost,
            total_revenue,
            profit: total_revenue - total_input_cost,
        })
    }

    /// Crops home page: farm totals, upcoming harvests, recent harvests
    pub fn overview(&self, today: NaiveDate) -> CropsOverview {
        let farms = self.store.list_farms();
        let seasons = self.store.list_seasons();

        let total_acres = farms.iter().map(|f| f.size_acres).sum();
        let active_season_count = seasons.iter().filter(|s| s.status.is_active()).count();

        let mut harvests_due =
            alerts::harvests_due(&seasons, today, self.alerts.harvest_horizon_days);
        harvests_due.truncate(self.display.recent_limit);

        let window = DateRange::last_n_days(today, 30);
        let mut recent_harvests: Vec<CropSeason> = seasons
            .iter()
            .filter(|s| {
                s.status == SeasonStatus::Harvested
                    && s.actual_harvest_date.is_some_and(|d| window.contains(d))
            })
            .cloned()
            .collect();
        recent_harvests.sort_by(|a, b| b.actual_harvest_date.cmp(&a.actual_harvest_date));
        recent_harvests.truncate(self.display.recent_limit);

        CropsOverview {
            farm_count: farms.len(),
            total_acres,
            active_season_count,
            harvests_due,
            recent_harvests,
        }
    }
}
