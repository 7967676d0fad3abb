//! Whole-farm dashboard rollup across crops, dairy, and finance

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use shared::models::{AnimalStatus, AnimalType, CropSeason, MilkProduction, Transaction};
use shared::rollup;
use shared::types::DateRange;

use super::alerts::{self, HealthAlert, PregnancyAlert};
use super::finance::PeriodTotals;
use crate::config::{AlertsConfig, Config, DisplayConfig};
use crate::store::FarmStore;

/// Dashboard service
#[derive(Clone)]
pub struct DashboardService {
    store: FarmStore,
    alerts: AlertsConfig,
    display: DisplayConfig,
}

/// Everything the landing page shows at a glance
#[derive(Debug, Serialize)]
pub struct DashboardOverview {
    pub cow_count: usize,
    pub sheep_count: usize,
    pub today_liters: Decimal,
    pub week_liters: Decimal,
    pub active_season_count: usize,
    pub harvests_due: Vec<CropSeason>,
    pub month: PeriodTotals,
    pub last_30_days: PeriodTotals,
    pub health_alerts: Vec<HealthAlert>,
    pub pregnancy_alerts: Vec<PregnancyAlert>,
    pub recent_transactions: Vec<Transaction>,
    pub recent_milk: Vec<MilkProduction>,
}

impl DashboardService {
    /// Create a new DashboardService instance
    pub fn new(store: FarmStore, config: &Config) -> Self {
        Self {
            store,
            alerts: config.alerts.clone(),
            display: config.display.clone(),
        }
    }

    /// One pass over every domain for the landing page
    pub fn overview(&self, today: NaiveDate) -> DashboardOverview {
        let animals = self.store.list_animals();
        let cow_count = animals
            .iter()
            .filter(|a| a.status == AnimalStatus::Active && a.animal_type == AnimalType::Cow)
            .count();
        let sheep_count = animals
            .iter()
            .filter(|a| a.status == AnimalStatus::Active && a.animal_type == AnimalType::Sheep)
            .count();

        let milk = self.store.list_milk();
        let today_liters: Decimal = milk
            .iter()
            .filter(|r| r.date == today)
            .map(|r| r.total_liters())
            .sum();
        let week_liters = rollup::total_milk(&milk, &DateRange::last_n_days(today, 7));

        let seasons = self.store.list_seasons();
        let active_season_count = seasons.iter().filter(|s| s.status.is_active()).count();
        let mut harvests_due =
            alerts::harvests_due(&seasons, today, self.alerts.harvest_horizon_days);
        harvests_due.truncate(self.display.recent_limit);

        let transactions = self.store.list_transactions();
        let month = PeriodTotals::for_window(&transactions, &DateRange::month_to_date(today));
        let last_30_days =
            PeriodTotals::for_window(&transactions, &DateRange::last_n_days(today, 30));

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

        let mut recent_transactions = transactions;
        recent_transactions.truncate(self.display.recent_limit);
        let mut recent_milk = milk;
        recent_milk.truncate(self.display.recent_limit);

        DashboardOverview {
            cow_count,
            sheep_count,
            today_liters,
            week_liters,
            active_season_count,
            harvests_due,
            month,
            last_30_days,
            health_alerts,
            pregnancy_alerts,
            recent_transactions,
            recent_milk,
        }
    }
}
