//! Dashboard tests: one snapshot drawn across every domain
//!
//! Covers:
//! - Herd counts, milk totals, and the seven-day window
//! - Harvest and delivery dueness on the home screen
//! - Money windows shared with the finance overview
//! - Caps on every recent-items list

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use shamba_core::config::Config;
use shamba_core::services::crops::{CreateFarmInput, CreateSeasonInput, CropService};
use shamba_core::services::dairy::{
    CreateAnimalInput, DairyService, RecordHealthInput, RecordMilkInput, RecordPregnancyInput,
    UpdateAnimalInput,
};
use shamba_core::services::dashboard::DashboardService;
use shamba_core::services::finance::{CreateTransactionInput, FinanceService};
use shamba_core::store::FarmStore;
use shared::models::{
    Animal, AnimalStatus, AnimalType, CropType, Gender, HealthRecordType, PregnancyStatus,
    SeasonStatus, TransactionCategory, TransactionType,
};

// ============================================================================
// Helpers
// ============================================================================

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Farmstead {
    dairy: DairyService,
    crops: CropService,
    finance: FinanceService,
    dashboard: DashboardService,
}

fn farmstead() -> Farmstead {
    let store = FarmStore::new();
    let config = Config::default();
    Farmstead {
        dairy: DairyService::new(store.clone(), &config),
        crops: CropService::new(store.clone(), &config),
        finance: FinanceService::new(store.clone(), &config),
        dashboard: DashboardService::new(store, &config),
    }
}

fn add_animal(dairy: &DairyService, animal_type: AnimalType, tag: &str) -> Animal {
    dairy
        .create_animal(CreateAnimalInput {
            animal_type,
            tag_number: tag.to_string(),
            name: None,
            breed: None,
            gender: Gender::Female,
            date_of_birth: None,
            date_acquired: Some(date(2022, 1, 10)),
            acquisition_cost: None,
            status: None,
            mother_tag: None,
            father_tag: None,
            notes: None,
        })
        .unwrap()
}

fn add_milk(dairy: &DairyService, animal: &Animal, day: NaiveDate, liters: &str) {
    dairy
        .record_milk(RecordMilkInput {
            animal_id: animal.id,
            date: Some(day),
            morning_liters: Some(dec(liters)),
            evening_liters: None,
            notes: None,
        })
        .unwrap();
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// Week liters equal the sum of every session in the trailing seven
    /// days, however the milk is split across animals and days
    #[test]
    fn test_week_liters_sum_across_herd(
        sessions in prop::collection::vec((0..2usize, 0..=7i64, 1..=4000i64), 0..12)
    ) {
        let today = date(2024, 6, 30);
        let farm = farmstead();
        let cows = [
            add_animal(&farm.dairy, AnimalType::Cow, "C-001"),
            add_animal(&farm.dairy, AnimalType::Cow, "C-002"),
        ];

        // One record per animal per day; repeats overwrite, so track the
        // last write per slot
        let mut last: std::collections::HashMap<(usize, i64), Decimal> =
            std::collections::HashMap::new();
        for (which, offset, raw) in &sessions {
            let liters = Decimal::new(*raw, 2);
            farm.dairy.record_milk(RecordMilkInput {
                animal_id: cows[*which].id,
                date: Some(today - Duration::days(*offset)),
                morning_liters: Some(liters),
                evening_liters: None,
                notes: None,
            }).unwrap();
            last.insert((*which, *offset), liters);
        }
        let expected: Decimal = last.values().copied().sum();

        let overview = farm.dashboard.overview(today);
        prop_assert_eq!(overview.week_liters, expected);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod dashboard_tests {
    use super::*;

    #[test]
    fn test_herd_counts_skip_departed_animals() {
        let today = date(2024, 6, 30);
        let farm = farmstead();
        add_animal(&farm.dairy, AnimalType::Cow, "C-001");
        add_animal(&farm.dairy, AnimalType::Sheep, "S-001");
        add_animal(&farm.dairy, AnimalType::Sheep, "S-002");
        let sold = add_animal(&farm.dairy, AnimalType::Cow, "C-002");
        farm.dairy
            .update_animal(sold.id, UpdateAnimalInput {
                animal_type: AnimalType::Cow,
                tag_number: "C-002".to_string(),
                name: None,
                breed: None,
                gender: Gender::Female,
                date_of_birth: None,
                date_acquired: sold.date_acquired,
                acquisition_cost: sold.acquisition_cost,
                status: AnimalStatus::Sold,
                mother_tag: None,
                father_tag: None,
                notes: None,
            })
            .unwrap();

        let overview = farm.dashboard.overview(today);
        assert_eq!(overview.cow_count, 1);
        assert_eq!(overview.sheep_count, 2);
    }

    #[test]
    fn test_milk_windows() {
        let today = date(2024, 6, 30);
        let farm = farmstead();
        let cow = add_animal(&farm.dairy, AnimalType::Cow, "C-001");

        add_milk(&farm.dairy, &cow, today, "12");
        add_milk(&farm.dairy, &cow, today - Duration::days(1), "9");
        add_milk(&farm.dairy, &cow, today - Duration::days(7), "5"); // week edge
        add_milk(&farm.dairy, &cow, today - Duration::days(8), "80"); // outside

        let overview = farm.dashboard.overview(today);
        assert_eq!(overview.today_liters, dec("12"));
        assert_eq!(overview.week_liters, dec("26"));
        // Newest first on the recent list
        assert_eq!(overview.recent_milk[0].date, today);
    }

    #[test]
    fn test_harvest_horizon() {
        let today = date(2024, 6, 1);
        let farm = farmstead();
        let place = farm
            .crops
            .create_farm(CreateFarmInput {
                name: "Riverside".to_string(),
                size_acres: dec("10"),
                location: None,
                soil_type: None,
                notes: None,
            })
            .unwrap();

        let sow = |expected: NaiveDate, status: SeasonStatus| {
            farm.crops
                .create_season(CreateSeasonInput {
                    farm_id: place.id,
                    crop_type: CropType::Maize,
                    crop_variety: None,
                    planting_date: date(2024, 3, 1),
                    expected_harvest_date: expected,
                    actual_harvest_date: None,
                    area_planted_acres: dec("2"),
                    expected_yield_kg: None,
                    actual_yield_kg: None,
                    status: Some(status),
                    notes: None,
                })
                .unwrap()
        };

        let due = sow(today + Duration::days(14), SeasonStatus::Planted);
        sow(today + Duration::days(15), SeasonStatus::Planted); // past the horizon
        sow(today + Duration::days(3), SeasonStatus::Failed); // closed, never due

        let overview = farm.dashboard.overview(today);
        assert_eq!(overview.active_season_count, 2);
        assert_eq!(overview.harvests_due.len(), 1);
        assert_eq!(overview.harvests_due[0].id, due.id);
    }

    #[test]
    fn test_money_windows_match_finance() {
        let today = date(2024, 6, 15);
        let farm = farmstead();

        let entry = |transaction_type, category, day: NaiveDate, amount: &str| {
            farm.finance
                .create_transaction(CreateTransactionInput {
                    transaction_type,
                    category,
                    date: Some(day),
                    amount: dec(amount),
                    description: "Ledger entry".to_string(),
                    payment_method: None,
                    party_name: None,
                    reference: None,
                    notes: None,
                })
                .unwrap()
        };

        entry(TransactionType::Income, TransactionCategory::MilkSale, date(2024, 6, 10), "1000");
        entry(TransactionType::Expense, TransactionCategory::Feed, date(2024, 6, 12), "400");
        entry(TransactionType::Income, TransactionCategory::CropSale, date(2024, 5, 20), "300");

        let overview = farm.dashboard.overview(today);
        assert_eq!(overview.month.income, dec("1000"));
        assert_eq!(overview.month.expense, dec("400"));
        assert_eq!(overview.month.profit, dec("600"));
        assert_eq!(overview.last_30_days.income, dec("1300"));
        assert_eq!(overview.recent_transactions.len(), 3);
    }

    #[test]
    fn test_alert_lists_are_capped_and_paired() {
        let today = date(2024, 5, 10);
        let farm = farmstead();

        for i in 0..7 {
            let cow = add_animal(&farm.dairy, AnimalType::Cow, &format!("C-{:03}", i));
            farm.dairy
                .record_health(RecordHealthInput {
                    animal_id: cow.id,
                    record_type: HealthRecordType::Vaccination,
                    date: Some(date(2024, 4, 1)),
                    description: "Booster".to_string(),
                    veterinarian: None,
                    cost: None,
                    next_due_date: Some(today + Duration::days(i)),
                    notes: None,
                })
                .unwrap();
            farm.dairy
                .record_pregnancy(RecordPregnancyInput {
                    animal_id: cow.id,
                    breeding_date: Some(date(2024, 1, 1)),
                    bull_tag: None,
                    expected_delivery: Some(today + Duration::days(i)),
                    actual_delivery: None,
                    status: Some(PregnancyStatus::Confirmed),
                    offspring_count: None,
                    notes: None,
                })
                .unwrap();
        }

        let overview = farm.dashboard.overview(today);
        assert_eq!(overview.health_alerts.len(), 5);
        assert_eq!(overview.pregnancy_alerts.len(), 5);
        for alert in &overview.health_alerts {
            assert_eq!(alert.animal.id, alert.record.animal_id);
        }
        for alert in &overview.pregnancy_alerts {
            assert_eq!(alert.animal.id, alert.pregnancy.animal_id);
        }
    }

    #[test]
    fn test_empty_farm_overview() {
        let today = date(2024, 6, 30);
        let farm = farmstead();
        let overview = farm.dashboard.overview(today);

        assert_eq!(overview.cow_count, 0);
        assert_eq!(overview.sheep_count, 0);
        assert_eq!(overview.today_liters, Decimal::ZERO);
        assert_eq!(overview.week_liters, Decimal::ZERO);
        assert_eq!(overview.active_season_count, 0);
        assert!(overview.harvests_due.is_empty());
        assert_eq!(overview.month.profit, Decimal::ZERO);
        assert!(overview.health_alerts.is_empty());
        assert!(overview.recent_transactions.is_empty());
    }
}
