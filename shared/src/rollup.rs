//! Aggregation helpers over record collections
//!
//! Everything here is pure: callers pass record snapshots and an explicit
//! window, and empty input always sums to zero.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Budget, MilkProduction, Transaction, TransactionCategory, TransactionType};
use crate::types::DateRange;

/// Sum of `amount` over the items whose `date` falls inside the window
pub fn windowed_sum<T>(
    items: &[T],
    date: impl Fn(&T) -> NaiveDate,
    amount: impl Fn(&T) -> Decimal,
    window: &DateRange,
) -> Decimal {
    items
        .iter()
        .filter(|item| window.contains(date(item)))
        .map(amount)
        .sum()
}

/// Sum of transaction amounts of one type inside the window
pub fn sum_transactions(
    transactions: &[Transaction],
    transaction_type: TransactionType,
    window: &DateRange,
) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.transaction_type == transaction_type && window.contains(t.date))
        .map(|t| t.amount)
        .sum()
}

/// Total liters across milk records inside the window
pub fn total_milk(records: &[MilkProduction], window: &DateRange) -> Decimal {
    records
        .iter()
        .filter(|r| window.contains(r.date))
        .map(|r| r.total_liters())
        .sum()
}

/// Actuals for a budget period, computed from the transaction log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BudgetActuals {
    pub actual_income: Decimal,
    pub actual_expense: Decimal,
    pub actual_profit: Decimal,
    pub expected_profit: Decimal,
}

/// Compare a budget's targets with what the transaction log says happened.
/// The budget period is inclusive of both its start and end dates.
pub fn budget_actuals(budget: &Budget, transactions: &[Transaction]) -> BudgetActuals {
    let window = DateRange::new(budget.start_date, budget.end_date);
    let actual_income = sum_transactions(transactions, TransactionType::Income, &window);
    let actual_expense = sum_transactions(transactions, TransactionType::Expense, &window);
    BudgetActuals {
        actual_income,
        actual_expense,
        actual_profit: actual_income - actual_expense,
        expected_profit: budget.expected_profit(),
    }
}

/// Summed total for one transaction category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: TransactionCategory,
    pub total: Decimal,
}

/// Per-category totals for one transaction type, largest first.
/// Equal totals fall back to category name order so the result is
/// deterministic.
pub fn category_breakdown(
    transactions: &[Transaction],
    transaction_type: TransactionType,
) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for transaction in transactions {
        if transaction.transaction_type != transaction_type {
            continue;
        }
        match totals
            .iter_mut()
            .find(|entry| entry.category == transaction.category)
        {
            Some(entry) => entry.total += transaction.amount,
            None => totals.push(CategoryTotal {
                category: transaction.category.clone(),
                total: transaction.amount,
            }),
        }
    }
    totals.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.to_string().cmp(&b.category.to_string()))
    });
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentMethod;
    use chrono::{Duration, Utc};
    use proptest::prelude::*;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn transaction(
        day: NaiveDate,
        transaction_type: TransactionType,
        category: TransactionCategory,
        amount: Decimal,
    ) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            transaction_type,
            category,
            date: day,
            amount,
            description: "entry".to_string(),
            payment_method: PaymentMethod::Cash,
            party_name: None,
            reference: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn milk(day: NaiveDate, morning: Decimal, evening: Decimal) -> MilkProduction {
        MilkProduction {
            id: Uuid::new_v4(),
            animal_id: Uuid::new_v4(),
            date: day,
            morning_liters: morning,
            evening_liters: evening,
            notes: None,
            created_at: Utc::now(),
        }
    }

    // ========================================================================
    // Windowed Sum Tests
    // ========================================================================

    #[test]
    fn test_windowed_sum_includes_both_boundaries() {
        let window = DateRange::new(date(2024, 5, 1), date(2024, 5, 31));
        let records = vec![
            milk(date(2024, 4, 30), dec("9"), dec("9")),
            milk(date(2024, 5, 1), dec("5"), dec("4")),
            milk(date(2024, 5, 31), dec("3"), dec("2")),
            milk(date(2024, 6, 1), dec("9"), dec("9")),
        ];
        let total = windowed_sum(&records, |r| r.date, |r| r.total_liters(), &window);
        assert_eq!(total, dec("14"));
    }

    #[test]
    fn test_windowed_sum_empty_is_zero() {
        let window = DateRange::new(date(2024, 5, 1), date(2024, 5, 31));
        let records: Vec<MilkProduction> = vec![];
        let total = windowed_sum(&records, |r| r.date, |r| r.total_liters(), &window);
        assert_eq!(total, Decimal::ZERO);
    }

    #[test]
    fn test_sum_transactions_filters_by_type() {
        let window = DateRange::new(date(2024, 5, 1), date(2024, 5, 31));
        let transactions = vec![
            transaction(
                date(2024, 5, 10),
                TransactionType::Income,
                TransactionCategory::MilkSale,
                dec("1500"),
            ),
            transaction(
                date(2024, 5, 12),
                TransactionType::Expense,
                TransactionCategory::Feed,
                dec("400"),
            ),
        ];
        assert_eq!(
            sum_transactions(&transactions, TransactionType::Income, &window),
            dec("1500")
        );
        assert_eq!(
            sum_transactions(&transactions, TransactionType::Expense, &window),
            dec("400")
        );
    }

    // ========================================================================
    // Budget Actuals Tests
    // ========================================================================

    fn budget(start: NaiveDate, end: NaiveDate, income: Decimal, expense: Decimal) -> Budget {
        Budget {
            id: Uuid::new_v4(),
            name: "Season budget".to_string(),
            start_date: start,
            end_date: end,
            target_income: income,
            target_expense: expense,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_budget_actuals_sums_only_the_period() {
        let b = budget(date(2024, 5, 1), date(2024, 5, 31), dec("5000"), dec("3000"));
        let transactions = vec![
            transaction(
                date(2024, 4, 30),
                TransactionType::Income,
                TransactionCategory::MilkSale,
                dec("999"),
            ),
            transaction(
                date(2024, 5, 1),
                TransactionType::Income,
                TransactionCategory::MilkSale,
                dec("1200"),
            ),
            transaction(
                date(2024, 5, 31),
                TransactionType::Expense,
                TransactionCategory::Feed,
                dec("700"),
            ),
        ];
        let actuals = budget_actuals(&b, &transactions);
        assert_eq!(actuals.actual_income, dec("1200"));
        assert_eq!(actuals.actual_expense, dec("700"));
        assert_eq!(actuals.actual_profit, dec("500"));
        assert_eq!(actuals.expected_profit, dec("2000"));
    }

    #[test]
    fn test_budget_actuals_with_no_transactions_is_all_zero() {
        let b = budget(date(2024, 5, 1), date(2024, 5, 31), dec("5000"), dec("3000"));
        let actuals = budget_actuals(&b, &[]);
        assert_eq!(actuals.actual_income, Decimal::ZERO);
        assert_eq!(actuals.actual_expense, Decimal::ZERO);
        assert_eq!(actuals.actual_profit, Decimal::ZERO);
        assert_eq!(actuals.expected_profit, dec("2000"));
    }

    // ========================================================================
    // Category Breakdown Tests
    // ========================================================================

    #[test]
    fn test_category_breakdown_sorts_by_total_descending() {
        let transactions = vec![
            transaction(
                date(2024, 5, 2),
                TransactionType::Income,
                TransactionCategory::CropSale,
                dec("30"),
            ),
            transaction(
                date(2024, 5, 3),
                TransactionType::Income,
                TransactionCategory::MilkSale,
                dec("100"),
            ),
            transaction(
                date(2024, 5, 4),
                TransactionType::Income,
                TransactionCategory::MilkSale,
                dec("50"),
            ),
        ];
        let breakdown = category_breakdown(&transactions, TransactionType::Income);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, TransactionCategory::MilkSale);
        assert_eq!(breakdown[0].total, dec("150"));
        assert_eq!(breakdown[1].category, TransactionCategory::CropSale);
        assert_eq!(breakdown[1].total, dec("30"));
    }

    #[test]
    fn test_category_breakdown_breaks_ties_by_name() {
        let transactions = vec![
            transaction(
                date(2024, 5, 2),
                TransactionType::Income,
                TransactionCategory::MilkSale,
                dec("80"),
            ),
            transaction(
                date(2024, 5, 3),
                TransactionType::Income,
                TransactionCategory::CropSale,
                dec("80"),
            ),
        ];
        let breakdown = category_breakdown(&transactions, TransactionType::Income);
        assert_eq!(breakdown[0].category, TransactionCategory::CropSale);
        assert_eq!(breakdown[1].category, TransactionCategory::MilkSale);
    }

    #[test]
    fn test_category_breakdown_ignores_the_other_type() {
        let transactions = vec![transaction(
            date(2024, 5, 2),
            TransactionType::Expense,
            TransactionCategory::Feed,
            dec("400"),
        )];
        let breakdown = category_breakdown(&transactions, TransactionType::Income);
        assert!(breakdown.is_empty());
    }

    // ========================================================================
    // Properties
    // ========================================================================

    proptest! {
        /// Category totals partition the type total exactly
        #[test]
        fn prop_category_totals_sum_to_type_total(
            entries in proptest::collection::vec((0i64..10_000, 0usize..4), 0..40)
        ) {
            let categories = [
                TransactionCategory::MilkSale,
                TransactionCategory::CropSale,
                TransactionCategory::AnimalSale,
                TransactionCategory::OtherIncome,
            ];
            let day = date(2024, 1, 1);
            let transactions: Vec<Transaction> = entries
                .iter()
                .map(|(amount, idx)| {
                    transaction(
                        day,
                        TransactionType::Income,
                        categories[*idx].clone(),
                        Decimal::from(*amount),
                    )
                })
                .collect();

            let breakdown = category_breakdown(&transactions, TransactionType::Income);
            let breakdown_total: Decimal = breakdown.iter().map(|entry| entry.total).sum();
            let window = DateRange::new(day, day);
            prop_assert_eq!(
                breakdown_total,
                sum_transactions(&transactions, TransactionType::Income, &window)
            );
        }

        /// Narrowing the window never increases a sum of non-negative amounts
        #[test]
        fn prop_windowed_sum_is_monotonic_in_the_window(
            entries in proptest::collection::vec((0i64..90, 0i64..1_000), 0..40)
        ) {
            let base = date(2024, 1, 1);
            let records: Vec<MilkProduction> = entries
                .iter()
                .map(|(offset, liters)| {
                    milk(base + Duration::days(*offset), Decimal::from(*liters), Decimal::ZERO)
                })
                .collect();

            let full = DateRange::new(base, base + Duration::days(89));
            let narrow = DateRange::new(base, base + Duration::days(30));
            let full_total = total_milk(&records, &full);
            let narrow_total = total_milk(&records, &narrow);
            prop_assert!(narrow_total <= full_total);
        }
    }
}
