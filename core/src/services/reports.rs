//! Financial reporting service for period summaries and data export

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use shared::models::{Transaction, TransactionType};
use shared::rollup::{self, CategoryTotal};
use shared::types::DateRange;

use super::finance::PeriodTotals;
use crate::error::{AppError, AppResult};
use crate::store::FarmStore;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    store: FarmStore,
}

/// Period totals with category breakdowns for the reports page
#[derive(Debug, Serialize)]
pub struct FinancialReport {
    pub month: PeriodTotals,
    pub previous_month: PeriodTotals,
    pub year_to_date: PeriodTotals,
    /// This month's income grouped by category, largest first
    pub income_by_category: Vec<CategoryTotal>,
    /// This month's expenses grouped by category, largest first
    pub expense_by_category: Vec<CategoryTotal>,
}

/// One ledger entry flattened for CSV export
#[derive(Debug, Serialize)]
pub struct TransactionExportRow {
    pub date: NaiveDate,
    pub transaction_type: String,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    pub payment_method: String,
    pub party_name: String,
    pub reference: String,
}

impl From<&Transaction> for TransactionExportRow {
    fn from(transaction: &Transaction) -> Self {
        Self {
            date: transaction.date,
            transaction_type: transaction.transaction_type.to_string(),
            category: transaction.category.to_string(),
            description: transaction.description.clone(),
            amount: transaction.amount,
            payment_method: transaction.payment_method.to_string(),
            party_name: transaction.party_name.clone().unwrap_or_default(),
            reference: transaction.reference.clone().unwrap_or_default(),
        }
    }
}

impl ReportingService {
    /// Create a new ReportingService instance
    pub fn new(store: FarmStore) -> Self {
        Self { store }
    }

    /// This month, last month, and year to date, with this month's
    /// category breakdowns
    pub fn financial_report(&self, today: NaiveDate) -> FinancialReport {
        let transactions = self.store.list_transactions();

        let month_window = DateRange::month_to_date(today);
        let month = PeriodTotals::for_window(&transactions, &month_window);
        let previous_month =
            PeriodTotals::for_window(&transactions, &DateRange::previous_month(today));
        let year_to_date =
            PeriodTotals::for_window(&transactions, &DateRange::year_to_date(today));

        let month_entries: Vec<Transaction> = transactions
            .into_iter()
            .filter(|t| month_window.contains(t.date))
            .collect();
        let income_by_category =
            rollup::category_breakdown(&month_entries, TransactionType::Income);
        let expense_by_category =
            rollup::category_breakdown(&month_entries, TransactionType::Expense);

        FinancialReport {
            month,
            previous_month,
            year_to_date,
            income_by_category,
            expense_by_category,
        }
    }

    /// Ledger entries inside the window as a CSV document, newest first
    pub fn export_transactions_csv(&self, window: &DateRange) -> AppResult<String> {
        let rows: Vec<TransactionExportRow> = self
            .store
            .list_transactions()
            .iter()
            .filter(|t| window.contains(t.date))
            .map(TransactionExportRow::from)
            .collect();
        Self::export_to_csv(&rows)
    }

    /// Export report data as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}
