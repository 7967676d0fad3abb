//! Finance service for the money ledger and budgets

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::models::{
    Budget, PaymentMethod, Transaction, TransactionCategory, TransactionType,
};
use shared::rollup::{self, BudgetActuals};
use shared::types::DateRange;
use shared::validation;

use crate::config::{Config, DisplayConfig};
use crate::error::{AppError, AppResult};
use crate::store::FarmStore;

/// Finance service for transactions and budget tracking
#[derive(Clone)]
pub struct FinanceService {
    store: FarmStore,
    display: DisplayConfig,
}

/// Input for recording a transaction
#[derive(Debug, Deserialize)]
pub struct CreateTransactionInput {
    pub transaction_type: TransactionType,
    pub category: TransactionCategory,
    /// Defaults to today
    pub date: Option<NaiveDate>,
    pub amount: Decimal,
    pub description: String,
    /// Defaults to `Cash`
    pub payment_method: Option<PaymentMethod>,
    pub party_name: Option<String>,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

/// Input for editing a transaction; every field is written back
#[derive(Debug, Deserialize)]
pub struct UpdateTransactionInput {
    pub transaction_type: TransactionType,
    pub category: TransactionCategory,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub description: String,
    pub payment_method: PaymentMethod,
    pub party_name: Option<String>,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

/// Transaction listing filter; unset fields match everything
#[derive(Debug, Default, Deserialize)]
pub struct TransactionFilter {
    pub transaction_type: Option<TransactionType>,
    pub category: Option<TransactionCategory>,
    /// Keep only the trailing N days
    pub days: Option<i64>,
}

/// Input for creating a budget
#[derive(Debug, Deserialize)]
pub struct CreateBudgetInput {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Defaults to zero
    pub target_income: Option<Decimal>,
    /// Defaults to zero
    pub target_expense: Option<Decimal>,
    pub notes: Option<String>,
}

/// Input for editing a budget
#[derive(Debug, Deserialize)]
pub struct UpdateBudgetInput {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub target_income: Decimal,
    pub target_expense: Decimal,
    pub notes: Option<String>,
}

/// Income, expense, and profit over one window
#[derive(Debug, Clone, Serialize)]
pub struct PeriodTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub profit: Decimal,
}

impl PeriodTotals {
    /// Sum a window of the ledger
    pub fn for_window(transactions: &[Transaction], window: &DateRange) -> Self {
        let income = rollup::sum_transactions(transactions, TransactionType::Income, window);
        let expense = rollup::sum_transactions(transactions, TransactionType::Expense, window);
        Self {
            income,
            expense,
            profit: income - expense,
        }
    }
}

/// Filtered ledger page with totals over the whole filtered set
#[derive(Debug, Serialize)]
pub struct TransactionList {
    pub transactions: Vec<Transaction>,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net: Decimal,
}

/// A budget with its actuals and the transactions inside its period
#[derive(Debug, Serialize)]
pub struct BudgetSummary {
    pub budget: Budget,
    pub actuals: BudgetActuals,
    pub transactions: Vec<Transaction>,
}

/// Finance home page rollup
#[derive(Debug, Serialize)]
pub struct FinanceOverview {
    pub month: PeriodTotals,
    pub last_30_days: PeriodTotals,
    pub recent_transactions: Vec<Transaction>,
    /// Income recorded on credit and not yet collected
    pub pending_credit_income: Decimal,
}

impl FinanceService {
    /// Create a new FinanceService instance
    pub fn new(store: FarmStore, config: &Config) -> Self {
        Self {
            store,
            display: config.display.clone(),
        }
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    /// Record an income or expense entry
    pub fn create_transaction(&self, input: CreateTransactionInput) -> AppResult<Transaction> {
        // Validate input
        validation::validate_description(&input.description)
            .map_err(|msg| AppError::validation("description", msg))?;
        validation::validate_amount(input.amount)
            .map_err(|msg| AppError::validation("amount", msg))?;

        let now = Utc::now();
        let transaction = Transaction {
            id: Uuid::new_v4(),
            transaction_type: input.transaction_type,
            category: input.category,
            date: input.date.unwrap_or_else(|| Utc::now().date_naive()),
            amount: input.amount,
            description: input.description,
            payment_method: input.payment_method.unwrap_or(PaymentMethod::Cash),
            party_name: input.party_name,
            reference: input.reference,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_transaction(transaction)
    }

    /// Edit a transaction
    pub fn update_transaction(
        &self,
        transaction_id: Uuid,
        input: UpdateTransactionInput,
    ) -> AppResult<Transaction> {
        // Validate input
        validation::validate_description(&input.description)
            .map_err(|msg| AppError::validation("description", msg))?;
        validation::validate_amount(input.amount)
            .map_err(|msg| AppError::validation("amount", msg))?;

        let existing = self.store.get_transaction(transaction_id)?;
        let transaction = Transaction {
            id: transaction_id,
            transaction_type: input.transaction_type,
            category: input.category,
            date: input.date,
            amount: input.amount,
            description: input.description,
            payment_method: input.payment_method,
            party_name: input.party_name,
            reference: input.reference,
            notes: input.notes,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        self.store.update_transaction(transaction)
    }

    /// Remove a transaction from the ledger
    pub fn delete_transaction(&self, transaction_id: Uuid) -> AppResult<()> {
        tracing::debug!("Deleting transaction {}", transaction_id);
        self.store.delete_transaction(transaction_id)
    }

    /// Get a transaction by ID
    pub fn get_transaction(&self, transaction_id: Uuid) -> AppResult<Transaction> {
        self.store.get_transaction(transaction_id)
    }

    /// Ledger page matching the filter, newest first. Totals are computed
    /// over everything that matched, not just the rows returned.
    pub fn list_transactions(&self, filter: &TransactionFilter, today: NaiveDate) -> TransactionList {
        let mut transactions = self.store.list_transactions();
        if let Some(transaction_type) = &filter.transaction_type {
            transactions.retain(|t| t.transaction_type == *transaction_type);
        }
        if let Some(category) = &filter.category {
            transactions.retain(|t| t.category == *category);
        }
        if let Some(days) = filter.days {
            let window = DateRange::last_n_days(today, days);
            transactions.retain(|t| window.contains(t.date));
        }

        let total_income: Decimal = transactions
            .iter()
            .filter(|t| t.transaction_type == TransactionType::Income)
            .map(|t| t.amount)
            .sum();
        let total_expense: Decimal = transactions
            .iter()
            .filter(|t| t.transaction_type == TransactionType::Expense)
            .map(|t| t.amount)
            .sum();
        transactions.truncate(self.display.page_limit);

        TransactionList {
            transactions,
            total_income,
            total_expense,
            net: total_income - total_expense,
        }
    }

    // ========================================================================
    // Budgets
    // ========================================================================

    /// Create a budget for a period
    pub fn create_budget(&self, input: CreateBudgetInput) -> AppResult<Budget> {
        // Validate input
        validation::validate_name(&input.name)
            .map_err(|msg| AppError::validation("name", msg))?;
        validation::validate_date_order(input.start_date, input.end_date)
            .map_err(|msg| AppError::validation("end_date", msg))?;
        let target_income = input.target_income.unwrap_or(Decimal::ZERO);
        let target_expense = input.target_expense.unwrap_or(Decimal::ZERO);
        validation::validate_amount(target_income)
            .map_err(|msg| AppError::validation("target_income", msg))?;
        validation::validate_amount(target_expense)
            .map_err(|msg| AppError::validation("target_expense", msg))?;

        let budget = Budget {
            id: Uuid::new_v4(),
            name: input.name,
            start_date: input.start_date,
            end_date: input.end_date,
            target_income,
            target_expense,
            notes: input.notes,
            created_at: Utc::now(),
        };
        self.store.insert_budget(budget)
    }

    /// Edit a budget
    pub fn update_budget(&self, budget_id: Uuid, input: UpdateBudgetInput) -> AppResult<Budget> {
        // Validate input
        validation::validate_name(&input.name)
            .map_err(|msg| AppError::validation("name", msg))?;
        validation::validate_date_order(input.start_date, input.end_date)
            .map_err(|msg| AppError::validation("end_date", msg))?;
        validation::validate_amount(input.target_income)
            .map_err(|msg| AppError::validation("target_income", msg))?;
        validation::validate_amount(input.target_expense)
            .map_err(|msg| AppError::validation("target_expense", msg))?;

        let existing = self.store.get_budget(budget_id)?;
        let budget = Budget {
            id: budget_id,
            name: input.name,
            start_date: input.start_date,
            end_date: input.end_date,
            target_income: input.target_income,
            target_expense: input.target_expense,
            notes: input.notes,
            created_at: existing.created_at,
        };
        self.store.update_budget(budget)
    }

    /// Get a budget by ID
    pub fn get_budget(&self, budget_id: Uuid) -> AppResult<Budget> {
        self.store.get_budget(budget_id)
    }

    /// All budgets, latest period first
    pub fn list_budgets(&self) -> Vec<Budget> {
        self.store.list_budgets()
    }

    /// A budget with its actuals and the ledger entries in its period
    pub fn budget_summary(&self, budget_id: Uuid) -> AppResult<BudgetSummary> {
        let budget = self.store.get_budget(budget_id)?;
        let all = self.store.list_transactions();
        let actuals = rollup::budget_actuals(&budget, &all);

        let period = DateRange::new(budget.start_date, budget.end_date);
        let mut transactions: Vec<Transaction> = all
            .into_iter()
            .filter(|t| period.contains(t.date))
            .collect();
        transactions.truncate(self.display.page_limit);

        Ok(BudgetSummary {
            budget,
            actuals,
            transactions,
        })
    }

    // ========================================================================
    // Rollups
    // ========================================================================

    /// Finance home page: month and trailing-30-day totals, recent entries,
    /// and income still owed on credit
    pub fn overview(&self, today: NaiveDate) -> FinanceOverview {
        let transactions = self.store.list_transactions();

        let month = PeriodTotals::for_window(&transactions, &DateRange::month_to_date(today));
        let last_30_days =
            PeriodTotals::for_window(&transactions, &DateRange::last_n_days(today, 30));

        let pending_credit_income: Decimal = transactions
            .iter()
            .filter(|t| {
                t.transaction_type == TransactionType::Income
                    && t.payment_method == PaymentMethod::Credit
            })
            .map(|t| t.amount)
            .sum();

        let mut recent_transactions = transactions;
        recent_transactions.truncate(self.display.recent_limit);

        FinanceOverview {
            month,
            last_30_days,
            recent_transactions,
            pending_credit_income,
        }
    }
}
