//! Financial transaction models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single entry in the farm's money log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub transaction_type: TransactionType,
    pub category: TransactionCategory,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub description: String,
    pub payment_method: PaymentMethod,
    /// Who paid or was paid
    pub party_name: Option<String>,
    /// Receipt or M-Pesa confirmation code
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Direction of money movement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "Income"),
            TransactionType::Expense => write!(f, "Expense"),
        }
    }
}

/// What the money was for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionCategory {
    MilkSale,
    CropSale,
    AnimalSale,
    OtherIncome,
    Feed,
    Veterinary,
    Seeds,
    Fertilizer,
    Pesticide,
    Labor,
    Transport,
    Equipment,
    Utilities,
    OtherExpense,
}

impl std::fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionCategory::MilkSale => write!(f, "Milk Sale"),
            TransactionCategory::CropSale => write!(f, "Crop Sale"),
            TransactionCategory::AnimalSale => write!(f, "Animal Sale"),
            TransactionCategory::OtherIncome => write!(f, "Other Income"),
            TransactionCategory::Feed => write!(f, "Feed"),
            TransactionCategory::Veterinary => write!(f, "Veterinary"),
            TransactionCategory::Seeds => write!(f, "Seeds"),
            TransactionCategory::Fertilizer => write!(f, "Fertilizer"),
            TransactionCategory::Pesticide => write!(f, "Pesticide"),
            TransactionCategory::Labor => write!(f, "Labor"),
            TransactionCategory::Transport => write!(f, "Transport"),
            TransactionCategory::Equipment => write!(f, "Equipment"),
            TransactionCategory::Utilities => write!(f, "Utilities"),
            TransactionCategory::OtherExpense => write!(f, "Other Expense"),
        }
    }
}

/// How the money moved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Mpesa,
    Bank,
    Credit,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "Cash"),
            PaymentMethod::Mpesa => write!(f, "M-Pesa"),
            PaymentMethod::Bank => write!(f, "Bank Transfer"),
            PaymentMethod::Credit => write!(f, "Credit"),
        }
    }
}
