//! Transaction model
//!
//! Transactions live inside the category they were recorded against. They are
//! never edited or deleted individually; deleting the owning category discards
//! them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// Kind of a ledger transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Money spent out of the envelope
    Expense,
    /// Allocation received (transfer or top-up)
    TransferIn,
    /// Allocation moved out to another envelope
    TransferOut,
}

impl TransactionType {
    /// Whether this kind counts toward "spent"
    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::TransferIn => "transfer in",
            Self::TransferOut => "transfer out",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single ledger entry within a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Calendar date of the entry
    pub date: NaiveDate,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Amount, always positive; the kind carries the direction
    pub amount: Money,

    /// Transaction kind
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Transaction {
    /// Create a new transaction with a fresh id
    pub fn new(
        kind: TransactionType,
        date: NaiveDate,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            date,
            description: description.into(),
            amount,
            kind,
        }
    }

    pub fn expense(date: NaiveDate, amount: Money, description: impl Into<String>) -> Self {
        Self::new(TransactionType::Expense, date, amount, description)
    }

    pub fn transfer_in(date: NaiveDate, amount: Money, description: impl Into<String>) -> Self {
        Self::new(TransactionType::TransferIn, date, amount, description)
    }

    pub fn transfer_out(date: NaiveDate, amount: Money, description: impl Into<String>) -> Self {
        Self::new(TransactionType::TransferOut, date, amount, description)
    }

    pub fn is_expense(&self) -> bool {
        self.kind.is_expense()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date, self.amount, self.description, self.kind
        )
    }
}
