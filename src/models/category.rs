//! Category ("envelope") model
//!
//! A category is a named bucket holding an allocated amount of money and the
//! transactions recorded against it. The order of categories inside a month is
//! the display order and is controlled by the user.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::money::Money;
use super::transaction::Transaction;

/// A budget envelope within a month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Display icon; mirrors the name
    #[serde(default)]
    pub icon: String,

    /// Money assigned to this envelope
    pub allocated_amount: Money,

    /// Entries in the order they were recorded
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Category {
    /// Create a new category with no transactions
    pub fn new(name: impl Into<String>, allocated_amount: Money) -> Self {
        let name = name.into();
        Self {
            id: CategoryId::new(),
            icon: name.clone(),
            name,
            allocated_amount,
            transactions: Vec::new(),
        }
    }

    /// Copy the plan of this category: same name, icon and allocation, but a
    /// fresh id and no transactions
    pub fn plan_copy(&self) -> Self {
        Self {
            id: CategoryId::new(),
            name: self.name.clone(),
            icon: self.icon.clone(),
            allocated_amount: self.allocated_amount,
            transactions: Vec::new(),
        }
    }

    /// Sum of expense amounts; transfers never count as spending
    pub fn spent(&self) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum()
    }

    /// Allocation left after spending
    pub fn remaining(&self) -> Money {
        self.allocated_amount - self.spent()
    }

    /// Number of expense entries
    pub fn expense_count(&self) -> usize {
        self.transactions.iter().filter(|t| t.is_expense()).count()
    }

    pub fn is_overspent(&self) -> bool {
        self.remaining().is_negative()
    }

    /// Case-insensitive name match, or id match
    pub fn matches(&self, identifier: &str) -> bool {
        self.name.eq_ignore_ascii_case(identifier.trim()) || self.id.matches(identifier)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
