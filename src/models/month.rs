//! Month model
//!
//! A month holds the budget plan for one calendar month: its status, the
//! total budget, an optional note about the funding source, and the ordered
//! list of envelopes.
//!
//! `total_budget` is maintained incrementally by the ledger operations and is
//! never re-derived from the categories here.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::CategoryId;
use super::money::Money;

/// English month names indexed 0-11
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Lifecycle state of a month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MonthStatus {
    /// No budget has been set up yet
    #[default]
    NotStarted,
    /// Budget is set up and open for entries
    Active,
    /// Month has been finalized
    Completed,
}

impl fmt::Display for MonthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "Not started"),
            Self::Active => write!(f, "Active"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

/// One month of a budget year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Month {
    /// Month index, 0 = January
    pub month_index: usize,

    /// Calendar year
    pub year: i32,

    #[serde(default)]
    pub status: MonthStatus,

    /// Total money planned for the month
    #[serde(default)]
    pub total_budget: Money,

    /// Where the money came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Envelopes in display order
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Month {
    /// Create an empty, not-started month
    pub fn new(year: i32, month_index: usize) -> Self {
        Self {
            month_index,
            year,
            status: MonthStatus::NotStarted,
            total_budget: Money::zero(),
            note: None,
            categories: Vec::new(),
        }
    }

    /// Sum of spending across all categories
    pub fn total_spent(&self) -> Money {
        self.categories.iter().map(Category::spent).sum()
    }

    /// Sum of the current category allocations
    ///
    /// This can drift from `total_budget`; the two are only guaranteed equal
    /// right after setup.
    pub fn total_allocated(&self) -> Money {
        self.categories.iter().map(|c| c.allocated_amount).sum()
    }

    /// Sum of what is left in every envelope
    pub fn total_remaining(&self) -> Money {
        self.categories.iter().map(Category::remaining).sum()
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn category_position(&self, id: CategoryId) -> Option<usize> {
        self.categories.iter().position(|c| c.id == id)
    }

    /// Find a category by name (case-insensitive) or id string
    pub fn find_category(&self, identifier: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.matches(identifier))
    }

    pub fn is_started(&self) -> bool {
        self.status != MonthStatus::NotStarted
    }

    pub fn is_completed(&self) -> bool {
        self.status == MonthStatus::Completed
    }

    /// English name of the month
    pub fn name(&self) -> &'static str {
        MONTH_NAMES.get(self.month_index).copied().unwrap_or("Unknown")
    }

    /// Human label such as "January 2025"
    pub fn period_label(&self) -> String {
        format!("{} {}", self.name(), self.year)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.period_label())
    }
}
