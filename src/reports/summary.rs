//! Month Summary Report
//!
//! Per-envelope allocated/spent/remaining figures and month totals, computed
//! on demand from a month.

use crate::models::{CategoryId, Money, Month, MonthStatus};

/// One envelope row of the summary
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub category_id: CategoryId,
    pub name: String,
    pub allocated: Money,
    pub spent: Money,
    pub remaining: Money,
    /// Number of expense entries
    pub expense_count: usize,
    /// Spent as a percentage of allocation (0 when nothing is allocated)
    pub percent_used: f64,
}

impl CategorySummary {
    pub fn is_overspent(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Month Summary Report
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub period: String,
    pub status: MonthStatus,
    pub note: Option<String>,
    pub total_budget: Money,
    pub total_allocated: Money,
    pub total_spent: Money,
    pub total_remaining: Money,
    /// Rows in display order
    pub categories: Vec<CategorySummary>,
}

impl MonthSummary {
    /// Build the summary for a month
    pub fn from_month(month: &Month) -> Self {
        let categories = month
            .categories
            .iter()
            .map(|c| {
                let spent = c.spent();
                let percent_used = if c.allocated_amount.is_positive() {
                    spent.as_f64() / c.allocated_amount.as_f64() * 100.0
                } else {
                    0.0
                };
                CategorySummary {
                    category_id: c.id,
                    name: c.name.clone(),
                    allocated: c.allocated_amount,
                    spent,
                    remaining: c.allocated_amount - spent,
                    expense_count: c.expense_count(),
                    percent_used,
                }
            })
            .collect();

        Self {
            period: month.period_label(),
            status: month.status,
            note: month.note.clone(),
            total_budget: month.total_budget,
            total_allocated: month.total_allocated(),
            total_spent: month.total_spent(),
            total_remaining: month.total_remaining(),
            categories,
        }
    }

    /// Envelopes whose spending exceeds their allocation
    pub fn overspent(&self) -> Vec<&CategorySummary> {
        self.categories.iter().filter(|c| c.is_overspent()).collect()
    }

    /// Spent as a percentage of the month budget
    pub fn percent_of_budget_spent(&self) -> f64 {
        if self.total_budget.is_positive() {
            self.total_spent.as_f64() / self.total_budget.as_f64() * 100.0
        } else {
            0.0
        }
    }
}
