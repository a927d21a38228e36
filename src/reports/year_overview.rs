//! Year Overview
//!
//! One line per month: status, budget and spending.

use crate::models::{Money, MonthStatus, Year};

#[derive(Debug, Clone, PartialEq)]
pub struct MonthOverviewRow {
    pub month_index: usize,
    pub name: &'static str,
    pub status: MonthStatus,
    pub total_budget: Money,
    pub total_spent: Money,
    pub envelope_count: usize,
}

/// Year Overview report
#[derive(Debug, Clone, PartialEq)]
pub struct YearOverview {
    pub year: i32,
    pub months: Vec<MonthOverviewRow>,
}

impl YearOverview {
    pub fn from_year(year: &Year) -> Self {
        let months = year
            .months
            .iter()
            .map(|m| MonthOverviewRow {
                month_index: m.month_index,
                name: m.name(),
                status: m.status,
                total_budget: m.total_budget,
                total_spent: m.total_spent(),
                envelope_count: m.categories.len(),
            })
            .collect();

        Self {
            year: year.year,
            months,
        }
    }

    pub fn total_budget(&self) -> Money {
        self.months.iter().map(|m| m.total_budget).sum()
    }

    pub fn total_spent(&self) -> Money {
        self.months.iter().map(|m| m.total_spent).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{self, SetupEntry};

    #[test]
    fn test_overview() {
        let year = Year::new(2025);
        let june = ledger::setup(
            year.month(5).unwrap(),
            &[SetupEntry::new("Rent", Money::from_dollars(1000))],
            None,
        );
        let overview = YearOverview::from_year(&year.with_month(june));

        assert_eq!(overview.months.len(), 12);
        assert_eq!(overview.months[5].name, "June");
        assert_eq!(overview.months[5].status, MonthStatus::Active);
        assert_eq!(overview.months[5].envelope_count, 1);
        assert_eq!(overview.total_budget(), Money::from_dollars(1000));
        assert_eq!(overview.total_spent(), Money::zero());
    }
}
