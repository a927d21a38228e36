//! Year snapshot
//!
//! The unit of persistence and sync: twelve months, replaced wholesale.

use serde::{Deserialize, Serialize};

use super::month::Month;

/// Number of months in a budget year
pub const MONTHS_PER_YEAR: usize = 12;

/// A budget year of twelve months, indexed 0-11
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Year {
    pub year: i32,
    pub months: Vec<Month>,
}

impl Year {
    /// Create a default year: twelve empty, not-started months
    pub fn new(year: i32) -> Self {
        Self {
            year,
            months: (0..MONTHS_PER_YEAR).map(|i| Month::new(year, i)).collect(),
        }
    }

    pub fn month(&self, index: usize) -> Option<&Month> {
        self.months.get(index)
    }

    /// Return a copy of this year with one month replaced
    ///
    /// The month's own `month_index` decides the slot. An out-of-range index
    /// leaves the year unchanged.
    pub fn with_month(&self, month: Month) -> Self {
        let mut next = self.clone();
        if let Some(slot) = next.months.get_mut(month.month_index) {
            *slot = month;
        }
        next
    }

    /// Repair a snapshot read from disk or the cloud
    ///
    /// Pads missing months, drops extras, and re-stamps each month with its
    /// slot index and the year so a hand-edited file cannot misplace months.
    pub fn normalized(mut self) -> Self {
        self.months.truncate(MONTHS_PER_YEAR);
        while self.months.len() < MONTHS_PER_YEAR {
            let index = self.months.len();
            self.months.push(Month::new(self.year, index));
        }
        for (index, month) in self.months.iter_mut().enumerate() {
            month.month_index = index;
            month.year = self.year;
        }
        self
    }
}

impl Default for Year {
    fn default() -> Self {
        Self::new(chrono::Datelike::year(&chrono::Local::now().date_naive()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, MonthStatus};

    #[test]
    fn test_new_year_has_twelve_empty_months() {
        let year = Year::new(2025);
        assert_eq!(year.months.len(), 12);
        for (i, month) in year.months.iter().enumerate() {
            assert_eq!(month.month_index, i);
            assert_eq!(month.year, 2025);
            assert_eq!(month.status, MonthStatus::NotStarted);
        }
    }

    #[test]
    fn test_with_month_replaces_slot() {
        let year = Year::new(2025);
        let mut march = year.month(2).unwrap().clone();
        march.total_budget = Money::from_dollars(10);

        let updated = year.with_month(march.clone());
        assert_eq!(updated.month(2), Some(&march));
        assert_eq!(year.month(2).unwrap().total_budget, Money::zero());
    }

    #[test]
    fn test_with_month_ignores_out_of_range() {
        let year = Year::new(2025);
        let bogus = Month::new(2025, 12);
        assert_eq!(year.with_month(bogus), year);
    }

    #[test]
    fn test_normalized_pads_and_restamps() {
        let mut year = Year::new(2025);
        year.months.truncate(3);
        year.months[1].month_index = 7;
        year.months[1].year = 1999;

        let year = year.normalized();
        assert_eq!(year.months.len(), 12);
        assert_eq!(year.months[1].month_index, 1);
        assert_eq!(year.months[1].year, 2025);
        assert_eq!(year.months[11].month_index, 11);
    }
}
