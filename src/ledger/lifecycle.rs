//! Month lifecycle: setup, finalize/unlock, copying a plan forward

use crate::models::{Category, Money, Month, MonthStatus, Year, MONTHS_PER_YEAR};

/// One row of the setup form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupEntry {
    pub name: String,
    pub amount: Money,
}

impl SetupEntry {
    pub fn new(name: impl Into<String>, amount: Money) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }

    /// A row counts only with a non-blank name and a positive amount
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.amount.is_positive()
    }
}

/// Set up a month's budget from the setup form
///
/// Invalid rows are dropped. With at least one valid row the month becomes
/// ACTIVE, its categories are replaced by the valid rows (fresh ids, no
/// transactions), `total_budget` is their sum and the note is stored. With no
/// valid rows, or a total that would overflow, the month is returned
/// unchanged.
pub fn setup(month: &Month, entries: &[SetupEntry], note: Option<&str>) -> Month {
    let categories: Vec<Category> = entries
        .iter()
        .filter(|e| e.is_valid())
        .map(|e| Category::new(e.name.trim(), e.amount))
        .collect();

    let total = categories
        .iter()
        .try_fold(Money::zero(), |sum, c| sum.checked_add(c.allocated_amount));
    let Some(total) = total.filter(|_| !categories.is_empty()) else {
        return month.clone();
    };

    let mut next = month.clone();
    next.total_budget = total;
    next.categories = categories;
    next.status = MonthStatus::Active;
    next.note = note
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);
    next
}

/// Mark an active month COMPLETED
pub fn finalize(month: &Month) -> Month {
    let mut next = month.clone();
    if next.status == MonthStatus::Active {
        next.status = MonthStatus::Completed;
    }
    next
}

/// Reopen a completed month
pub fn unlock(month: &Month) -> Month {
    let mut next = month.clone();
    if next.status == MonthStatus::Completed {
        next.status = MonthStatus::Active;
    }
    next
}

/// Flip between ACTIVE and COMPLETED; a not-started month stays as is
pub fn toggle_completed(month: &Month) -> Month {
    match month.status {
        MonthStatus::Active => finalize(month),
        MonthStatus::Completed => unlock(month),
        MonthStatus::NotStarted => month.clone(),
    }
}

/// Outcome of copying a month's plan into the following month
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyPlan {
    /// The plan was copied; holds the updated year
    Copied(Year),
    /// The source is December (or out of range); there is no next month in
    /// this year
    NoNextMonth,
    /// The next month is already started and `overwrite` was not given
    WouldOverwrite,
}

/// Copy the plan of month `index` into month `index + 1`
///
/// The next month gets copies of the categories (same name, icon and
/// allocation, fresh ids, empty transaction lists), the same total budget and
/// note, and becomes ACTIVE. If the next month has already been started the
/// copy only happens when `overwrite` is true.
pub fn copy_plan_to_next(year: &Year, index: usize, overwrite: bool) -> CopyPlan {
    if index + 1 >= MONTHS_PER_YEAR {
        return CopyPlan::NoNextMonth;
    }
    let (Some(source), Some(target)) = (year.month(index), year.month(index + 1)) else {
        return CopyPlan::NoNextMonth;
    };

    if target.is_started() && !overwrite {
        return CopyPlan::WouldOverwrite;
    }

    let mut next = target.clone();
    next.categories = source.categories.iter().map(Category::plan_copy).collect();
    next.total_budget = source.total_budget;
    next.note = source.note.clone();
    next.status = MonthStatus::Active;

    CopyPlan::Copied(year.with_month(next))
}
