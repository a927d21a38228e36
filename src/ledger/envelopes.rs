//! Envelope list edits: add, delete, reorder

use std::fmt;
use std::str::FromStr;

use crate::models::{Category, CategoryId, Money, Month};

/// Direction for moving an envelope in the display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the start of the list
    Up,
    /// Toward the end of the list
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "u" => Ok(Self::Up),
            "down" | "d" => Ok(Self::Down),
            other => Err(format!("Unknown direction '{}'. Use 'up' or 'down'", other)),
        }
    }
}

/// Append a new envelope and grow the month total by its allocation
///
/// No-op when the trimmed name is empty, the amount is negative or the month
/// total would overflow.
pub fn add_category(month: &Month, name: &str, amount: Money) -> Month {
    let name = name.trim();
    if name.is_empty() || amount.is_negative() {
        return month.clone();
    }
    let Some(total) = month.total_budget.checked_add(amount) else {
        return month.clone();
    };

    let mut next = month.clone();
    next.categories.push(Category::new(name, amount));
    next.total_budget = total;
    next
}

/// Remove an envelope with all its transactions and shrink the month total
/// by its allocation
///
/// Confirmation is the caller's job; by the time this runs the user has said
/// yes.
pub fn delete_category(month: &Month, id: CategoryId) -> Month {
    let Some(position) = month.category_position(id) else {
        return month.clone();
    };

    let Some(total) = month
        .total_budget
        .checked_sub(month.categories[position].allocated_amount)
    else {
        return month.clone();
    };

    let mut next = month.clone();
    next.categories.remove(position);
    next.total_budget = total;
    next
}

/// Swap an envelope with its neighbour in the given direction
///
/// Moving the first entry up or the last entry down is a no-op.
pub fn reorder_category(month: &Month, id: CategoryId, direction: Direction) -> Month {
    let Some(position) = month.category_position(id) else {
        return month.clone();
    };

    let target = match direction {
        Direction::Up => position.checked_sub(1),
        Direction::Down => Some(position + 1).filter(|t| *t < month.categories.len()),
    };

    let Some(target) = target else {
        return month.clone();
    };

    let mut next = month.clone();
    next.categories.swap(position, target);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::ledger::{record_expense, setup, SetupEntry};

    fn month_with(names: &[(&str, i64)]) -> Month {
        let entries: Vec<_> = names
            .iter()
            .map(|(n, a)| SetupEntry::new(*n, Money::from_dollars(*a)))
            .collect();
        setup(&Month::new(2025, 0), &entries, None)
    }

    fn names(month: &Month) -> Vec<&str> {
        month.categories.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_add_category_grows_total() {
        let month = month_with(&[("Rent", 1200)]);
        let next = add_category(&month, "  Travel ", Money::from_dollars(300));

        assert_eq!(names(&next), vec!["Rent", "Travel"]);
        assert_eq!(next.categories[1].icon, "Travel");
        assert_eq!(next.total_budget, Money::from_dollars(1500));
    }

    #[test]
    fn test_add_category_with_zero_amount() {
        let month = month_with(&[("Rent", 1200)]);
        let next = add_category(&month, "Gifts", Money::zero());

        assert_eq!(next.categories.len(), 2);
        assert_eq!(next.total_budget, month.total_budget);
    }

    #[test]
    fn test_add_category_rejects_blank_name_and_negative_amount() {
        let month = month_with(&[("Rent", 1200)]);
        assert_eq!(add_category(&month, "   ", Money::from_dollars(5)), month);
        assert_eq!(add_category(&month, "Debt", Money::from_dollars(-5)), month);
    }

    #[test]
    fn test_delete_category_shrinks_total_and_drops_transactions() {
        let month = month_with(&[("Groceries", 400), ("Rent", 1200)]);
        let groceries = month.categories[0].id;
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let month = record_expense(&month, groceries, Money::from_dollars(50), "Market", date);

        let next = delete_category(&month, groceries);

        assert_eq!(names(&next), vec!["Rent"]);
        assert_eq!(
            next.total_budget,
            month.total_budget - month.categories[0].allocated_amount
        );
        assert!(next.total_spent().is_zero());
    }

    #[test]
    fn test_delete_unknown_category_is_noop() {
        let month = month_with(&[("Rent", 1200)]);
        assert_eq!(delete_category(&month, CategoryId::new()), month);
    }

    #[test]
    fn test_reorder_swaps_neighbours() {
        let month = month_with(&[("A", 1), ("B", 2), ("C", 3)]);
        let b = month.categories[1].id;

        assert_eq!(names(&reorder_category(&month, b, Direction::Up)), vec!["B", "A", "C"]);
        assert_eq!(names(&reorder_category(&month, b, Direction::Down)), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_reorder_at_boundaries_is_noop() {
        let month = month_with(&[("A", 1), ("B", 2), ("C", 3)]);
        let first = month.categories[0].id;
        let last = month.categories[2].id;

        assert_eq!(reorder_category(&month, first, Direction::Up), month);
        assert_eq!(reorder_category(&month, last, Direction::Down), month);
        assert_eq!(reorder_category(&month, CategoryId::new(), Direction::Up), month);
    }

    #[test]
    fn test_reorder_is_a_permutation() {
        let month = month_with(&[("A", 1), ("B", 2), ("C", 3)]);
        let c = month.categories[2].id;
        let next = reorder_category(&month, c, Direction::Up);

        let mut before: Vec<_> = month.categories.iter().map(|c| c.id.to_string()).collect();
        let mut after: Vec<_> = next.categories.iter().map(|c| c.id.to_string()).collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
        assert_eq!(next.total_budget, month.total_budget);
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!("UP".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("d".parse::<Direction>(), Ok(Direction::Down));
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_add_category_refuses_overflowing_total() {
        let month = month_with(&[("Rent", 1200)]);
        assert_eq!(add_category(&month, "Yacht", Money::from_cents(i64::MAX)), month);
    }
}
