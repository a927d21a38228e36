//! Money-moving entries: expenses, top-ups and transfers
//!
//! All three reject non-positive amounts. The caller parses form input with
//! `Money::parse_positive`, so an empty or garbage field never reaches here as
//! a zero-amount entry. An entry whose arithmetic would overflow is refused
//! like any other failed precondition.

use chrono::NaiveDate;

use crate::models::{CategoryId, Money, Month, Transaction};

/// Record spending against an envelope
///
/// Appends an EXPENSE entry; allocation and month total are unchanged.
pub fn record_expense(
    month: &Month,
    id: CategoryId,
    amount: Money,
    description: &str,
    date: NaiveDate,
) -> Month {
    if !amount.is_positive() {
        return month.clone();
    }
    let Some(position) = month.category_position(id) else {
        return month.clone();
    };
    if month.categories[position].spent().checked_add(amount).is_none() {
        return month.clone();
    }

    let description = match description.trim() {
        "" => "Expense",
        d => d,
    };

    let mut next = month.clone();
    next.categories[position]
        .transactions
        .push(Transaction::expense(date, amount, description));
    next
}

/// Add fresh money to an envelope
///
/// Allocation and month total both grow by `amount`, and a TRANSFER_IN entry
/// records it.
pub fn top_up(month: &Month, id: CategoryId, amount: Money, date: NaiveDate) -> Month {
    if !amount.is_positive() {
        return month.clone();
    }
    let Some(position) = month.category_position(id) else {
        return month.clone();
    };

    let (Some(allocated), Some(total)) = (
        month.categories[position].allocated_amount.checked_add(amount),
        month.total_budget.checked_add(amount),
    ) else {
        return month.clone();
    };

    let mut next = month.clone();
    let category = &mut next.categories[position];
    category.allocated_amount = allocated;
    category
        .transactions
        .push(Transaction::transfer_in(date, amount, "Top-up"));
    next.total_budget = total;
    next
}

/// Move allocation from one envelope to another
///
/// Zero-sum across the two envelopes; the month total does not change. Both
/// legs land in the same returned month. The source may go negative: that is
/// accepted input and shows up as an overspent envelope in reports.
pub fn transfer(
    month: &Month,
    from: CategoryId,
    to: CategoryId,
    amount: Money,
    date: NaiveDate,
) -> Month {
    if from == to || !amount.is_positive() {
        return month.clone();
    }
    let (Some(from_pos), Some(to_pos)) = (month.category_position(from), month.category_position(to))
    else {
        return month.clone();
    };

    let (Some(source_left), Some(destination_total)) = (
        month.categories[from_pos].allocated_amount.checked_sub(amount),
        month.categories[to_pos].allocated_amount.checked_add(amount),
    ) else {
        return month.clone();
    };

    let mut next = month.clone();
    let from_name = next.categories[from_pos].name.clone();
    let to_name = next.categories[to_pos].name.clone();

    let source = &mut next.categories[from_pos];
    source.allocated_amount = source_left;
    source.transactions.push(Transaction::transfer_out(
        date,
        amount,
        format!("Transfer to {}", to_name),
    ));

    let destination = &mut next.categories[to_pos];
    destination.allocated_amount = destination_total;
    destination.transactions.push(Transaction::transfer_in(
        date,
        amount,
        format!("Transfer from {}", from_name),
    ));

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{setup, SetupEntry};
    use crate::models::TransactionType;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 12).unwrap()
    }

    fn january() -> Month {
        setup(
            &Month::new(2025, 0),
            &[
                SetupEntry::new("Groceries", Money::from_dollars(400)),
                SetupEntry::new("Rent", Money::from_dollars(1200)),
            ],
            None,
        )
    }

    #[test]
    fn test_record_expense() {
        let month = january();
        let groceries = month.categories[0].id;
        let next = record_expense(&month, groceries, Money::from_dollars(50), "Market", date());

        let category = next.category(groceries).unwrap();
        assert_eq!(category.transactions.len(), 1);
        assert_eq!(category.transactions[0].kind, TransactionType::Expense);
        assert_eq!(category.transactions[0].description, "Market");
        assert_eq!(category.allocated_amount, Money::from_dollars(400));
        assert_eq!(next.total_budget, month.total_budget);
    }

    #[test]
    fn test_record_expense_default_description() {
        let month = january();
        let groceries = month.categories[0].id;
        let next = record_expense(&month, groceries, Money::from_cents(99), "  ", date());
        assert_eq!(next.categories[0].transactions[0].description, "Expense");
    }

    #[test]
    fn test_non_positive_amounts_are_rejected() {
        let month = january();
        let groceries = month.categories[0].id;
        let rent = month.categories[1].id;

        for amount in [Money::zero(), Money::from_dollars(-5)] {
            assert_eq!(record_expense(&month, groceries, amount, "x", date()), month);
            assert_eq!(top_up(&month, groceries, amount, date()), month);
            assert_eq!(transfer(&month, rent, groceries, amount, date()), month);
        }
    }

    #[test]
    fn test_unknown_category_is_noop() {
        let month = january();
        let ghost = CategoryId::new();
        let rent = month.categories[1].id;
        let amount = Money::from_dollars(5);

        assert_eq!(record_expense(&month, ghost, amount, "x", date()), month);
        assert_eq!(top_up(&month, ghost, amount, date()), month);
        assert_eq!(transfer(&month, ghost, rent, amount, date()), month);
        assert_eq!(transfer(&month, rent, ghost, amount, date()), month);
    }

    #[test]
    fn test_top_up_grows_allocation_and_total_equally() {
        let month = january();
        let groceries = month.categories[0].id;
        let amount = Money::from_dollars(20);
        let next = top_up(&month, groceries, amount, date());

        let before = month.category(groceries).unwrap();
        let after = next.category(groceries).unwrap();
        assert_eq!(after.allocated_amount - before.allocated_amount, amount);
        assert_eq!(next.total_budget - month.total_budget, amount);
        assert_eq!(after.transactions[0].kind, TransactionType::TransferIn);
        assert!(after.spent().is_zero());
    }

    #[test]
    fn test_transfer_is_zero_sum() {
        let month = january();
        let groceries = month.categories[0].id;
        let rent = month.categories[1].id;
        let next = transfer(&month, rent, groceries, Money::from_dollars(100), date());

        let sum = |m: &Month| {
            m.category(rent).unwrap().allocated_amount
                + m.category(groceries).unwrap().allocated_amount
        };
        assert_eq!(sum(&next), sum(&month));
        assert_eq!(next.total_budget, month.total_budget);
        assert_eq!(next.total_spent(), month.total_spent());
    }

    #[test]
    fn test_transfer_records_both_legs() {
        let month = january();
        let groceries = month.categories[0].id;
        let rent = month.categories[1].id;
        let next = transfer(&month, rent, groceries, Money::from_dollars(100), date());

        let out = &next.category(rent).unwrap().transactions[0];
        let inn = &next.category(groceries).unwrap().transactions[0];
        assert_eq!(out.kind, TransactionType::TransferOut);
        assert_eq!(inn.kind, TransactionType::TransferIn);
        assert_eq!(out.amount, inn.amount);
        assert_eq!(out.description, "Transfer to Groceries");
        assert_eq!(inn.description, "Transfer from Rent");
    }

    #[test]
    fn test_transfer_to_self_is_noop() {
        let month = january();
        let rent = month.categories[1].id;
        assert_eq!(transfer(&month, rent, rent, Money::from_dollars(1), date()), month);
    }

    #[test]
    fn test_transfer_may_drive_source_negative() {
        let month = january();
        let groceries = month.categories[0].id;
        let rent = month.categories[1].id;
        let next = transfer(&month, groceries, rent, Money::from_dollars(500), date());

        assert_eq!(
            next.category(groceries).unwrap().allocated_amount,
            Money::from_dollars(-100)
        );
        assert_eq!(next.total_budget, month.total_budget);
    }

    #[test]
    fn test_overflowing_entries_are_noops() {
        let month = january();
        let groceries = month.categories[0].id;
        let rent = month.categories[1].id;
        let huge = Money::from_cents(i64::MAX);

        assert_eq!(top_up(&month, groceries, huge, date()), month);
        assert_eq!(transfer(&month, rent, groceries, huge, date()), month);

        let spent = record_expense(&month, groceries, huge, "", date());
        assert_eq!(record_expense(&spent, groceries, Money::from_cents(1), "", date()), spent);
    }

    #[test]
    fn test_largest_parsed_top_up_still_applies() {
        let month = january();
        let groceries = month.categories[0].id;
        let next = top_up(&month, groceries, Money::MAX, date());

        assert_eq!(
            next.total_budget,
            month.total_budget.checked_add(Money::MAX).unwrap()
        );
        assert_eq!(
            next.category(groceries).unwrap().allocated_amount,
            Money::from_dollars(400).checked_add(Money::MAX).unwrap()
        );
    }
}
