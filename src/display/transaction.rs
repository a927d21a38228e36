//! Transaction display formatting
//!
//! The ledger of one envelope: every entry in the order it was recorded.

use crate::models::{Category, Transaction, TransactionType};

use super::report::truncate;

/// Format a single transaction as a ledger row
pub fn format_transaction_row(txn: &Transaction, symbol: &str) -> String {
    let sign = match txn.kind {
        TransactionType::Expense | TransactionType::TransferOut => "-",
        TransactionType::TransferIn => "+",
    };

    format!(
        "{} {:12} {:28} {}{:>11}",
        txn.date.format("%Y-%m-%d"),
        txn.kind.label(),
        truncate(&txn.description, 28),
        sign,
        txn.amount.format_with_symbol(symbol)
    )
}

/// Format an envelope with its allocation and every entry
pub fn format_envelope_ledger(category: &Category, symbol: &str) -> String {
    let mut output = format!(
        "{}\n  Allocated: {}  Spent: {}  Remaining: {}\n\n",
        category.name,
        category.allocated_amount.format_with_symbol(symbol),
        category.spent().format_with_symbol(symbol),
        category.remaining().format_with_symbol(symbol)
    );

    if category.transactions.is_empty() {
        output.push_str("No transactions recorded.\n");
        return output;
    }

    output.push_str(&format!(
        "{:10} {:12} {:28} {:>12}\n",
        "Date", "Kind", "Description", "Amount"
    ));
    output.push_str(&"-".repeat(65));
    output.push('\n');

    for txn in &category.transactions {
        output.push_str(&format_transaction_row(txn, symbol));
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    #[test]
    fn test_ledger_lists_entries_in_order() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let mut groceries = Category::new("Groceries", Money::from_dollars(500));
        groceries
            .transactions
            .push(Transaction::expense(date, Money::from_dollars(50), "Market"));
        groceries
            .transactions
            .push(Transaction::transfer_in(date, Money::from_dollars(100), "Transfer from Rent"));

        let text = format_envelope_ledger(&groceries, "$");
        assert!(text.contains("Allocated: $500.00  Spent: $50.00  Remaining: $450.00"));
        assert!(text.find("Market").unwrap() < text.find("Transfer from Rent").unwrap());
        assert!(text.contains("+    $100.00"));
        assert!(text.contains("2025-01-05 expense"));
    }

    #[test]
    fn test_empty_ledger() {
        let text = format_envelope_ledger(&Category::new("Fun", Money::zero()), "$");
        assert!(text.ends_with("No transactions recorded.\n"));
    }
}
