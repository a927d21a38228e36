//! Month and year display formatting
//!
//! Tables for the envelopes of a month and for the twelve months of a year.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Month;
use crate::reports::YearOverview;

#[derive(Tabled)]
struct EnvelopeRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Envelope")]
    name: String,
    #[tabled(rename = "Allocated")]
    allocated: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Entries")]
    entries: usize,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    name: &'static str,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Envelopes")]
    envelopes: usize,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Spent")]
    spent: String,
}

/// One-line month header: period, status, budget and note
pub fn format_month_header(month: &Month, symbol: &str) -> String {
    let mut header = format!(
        "{} [{}]  Budget: {}  Spent: {}",
        month.period_label(),
        month.status,
        month.total_budget.format_with_symbol(symbol),
        month.total_spent().format_with_symbol(symbol)
    );
    if let Some(note) = &month.note {
        header.push_str(&format!("\nNote: {}", note));
    }
    header
}

/// Table of a month's envelopes in display order
pub fn format_envelope_table(month: &Month, symbol: &str) -> String {
    if month.categories.is_empty() {
        return format!(
            "{} has no envelopes.\n\nRun 'envelope month setup' or 'envelope envelope add' to create some.",
            month.period_label()
        );
    }

    let rows = month.categories.iter().enumerate().map(|(i, c)| EnvelopeRow {
        position: i + 1,
        name: c.name.clone(),
        allocated: c.allocated_amount.format_with_symbol(symbol),
        spent: c.spent().format_with_symbol(symbol),
        remaining: c.remaining().format_with_symbol(symbol),
        entries: c.transactions.len(),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Table of the twelve months of a year
pub fn format_year_overview(overview: &YearOverview, symbol: &str) -> String {
    let rows = overview.months.iter().map(|m| MonthRow {
        name: m.name,
        status: m.status.to_string(),
        envelopes: m.envelope_count,
        budget: m.total_budget.format_with_symbol(symbol),
        spent: m.total_spent.format_with_symbol(symbol),
    });

    format!(
        "Budget year {}\n{}\nYear total: {} budgeted, {} spent",
        overview.year,
        Table::new(rows).with(Style::rounded()),
        overview.total_budget().format_with_symbol(symbol),
        overview.total_spent().format_with_symbol(symbol)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{self, SetupEntry};
    use crate::models::{Money, Year};

    fn january() -> Month {
        ledger::setup(
            &Month::new(2025, 0),
            &[
                SetupEntry::new("Groceries", Money::from_dollars(400)),
                SetupEntry::new("Rent", Money::from_dollars(1200)),
            ],
            Some("Salary"),
        )
    }

    #[test]
    fn test_month_header() {
        let header = format_month_header(&january(), "$");
        assert!(header.starts_with("January 2025 [Active]  Budget: $1600.00  Spent: $0.00"));
        assert!(header.ends_with("Note: Salary"));
    }

    #[test]
    fn test_envelope_table() {
        let table = format_envelope_table(&january(), "€");
        assert!(table.contains("Envelope"));
        assert!(table.contains("Groceries"));
        assert!(table.contains("€1200.00"));
        assert!(table.find("Groceries").unwrap() < table.find("Rent").unwrap());
    }

    #[test]
    fn test_empty_month_message() {
        let text = format_envelope_table(&Month::new(2025, 1), "$");
        assert!(text.starts_with("February 2025 has no envelopes."));
    }

    #[test]
    fn test_year_overview() {
        let year = Year::new(2025).with_month(january());
        let text = format_year_overview(&YearOverview::from_year(&year), "$");
        assert!(text.contains("Budget year 2025"));
        assert!(text.contains("December"));
        assert!(text.contains("Not started"));
        assert!(text.contains("Year total: $1600.00 budgeted, $0.00 spent"));
    }
}
