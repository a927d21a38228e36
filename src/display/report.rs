//! Report formatting for terminal output
//!
//! Month summary, spending chart and the layout helpers they share.

use crate::reports::{ChartSeries, MonthSummary};

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Center a title in a field of `width`
pub fn format_header(title: &str, width: usize) -> String {
    let len = title.chars().count();
    let padding = width.saturating_sub(len) / 2;
    format!("{}{}", " ".repeat(padding), title)
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum length with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

const WIDTH: usize = 64;
const NAME_WIDTH: usize = 18;

/// Format the month summary report
pub fn format_month_summary(summary: &MonthSummary, symbol: &str) -> String {
    let money = |m: crate::models::Money| m.format_with_symbol(symbol);
    let mut output = String::new();

    output.push_str(&double_separator(WIDTH));
    output.push('\n');
    output.push_str(&format_header(
        &format!("{} Summary ({})", summary.period, summary.status),
        WIDTH,
    ));
    output.push('\n');
    output.push_str(&double_separator(WIDTH));
    output.push('\n');

    if let Some(note) = &summary.note {
        output.push_str(&format!("Note: {}\n\n", note));
    }

    if summary.categories.is_empty() {
        output.push_str("No envelopes yet. Run 'envelope month setup' to plan this month.\n");
        return output;
    }

    output.push_str(&format!(
        "{:<name$} {:>11} {:>11} {:>11} {:>7}\n",
        "Envelope",
        "Allocated",
        "Spent",
        "Remaining",
        "Used",
        name = NAME_WIDTH
    ));
    output.push_str(&separator(WIDTH));
    output.push('\n');

    for row in &summary.categories {
        let flag = if row.is_overspent() { " !" } else { "" };
        output.push_str(&format!(
            "{:<name$} {:>11} {:>11} {:>11} {:>7}{}\n",
            truncate(&row.name, NAME_WIDTH),
            money(row.allocated),
            money(row.spent),
            money(row.remaining),
            format_percentage(row.percent_used),
            flag,
            name = NAME_WIDTH
        ));
    }

    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{:<name$} {:>11} {:>11} {:>11}\n",
        "Total",
        money(summary.total_allocated),
        money(summary.total_spent),
        money(summary.total_remaining),
        name = NAME_WIDTH
    ));
    output.push('\n');
    output.push_str(&format!(
        "Budget: {}   Spent: {} ({} of budget)\n",
        money(summary.total_budget),
        money(summary.total_spent),
        format_percentage(summary.percent_of_budget_spent())
    ));

    let overspent = summary.overspent();
    if !overspent.is_empty() {
        output.push_str("\nOverspent:\n");
        for row in overspent {
            output.push_str(&format!("  {} by {}\n", row.name, money(-row.remaining)));
        }
    }

    output
}

/// Format the spending chart as horizontal bars
pub fn format_chart(series: &ChartSeries, period: &str, symbol: &str) -> String {
    const BAR_WIDTH: usize = 30;

    let mut output = String::new();
    output.push_str(&format!("Spending by envelope, {}\n", period));
    output.push_str(&separator(WIDTH));
    output.push('\n');

    if series.is_empty() {
        output.push_str("No envelopes to chart.\n");
        return output;
    }

    let max = series.max_value();
    let total = series.total_spent();
    for point in &series.points {
        let share = if total.is_positive() {
            point.spent.as_f64() / total.as_f64() * 100.0
        } else {
            0.0
        };
        output.push_str(&format!(
            "{:<name$} {} {:>11} {:>6}\n",
            truncate(&point.label, NAME_WIDTH),
            format_bar(point.value, max, BAR_WIDTH),
            point.spent.format_with_symbol(symbol),
            format_percentage(share),
            name = NAME_WIDTH
        ));
    }

    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!("Total spent: {}\n", total.format_with_symbol(symbol)));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{self, SetupEntry};
    use crate::models::{Money, Month};
    use chrono::NaiveDate;

    fn month() -> Month {
        let month = ledger::setup(
            &Month::new(2025, 0),
            &[
                SetupEntry::new("Groceries", Money::from_dollars(400)),
                SetupEntry::new("Rent", Money::from_dollars(1200)),
            ],
            Some("Salary"),
        );
        let groceries = month.categories[0].id;
        let date = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        ledger::record_expense(&month, groceries, Money::from_dollars(450), "Market", date)
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(50.0), "50%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(0.0, 100.0, 4), "    ");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Épicerie fine", 6), "Épi...");
    }

    #[test]
    fn test_month_summary_output() {
        let output = format_month_summary(&MonthSummary::from_month(&month()), "$");
        assert!(output.contains("January 2025 Summary (Active)"));
        assert!(output.contains("Note: Salary"));
        assert!(output.contains("Groceries"));
        assert!(output.contains("-$50.00"));
        assert!(output.contains("Overspent:\n  Groceries by $50.00"));
    }

    #[test]
    fn test_empty_summary() {
        let output = format_month_summary(&MonthSummary::from_month(&Month::new(2025, 3)), "$");
        assert!(output.contains("No envelopes yet"));
    }

    #[test]
    fn test_chart_output() {
        let output = format_chart(&ChartSeries::from_month(&month()), "January 2025", "$");
        assert!(output.contains("Spending by envelope, January 2025"));
        assert!(output.contains("100%"));
        assert!(output.contains("Total spent: $450.00"));
    }
}
