//! Narrative month summaries
//!
//! An `InsightGenerator` turns a month's figures into a short plain-text
//! narrative. Callers go through [`summarize_month`], which strips formatting
//! markup from whatever the generator returns and swaps any failure for
//! [`FALLBACK_INSIGHT`], so a broken generator never surfaces as an error.

mod narrative;

pub use narrative::NarrativeInsight;

use tracing::warn;

use crate::error::EnvelopeResult;
use crate::models::{Money, Month};

/// Shown when no narrative could be produced
pub const FALLBACK_INSIGHT: &str =
    "We couldn't generate insights for this month right now. Your numbers are safe; try again later.";

/// Per-envelope figures handed to the generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInsight {
    pub name: String,
    pub allocated: Money,
    pub spent: Money,
}

/// Everything a generator gets to see about a month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightRequest {
    /// e.g. "January 2025"
    pub period: String,
    pub total_budget: Money,
    pub categories: Vec<CategoryInsight>,
}

impl InsightRequest {
    pub fn from_month(month: &Month) -> Self {
        Self {
            period: month.period_label(),
            total_budget: month.total_budget,
            categories: month
                .categories
                .iter()
                .map(|c| CategoryInsight {
                    name: c.name.clone(),
                    allocated: c.allocated_amount,
                    spent: c.spent(),
                })
                .collect(),
        }
    }

    pub fn total_spent(&self) -> Money {
        self.categories.iter().map(|c| c.spent).sum()
    }
}

/// Produces narrative text for a month
pub trait InsightGenerator {
    fn summarize(&self, request: &InsightRequest) -> EnvelopeResult<String>;
}

/// Summarize a month, never failing
pub fn summarize_month(generator: &dyn InsightGenerator, month: &Month) -> String {
    let request = InsightRequest::from_month(month);
    match generator.summarize(&request) {
        Ok(text) => {
            let text = strip_markup(&text);
            if text.is_empty() {
                warn!(period = %request.period, "insight generator returned nothing");
                FALLBACK_INSIGHT.to_string()
            } else {
                text
            }
        }
        Err(e) => {
            warn!(period = %request.period, error = %e, "insight generation failed");
            FALLBACK_INSIGHT.to_string()
        }
    }
}

/// Remove markdown-style formatting from generated text
///
/// Drops heading hashes, list bullets and numbers, emphasis markers and
/// backticks, and collapses runs of blank lines. Underscores inside a word
/// (`date_night`) are kept.
pub fn strip_markup(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    for raw in text.lines() {
        let mut line = raw.trim();
        line = line.trim_start_matches('#').trim_start();
        for bullet in ["- ", "* ", "• ", "+ "] {
            if let Some(rest) = line.strip_prefix(bullet) {
                line = rest.trim_start();
                break;
            }
        }
        line = strip_list_number(line);

        let cleaned = strip_underscores(&line.replace(['*', '`'], ""));
        let cleaned = cleaned.trim().to_string();

        if cleaned.is_empty() && lines.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        lines.push(cleaned);
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// "1. text" or "2) text" becomes "text"
fn strip_list_number(line: &str) -> &str {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 || digits > 3 {
        return line;
    }
    let rest = &line[digits..];
    rest.strip_prefix(". ")
        .or_else(|| rest.strip_prefix(") "))
        .map_or(line, str::trim_start)
}

/// Drop every underscore that is not between two word characters
fn strip_underscores(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let word = |i: Option<usize>| i.and_then(|i| chars.get(i)).is_some_and(|c| c.is_alphanumeric());

    chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| c != '_' || (word(i.checked_sub(1)) && word(Some(i + 1))))
        .map(|(_, &c)| c)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnvelopeError;
    use crate::ledger::{self, SetupEntry};
    use chrono::NaiveDate;

    struct Canned(EnvelopeResult<String>);

    impl InsightGenerator for Canned {
        fn summarize(&self, _request: &InsightRequest) -> EnvelopeResult<String> {
            match &self.0 {
                Ok(s) => Ok(s.clone()),
                Err(e) => Err(EnvelopeError::Insight(e.to_string())),
            }
        }
    }

    fn month() -> Month {
        let month = ledger::setup(
            &Month::new(2025, 0),
            &[
                SetupEntry::new("Groceries", Money::from_dollars(400)),
                SetupEntry::new("Rent", Money::from_dollars(1200)),
            ],
            None,
        );
        let groceries = month.categories[0].id;
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        ledger::record_expense(&month, groceries, Money::from_dollars(50), "Market", date)
    }

    #[test]
    fn test_request_from_month() {
        let request = InsightRequest::from_month(&month());
        assert_eq!(request.period, "January 2025");
        assert_eq!(request.total_budget, Money::from_dollars(1600));
        assert_eq!(request.categories.len(), 2);
        assert_eq!(request.categories[0].spent, Money::from_dollars(50));
        assert_eq!(request.total_spent(), Money::from_dollars(50));
    }

    #[test]
    fn test_strip_markup() {
        let text = "## Summary\n\n\n**Great** job!\n- Keep `going`\n* __Really__\n\n";
        assert_eq!(strip_markup(text), "Summary\n\nGreat job!\nKeep going\nReally");
    }

    #[test]
    fn test_strip_markup_single_underscores_and_numbers() {
        let text = "1. _Groceries_ ran over\n2) Keep date_night as is\n10. Done _today_.";
        assert_eq!(
            strip_markup(text),
            "Groceries ran over\nKeep date_night as is\nDone today."
        );
    }

    #[test]
    fn test_summarize_strips_generator_output() {
        let generator = Canned(Ok("# Nice\n*well done*".into()));
        assert_eq!(summarize_month(&generator, &month()), "Nice\nwell done");
    }

    #[test]
    fn test_failure_yields_fallback() {
        let generator = Canned(Err(EnvelopeError::Insight("timeout".into())));
        assert_eq!(summarize_month(&generator, &month()), FALLBACK_INSIGHT);
    }

    #[test]
    fn test_empty_output_yields_fallback() {
        let generator = Canned(Ok("  **  \n".into()));
        assert_eq!(summarize_month(&generator, &month()), FALLBACK_INSIGHT);
    }
}
