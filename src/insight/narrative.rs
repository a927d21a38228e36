//! Rule-based narrator
//!
//! A local generator that needs no network: it reads the figures and writes a
//! few plain sentences about overall usage, the biggest envelope, overspending
//! and untouched envelopes.

use crate::error::{EnvelopeError, EnvelopeResult};

use super::{InsightGenerator, InsightRequest};

/// Deterministic, offline insight generator
#[derive(Debug, Clone, Default)]
pub struct NarrativeInsight {
    currency_symbol: Option<String>,
}

impl NarrativeInsight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_currency(symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: Some(symbol.into()),
        }
    }

    fn money(&self, amount: crate::models::Money) -> String {
        amount.format_with_symbol(self.currency_symbol.as_deref().unwrap_or("$"))
    }
}

impl InsightGenerator for NarrativeInsight {
    fn summarize(&self, request: &InsightRequest) -> EnvelopeResult<String> {
        if request.categories.is_empty() {
            return Err(EnvelopeError::Insight(format!(
                "{} has no envelopes to describe",
                request.period
            )));
        }

        let spent = request.total_spent();
        let mut sentences = Vec::new();

        let usage = if request.total_budget.is_positive() {
            format!(
                ", {:.0}% of the plan",
                spent.as_f64() / request.total_budget.as_f64() * 100.0
            )
        } else {
            String::new()
        };
        sentences.push(format!(
            "In {} you budgeted {} across {} envelopes and spent {}{}.",
            request.period,
            self.money(request.total_budget),
            request.categories.len(),
            self.money(spent),
            usage
        ));

        if let Some(top) = request
            .categories
            .iter()
            .filter(|c| c.spent.is_positive())
            .max_by_key(|c| c.spent)
        {
            sentences.push(format!(
                "{} was your biggest expense at {}.",
                top.name,
                self.money(top.spent)
            ));
        }

        let over: Vec<&str> = request
            .categories
            .iter()
            .filter(|c| c.spent > c.allocated)
            .map(|c| c.name.as_str())
            .collect();
        if over.is_empty() {
            if spent.is_positive() {
                sentences.push("Every envelope stayed within its allocation.".to_string());
            }
        } else {
            sentences.push(format!("Over budget: {}.", over.join(", ")));
        }

        let untouched: Vec<&str> = request
            .categories
            .iter()
            .filter(|c| c.spent.is_zero() && c.allocated.is_positive())
            .map(|c| c.name.as_str())
            .collect();
        if !untouched.is_empty() {
            sentences.push(format!("Untouched so far: {}.", untouched.join(", ")));
        }

        Ok(sentences.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insight::CategoryInsight;
    use crate::models::Money;

    fn request(categories: Vec<(&str, i64, i64)>) -> InsightRequest {
        InsightRequest {
            period: "March 2025".into(),
            total_budget: categories.iter().map(|c| Money::from_dollars(c.1)).sum(),
            categories: categories
                .into_iter()
                .map(|(name, allocated, spent)| CategoryInsight {
                    name: name.into(),
                    allocated: Money::from_dollars(allocated),
                    spent: Money::from_dollars(spent),
                })
                .collect(),
        }
    }

    #[test]
    fn test_narrative_mentions_key_facts() {
        let text = NarrativeInsight::new()
            .summarize(&request(vec![
                ("Groceries", 400, 450),
                ("Rent", 1200, 1200),
                ("Fun", 100, 0),
            ]))
            .unwrap();

        assert!(text.starts_with("In March 2025 you budgeted $1700.00 across 3 envelopes"));
        assert!(text.contains("spent $1650.00, 97% of the plan."));
        assert!(text.contains("Rent was your biggest expense at $1200.00."));
        assert!(text.contains("Over budget: Groceries."));
        assert!(text.contains("Untouched so far: Fun."));
    }

    #[test]
    fn test_narrative_praises_when_within_budget() {
        let text = NarrativeInsight::with_currency("€")
            .summarize(&request(vec![("Groceries", 400, 100)]))
            .unwrap();
        assert!(text.contains("€100.00"));
        assert!(text.contains("Every envelope stayed within its allocation."));
    }

    #[test]
    fn test_empty_month_is_an_error() {
        let result = NarrativeInsight::new().summarize(&request(vec![]));
        assert!(matches!(result, Err(EnvelopeError::Insight(_))));
    }
}
