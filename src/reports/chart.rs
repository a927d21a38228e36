//! Spending chart series
//!
//! Chart-ready `(name, spent)` points in envelope order. A plot of all zeros
//! degenerates (a pie with no slices), so zero-spend envelopes are plotted at
//! a tiny placeholder value. The placeholder lives only in `value`; `spent`
//! and every total carry the real figures.

use crate::models::{Money, Month};

/// Plotted value for an envelope with no spending
pub const CHART_PLACEHOLDER: f64 = 0.01;

/// One point of the spending chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    /// Real spending
    pub spent: Money,
    /// Value to draw
    pub value: f64,
}

impl ChartPoint {
    pub fn is_placeholder(&self) -> bool {
        self.spent.is_zero()
    }
}

/// Spending per envelope, ready to plot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSeries {
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn from_month(month: &Month) -> Self {
        let points = month
            .categories
            .iter()
            .map(|c| {
                let spent = c.spent();
                let value = if spent.is_zero() {
                    CHART_PLACEHOLDER
                } else {
                    spent.as_f64()
                };
                ChartPoint {
                    label: c.name.clone(),
                    spent,
                    value,
                }
            })
            .collect();

        Self { points }
    }

    /// Real spending across the series, placeholders excluded
    pub fn total_spent(&self) -> Money {
        self.points.iter().map(|p| p.spent).sum()
    }

    /// Largest plotted value, for scaling bars
    pub fn max_value(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(0.0, f64::max)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
