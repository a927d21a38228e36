//! Reports module for the envelope planner
//!
//! Derived figures computed on demand from the ledger: the month summary,
//! the spending chart series and the year overview. Nothing here is stored.

pub mod chart;
pub mod summary;
pub mod year_overview;

pub use chart::{ChartPoint, ChartSeries, CHART_PLACEHOLDER};
pub use summary::{CategorySummary, MonthSummary};
pub use year_overview::{MonthOverviewRow, YearOverview};
