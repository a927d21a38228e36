//! Export module for the envelope planner
//!
//! - CSV: a month's transactions, spreadsheet-compatible
//! - JSON: the full budget year with export metadata

pub mod csv;
pub mod json;

pub use self::csv::export_month_csv;
pub use self::json::{export_year_json, YearExport, EXPORT_SCHEMA_VERSION};
