//! Display formatting for terminal output
//!
//! Turns ledger data and reports into text for the CLI.

pub mod month;
pub mod report;
pub mod transaction;

pub use month::{format_envelope_table, format_month_header, format_year_overview};
pub use report::{format_chart, format_month_summary};
pub use transaction::format_envelope_ledger;
