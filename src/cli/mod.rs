//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod envelope;
pub mod export;
pub mod month;
pub mod report;
pub mod sync;

pub use envelope::{
    handle_envelope_command, handle_expense, handle_top_up, handle_transfer, EnvelopeCommands,
    ExpenseArgs, TopUpArgs, TransferArgs,
};
pub use export::{handle_export_command, ExportCommands};
pub use month::{handle_month_command, month_index, MonthCommands};
pub use report::{handle_report_command, ReportCommands};
pub use sync::{handle_sync_command, SyncCommands};
