//! Envelope Planner - monthly envelope budgeting
//!
//! A budget year is twelve months; each month splits its budget into named
//! envelopes, and each envelope keeps the expenses and transfers recorded
//! against it.
//!
//! # Architecture
//!
//! - `models`: the Year/Month/Category/Transaction tree and its queries
//! - `ledger`: pure mutations, each taking a month and returning a new one
//! - `reports`: month summary, spending chart series, year overview
//! - `config`: paths and user settings
//! - `error`: custom error types
//! - `storage`: JSON year snapshots
//! - `sync`: cloud backend interface, session and debounced push
//! - `insight`: narrative month summaries
//! - `audit`: append-only change log
//! - `services`: the session and the operations the CLI calls
//! - `display`, `export`, `cli`: terminal output, file export, commands
//!
//! # Example
//!
//! ```rust,ignore
//! use envelope_planner::config::paths::EnvelopePaths;
//! use envelope_planner::services::{BudgetSession, EnvelopeService};
//!
//! let mut session = BudgetSession::open(EnvelopePaths::new()?)?;
//! EnvelopeService::new(&mut session).add("Groceries", Money::from_dollars(400))?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod insight;
pub mod ledger;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod sync;

pub use error::{EnvelopeError, EnvelopeResult};
