//! Ledger operations
//!
//! Every operation here is a pure transform: it takes the current `Month`
//! (plus explicit inputs) and returns a new `Month`. When a precondition does
//! not hold the input is returned unchanged; nothing in this module panics or
//! returns an error for user input.
//!
//! `total_budget` is touched only by setup, top-up, adding a category and
//! deleting a category. Expenses and transfers leave it alone.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use envelope_planner::ledger::{self, SetupEntry};
//! use envelope_planner::models::{Money, Month};
//!
//! let january = Month::new(2025, 0);
//! let january = ledger::setup(
//!     &january,
//!     &[
//!         SetupEntry::new("Groceries", Money::from_dollars(400)),
//!         SetupEntry::new("Rent", Money::from_dollars(1200)),
//!     ],
//!     None,
//! );
//! assert_eq!(january.total_budget, Money::from_dollars(1600));
//!
//! let groceries = january.categories[0].id;
//! let date = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
//! let january = ledger::record_expense(&january, groceries, Money::from_dollars(50), "Market", date);
//! assert_eq!(january.total_spent(), Money::from_dollars(50));
//! ```

mod entries;
mod envelopes;
mod lifecycle;

pub use entries::{record_expense, top_up, transfer};
pub use envelopes::{add_category, delete_category, reorder_category, Direction};
pub use lifecycle::{copy_plan_to_next, finalize, setup, toggle_completed, unlock, CopyPlan, SetupEntry};
