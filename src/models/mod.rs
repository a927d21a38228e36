//! Core data models for the envelope planner
//!
//! The ledger tree: a `Year` of twelve `Month`s, each holding ordered
//! `Category` envelopes, each holding its `Transaction`s. Amounts are `Money`.

pub mod category;
pub mod ids;
pub mod money;
pub mod month;
pub mod transaction;
pub mod year;

pub use category::Category;
pub use ids::{CategoryId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use month::{Month, MonthStatus, MONTH_NAMES};
pub use transaction::{Transaction, TransactionType};
pub use year::{Year, MONTHS_PER_YEAR};
