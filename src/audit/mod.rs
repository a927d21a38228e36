//! Audit trail for ledger changes
//!
//! Every successful mutation appends one JSON line to `audit.log` describing
//! what changed, in which period, with before/after snapshots where they make
//! sense.
//!
//! - `AuditEntry`: timestamp, operation, entity, period and optional
//!   before/after values.
//! - `AuditLogger`: append-only JSONL writer and reader.
//! - `generate_diff`: short "field: old -> new" summaries for updates.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
