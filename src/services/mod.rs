//! Service layer for the envelope planner
//!
//! The service layer sits between the CLI and the pure ledger: it resolves
//! envelopes by name, validates input, asks for confirmation, and commits each
//! change through the session (save, audit, schedule sync).

pub mod confirm;
pub mod envelope;
pub mod month;
pub mod session;

pub use confirm::{AlwaysConfirm, Confirm, StdinConfirm};
pub use envelope::EnvelopeService;
pub use month::MonthService;
pub use session::{month_key, BudgetSession, PullOutcome};

/// A session in a temp dir, focused on January 2025
#[cfg(test)]
pub(crate) fn test_session(temp: &tempfile::TempDir) -> BudgetSession {
    let paths = crate::config::paths::EnvelopePaths::with_base_dir(temp.path().to_path_buf());
    let mut session = BudgetSession::open(paths).unwrap();
    session.focus(Some(2025), Some(0)).unwrap();
    session
}
