//! Month service
//!
//! Lifecycle of the selected month: setup, finalize/unlock and copying the
//! plan forward.

use tracing::info;

use crate::audit::{generate_diff, AuditEntry, EntityType};
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::ledger::{self, CopyPlan, SetupEntry};
use crate::models::{Month, MonthStatus};

use super::confirm::Confirm;
use super::session::{month_digest, month_key, BudgetSession};

/// Service for month lifecycle operations
pub struct MonthService<'a> {
    session: &'a mut BudgetSession,
}

impl<'a> MonthService<'a> {
    pub fn new(session: &'a mut BudgetSession) -> Self {
        Self { session }
    }

    /// Set up the selected month from a list of envelopes
    ///
    /// Entries without a name or a positive amount are dropped. Re-running
    /// setup on a started month replaces its envelopes, so it asks first.
    pub fn setup(
        &mut self,
        entries: &[SetupEntry],
        note: Option<&str>,
        confirm: &dyn Confirm,
    ) -> EnvelopeResult<Month> {
        let before = self.session.month()?.clone();

        if !entries.iter().any(SetupEntry::is_valid) {
            return Err(EnvelopeError::Validation(
                "Setup needs at least one envelope with a name and a positive amount".into(),
            ));
        }

        if before.is_started()
            && !confirm.confirm(&format!(
                "{} is already set up. Replace its envelopes and transactions?",
                before.period_label()
            ))
        {
            return Err(EnvelopeError::Cancelled("setup".into()));
        }

        let after = ledger::setup(&before, entries, note);
        if after == before {
            return Err(EnvelopeError::Validation(
                "Envelope amounts add up to more than a month can hold".into(),
            ));
        }
        self.commit_update(&before, after)
    }

    /// Mark the selected month completed
    pub fn finalize(&mut self) -> EnvelopeResult<Month> {
        let before = self.session.month()?.clone();
        if before.status != MonthStatus::Active {
            return Err(EnvelopeError::Validation(format!(
                "Only an active month can be finalized ({} is {})",
                before.period_label(),
                before.status
            )));
        }
        let after = ledger::finalize(&before);
        self.commit_update(&before, after)
    }

    /// Reopen the selected month
    pub fn unlock(&mut self) -> EnvelopeResult<Month> {
        let before = self.session.month()?.clone();
        if before.status != MonthStatus::Completed {
            return Err(EnvelopeError::Validation(format!(
                "Only a completed month can be unlocked ({} is {})",
                before.period_label(),
                before.status
            )));
        }
        let after = ledger::unlock(&before);
        self.commit_update(&before, after)
    }

    /// Flip the selected month between active and completed
    pub fn toggle_completed(&mut self) -> EnvelopeResult<Month> {
        let before = self.session.month()?.clone();
        if !before.is_started() {
            return Err(EnvelopeError::Validation(format!(
                "{} has not been set up yet",
                before.period_label()
            )));
        }
        let after = ledger::toggle_completed(&before);
        self.commit_update(&before, after)
    }

    /// Copy the selected month's plan into the following month
    ///
    /// Returns the month that received the plan.
    pub fn copy_to_next(&mut self, confirm: &dyn Confirm) -> EnvelopeResult<Month> {
        let index = self.session.month_index();
        let year = self.session.year().clone();

        let updated = match ledger::copy_plan_to_next(&year, index, false) {
            CopyPlan::Copied(updated) => updated,
            CopyPlan::NoNextMonth => {
                return Err(EnvelopeError::Validation(
                    "December's plan cannot be copied into the next year".into(),
                ))
            }
            CopyPlan::WouldOverwrite => {
                let next = year
                    .month(index + 1)
                    .map(Month::period_label)
                    .unwrap_or_default();
                if !confirm.confirm(&format!("{} already has a plan. Overwrite it?", next)) {
                    return Err(EnvelopeError::Cancelled("copy plan".into()));
                }
                match ledger::copy_plan_to_next(&year, index, true) {
                    CopyPlan::Copied(updated) => updated,
                    _ => return Err(EnvelopeError::month_not_found((index + 2).to_string())),
                }
            }
        };

        let (Some(before), Some(after)) = (year.month(index + 1), updated.month(index + 1)) else {
            return Err(EnvelopeError::month_not_found((index + 2).to_string()));
        };
        let entry = month_entry(before, after);
        let after = after.clone();

        self.session.commit_year(updated, vec![entry])?;
        info!(period = %after.period_label(), "plan copied");
        Ok(after)
    }

    fn commit_update(&mut self, before: &Month, after: Month) -> EnvelopeResult<Month> {
        let entry = month_entry(before, &after);
        self.session.commit_month(after.clone(), vec![entry])?;
        info!(period = %after.period_label(), status = %after.status, "month updated");
        Ok(after)
    }
}

fn month_entry(before: &Month, after: &Month) -> AuditEntry {
    let (old, new) = (month_digest(before), month_digest(after));
    let diff = generate_diff(&old, &new);
    AuditEntry::update(EntityType::Month, month_key(after), None, &old, &new, diff)
        .in_period(after.period_label())
}
