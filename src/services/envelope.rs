//! Envelope service
//!
//! Envelope management and money movement on the selected month: adding,
//! deleting and reordering envelopes, recording expenses, top-ups and
//! transfers. Rejected input is reported as a validation error and leaves the
//! ledger untouched.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::audit::{generate_diff, AuditEntry, EntityType};
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::ledger::{self, Direction};
use crate::models::{Category, CategoryId, Money, Month, Transaction};

use super::confirm::Confirm;
use super::session::{month_digest, month_key, BudgetSession};

/// Service for envelopes and the money in them
pub struct EnvelopeService<'a> {
    session: &'a mut BudgetSession,
}

impl<'a> EnvelopeService<'a> {
    pub fn new(session: &'a mut BudgetSession) -> Self {
        Self { session }
    }

    /// Add an envelope to the end of the selected month
    pub fn add(&mut self, name: &str, amount: Money) -> EnvelopeResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EnvelopeError::Validation("Envelope name cannot be empty".into()));
        }
        if amount.is_negative() {
            return Err(EnvelopeError::Validation(
                "Envelope allocation cannot be negative".into(),
            ));
        }

        let before = self.session.month()?.clone();
        let after = ledger::add_category(&before, name, amount);
        require_applied(&before, &after)?;
        let category = after
            .categories
            .last()
            .cloned()
            .ok_or_else(|| EnvelopeError::Validation("Envelope was not added".into()))?;

        let entry = AuditEntry::create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )
        .in_period(after.period_label());
        self.session.commit_month(after, vec![entry])?;

        info!(name = %category.name, allocated = %category.allocated_amount, "envelope added");
        Ok(category)
    }

    /// Delete an envelope and all of its transactions, after confirmation
    pub fn delete(&mut self, identifier: &str, confirm: &dyn Confirm) -> EnvelopeResult<Category> {
        let category = self.session.find_category(identifier)?.clone();
        if !confirm.confirm(&format!(
            "Delete envelope '{}' and its {} transaction(s)?",
            category.name,
            category.transactions.len()
        )) {
            return Err(EnvelopeError::Cancelled(format!("delete {}", category.name)));
        }

        let before = self.session.month()?.clone();
        let after = ledger::delete_category(&before, category.id);
        let entry = AuditEntry::delete(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )
        .in_period(after.period_label());
        self.session.commit_month(after, vec![entry])?;

        info!(name = %category.name, "envelope deleted");
        Ok(category)
    }

    /// Move an envelope one place up or down in the display order
    pub fn reorder(&mut self, identifier: &str, direction: Direction) -> EnvelopeResult<Month> {
        let category = self.session.find_category(identifier)?.clone();
        let before = self.session.month()?.clone();
        let after = ledger::reorder_category(&before, category.id, direction);
        if after == before {
            return Err(EnvelopeError::Validation(format!(
                "'{}' cannot move {} any further",
                category.name, direction
            )));
        }

        let entry = AuditEntry::update(
            EntityType::Month,
            month_key(&after),
            Some(category.name.clone()),
            &month_digest(&before),
            &month_digest(&after),
            Some(format!("moved '{}' {}", category.name, direction)),
        )
        .in_period(after.period_label());
        self.session.commit_month(after.clone(), vec![entry])?;
        Ok(after)
    }

    /// Record an expense against an envelope
    pub fn record_expense(
        &mut self,
        identifier: &str,
        amount: Money,
        description: &str,
        date: NaiveDate,
    ) -> EnvelopeResult<Transaction> {
        require_positive(amount)?;
        let category = self.session.find_category(identifier)?.clone();
        let before = self.session.month()?.clone();
        let after = ledger::record_expense(&before, category.id, amount, description, date);
        require_applied(&before, &after)?;

        let transaction = newest_transaction(&after, category.id)?;
        let entry = AuditEntry::create(
            EntityType::Transaction,
            transaction.id.to_string(),
            Some(category.name.clone()),
            &transaction,
        )
        .in_period(after.period_label());
        self.session.commit_month(after, vec![entry])?;

        info!(envelope = %category.name, amount = %amount, "expense recorded");
        Ok(transaction)
    }

    /// Add money to an envelope and to the month budget
    pub fn top_up(
        &mut self,
        identifier: &str,
        amount: Money,
        date: NaiveDate,
    ) -> EnvelopeResult<Category> {
        require_positive(amount)?;
        let category = self.session.find_category(identifier)?.clone();
        let before = self.session.month()?.clone();
        let after = ledger::top_up(&before, category.id, amount, date);
        require_applied(&before, &after)?;

        let updated = updated_category(&after, category.id)?;
        let entry = category_entry(&category, &updated).in_period(after.period_label());
        self.session.commit_month(after, vec![entry])?;

        info!(envelope = %category.name, amount = %amount, "envelope topped up");
        Ok(updated)
    }

    /// Move allocation from one envelope to another
    ///
    /// The source may end up with a negative allocation; that is allowed and
    /// only logged.
    pub fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: Money,
        date: NaiveDate,
    ) -> EnvelopeResult<(Category, Category)> {
        require_positive(amount)?;
        let source = self.session.find_category(from)?.clone();
        let destination = self.session.find_category(to)?.clone();
        if source.id == destination.id {
            return Err(EnvelopeError::Validation(
                "Cannot transfer an envelope to itself".into(),
            ));
        }

        let before = self.session.month()?.clone();
        let after = ledger::transfer(&before, source.id, destination.id, amount, date);
        require_applied(&before, &after)?;

        let new_source = updated_category(&after, source.id)?;
        let new_destination = updated_category(&after, destination.id)?;
        let entries = vec![
            category_entry(&source, &new_source).in_period(after.period_label()),
            category_entry(&destination, &new_destination).in_period(after.period_label()),
        ];
        self.session.commit_month(after, entries)?;

        if new_source.allocated_amount.is_negative() {
            warn!(
                envelope = %new_source.name,
                allocated = %new_source.allocated_amount,
                "transfer left envelope with a negative allocation"
            );
        }
        info!(from = %source.name, to = %destination.name, amount = %amount, "transfer recorded");
        Ok((new_source, new_destination))
    }
}

fn require_positive(amount: Money) -> EnvelopeResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(EnvelopeError::Validation(format!(
            "Amount must be greater than zero (got {})",
            amount
        )))
    }
}

/// Inputs already passed validation, so an unchanged month means the totals
/// would have overflowed
fn require_applied(before: &Month, after: &Month) -> EnvelopeResult<()> {
    if before == after {
        Err(EnvelopeError::Validation(
            "Amount is too large for this month's totals".into(),
        ))
    } else {
        Ok(())
    }
}

fn updated_category(month: &Month, id: CategoryId) -> EnvelopeResult<Category> {
    month
        .category(id)
        .cloned()
        .ok_or_else(|| EnvelopeError::category_not_found(id.to_string()))
}

fn newest_transaction(month: &Month, id: CategoryId) -> EnvelopeResult<Transaction> {
    month
        .category(id)
        .and_then(|c| c.transactions.last())
        .cloned()
        .ok_or_else(|| EnvelopeError::category_not_found(id.to_string()))
}

/// Update entry for an envelope, without its transaction list
fn category_entry(before: &Category, after: &Category) -> AuditEntry {
    let digest = |c: &Category| {
        serde_json::json!({
            "name": c.name,
            "allocated_amount": c.allocated_amount,
            "transactions": c.transactions.len(),
        })
    };
    let (old, new) = (digest(before), digest(after));
    let diff = generate_diff(&old, &new);
    AuditEntry::update(
        EntityType::Category,
        after.id.to_string(),
        Some(after.name.clone()),
        &old,
        &new,
        diff,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::SetupEntry;
    use crate::models::TransactionType;
    use crate::services::{test_session, AlwaysConfirm, MonthService};
    use tempfile::TempDir;

    struct Decline;

    impl Confirm for Decline {
        fn confirm(&self, _prompt: &str) -> bool {
            false
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 12).unwrap()
    }

    fn january(temp: &TempDir) -> BudgetSession {
        let mut session = test_session(temp);
        MonthService::new(&mut session)
            .setup(
                &[
                    SetupEntry::new("Groceries", Money::from_dollars(400)),
                    SetupEntry::new("Rent", Money::from_dollars(1200)),
                ],
                None,
                &AlwaysConfirm,
            )
            .unwrap();
        session
    }

    #[test]
    fn test_walkthrough_through_service() {
        let temp = TempDir::new().unwrap();
        let mut session = january(&temp);
        let mut service = EnvelopeService::new(&mut session);

        let expense = service
            .record_expense("groceries", Money::from_dollars(50), "Market", date())
            .unwrap();
        assert_eq!(expense.kind, TransactionType::Expense);

        let (rent, groceries) = service
            .transfer("Rent", "Groceries", Money::from_dollars(100), date())
            .unwrap();
        assert_eq!(rent.allocated_amount, Money::from_dollars(1100));
        assert_eq!(groceries.allocated_amount, Money::from_dollars(500));

        let groceries = service
            .top_up("Groceries", Money::from_dollars(20), date())
            .unwrap();
        assert_eq!(groceries.allocated_amount, Money::from_dollars(520));

        let month = session.month().unwrap();
        assert_eq!(month.total_budget, Money::from_dollars(1620));
        assert_eq!(month.total_spent(), Money::from_dollars(50));

        // setup + expense + two transfer sides + top-up
        assert_eq!(session.audit().read_all().unwrap().len(), 5);
    }

    #[test]
    fn test_rejects_non_positive_amounts() {
        let temp = TempDir::new().unwrap();
        let mut session = january(&temp);
        let mut service = EnvelopeService::new(&mut session);

        for amount in [Money::zero(), Money::from_dollars(-5)] {
            assert!(service
                .record_expense("Rent", amount, "", date())
                .unwrap_err()
                .is_validation());
            assert!(service.top_up("Rent", amount, date()).unwrap_err().is_validation());
            assert!(service
                .transfer("Rent", "Groceries", amount, date())
                .unwrap_err()
                .is_validation());
        }
        assert_eq!(session.month().unwrap().total_budget, Money::from_dollars(1600));
    }

    #[test]
    fn test_overflowing_amounts_leave_month_untouched() {
        let temp = TempDir::new().unwrap();
        let mut session = january(&temp);
        let mut service = EnvelopeService::new(&mut session);
        let huge = Money::from_cents(i64::MAX);

        assert!(service.top_up("Groceries", huge, date()).unwrap_err().is_validation());
        assert!(service
            .transfer("Rent", "Groceries", huge, date())
            .unwrap_err()
            .is_validation());
        assert!(service.add("Yacht", huge).unwrap_err().is_validation());

        let month = session.month().unwrap();
        assert_eq!(month.total_budget, Money::from_dollars(1600));
        assert_eq!(month.categories.len(), 2);
        assert_eq!(session.audit().read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_transfer_to_self_and_unknown() {
        let temp = TempDir::new().unwrap();
        let mut session = january(&temp);
        let mut service = EnvelopeService::new(&mut session);

        let one = Money::from_dollars(1);
        assert!(service.transfer("Rent", "rent", one, date()).unwrap_err().is_validation());
        assert!(service.transfer("Rent", "Fun", one, date()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_transfer_can_overdraw_source() {
        let temp = TempDir::new().unwrap();
        let mut session = january(&temp);
        let (groceries, _) = EnvelopeService::new(&mut session)
            .transfer("Groceries", "Rent", Money::from_dollars(450), date())
            .unwrap();
        assert_eq!(groceries.allocated_amount, Money::from_dollars(-50));
        assert_eq!(session.month().unwrap().total_budget, Money::from_dollars(1600));
    }

    #[test]
    fn test_add_and_delete() {
        let temp = TempDir::new().unwrap();
        let mut session = january(&temp);
        let mut service = EnvelopeService::new(&mut session);

        assert!(service.add("  ", Money::zero()).unwrap_err().is_validation());
        assert!(service
            .add("Fun", Money::from_dollars(-1))
            .unwrap_err()
            .is_validation());

        let fun = service.add(" Fun ", Money::from_dollars(80)).unwrap();
        assert_eq!(fun.name, "Fun");
        assert!(matches!(
            service.delete("Fun", &Decline),
            Err(EnvelopeError::Cancelled(_))
        ));
        service.delete("Fun", &AlwaysConfirm).unwrap();

        let month = session.month().unwrap();
        assert_eq!(month.categories.len(), 2);
        assert_eq!(month.total_budget, Money::from_dollars(1600));
    }

    #[test]
    fn test_reorder() {
        let temp = TempDir::new().unwrap();
        let mut session = january(&temp);
        let mut service = EnvelopeService::new(&mut session);

        assert!(service
            .reorder("Groceries", Direction::Up)
            .unwrap_err()
            .is_validation());
        let month = service.reorder("Rent", Direction::Up).unwrap();
        assert_eq!(month.categories[0].name, "Rent");
        assert_eq!(session.month().unwrap().categories[1].name, "Groceries");
    }
}
