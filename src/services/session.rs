//! Budget session
//!
//! Owns the loaded year and the explicit application state around it: which
//! month is selected and which cloud identity is signed in. Every change goes
//! through [`BudgetSession::commit_month`]: the month is replaced in the year,
//! the year is saved locally, the audit entries are appended and a debounced
//! cloud push is scheduled.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::EnvelopePaths;
use crate::config::settings::Settings;
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::models::{Category, Money, Month, Year, MONTHS_PER_YEAR};
use crate::storage::{JsonSnapshotStore, SnapshotStore};
use crate::sync::{CloudSync, DebouncedSync, DirectoryCloud, Session, SyncClient};

/// Result of pulling the selected year from the cloud
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    /// Cloud data replaced the local year
    Replaced,
    /// Cloud and local data were already identical
    UpToDate,
    /// The cloud has no record for this year
    NoRecord,
    /// Nobody is signed in
    SignedOut,
}

/// Stable id used for month audit entries, e.g. "2025-01"
pub fn month_key(month: &Month) -> String {
    format!("{}-{:02}", month.year, month.month_index + 1)
}

/// The month header recorded in audit entries (no envelope contents)
pub(crate) fn month_digest(month: &Month) -> serde_json::Value {
    json!({
        "status": month.status,
        "total_budget": month.total_budget,
        "note": month.note,
        "envelopes": month.categories.len(),
    })
}

fn year_digest(year: &Year) -> serde_json::Value {
    json!({
        "months_started": year.months.iter().filter(|m| m.is_started()).count(),
        "total_budget": year.months.iter().map(|m| m.total_budget).sum::<Money>(),
        "total_spent": year.months.iter().map(Month::total_spent).sum::<Money>(),
    })
}

/// The loaded ledger plus the application state around it
pub struct BudgetSession {
    paths: EnvelopePaths,
    settings: Settings,
    store: Box<dyn SnapshotStore>,
    cloud: Arc<dyn CloudSync>,
    client: SyncClient,
    pusher: Option<DebouncedSync>,
    audit: AuditLogger,
    year: Year,
    month_index: usize,
}

impl BudgetSession {
    /// Open the session stored under `paths`
    pub fn open(paths: EnvelopePaths) -> EnvelopeResult<Self> {
        paths.ensure_directories()?;
        let settings = Settings::load_or_create(&paths)?;
        let store = Box::new(JsonSnapshotStore::new(paths.clone()));
        let cloud = Arc::new(DirectoryCloud::new(settings.cloud_dir(&paths)));
        Ok(Self::from_parts(paths, settings, store, cloud))
    }

    /// Assemble a session from explicit collaborators
    pub fn from_parts(
        paths: EnvelopePaths,
        settings: Settings,
        store: Box<dyn SnapshotStore>,
        cloud: Arc<dyn CloudSync>,
    ) -> Self {
        let year = store.load(settings.active_year);
        let month_index = settings.active_month.min(MONTHS_PER_YEAR - 1);
        let client = SyncClient::new(
            cloud.clone(),
            Session::from_identifier(settings.cloud_identifier.as_deref()),
        );
        let audit = AuditLogger::new(paths.audit_log());

        let mut session = Self {
            paths,
            settings,
            store,
            cloud,
            client,
            pusher: None,
            audit,
            year,
            month_index,
        };
        session.connect();
        session.refresh_from_cloud();
        session
    }

    pub fn paths(&self) -> &EnvelopePaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn currency(&self) -> &str {
        &self.settings.currency_symbol
    }

    pub fn year(&self) -> &Year {
        &self.year
    }

    pub fn month_index(&self) -> usize {
        self.month_index
    }

    /// The selected month
    pub fn month(&self) -> EnvelopeResult<&Month> {
        self.year
            .month(self.month_index)
            .ok_or_else(|| EnvelopeError::month_not_found(self.month_index.to_string()))
    }

    pub fn sync_session(&self) -> &Session {
        self.client.session()
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Point the session at another year and/or month for this run only
    pub fn focus(&mut self, year: Option<i32>, month_index: Option<usize>) -> EnvelopeResult<()> {
        if let Some(index) = month_index {
            if index >= MONTHS_PER_YEAR {
                return Err(EnvelopeError::Validation(format!(
                    "Month must be between 1 and {}",
                    MONTHS_PER_YEAR
                )));
            }
            self.month_index = index;
        }

        if let Some(year) = year {
            if year != self.year.year {
                debug!(year, "switching year");
                self.year = self.store.load(year);
                self.refresh_from_cloud();
            }
        }
        Ok(())
    }

    /// Change the selected year and month and remember the choice
    pub fn select(&mut self, year: Option<i32>, month_index: Option<usize>) -> EnvelopeResult<()> {
        self.focus(year, month_index)?;
        self.settings.active_year = self.year.year;
        self.settings.active_month = self.month_index;
        self.settings.save(&self.paths)
    }

    /// Resolve an envelope of the selected month by name or id
    pub fn find_category(&self, identifier: &str) -> EnvelopeResult<&Category> {
        self.month()?
            .find_category(identifier)
            .ok_or_else(|| EnvelopeError::category_not_found(identifier))
    }

    /// Replace a month of the loaded year and record the change
    pub fn commit_month(&mut self, updated: Month, entries: Vec<AuditEntry>) -> EnvelopeResult<()> {
        let year = self.year.with_month(updated);
        self.commit_year(year, entries)
    }

    /// Replace the whole loaded year and record the change
    pub fn commit_year(&mut self, year: Year, entries: Vec<AuditEntry>) -> EnvelopeResult<()> {
        self.store.save(&year)?;
        self.year = year;

        for entry in &entries {
            self.audit.log(entry)?;
        }

        if let Some(pusher) = &self.pusher {
            pusher.schedule(self.year.clone());
        }
        Ok(())
    }

    /// Pull the loaded year from the cloud; cloud data wins
    pub fn pull(&mut self) -> EnvelopeResult<PullOutcome> {
        if !self.client.session().is_authenticated() {
            return Ok(PullOutcome::SignedOut);
        }

        let Some(remote) = self.client.pull(self.year.year)? else {
            return Ok(PullOutcome::NoRecord);
        };
        if remote.year != self.year.year {
            warn!(found = remote.year, expected = self.year.year, "cloud record is for another year");
            return Ok(PullOutcome::NoRecord);
        }
        if remote == self.year {
            return Ok(PullOutcome::UpToDate);
        }

        self.store.save(&remote)?;
        let (before, after) = (year_digest(&self.year), year_digest(&remote));
        let diff = generate_diff(&before, &after)
            .unwrap_or_else(|| "envelope contents replaced".to_string());
        let entry = AuditEntry::update(
            EntityType::Year,
            remote.year.to_string(),
            self.client.session().identifier().map(str::to_string),
            &before,
            &after,
            Some(format!("replaced by cloud copy: {}", diff)),
        );
        self.year = remote;
        self.audit.log(&entry)?;
        info!(year = self.year.year, "local year replaced by cloud copy");
        Ok(PullOutcome::Replaced)
    }

    /// Push the loaded year to the cloud right away
    pub fn push(&self) -> EnvelopeResult<()> {
        if !self.client.session().is_authenticated() {
            return Err(EnvelopeError::Sync("not signed in".into()));
        }
        self.client.push(&self.year)
    }

    /// Sign in; cloud data for the loaded year replaces local data when it
    /// exists, otherwise the local year is uploaded
    pub fn login(&mut self, identifier: &str) -> EnvelopeResult<PullOutcome> {
        let session = Session::authenticated(identifier);
        let Some(identifier) = session.identifier() else {
            return Err(EnvelopeError::Validation(
                "Cloud identifier cannot be empty".into(),
            ));
        };

        self.settings.cloud_identifier = Some(identifier.to_string());
        self.settings.save(&self.paths)?;
        self.connect();

        let outcome = self.pull()?;
        if outcome == PullOutcome::NoRecord {
            self.push()?;
        }
        Ok(outcome)
    }

    /// Sign out after pushing anything still pending
    pub fn logout(&mut self) -> EnvelopeResult<()> {
        self.flush_sync();
        self.settings.cloud_identifier = None;
        self.settings.save(&self.paths)?;
        self.connect();
        Ok(())
    }

    /// Push any pending change now
    pub fn flush_sync(&self) {
        if let Some(pusher) = &self.pusher {
            pusher.flush();
        }
    }

    fn connect(&mut self) {
        // Dropping the old worker pushes what it still holds
        self.pusher = None;
        let session = Session::from_identifier(self.settings.cloud_identifier.as_deref());
        self.client = SyncClient::new(self.cloud.clone(), session);
        if self.client.session().is_authenticated() {
            self.pusher = Some(DebouncedSync::new(
                self.client.clone(),
                self.settings.sync_debounce(),
            ));
        }
    }

    fn refresh_from_cloud(&mut self) {
        if let Err(e) = self.pull() {
            warn!(error = %e, "cloud pull failed, keeping local data");
        }
    }
}

impl std::fmt::Debug for BudgetSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BudgetSession")
            .field("year", &self.year.year)
            .field("month_index", &self.month_index)
            .field("session", self.client.session())
            .finish_non_exhaustive()
    }
}
