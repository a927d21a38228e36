//! Cloud sync backends
//!
//! `CloudSync` is the seam to whatever remote holds the user's years.
//! `SyncClient` pairs a backend with the current `Session`; without a signed-in
//! identity every call is a no-op. `DirectoryCloud` is a backend that keeps one
//! JSON record per identity and year under a directory, which works as a
//! shared-folder remote.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::error::{EnvelopeError, EnvelopeResult};
use crate::models::Year;
use crate::storage::{read_json, write_json_atomic};

/// Remote persistence for year snapshots
pub trait CloudSync: Send + Sync {
    /// Fetch the stored year for an identity; `None` when there is no record
    fn pull(&self, identifier: &str, year: i32) -> EnvelopeResult<Option<Year>>;

    /// Store a year for an identity, replacing any previous record
    fn push(&self, identifier: &str, year: &Year) -> EnvelopeResult<()>;
}

/// Who is signed in, if anyone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    identifier: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { identifier: None }
    }

    /// A session for the given identity; blank identities stay anonymous
    pub fn authenticated(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        let identifier = identifier.trim();
        Self {
            identifier: (!identifier.is_empty()).then(|| identifier.to_string()),
        }
    }

    pub fn from_identifier(identifier: Option<&str>) -> Self {
        identifier.map(Self::authenticated).unwrap_or_default()
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identifier.is_some()
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.identifier {
            Some(id) => write!(f, "signed in as {}", id),
            None => write!(f, "not signed in"),
        }
    }
}

/// A backend bound to the current session
#[derive(Clone)]
pub struct SyncClient {
    backend: Arc<dyn CloudSync>,
    session: Session,
}

impl SyncClient {
    pub fn new(backend: Arc<dyn CloudSync>, session: Session) -> Self {
        Self { backend, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Pull the signed-in user's year; `Ok(None)` when signed out or no record
    pub fn pull(&self, year: i32) -> EnvelopeResult<Option<Year>> {
        let Some(identifier) = self.session.identifier() else {
            debug!("pull skipped, not signed in");
            return Ok(None);
        };
        Ok(self
            .backend
            .pull(identifier, year)?
            .map(Year::normalized))
    }

    /// Push the signed-in user's year; does nothing when signed out
    pub fn push(&self, year: &Year) -> EnvelopeResult<()> {
        let Some(identifier) = self.session.identifier() else {
            debug!("push skipped, not signed in");
            return Ok(());
        };
        self.backend.push(identifier, year)
    }
}

impl fmt::Debug for SyncClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncClient")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Cloud backend stored as `<root>/<identifier>/year-YYYY.json`
#[derive(Debug, Clone)]
pub struct DirectoryCloud {
    root: PathBuf,
}

impl DirectoryCloud {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn record_path(&self, identifier: &str, year: i32) -> EnvelopeResult<PathBuf> {
        let folder = sanitize_identifier(identifier)?;
        Ok(self.root.join(folder).join(format!("year-{}.json", year)))
    }
}

impl CloudSync for DirectoryCloud {
    fn pull(&self, identifier: &str, year: i32) -> EnvelopeResult<Option<Year>> {
        let path = self.record_path(identifier, year)?;
        read_json(&path).map_err(|e| EnvelopeError::Sync(e.to_string()))
    }

    fn push(&self, identifier: &str, year: &Year) -> EnvelopeResult<()> {
        let path = self.record_path(identifier, year.year)?;
        write_json_atomic(&path, year).map_err(|e| EnvelopeError::Sync(e.to_string()))
    }
}

/// Map an identity to a safe folder name
fn sanitize_identifier(identifier: &str) -> EnvelopeResult<String> {
    let cleaned: String = identifier
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        return Err(EnvelopeError::Sync(format!(
            "Invalid cloud identifier: '{}'",
            identifier
        )));
    }
    Ok(cleaned)
}
