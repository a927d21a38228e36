//! Local year snapshots
//!
//! One JSON file per year. Loading never fails: a missing or unreadable
//! snapshot yields a fresh default year, so the app always has something to
//! show. Saving reports errors to the caller.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::paths::EnvelopePaths;
use crate::error::EnvelopeResult;
use crate::models::Year;

use super::file_io::{read_json, write_json_atomic};

/// Persistence for year snapshots
pub trait SnapshotStore {
    /// Load a year, defaulting to twelve empty months if absent or corrupt
    fn load(&self, year: i32) -> Year;

    /// Persist a year snapshot
    fn save(&self, year: &Year) -> EnvelopeResult<()>;
}

/// Snapshot store backed by `data/year-YYYY.json` files
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    paths: EnvelopePaths,
}

impl JsonSnapshotStore {
    pub fn new(paths: EnvelopePaths) -> Self {
        Self { paths }
    }

    pub fn path_for(&self, year: i32) -> PathBuf {
        self.paths.year_file(year)
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self, year: i32) -> Year {
        let path = self.path_for(year);
        match read_json::<Year, _>(&path) {
            Ok(Some(snapshot)) if snapshot.year == year => snapshot.normalized(),
            Ok(Some(snapshot)) => {
                warn!(
                    path = %path.display(),
                    found = snapshot.year,
                    expected = year,
                    "snapshot belongs to another year, starting fresh"
                );
                Year::new(year)
            }
            Ok(None) => {
                debug!(year, "no snapshot yet, starting fresh");
                Year::new(year)
            }
            Err(e) => {
                warn!(error = %e, "unreadable snapshot, starting fresh");
                Year::new(year)
            }
        }
    }

    fn save(&self, year: &Year) -> EnvelopeResult<()> {
        write_json_atomic(self.path_for(year.year), year)
    }
}
