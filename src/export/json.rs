//! JSON export
//!
//! The full budget year wrapped with schema and export metadata.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EnvelopeResult;
use crate::models::{Money, Year};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Year export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Application version that created the export
    pub app_version: String,
    pub metadata: ExportMetadata,
    pub year: Year,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub months_started: usize,
    pub envelope_count: usize,
    pub transaction_count: usize,
    pub total_budget: Money,
    pub total_spent: Money,
}

impl YearExport {
    pub fn from_year(year: &Year) -> Self {
        let categories = year.months.iter().flat_map(|m| m.categories.iter());
        let metadata = ExportMetadata {
            months_started: year.months.iter().filter(|m| m.is_started()).count(),
            envelope_count: categories.clone().count(),
            transaction_count: categories.map(|c| c.transactions.len()).sum(),
            total_budget: year.months.iter().map(|m| m.total_budget).sum(),
            total_spent: year.months.iter().map(|m| m.total_spent()).sum(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            metadata,
            year: year.clone(),
        }
    }
}

/// Write the year as pretty-printed JSON
pub fn export_year_json<W: Write>(year: &Year, writer: &mut W) -> EnvelopeResult<()> {
    let export = YearExport::from_year(year);
    serde_json::to_writer_pretty(&mut *writer, &export)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{self, SetupEntry};
    use chrono::NaiveDate;

    #[test]
    fn test_export_contains_year_and_metadata() {
        let year = Year::new(2025);
        let march = ledger::setup(
            year.month(2).unwrap(),
            &[SetupEntry::new("Rent", Money::from_dollars(1000))],
            None,
        );
        let rent = march.categories[0].id;
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let march = ledger::record_expense(&march, rent, Money::from_dollars(1000), "March rent", date);
        let year = year.with_month(march);

        let mut buffer = Vec::new();
        export_year_json(&year, &mut buffer).unwrap();
        let export: YearExport = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.months_started, 1);
        assert_eq!(export.metadata.envelope_count, 1);
        assert_eq!(export.metadata.transaction_count, 1);
        assert_eq!(export.metadata.total_spent, Money::from_dollars(1000));
        assert_eq!(export.year, year);
    }
}
