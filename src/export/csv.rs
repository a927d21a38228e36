//! CSV export
//!
//! One row per transaction of a month, in envelope order and then in the
//! order entries were recorded.

use std::io::Write;

use serde::Serialize;

use crate::error::{EnvelopeError, EnvelopeResult};
use crate::models::Month;

#[derive(Serialize)]
struct TransactionRecord<'a> {
    date: String,
    envelope: &'a str,
    kind: &'static str,
    description: &'a str,
    amount: String,
}

/// Write a month's transactions as CSV, returning the number of rows
pub fn export_month_csv<W: Write>(month: &Month, writer: W) -> EnvelopeResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for category in &month.categories {
        for txn in &category.transactions {
            csv_writer.serialize(TransactionRecord {
                date: txn.date.format("%Y-%m-%d").to_string(),
                envelope: &category.name,
                kind: txn.kind.label(),
                description: &txn.description,
                amount: format!("{:.2}", txn.amount.as_f64()),
            })?;
            rows += 1;
        }
    }

    if rows == 0 {
        csv_writer.write_record(["date", "envelope", "kind", "description", "amount"])?;
    }

    csv_writer
        .flush()
        .map_err(|e| EnvelopeError::Export(e.to_string()))?;
    Ok(rows)
}
