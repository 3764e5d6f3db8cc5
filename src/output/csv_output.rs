//! CSV export
//!
//! One header row, then one row per record in the order given. Unset fields
//! become empty cells.

use super::ExportResult;
use crate::record::Record;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Flat view of a record as one CSV row
#[derive(Debug, Serialize)]
struct RecordRow<'a> {
    name: Option<&'a str>,
    address: Option<&'a str>,
    website: Option<&'a str>,
    phone_number: Option<&'a str>,
    reviews_count: Option<u64>,
    reviews_average: Option<f64>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl<'a> From<&'a Record> for RecordRow<'a> {
    fn from(record: &'a Record) -> Self {
        Self {
            name: record.name(),
            address: record.address(),
            website: record.website(),
            phone_number: record.phone_number(),
            reviews_count: record.reviews_count(),
            reviews_average: record.reviews_average(),
            latitude: record.latitude(),
            longitude: record.longitude(),
        }
    }
}

/// Writes `records` as CSV to `writer`
pub fn write_csv<W: Write>(records: &[Record], writer: W) -> ExportResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    // serialize() only emits a header with the first row
    if records.is_empty() {
        csv_writer.write_record(super::COLUMNS)?;
    }
    for record in records {
        csv_writer.serialize(RecordRow::from(record))?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes `records` as CSV to a new file at `path`
///
/// # Arguments
///
/// * `records` - Records in discovery order
/// * `path` - Destination file; overwritten if it exists
pub fn save_csv(records: &[Record], path: &Path) -> ExportResult<()> {
    let file = File::create(path)?;
    write_csv(records, file)?;
    tracing::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
