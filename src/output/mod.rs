//! Output module for exporting scraped records
//!
//! This module handles:
//! - Writing records as CSV (`write_csv`, `save_csv`)
//! - Rendering a plain-text table preview (`format_table`)
//! - Deriving the default export file name from a query

mod csv_output;
mod table;

pub use csv_output::{save_csv, write_csv};
pub use table::format_table;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while exporting records
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Column names, in record field order
pub const COLUMNS: [&str; 8] = [
    "name",
    "address",
    "website",
    "phone_number",
    "reviews_count",
    "reviews_average",
    "latitude",
    "longitude",
];

/// Default CSV path for a query: `<query>_google_maps_data.csv`
///
/// Path separators in the query are replaced so the file always lands in the
/// working directory.
pub fn default_output_path(query: &str) -> PathBuf {
    let stem: String = query
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    PathBuf::from(format!("{}_google_maps_data.csv", stem))
}
