//! Plain-text table preview of records

use super::COLUMNS;
use crate::record::Record;

const MAX_CELL_WIDTH: usize = 40;

/// Renders records as an aligned text table with a header row
pub fn format_table(records: &[Record]) -> String {
    let rows: Vec<[String; 8]> = records.iter().map(cells).collect();

    let mut widths = COLUMNS.map(|c| c.len());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &COLUMNS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn cells(record: &Record) -> [String; 8] {
    fn text(value: Option<&str>) -> String {
        truncate(value.unwrap_or_default())
    }
    fn number<T: ToString>(value: Option<T>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    [
        text(record.name()),
        text(record.address()),
        text(record.website()),
        text(record.phone_number()),
        number(record.reviews_count()),
        number(record.reviews_average()),
        number(record.latitude()),
        number(record.longitude()),
    ]
}

fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_CELL_WIDTH {
        return value.to_string();
    }
    let kept: String = value.chars().take(MAX_CELL_WIDTH - 3).collect();
    format!("{}...", kept)
}

fn push_row(out: &mut String, row: &[String; 8], widths: &[usize; 8]) {
    let padded: Vec<String> = row
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}
