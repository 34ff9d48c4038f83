//! Tally export: JSON mapping and a CSV view of the year/title table.

use std::fs;
use std::path::Path;

use crate::error::ExportError;
use crate::tally::{CitationTally, TallyTable};

/// Write the tally as pretty-printed JSON.
///
/// The layout mirrors the in-memory mapping: title -> year -> count. An
/// empty tally produces an empty JSON object.
///
/// # Errors
///
/// Returns error on serialization or I/O failure.
pub fn write_json(tally: &CitationTally, path: &Path) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(tally)?;
    fs::write(path, json).map_err(|e| ExportError::Io { path: path.to_path_buf(), source: e })
}

/// Format the table as CSV: one row per year, one column per title.
#[must_use]
pub fn to_csv(table: &TallyTable) -> String {
    let mut output = String::from("year");
    for title in table.titles() {
        output.push(',');
        output.push_str(&escape_csv(title));
    }
    output.push('\n');

    for (year_index, year) in table.years().iter().enumerate() {
        output.push_str(year);
        for title_index in 0..table.titles().len() {
            output.push(',');
            output.push_str(&table.count(year_index, title_index).to_string());
        }
        output.push('\n');
    }

    output
}

/// Write the table as CSV.
///
/// # Errors
///
/// Returns error on I/O failure.
pub fn write_csv(table: &TallyTable, path: &Path) -> Result<(), ExportError> {
    fs::write(path, to_csv(table))
        .map_err(|e| ExportError::Io { path: path.to_path_buf(), source: e })
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
