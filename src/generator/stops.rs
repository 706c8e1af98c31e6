//! GTFS stop name loading

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::TestkitError;

/// Column holding the human readable stop name
const STOP_NAME_COLUMN: &str = "stop_name";

/// Load distinct stop names from a GTFS `stops.txt` style file.
///
/// Reads at most `max_rows` data rows. Names keep their first-seen order.
pub fn load_stop_names(path: impl AsRef<Path>, max_rows: usize) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open stops file: {}", path.display()))?;
    read_stop_names(file, &path.display().to_string(), max_rows)
}

/// Same as [`load_stop_names`] for any reader; `source` names it in errors
pub fn read_stop_names<R: Read>(reader: R, source: &str, max_rows: usize) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header of {source}"))?;
    let column = headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == STOP_NAME_COLUMN)
        .ok_or_else(|| TestkitError::MissingColumn {
            column: STOP_NAME_COLUMN.to_string(),
            file: source.to_string(),
        })?;

    let mut seen = HashSet::new();
    let mut names = Vec::new();
    let mut rows = 0usize;

    for record in reader.records().take(max_rows) {
        let record = record.with_context(|| format!("Failed to parse row in {source}"))?;
        rows += 1;

        let Some(raw) = record.get(column) else {
            continue;
        };
        let name = clean_name(raw);
        if name.is_empty() {
            continue;
        }
        if seen.insert(name.clone()) {
            names.push(name);
        }
    }

    debug!("Read {} rows, {} distinct stop names", rows, names.len());
    Ok(names)
}

fn clean_name(raw: &str) -> String {
    raw.trim().trim_matches('"').trim().to_string()
}
