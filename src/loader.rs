use crate::error::{PipelineError, Result};
use crate::types::{RawColumns, RawRow};
use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Columns that must exist in the input header; `balcony` may be absent.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "area_type",
    "society",
    "availability",
    "location",
    "size",
    "total_sqft",
    "bath",
    "price",
];

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub total_rows: usize,
    pub skipped_rows: usize,
}

pub fn load_rows(path: impl AsRef<Path>) -> Result<(Vec<RawRow>, LoadReport)> {
    let file = std::fs::File::open(path)?;
    read_rows(file)
}

pub fn read_rows<R: Read>(reader: R) -> Result<(Vec<RawRow>, LoadReport)> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(PipelineError::MissingColumns(missing));
    }

    let mut rows = Vec::new();
    let mut report = LoadReport::default();
    for result in rdr.deserialize::<RawRow>() {
        report.total_rows += 1;
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                warn!(error = %e, "skipping unreadable record");
                report.skipped_rows += 1;
            }
        }
    }
    Ok((rows, report))
}

/// Lay the kept fields out as columns. `area_type` and `society` were
/// already left behind by `RawRow`.
pub fn prune_columns(rows: Vec<RawRow>) -> RawColumns {
    let mut cols = RawColumns::default();
    for row in rows {
        cols.availability.push(row.availability);
        cols.location.push(row.location);
        cols.size.push(row.size);
        cols.total_sqft.push(row.total_sqft);
        cols.bath.push(row.bath);
        cols.balcony.push(row.balcony);
        cols.price.push(row.price);
    }
    cols
}
