use crate::error::Result;
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

/// Header plus one line per row; `None` fields become empty cells.
pub fn write_csv<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

pub fn render_table_rows<T>(rows: &[T], max_rows: usize) -> Option<String>
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return None;
    }
    Some(Table::new(slice).with(Style::markdown()).to_string())
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    match render_table_rows(rows, max_rows) {
        Some(table_str) => println!("{}\n", table_str),
        None => println!("(no rows)\n"),
    }
}
