//! CSV ingest and normalization.
//!
//! This module turns a heterogeneous CSV into a clean numeric
//! `ObservationTable` that is safe to fit.
//!
//! Design goals:
//! - **Numeric-only columns**: a column is retained only if every kept row has
//!   a non-empty cell that parses to a finite f64. Everything else (ids,
//!   labels, dates, columns with gaps) is dropped and reported.
//! - **Row-level tolerance**: malformed CSV records are skipped with a
//!   recorded error, not fatal.
//! - **No duplicate rows**: bit-identical rows over the retained columns are
//!   removed, keeping the first occurrence.
//! - **Deterministic behavior**: no hidden randomness, stable ordering.
//! - **Separation of concerns**: no fitting logic here.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::ObservationTable;
use crate::error::AppError;

/// Summary of what ingest kept and dropped.
#[derive(Debug, Clone)]
pub struct DatasetStats {
    /// Data records read from the CSV (excluding the header).
    pub rows_read: usize,
    /// Rows that made it into the table.
    pub rows_used: usize,
    /// Exact duplicate rows removed (first occurrence kept).
    pub duplicates_removed: usize,
    /// Columns dropped for containing non-numeric or empty cells.
    pub dropped_columns: Vec<String>,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    /// 1-based CSV line number.
    pub line: usize,
    pub message: String,
}

/// Ingest output: the numeric table + stats + non-fatal row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub table: ObservationTable,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
}

/// Load a CSV file into a numeric observation table.
pub fn load_table(path: &Path) -> Result<IngestedData, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    read_table(file)
}

/// Ingest from any reader. Split out from [`load_table`] so tests can feed
/// in-memory CSV data.
pub fn read_table(reader: impl Read) -> Result<IngestedData, AppError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let names = header_names(&headers)?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in csv_reader.records().enumerate() {
        // +2 because records() starts after the header and CSV lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        if record.len() != names.len() {
            row_errors.push(RowError {
                line,
                message: format!(
                    "Expected {} fields, found {}.",
                    names.len(),
                    record.len()
                ),
            });
            continue;
        }

        records.push(record);
    }

    let numeric = numeric_column_indices(&names, &records);
    let dropped_columns: Vec<String> = names
        .iter()
        .enumerate()
        .filter(|(i, _)| !numeric.contains(i))
        .map(|(_, n)| n.clone())
        .collect();

    if numeric.is_empty() {
        return Err(AppError::new(
            3,
            "No numeric columns found; nothing to regress on.",
        ));
    }
    if numeric.len() < 2 {
        return Err(AppError::new(
            3,
            "Only one numeric column found; regression needs a dependent and at least one independent column.",
        ));
    }

    let columns: Vec<String> = numeric.iter().map(|&i| names[i].clone()).collect();

    // Project records onto the numeric columns, dropping exact duplicates.
    // Dedup keys use the f64 bit patterns so the comparison stays exact.
    let mut seen: HashSet<Vec<u64>> = HashSet::new();
    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(records.len());
    let mut duplicates_removed = 0usize;

    for record in &records {
        let row: Vec<f64> = numeric
            .iter()
            .map(|&i| parse_finite(record.get(i).unwrap_or("")).unwrap_or(f64::NAN))
            .collect();
        // Column typing already proved every cell parses; NaN cannot occur here.
        let key: Vec<u64> = row.iter().map(|v| v.to_bits()).collect();
        if seen.insert(key) {
            rows.push(row);
        } else {
            duplicates_removed += 1;
        }
    }

    if rows.is_empty() {
        return Err(AppError::new(
            3,
            "No usable data rows remain after validation.",
        ));
    }

    let rows_used = rows.len();
    let table = ObservationTable::new(columns, rows)?;

    Ok(IngestedData {
        table,
        stats: DatasetStats {
            rows_read,
            rows_used,
            duplicates_removed,
            dropped_columns,
        },
        row_errors,
    })
}

fn header_names(headers: &StringRecord) -> Result<Vec<String>, AppError> {
    let names: Vec<String> = headers.iter().map(normalize_header_name).collect();

    if names.iter().any(|n| n.is_empty()) {
        return Err(AppError::new(2, "CSV has an empty column header."));
    }

    let mut seen = HashSet::new();
    for name in &names {
        if !seen.insert(name) {
            return Err(AppError::new(
                2,
                format!("Duplicate column header `{name}` in CSV."),
            ));
        }
    }

    Ok(names)
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿price"). If we don't strip it, column selection
    // will incorrectly report missing columns.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

/// Indices of columns where every kept record has a finite numeric value.
fn numeric_column_indices(names: &[String], records: &[StringRecord]) -> Vec<usize> {
    (0..names.len())
        .filter(|&col| {
            records.iter().all(|record| {
                record
                    .get(col)
                    .and_then(parse_finite)
                    .is_some()
            })
        })
        .collect()
}

fn parse_finite(s: &str) -> Option<f64> {
    if s.is_empty() {
        return None;
    }
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ingest(csv: &str) -> IngestedData {
        read_table(Cursor::new(csv.as_bytes())).unwrap()
    }

    #[test]
    fn drops_non_numeric_columns() {
        let data = ingest(
            "id,price,area,city\n\
             a1,200,50,Oslo\n\
             a2,320,80,Bergen\n",
        );

        assert_eq!(data.table.column_names(), &["price", "area"]);
        assert_eq!(data.stats.dropped_columns, vec!["id", "city"]);
        assert_eq!(data.table.n_rows(), 2);
    }

    #[test]
    fn column_with_missing_cell_is_dropped() {
        let data = ingest(
            "price,area,age\n\
             200,50,\n\
             320,80,12\n",
        );

        assert_eq!(data.table.column_names(), &["price", "area"]);
        assert_eq!(data.stats.dropped_columns, vec!["age"]);
    }

    #[test]
    fn removes_exact_duplicate_rows() {
        let data = ingest(
            "price,area\n\
             200,50\n\
             320,80\n\
             200,50\n",
        );

        assert_eq!(data.table.n_rows(), 2);
        assert_eq!(data.stats.rows_read, 3);
        assert_eq!(data.stats.rows_used, 2);
        assert_eq!(data.stats.duplicates_removed, 1);
    }

    #[test]
    fn short_records_are_reported_not_fatal() {
        let data = ingest(
            "price,area\n\
             200,50\n\
             999\n\
             320,80\n",
        );

        assert_eq!(data.table.n_rows(), 2);
        assert_eq!(data.row_errors.len(), 1);
        assert_eq!(data.row_errors[0].line, 3);
    }

    #[test]
    fn strips_bom_from_first_header() {
        let data = ingest("\u{feff}price,area\n200,50\n320,80\n");
        assert_eq!(data.table.column_names(), &["price", "area"]);
    }

    #[test]
    fn single_numeric_column_is_an_error() {
        let err = read_table(Cursor::new("price,city\n200,Oslo\n".as_bytes())).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn all_rows_duplicated_still_keeps_first() {
        let data = ingest("a,b\n1,2\n1,2\n1,2\n");
        assert_eq!(data.table.n_rows(), 1);
        assert_eq!(data.stats.duplicates_removed, 2);
    }
}
