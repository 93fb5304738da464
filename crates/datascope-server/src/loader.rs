//! Upload parsing: CSV and Excel files into DataFrames.

use anyhow::{Result, anyhow};
use calamine::{Data, Reader, open_workbook_auto};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

/// Parse a staged upload into a DataFrame based on its extension.
///
/// `extension` must already be lowercase; anything other than `csv` is
/// treated as a spreadsheet.
pub fn read_dataset(path: &Path, extension: &str) -> Result<DataFrame> {
    match extension {
        "csv" => load_csv_with_fallbacks(path),
        _ => load_excel(path),
    }
}

/// Load CSV with multiple fallback strategies.
fn load_csv_with_fallbacks(path: &Path) -> Result<DataFrame> {
    // Strategy 1: Standard loading with quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Standard CSV loading failed: {}", e);
        }
    }

    // Strategy 2: Without quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("CSV loading without quotes failed: {}", e);
        }
    }

    // Strategy 3: Pre-clean content
    let content = std::fs::read_to_string(path)?;
    let cleaned = clean_csv_content(&content);
    let cursor = std::io::Cursor::new(cleaned);

    CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .into_reader_with_file_handle(cursor)
        .finish()
        .map_err(|e| anyhow!("Failed to parse CSV content: {}", e))
}

/// Clean CSV content of stray quoting and blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Load the first worksheet of an Excel workbook as string columns.
///
/// The first row is the header; every cell is carried as text and left to
/// the cleaning pipeline's type coercion.
fn load_excel(path: &Path) -> Result<DataFrame> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| anyhow!("Failed to open workbook: {}", e))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first_sheet = sheet_names
        .first()
        .ok_or_else(|| anyhow!("Workbook contains no sheets"))?
        .clone();

    let range = workbook
        .worksheet_range(&first_sheet)
        .map_err(|e| anyhow!("Failed to read sheet '{}': {}", first_sheet, e))?;

    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| anyhow!("Sheet '{}' is empty", first_sheet))?;

    let headers = unique_headers(header_row);
    let width = headers.len();

    let mut column_values: Vec<Vec<Option<String>>> = vec![Vec::new(); width];
    for row in rows {
        for (col_idx, values) in column_values.iter_mut().enumerate() {
            values.push(row.get(col_idx).and_then(cell_to_string));
        }
    }

    let columns: Vec<Column> = headers
        .into_iter()
        .zip(column_values)
        .map(|(name, values)| Column::new(name.as_str().into(), values))
        .collect();

    DataFrame::new(columns).map_err(|e| anyhow!("Failed to assemble DataFrame: {}", e))
}

/// Header names from the first row, blanks filled and duplicates suffixed.
fn unique_headers(header_row: &[Data]) -> Vec<String> {
    let mut seen = std::collections::HashMap::new();
    header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let base = match cell_to_string(cell) {
                Some(name) => name,
                None => format!("column_{}", idx),
            };
            let count = seen.entry(base.clone()).or_insert(0usize);
            *count += 1;
            if *count == 1 {
                base
            } else {
                format!("{}_{}", base, *count - 1)
            }
        })
        .collect()
}

/// Convert one spreadsheet cell to text; empty and error cells become null.
fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        other => {
            let text = other.to_string();
            if text.trim().is_empty() {
                None
            } else {
                Some(text)
            }
        }
    }
}
