use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto};
use serde_json::Value as JsonValue;

use super::model::{CellValue, REQUIRED_COLUMNS, SalaryDataset, SalaryRecord};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the salary dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`           – header row with column names, one record per row
/// * `.xlsx` / `.xls` – first worksheet, header row first (the original
///                      dataset artifact format)
/// * `.json`          – records orientation: `[{ "Age": 30, ... }, ...]`
pub fn load_file(path: &Path) -> Result<SalaryDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path)?,
        "xlsx" | "xls" => load_xlsx(path)?,
        "json" => load_json(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    ensure_required_columns(&dataset)?;
    Ok(dataset)
}

/// The charts and metrics read fixed columns; refuse datasets without them.
fn ensure_required_columns(dataset: &SalaryDataset) -> Result<()> {
    for required in REQUIRED_COLUMNS {
        if !dataset.column_names.iter().any(|c| c == required) {
            bail!("Dataset is missing required column '{required}'");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<SalaryDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut values = BTreeMap::new();
        for (col_idx, header) in headers.iter().enumerate() {
            let raw = record.get(col_idx).unwrap_or("");
            values.insert(header.clone(), guess_cell_type(raw));
        }
        records.push(SalaryRecord { values });
    }

    Ok(SalaryDataset::from_records(headers, records))
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    CellValue::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// Excel loader
// ---------------------------------------------------------------------------

/// Read the first worksheet; the first row holds the column names.
fn load_xlsx(path: &Path) -> Result<SalaryDataset> {
    let mut workbook = open_workbook_auto(path).context("opening spreadsheet")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("spreadsheet has no worksheets")?
        .context("reading first worksheet")?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .context("spreadsheet has no header row")?
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let empty = Data::Empty;
    let mut records = Vec::new();
    for row in rows {
        let mut values = BTreeMap::new();
        for (col_idx, header) in headers.iter().enumerate() {
            let cell = row.get(col_idx).unwrap_or(&empty);
            values.insert(header.clone(), excel_cell(cell));
        }
        records.push(SalaryRecord { values });
    }

    Ok(SalaryDataset::from_records(headers, records))
}

fn excel_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::String(s) => guess_cell_type(s),
        // Dates, durations and cell errors are carried as display text.
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Age": 30, "Year of Experience": 5.0, "Current Salary": 52000.0 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<SalaryDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut column_names: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut values = BTreeMap::new();
        for (key, val) in obj {
            if !column_names.iter().any(|c| c == key) {
                column_names.push(key.clone());
            }
            values.insert(key.clone(), json_cell(val));
        }
        records.push(SalaryRecord { values });
    }

    Ok(SalaryDataset::from_records(column_names, records))
}

fn json_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::Null => CellValue::Null,
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Bool(b) => CellValue::Text(b.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}
