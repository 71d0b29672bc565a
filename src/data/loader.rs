use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use super::model::{Catalog, CellValue, Record};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("workbook {0} contains no sheets")]
    NoSheets(String),
    #[error("row {row} of {sheet} is not a JSON object")]
    NotAnObject { sheet: &'static str, row: usize },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a product catalog from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xls` / `.ods` – first sheet holds products, second
///   sheet (optional) holds thermal specs. Sheets are taken by position.
/// * `.json` – `{ "products": [{...}], "thermal_specs": [{...}] }`
pub fn load_file(path: &Path) -> Result<Catalog> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let catalog = match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_workbook(path)?,
        "json" => load_json(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    };
    log::debug!(
        "Decoded {} products and {} thermal rows from {}",
        catalog.products.len(),
        catalog.thermal.rows.len(),
        path.display()
    );
    Ok(catalog)
}

// ---------------------------------------------------------------------------
// Workbook loader
// ---------------------------------------------------------------------------

fn load_workbook(path: &Path) -> Result<Catalog> {
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("opening workbook {}", path.display()))?;

    let products = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::NoSheets(path.display().to_string()))?
        .context("reading product sheet")?;

    let thermal = match workbook.worksheet_range_at(1) {
        Some(range) => sheet_records(&range.context("reading thermal sheet")?),
        None => {
            log::warn!("{} has no second sheet; thermal chart will be empty", path.display());
            Vec::new()
        }
    };

    Ok(Catalog::from_records(&sheet_records(&products), thermal))
}

/// Turn a sheet into records keyed by its first row.
///
/// Blank header cells are named `__EMPTY`, repeated names get `_1`, `_2`, …
/// suffixes. Rows without any non-empty cell are skipped.
fn sheet_records(range: &Range<Data>) -> Vec<Record> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };
    let headers = header_names(header_row);

    rows.filter_map(|row| {
        let mut record = Record::new();
        for (header, cell) in headers.iter().zip(row) {
            record.push(header.as_str(), data_to_cell(cell));
        }
        (!record.is_empty()).then_some(record)
    })
    .collect()
}

fn header_names(row: &[Data]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(row.len());
    for cell in row {
        let base = match data_to_cell(cell) {
            CellValue::Empty => "__EMPTY".to_string(),
            value => value.to_string(),
        };
        let mut name = base.clone();
        let mut n = 0;
        while names.contains(&name) {
            n += 1;
            name = format!("{base}_{n}");
        }
        names.push(name);
    }
    names
}

fn data_to_cell(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        // Dates stay as serial numbers, the way spreadsheets store them.
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}

// ---------------------------------------------------------------------------
// JSON snapshot loader
// ---------------------------------------------------------------------------

/// Records-oriented snapshot of both sheets:
///
/// ```json
/// {
///   "products": [
///     { "name": "TC-100", "type": "Bimetallic", "voltage": "250V", ... }
///   ],
///   "thermal_specs": [
///     { "tf": 90, "tm": 105, "th": 110 }
///   ]
/// }
/// ```
#[derive(Debug, Deserialize)]
struct Snapshot {
    products: Vec<JsonValue>,
    #[serde(default, alias = "thermalSpecs")]
    thermal_specs: Vec<JsonValue>,
}

fn load_json(path: &Path) -> Result<Catalog> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let snapshot: Snapshot = serde_json::from_str(&text).context("parsing JSON snapshot")?;

    let products = json_records(&snapshot.products, "products")?;
    let thermal = json_records(&snapshot.thermal_specs, "thermal_specs")?;
    Ok(Catalog::from_records(&products, thermal))
}

fn json_records(values: &[JsonValue], sheet: &'static str) -> Result<Vec<Record>> {
    values
        .iter()
        .enumerate()
        .map(|(row, value)| -> Result<Record> {
            let obj = value
                .as_object()
                .ok_or(LoadError::NotAnObject { sheet, row })?;
            Ok(json_object_to_record(obj))
        })
        .collect()
}

fn json_object_to_record(obj: &Map<String, JsonValue>) -> Record {
    let mut record = Record::new();
    for (key, val) in obj {
        record.push(key.as_str(), json_to_cell(val));
    }
    record
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Int(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Empty,
        other => CellValue::String(other.to_string()),
    }
}
