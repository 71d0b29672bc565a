use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as it comes out of a workbook or JSON snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Empty,
}

impl CellValue {
    /// The text content, only for string cells.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

/// Renders the way a spreadsheet user reads the cell: `12.0` prints as `12`,
/// empty cells print as nothing.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

// ---------------------------------------------------------------------------
// Record – one decoded sheet row, fields in header order
// ---------------------------------------------------------------------------

/// One sheet row as an ordered list of `(column, value)` pairs.
/// Empty cells are not stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field; empty cells are skipped.
    pub fn push(&mut self, column: impl Into<String>, value: CellValue) {
        if !value.is_empty() {
            self.fields.push((column.into(), value));
        }
    }

    pub fn with(mut self, column: &str, value: impl Into<CellValue>) -> Self {
        self.push(column, value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Product – one row of the product sheet
// ---------------------------------------------------------------------------

/// Product fields that can be plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Voltage,
    Temperature,
    Load,
}

impl ProductField {
    /// Column name in the product sheet.
    pub fn key(self) -> &'static str {
        match self {
            ProductField::Voltage => "voltage",
            ProductField::Temperature => "temperature",
            ProductField::Load => "load",
        }
    }
}

/// A catalog entry decoded from the product sheet.
///
/// Only the recognised columns are kept. Descriptive fields stay as raw
/// cells because the sheet may hold numbers where text is expected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Product {
    pub name: String,
    pub product_type: Option<CellValue>,
    pub voltage: Option<CellValue>,
    pub temperature: Option<CellValue>,
    pub load: Option<CellValue>,
    pub compliance: Option<CellValue>,
    pub filenumber: Option<CellValue>,
    /// Legacy name of the file-number column.
    pub file: Option<CellValue>,
}

impl Product {
    pub fn from_record(record: &Record) -> Self {
        let cell = |column: &str| record.get(column).cloned();
        Product {
            name: record.get("name").map(|v| v.to_string()).unwrap_or_default(),
            product_type: cell("type"),
            voltage: cell("voltage"),
            temperature: cell("temperature"),
            load: cell("load"),
            compliance: cell("compliance"),
            filenumber: cell("filenumber"),
            file: cell("file"),
        }
    }

    pub fn field(&self, field: ProductField) -> Option<&CellValue> {
        match field {
            ProductField::Voltage => self.voltage.as_ref(),
            ProductField::Temperature => self.temperature.as_ref(),
            ProductField::Load => self.load.as_ref(),
        }
    }

    /// Type label, only when the cell holds text.
    pub fn type_text(&self) -> Option<&str> {
        self.product_type.as_ref().and_then(CellValue::as_str)
    }

    /// Compliance text, only when the cell holds text.
    pub fn compliance_text(&self) -> Option<&str> {
        self.compliance.as_ref().and_then(CellValue::as_str)
    }

    /// Type label for display and grouping; missing types give `""`.
    pub fn type_label(&self) -> String {
        display(&self.product_type)
    }

    /// Datasheet identifier: `filenumber` first, then the legacy `file`.
    /// Blank values count as absent.
    pub fn file_number(&self) -> Option<String> {
        [&self.filenumber, &self.file]
            .into_iter()
            .map(display)
            .find(|s| !s.is_empty())
    }
}

/// Render an optional cell, missing values as `""`.
pub fn display(cell: &Option<CellValue>) -> String {
    cell.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// ThermalTable – the second sheet
// ---------------------------------------------------------------------------

/// Thermal response rows plus the ordered union of their column names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThermalTable {
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
}

impl ThermalTable {
    pub fn from_rows(rows: Vec<Record>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for column in row.columns() {
                if !columns.iter().any(|c| c == column) {
                    columns.push(column.to_string());
                }
            }
        }
        ThermalTable { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Catalog – the product of one load event
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub thermal: ThermalTable,
}

impl Catalog {
    pub fn from_records(products: &[Record], thermal: Vec<Record>) -> Self {
        Catalog {
            products: products.iter().map(Product::from_record).collect(),
            thermal: ThermalTable::from_rows(thermal),
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_cells_render_without_trailing_zero() {
        assert_eq!(CellValue::Float(12.0).to_string(), "12");
        assert_eq!(CellValue::Float(0.5).to_string(), "0.5");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn record_skips_empty_cells_and_keeps_order() {
        let mut record = Record::new();
        record.push("b", CellValue::Int(1));
        record.push("skip", CellValue::Empty);
        record.push("a", CellValue::from("x"));
        assert_eq!(record.columns().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(record.get("skip"), None);
    }

    #[test]
    fn product_decodes_recognised_columns() {
        let record = Record::new()
            .with("name", "TC-100")
            .with("type", "Bimetallic")
            .with("voltage", "250V")
            .with("colour", "red")
            .with("file", "legacy");
        let product = Product::from_record(&record);
        assert_eq!(product.name, "TC-100");
        assert_eq!(product.type_text(), Some("Bimetallic"));
        assert_eq!(product.voltage, Some(CellValue::from("250V")));
        assert_eq!(product.load, None);
        assert_eq!(product.file_number().as_deref(), Some("legacy"));
    }

    #[test]
    fn primary_file_number_wins_over_legacy() {
        let record = Record::new()
            .with("filenumber", "F1")
            .with("file", "OLD");
        assert_eq!(Product::from_record(&record).file_number().as_deref(), Some("F1"));

        let blank_primary = Record::new().with("filenumber", "").with("file", "OLD");
        assert_eq!(
            Product::from_record(&blank_primary).file_number().as_deref(),
            Some("OLD")
        );
    }

    #[test]
    fn numeric_type_is_not_text() {
        let product = Product::from_record(&Record::new().with("type", 7_i64));
        assert_eq!(product.type_text(), None);
        assert_eq!(product.type_label(), "7");
    }

    #[test]
    fn thermal_columns_are_union_in_first_seen_order() {
        let table = ThermalTable::from_rows(vec![
            Record::new().with("tf", 10.0).with("tm1", 50.0),
            Record::new().with("tf", 20.0).with("th2", 60.0),
        ]);
        assert_eq!(table.columns, vec!["tf", "tm1", "th2"]);
    }
}
