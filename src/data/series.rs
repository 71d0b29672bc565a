use super::model::{CellValue, Product, ProductField, ThermalTable};

// ---------------------------------------------------------------------------
// Plot-ready output
// ---------------------------------------------------------------------------

/// A named, ordered sequence of `[x, y]` points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<[f64; 2]>,
}

/// Series plus the axis titles they are meant to be drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

// ---------------------------------------------------------------------------
// Numeric extraction
// ---------------------------------------------------------------------------

/// Best-effort number from a product field such as `"12V"` or `"85 °C"`.
///
/// Every character outside `[0-9.]` is removed, then the longest leading
/// decimal number is parsed (`"1.2.3"` gives `1.2`). Signs are stripped too,
/// so `"-5V"` reads as `5`. Returns `None` rather than zero on failure.
pub fn coerce_number(cell: Option<&CellValue>) -> Option<f64> {
    let stripped: String = cell?
        .to_string()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    leading_float(&stripped).filter(|v| v.is_finite())
}

/// Lenient numeric read used for thermal rows: numbers pass through, text is
/// read up to the first character that cannot continue a decimal number.
pub fn parse_float(cell: Option<&CellValue>) -> Option<f64> {
    let value = match cell? {
        CellValue::Int(i) => Some(*i as f64),
        CellValue::Float(v) => Some(*v),
        CellValue::String(s) => leading_float(s),
        CellValue::Bool(_) | CellValue::Empty => None,
    };
    value.filter(|v| v.is_finite())
}

/// Parse `[+-]? digits [. digits] [e[+-]digits]` from the start of `text`.
fn leading_float(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    // Retry "5.e3" as "5e3" in case the std parser refuses the bare dot.
    let number = &s[..end];
    number
        .parse()
        .ok()
        .or_else(|| number.replacen(".e", "e", 1).replacen(".E", "E", 1).parse().ok())
}

// ---------------------------------------------------------------------------
// Thermal cut-off scatter
// ---------------------------------------------------------------------------

/// Which thermal columns play which role, inferred from their names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThermalFields {
    /// Independent variable: first column whose name contains `tf`.
    pub tf: Option<String>,
    /// Trip-temperature columns: names containing `tm` or `th`.
    pub trips: Vec<String>,
}

impl ThermalFields {
    pub fn infer(columns: &[String]) -> Self {
        ThermalFields {
            tf: columns
                .iter()
                .find(|c| c.to_lowercase().contains("tf"))
                .cloned(),
            trips: columns
                .iter()
                .filter(|c| {
                    let name = c.to_lowercase();
                    name.contains("tm") || name.contains("th")
                })
                .cloned()
                .collect(),
        }
    }
}

/// One series per trip-temperature column, plotted against the `tf` column.
///
/// A row contributes to a series only when both values parse as finite
/// numbers; nothing is interpolated or zero-filled.
pub fn thermal_series(table: &ThermalTable) -> Vec<Series> {
    let fields = ThermalFields::infer(&table.columns);
    let Some(tf) = fields.tf.as_deref() else {
        return Vec::new();
    };

    fields
        .trips
        .iter()
        .map(|field| Series {
            label: field.clone(),
            points: table
                .rows
                .iter()
                .filter_map(|row| {
                    let x = parse_float(row.get(tf))?;
                    let y = parse_float(row.get(field))?;
                    Some([x, y])
                })
                .collect(),
        })
        .collect()
}

pub fn thermal_chart(table: &ThermalTable) -> ScatterChart {
    ScatterChart {
        x_label: "tf (°C)".to_string(),
        y_label: "Trip Temp (°C)".to_string(),
        series: thermal_series(table),
    }
}

// ---------------------------------------------------------------------------
// Per-product category scatter
// ---------------------------------------------------------------------------

/// Where the x coordinate of a product point comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XSource {
    /// 1-based position among the plotted products.
    Index,
    Field(ProductField),
}

/// Axis pairing for the bimetallic chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScatterMode {
    #[default]
    VoltageTemperature,
    VoltageLoad,
    LoadTemperature,
    IndexTemperature,
}

impl ScatterMode {
    pub const ALL: [ScatterMode; 4] = [
        ScatterMode::VoltageTemperature,
        ScatterMode::VoltageLoad,
        ScatterMode::LoadTemperature,
        ScatterMode::IndexTemperature,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ScatterMode::VoltageTemperature => "voltage-temperature",
            ScatterMode::VoltageLoad => "voltage-load",
            ScatterMode::LoadTemperature => "load-temperature",
            ScatterMode::IndexTemperature => "index-temperature",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.id() == id)
    }

    pub fn axes(self) -> (XSource, ProductField) {
        use ProductField::*;
        match self {
            ScatterMode::VoltageTemperature => (XSource::Field(Voltage), Temperature),
            ScatterMode::VoltageLoad => (XSource::Field(Voltage), Load),
            ScatterMode::LoadTemperature => (XSource::Field(Load), Temperature),
            ScatterMode::IndexTemperature => (XSource::Index, Temperature),
        }
    }
}

pub const BIMETALLIC_TYPE: &str = "bimetallic";
pub const TEMPERATURE_SENSOR_TYPE: &str = "temperature sensor";

/// Products whose lower-cased type equals `type_name` exactly.
fn of_type<'a>(products: &'a [Product], type_name: &'a str) -> impl Iterator<Item = &'a Product> {
    products
        .iter()
        .filter(move |p| p.type_text().is_some_and(|t| t.to_lowercase() == type_name))
}

/// One single-point series per product of `type_name`, labelled with the
/// product name. Products with a missing coordinate are left out.
pub fn category_series(
    products: &[Product],
    type_name: &str,
    x_source: XSource,
    y_field: ProductField,
) -> Vec<Series> {
    of_type(products, type_name)
        .enumerate()
        .filter_map(|(i, p)| {
            let x = match x_source {
                XSource::Index => (i + 1) as f64,
                XSource::Field(field) => coerce_number(p.field(field))?,
            };
            let y = coerce_number(p.field(y_field))?;
            Some(Series {
                label: p.name.clone(),
                points: vec![[x, y]],
            })
        })
        .collect()
}

pub fn bimetallic_chart(products: &[Product], mode: ScatterMode) -> ScatterChart {
    let (x, y) = mode.axes();
    let x_label = match x {
        XSource::Index => "Index",
        XSource::Field(field) => field.key(),
    };
    ScatterChart {
        x_label: x_label.to_string(),
        y_label: y.key().to_string(),
        series: category_series(products, BIMETALLIC_TYPE, x, y),
    }
}

pub fn temperature_sensor_chart(products: &[Product]) -> ScatterChart {
    ScatterChart {
        x_label: "Index".to_string(),
        y_label: "Max Temperature (°F)".to_string(),
        series: category_series(
            products,
            TEMPERATURE_SENSOR_TYPE,
            XSource::Index,
            ProductField::Temperature,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn product(record: Record) -> Product {
        Product::from_record(&record)
    }

    #[test]
    fn coerce_strips_units() {
        let v = CellValue::from("12V");
        assert_eq!(coerce_number(Some(&v)), Some(12.0));
        let v = CellValue::from("85 °C");
        assert_eq!(coerce_number(Some(&v)), Some(85.0));
        let v = CellValue::from("1.2.3");
        assert_eq!(coerce_number(Some(&v)), Some(1.2));
        let v = CellValue::Float(2.5);
        assert_eq!(coerce_number(Some(&v)), Some(2.5));
    }

    #[test]
    fn coerce_failure_is_none_not_zero() {
        assert_eq!(coerce_number(None), None);
        assert_eq!(coerce_number(Some(&CellValue::from("n/a"))), None);
        assert_eq!(coerce_number(Some(&CellValue::from("."))), None);
    }

    #[test]
    fn parse_float_reads_leading_number() {
        assert_eq!(parse_float(Some(&CellValue::from(" 42abc"))), Some(42.0));
        assert_eq!(parse_float(Some(&CellValue::from("-1.5e2"))), Some(-150.0));
        assert_eq!(parse_float(Some(&CellValue::from("bad"))), None);
        assert_eq!(parse_float(Some(&CellValue::Int(7))), Some(7.0));
        assert_eq!(parse_float(Some(&CellValue::Bool(true))), None);
        assert_eq!(parse_float(Some(&CellValue::Float(f64::NAN))), None);
    }

    #[test]
    fn infers_thermal_roles_by_name() {
        let columns: Vec<String> = ["Model", "TF", "Tm1", "TH max", "notes"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let fields = ThermalFields::infer(&columns);
        assert_eq!(fields.tf.as_deref(), Some("TF"));
        assert_eq!(fields.trips, vec!["Tm1", "TH max"]);
    }

    #[test]
    fn thermal_series_drops_unparseable_rows() {
        let table = ThermalTable::from_rows(vec![
            Record::new().with("tf", 10_i64).with("tm1", 50_i64),
            Record::new().with("tf", 20_i64).with("tm1", "bad"),
        ]);
        let series = thermal_series(&table);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, "tm1");
        assert_eq!(series[0].points, vec![[10.0, 50.0]]);
    }

    #[test]
    fn thermal_series_covers_columns_missing_from_first_row() {
        let table = ThermalTable::from_rows(vec![
            Record::new().with("tf", 10.0).with("tm1", 50.0),
            Record::new().with("tf", 20.0).with("th2", 70.0),
        ]);
        let series = thermal_series(&table);
        let labels: Vec<&str> = series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["tm1", "th2"]);
        assert_eq!(series[1].points, vec![[20.0, 70.0]]);
    }

    #[test]
    fn thermal_series_without_tf_column_is_empty() {
        let table = ThermalTable::from_rows(vec![Record::new().with("tm1", 50.0)]);
        assert!(thermal_series(&table).is_empty());
    }

    #[test]
    fn bimetallic_voltage_temperature_point() {
        let products = vec![product(
            Record::new()
                .with("name", "A")
                .with("voltage", "12V")
                .with("temperature", "85C")
                .with("type", "Bimetallic"),
        )];
        let chart = bimetallic_chart(&products, ScatterMode::VoltageTemperature);
        assert_eq!(
            chart.series,
            vec![Series {
                label: "A".to_string(),
                points: vec![[12.0, 85.0]],
            }]
        );
        assert_eq!(chart.x_label, "voltage");
        assert_eq!(chart.y_label, "temperature");
    }

    #[test]
    fn bimetallic_skips_other_types_and_missing_values() {
        let products = vec![
            product(Record::new().with("name", "A").with("type", "Bimetallic").with("load", "5A")),
            product(
                Record::new()
                    .with("name", "B")
                    .with("type", "bimetallic")
                    .with("voltage", "120")
                    .with("load", "10A"),
            ),
            product(
                Record::new()
                    .with("name", "C")
                    .with("type", "Bimetallic disc")
                    .with("voltage", "1")
                    .with("load", "1"),
            ),
        ];
        let chart = bimetallic_chart(&products, ScatterMode::VoltageLoad);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].label, "B");
        assert_eq!(chart.series[0].points, vec![[120.0, 10.0]]);
    }

    #[test]
    fn index_mode_counts_within_the_typed_sequence() {
        let products = vec![
            product(Record::new().with("name", "s").with("type", "Temperature Sensor").with("temperature", "150F")),
            product(Record::new().with("name", "a").with("type", "Bimetallic").with("temperature", "85")),
            product(Record::new().with("name", "b").with("type", "Bimetallic")),
            product(Record::new().with("name", "c").with("type", "BIMETALLIC").with("temperature", "95C")),
        ];
        let chart = bimetallic_chart(&products, ScatterMode::IndexTemperature);
        assert_eq!(chart.x_label, "Index");
        let points: Vec<[f64; 2]> = chart.series.iter().map(|s| s.points[0]).collect();
        assert_eq!(points, vec![[1.0, 85.0], [3.0, 95.0]]);
    }

    #[test]
    fn temperature_sensor_series_use_index_and_temperature() {
        let products = vec![
            product(Record::new().with("name", "s1").with("type", "Temperature Sensor").with("temperature", "150F")),
            product(Record::new().with("name", "b").with("type", "Bimetallic").with("temperature", "85")),
            product(Record::new().with("name", "s2").with("type", "temperature sensor").with("temperature", 200.0)),
        ];
        let chart = temperature_sensor_chart(&products);
        let labels: Vec<&str> = chart.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["s1", "s2"]);
        assert_eq!(chart.series[1].points, vec![[2.0, 200.0]]);
    }

    #[test]
    fn scatter_mode_ids_round_trip() {
        for mode in ScatterMode::ALL {
            assert_eq!(ScatterMode::from_id(mode.id()), Some(mode));
        }
        assert_eq!(ScatterMode::from_id("nope"), None);
    }
}
