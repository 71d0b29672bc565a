use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

const PRODUCT_COLUMNS: [&str; 7] = [
    "name",
    "type",
    "voltage",
    "temperature",
    "load",
    "compliance",
    "filenumber",
];

/// (name, type, voltage, temperature, load, compliance, filenumber)
const PRODUCTS: &[[&str; 7]] = &[
    ["KSD-301", "Bimetallic", "250V", "85C", "10A", "UL, CSA, VDE", "E301"],
    ["KSD-302", "Bimetallic", "250V", "105C", "16A", "UL, VDE", "E302"],
    ["KSD-9700", "Bimetallic", "125V", "70C", "5A", "UL", "E9700"],
    ["ST-22", "Bimetallic", "24V DC", "150C", "2.5A", "RoHS", ""],
    ["TCO-A", "Thermal Cutoff", "250V", "192C", "15A", "UL, CQC", "T100"],
    ["TCO-B", "Thermal Cutoff", "250V", "216C", "10A", "UL, PSE", "T101"],
    ["NTC-10K", "Temperature Sensor", "5V", "257F", "", "RoHS, REACH", "S10"],
    ["PT100", "Temperature Sensor", "3.3V", "932F", "", "IEC 60751", "S11"],
    ["PT1000", "Temperature Sensor", "3.3V", "n/a", "", "IEC 60751", ""],
    ["RLY-5", "Relay", "12V", "", "5A", "CE", "R5"],
];

fn write_products(sheet: &mut Worksheet) -> Result<()> {
    sheet.set_name("Products")?;
    for (col, header) in PRODUCT_COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (row, product) in PRODUCTS.iter().enumerate() {
        for (col, value) in product.iter().enumerate() {
            if !value.is_empty() {
                sheet.write_string(row as u32 + 1, col as u16, *value)?;
            }
        }
    }
    Ok(())
}

/// Trip temperatures rise with the rated functioning temperature `tf`;
/// the hold temperature sits a fixed margin below it.
fn write_thermal(sheet: &mut Worksheet) -> Result<()> {
    sheet.set_name("Thermal")?;
    for (col, header) in ["Tf", "Tm min", "Tm max", "Th"].iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (i, tf) in (72..=240).step_by(12).enumerate() {
        let row = i as u32 + 1;
        let tf = f64::from(tf);
        sheet.write_number(row, 0, tf)?;
        sheet.write_number(row, 1, tf + 3.0 + (i % 3) as f64)?;
        sheet.write_number(row, 2, tf + 8.0 + (i % 4) as f64)?;
        // Every fifth row has no hold temperature; the chart skips it.
        if i % 5 != 4 {
            sheet.write_number(row, 3, tf - 25.0)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let mut workbook = Workbook::new();
    write_products(workbook.add_worksheet())?;
    write_thermal(workbook.add_worksheet())?;

    let output_path = "products.xlsx";
    workbook
        .save(output_path)
        .with_context(|| format!("writing {output_path}"))?;

    println!(
        "Wrote {} products and thermal specs to {output_path}",
        PRODUCTS.len()
    );
    Ok(())
}
