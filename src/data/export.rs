use std::path::Path;

use anyhow::{Context, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use super::model::{display, Product};

/// Header row of the comparison export.
pub const EXPORT_HEADER: [&str; 7] = [
    "Name",
    "Type",
    "Voltage",
    "Load",
    "Temperature",
    "Compliance",
    "File Number",
];

/// How field values are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportStyle {
    /// Straight comma join. Values containing `,` or line breaks will
    /// corrupt the row structure.
    #[default]
    Plain,
    /// Quote fields that contain the delimiter, quotes or line breaks.
    Quoted,
}

/// One export row, in header order. Missing fields are empty strings.
pub fn export_row(p: &Product) -> [String; 7] {
    [
        p.name.clone(),
        display(&p.product_type),
        display(&p.voltage),
        display(&p.load),
        display(&p.temperature),
        display(&p.compliance),
        p.file_number().unwrap_or_default(),
    ]
}

/// Serialise products as comma-delimited text: the fixed header, then one
/// line per product. Lines are joined by `\n` with no trailing newline.
pub fn to_delimited_text(products: &[Product], style: ExportStyle) -> Result<String> {
    let quote_style = match style {
        ExportStyle::Plain => QuoteStyle::Never,
        ExportStyle::Quoted => QuoteStyle::Necessary,
    };
    let mut writer = WriterBuilder::new()
        .quote_style(quote_style)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADER).context("writing export header")?;
    for (i, product) in products.iter().enumerate() {
        writer
            .write_record(export_row(product))
            .with_context(|| format!("writing export row {i}"))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("flushing export buffer")?;
    let mut text = String::from_utf8(bytes).context("export is not valid UTF-8")?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// Write the export for `products` to `path`.
pub fn write_export(path: &Path, products: &[Product], style: ExportStyle) -> Result<()> {
    let text = to_delimited_text(products, style)?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported {} products to {}", products.len(), path.display());
    Ok(())
}
