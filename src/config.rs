use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Static application configuration
// ---------------------------------------------------------------------------

/// Fixed paths and names the browser works with.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Workbook opened at startup, relative to the working directory.
    pub workbook_path: PathBuf,
    /// Directory holding datasheets, relative to the workbook.
    pub datasheet_dir: String,
    /// Suggested file name for the comparison export.
    pub export_file_name: String,
    /// Storage key of the last active chart tab.
    pub active_tab_key: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            workbook_path: PathBuf::from("products.xlsx"),
            datasheet_dir: "files".to_string(),
            export_file_name: "product_comparison.csv".to_string(),
            active_tab_key: "activeTab".to_string(),
            window_size: [1280.0, 820.0],
            min_window_size: [720.0, 480.0],
        }
    }
}

impl CatalogConfig {
    /// Relative link to a product's datasheet, e.g. `files/4411.xlsx`.
    pub fn datasheet_link(&self, file_number: &str) -> String {
        format!("{}/{file_number}.xlsx", self.datasheet_dir)
    }
}
