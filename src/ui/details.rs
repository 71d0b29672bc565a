use std::path::{Path, PathBuf};

use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::config::CatalogConfig;
use crate::data::export::{export_row, write_export, ExportStyle, EXPORT_HEADER};
use crate::data::model::{display, Product};
use crate::state::{AppState, SelectionView};

// ---------------------------------------------------------------------------
// Right side panel – single-product details or comparison table
// ---------------------------------------------------------------------------

pub fn selection_panel(ui: &mut Ui, state: &mut AppState, config: &CatalogConfig) {
    ui.heading("Selection");
    ui.separator();

    let mut export_clicked = false;
    match state.selection_view() {
        SelectionView::Nothing => {
            ui.weak("Pick one product for details, or several to compare.");
        }
        SelectionView::Details(product) => {
            let datasheet = state.datasheet_path(product, config);
            product_details(ui, product, datasheet);
        }
        SelectionView::Comparison(products) => {
            export_clicked = ui.button("Download Table as CSV").clicked();
            ui.add_space(4.0);
            comparison_table(ui, &products);
        }
    }

    if state.selected_products().len() > 1 {
        ui.separator();
        let mut quoted = state.export_style == ExportStyle::Quoted;
        if ui
            .checkbox(&mut quoted, "Quote fields containing commas")
            .changed()
        {
            state.export_style = if quoted {
                ExportStyle::Quoted
            } else {
                ExportStyle::Plain
            };
        }
    }

    if export_clicked {
        export_dialog(state, config);
    }
}

fn product_details(ui: &mut Ui, product: &Product, datasheet: Option<PathBuf>) {
    egui::Grid::new("product_details")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            let rows = [
                ("Name", product.name.clone()),
                ("Type", display(&product.product_type)),
                ("Voltage", display(&product.voltage)),
                ("Temperature", display(&product.temperature)),
                ("Load", display(&product.load)),
                ("Compliance", display(&product.compliance)),
            ];
            for (label, value) in rows {
                ui.strong(label);
                ui.label(value);
                ui.end_row();
            }

            ui.strong("File");
            match (product.file_number(), datasheet) {
                (Some(file_number), Some(path)) => {
                    ui.add(
                        egui::Hyperlink::from_label_and_url(file_number, file_url(&path))
                            .open_in_new_tab(true),
                    );
                }
                _ => {
                    ui.label("—");
                }
            }
            ui.end_row();
        });
}

fn file_url(path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", absolute.display())
}

fn comparison_table(ui: &mut Ui, products: &[&Product]) {
    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(Column::auto().at_least(60.0), EXPORT_HEADER.len())
            .header(20.0, |mut header| {
                for title in EXPORT_HEADER {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for product in products {
                    body.row(18.0, |mut row| {
                        for cell in export_row(product) {
                            row.col(|ui: &mut Ui| {
                                ui.label(cell);
                            });
                        }
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// CSV export dialog
// ---------------------------------------------------------------------------

fn export_dialog(state: &mut AppState, config: &CatalogConfig) {
    let products: Vec<Product> = state.selected_products().into_iter().cloned().collect();

    let file = rfd::FileDialog::new()
        .set_title("Export comparison")
        .set_file_name(config.export_file_name.as_str())
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = write_export(&path, &products, state.export_style) {
            log::error!("Failed to export comparison: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
