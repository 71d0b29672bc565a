use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::loader;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filters and grouped product selector
// ---------------------------------------------------------------------------

/// Render the left panel: the two free-text filters, then the products
/// grouped by type with one checkbox each.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let mut type_term = state.filters.type_term.clone();
    let type_edit = ui.add(egui::TextEdit::singleline(&mut type_term).hint_text("Type"));
    if type_edit.changed() {
        state.set_type_filter(&type_term);
    }

    let mut compliance_term = state.filters.compliance_term.clone();
    let compliance_edit =
        ui.add(egui::TextEdit::singleline(&mut compliance_term).hint_text("Compliance"));
    if compliance_edit.changed() {
        state.set_compliance_filter(&compliance_term);
    }

    ui.add_space(8.0);
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Products");
        if !state.selected_names.is_empty() && ui.small_button("Clear").clicked() {
            state.clear_selection();
        }
    });
    ui.separator();

    if state.catalog.is_empty() {
        ui.label("No catalog loaded.");
        return;
    }

    // Clone what we need so we can mutate state inside the loop.
    let groups: Vec<(String, Vec<String>)> = state
        .option_groups()
        .into_iter()
        .map(|g| {
            let names = g.products.iter().map(|p| p.name.clone()).collect();
            (g.label, names)
        })
        .collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if groups.is_empty() {
                ui.weak("No products match the filters.");
            }
            for (label, names) in &groups {
                let title = if label.is_empty() { "(no type)" } else { label.as_str() };
                egui::CollapsingHeader::new(RichText::new(format!("{title}  ({})", names.len())).strong())
                    .id_salt(label)
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        for name in names {
                            let mut checked = state.selected_names.contains(name);
                            if ui.checkbox(&mut checked, name.as_str()).changed() {
                                state.toggle_selected(name);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let reload_path = state.source_path.clone();
            if let Some(path) = reload_path {
                if ui.button("Reload").clicked() {
                    load_catalog(state, &path);
                    ui.close_menu();
                }
            }
        });

        ui.separator();

        if !state.catalog.is_empty() {
            ui.label(format!(
                "{} products loaded, {} shown",
                state.catalog.len(),
                state.filtered_products.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open product catalog")
        .add_filter("Supported files", &["xlsx", "xlsm", "xls", "ods", "json"])
        .add_filter("Workbooks", &["xlsx", "xlsm", "xls", "ods"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        load_catalog(state, &path);
    }
}

/// Load `path` and install it as the current catalog. Failures leave the
/// previous catalog in place and surface in the status line.
pub fn load_catalog(state: &mut AppState, path: &Path) {
    match loader::load_file(path) {
        Ok(catalog) => {
            log::info!(
                "Loaded {} products and {} thermal rows from {}",
                catalog.len(),
                catalog.thermal.rows.len(),
                path.display()
            );
            state.set_catalog(catalog, Some(path.to_path_buf()));
        }
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
