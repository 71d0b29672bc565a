use eframe::egui::{self, Rect};

use crate::config::CatalogConfig;
use crate::state::{AppState, ChartTab};
use crate::ui::{details, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CatalogApp {
    pub config: CatalogConfig,
    pub state: AppState,
    /// Chart waiting for the viewport screenshot it asked for.
    pending_capture: Option<(ChartTab, Rect)>,
}

impl CatalogApp {
    /// Restore the active tab preference and load the startup workbook.
    pub fn new(cc: &eframe::CreationContext<'_>, config: CatalogConfig) -> Self {
        let mut state = AppState::default();

        let stored_tab = cc
            .storage
            .and_then(|storage| storage.get_string(&config.active_tab_key));
        state.active_tab = ChartTab::from_stored(stored_tab.as_deref());

        panels::load_catalog(&mut state, &config.workbook_path);

        Self {
            config,
            state,
            pending_capture: None,
        }
    }

    /// Save the pending chart once its screenshot arrives.
    fn handle_screenshot(&mut self, ctx: &egui::Context) {
        let Some((tab, rect)) = self.pending_capture else {
            return;
        };
        let screenshot = ctx.input(|i| {
            i.events.iter().rev().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(image) = screenshot else {
            return;
        };
        self.pending_capture = None;

        let file = rfd::FileDialog::new()
            .set_title("Save chart")
            .set_file_name(tab.image_file_name())
            .add_filter("PNG", &["png"])
            .save_file();

        if let Some(path) = file {
            match plot::save_chart_image(&image, rect, ctx.pixels_per_point(), &path) {
                Ok(()) => log::info!("Saved {} chart to {}", tab.title(), path.display()),
                Err(e) => {
                    log::error!("Failed to save chart image: {e:#}");
                    self.state.status_message = Some(format!("Error: {e:#}"));
                }
            }
        }
    }
}

impl eframe::App for CatalogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_screenshot(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters and selector ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Right side panel: details / comparison ----
        egui::SidePanel::right("selection_panel")
            .default_width(360.0)
            .resizable(true)
            .show(ctx, |ui| {
                details::selection_panel(ui, &mut self.state, &self.config);
            });

        // ---- Central panel: charts ----
        let capture = egui::CentralPanel::default()
            .show(ctx, |ui| plot::chart_area(ui, &mut self.state))
            .inner;

        if let Some(request) = capture {
            self.pending_capture = Some(request);
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(Default::default()));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        storage.set_string(
            &self.config.active_tab_key,
            self.state.active_tab.id().to_string(),
        );
    }
}
