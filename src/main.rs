mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::CatalogApp;
use config::CatalogConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = CatalogConfig::default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "Catalog Browser – Product Viewer",
        options,
        Box::new(move |cc| Ok(Box::new(CatalogApp::new(cc, config)))),
    )
}
