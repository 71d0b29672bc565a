use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, ColorImage, Rect, Ui};
use egui_plot::{Legend, Plot, PlotPoints, Points};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::color::SeriesColors;
use crate::data::series::{ScatterChart, ScatterMode};
use crate::state::{AppState, ChartTab};

// ---------------------------------------------------------------------------
// Chart area (central panel)
// ---------------------------------------------------------------------------

/// Render the tab strip and the active chart.
///
/// Returns the active tab and its on-screen rectangle when the user asked to
/// save the chart as an image.
pub fn chart_area(ui: &mut Ui, state: &mut AppState) -> Option<(ChartTab, Rect)> {
    ui.horizontal(|ui: &mut Ui| {
        for tab in ChartTab::ALL {
            if ui.selectable_label(state.active_tab == tab, tab.title()).clicked() {
                state.active_tab = tab;
            }
        }
    });
    ui.separator();

    let tab = state.active_tab;
    let mut save_clicked = false;
    ui.horizontal(|ui: &mut Ui| {
        if tab == ChartTab::Bimetallic {
            ui.label("Axes");
            scatter_mode_selector(ui, &mut state.scatter_mode);
        }
        save_clicked = ui.button("Save PNG").clicked();
    });

    let chart = match tab {
        ChartTab::ThermalCutoff => state.thermal_chart(),
        ChartTab::Bimetallic => state.bimetallic_chart(),
        ChartTab::TemperatureSensor => state.temperature_sensor_chart(),
    };

    let rect = egui::CollapsingHeader::new(tab.title())
        .id_salt(tab.id())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            if chart.series.is_empty() {
                ui.weak("Nothing to plot for the current data.");
            }
            scatter_plot(ui, tab, &chart)
        })
        .body_returned;

    rect.filter(|_| save_clicked).map(|rect| (tab, rect))
}

fn scatter_mode_selector(ui: &mut Ui, mode: &mut ScatterMode) {
    egui::ComboBox::from_id_salt("bimetallic_axes")
        .selected_text(mode.id())
        .show_ui(ui, |ui: &mut Ui| {
            for option in ScatterMode::ALL {
                ui.selectable_value(mode, option, option.id());
            }
        });
}

/// Draw one scatter chart; every series is a separate legend entry.
fn scatter_plot(ui: &mut Ui, tab: ChartTab, chart: &ScatterChart) -> Rect {
    let colors = SeriesColors::new(&chart.series);
    let radius = match tab {
        ChartTab::ThermalCutoff => 4.0,
        _ => 5.0,
    };

    let mut plot = Plot::new(tab.id())
        .legend(Legend::default())
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(|name, value| {
            if name.is_empty() {
                String::new()
            } else {
                format!("{name}\n({}, {})", value.x, value.y)
            }
        });
    if tab == ChartTab::TemperatureSensor {
        plot = plot.include_x(0.0).include_y(0.0);
    }

    plot.show(ui, |plot_ui| {
        for series in &chart.series {
            let points: PlotPoints = series.points.iter().copied().collect();
            plot_ui.points(
                Points::new(points)
                    .name(&series.label)
                    .color(colors.color_for(&series.label))
                    .radius(radius),
            );
        }
    })
    .response
    .rect
}

// ---------------------------------------------------------------------------
// PNG export
// ---------------------------------------------------------------------------

/// Crop a viewport screenshot to `rect` (in points) and write it as PNG.
pub fn save_chart_image(
    screenshot: &ColorImage,
    rect: Rect,
    pixels_per_point: f32,
    path: &Path,
) -> Result<()> {
    let region = screenshot.region(&rect, Some(pixels_per_point));
    to_rgba_image(&region)
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))
}

fn to_rgba_image(image: &ColorImage) -> RgbaImage {
    let [width, height] = image.size;
    RgbaImage::from_fn(width as u32, height as u32, |x, y| {
        let pixel = image.pixels[y as usize * width + x as usize];
        Rgba(pixel.to_srgba_unmultiplied())
    })
}
