use std::collections::HashMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::series::Series;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// `n` distinct colours on evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = i as f32 * 360.0 / n as f32;
            let rgb: Srgb = Hsl::new(hue, 0.7, 0.5).into_color();
            let [r, g, b] = [rgb.red, rgb.green, rgb.blue].map(|c| (c * 255.0).round() as u8);
            Color32::from_rgb(r, g, b)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series colours: legend label → Color32
// ---------------------------------------------------------------------------

/// Assigns each distinct series label its own colour, in first-seen order.
/// Series sharing a label (products with the same name) share a colour.
#[derive(Debug, Clone, Default)]
pub struct SeriesColors {
    mapping: HashMap<String, Color32>,
}

impl SeriesColors {
    pub fn new(series: &[Series]) -> Self {
        let mut labels: Vec<&str> = Vec::new();
        for s in series {
            if !labels.contains(&s.label.as_str()) {
                labels.push(&s.label);
            }
        }
        let palette = generate_palette(labels.len());
        let mapping = labels
            .into_iter()
            .zip(palette)
            .map(|(label, color)| (label.to_string(), color))
            .collect();
        SeriesColors { mapping }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(label: &str) -> Series {
        Series {
            label: label.to_string(),
            points: vec![[0.0, 0.0]],
        }
    }

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn first_hue_is_red() {
        let first = generate_palette(1)[0];
        assert!(first.r() > first.g() && first.r() > first.b());
    }

    #[test]
    fn distinct_labels_get_distinct_colors() {
        let colors = SeriesColors::new(&[series("a"), series("b"), series("a")]);
        assert_ne!(colors.color_for("a"), colors.color_for("b"));
        assert_eq!(colors.color_for("missing"), Color32::GRAY);
    }
}
