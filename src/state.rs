use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::config::CatalogConfig;
use crate::data::export::ExportStyle;
use crate::data::filter::{filter_products, FilterTerms};
use crate::data::group::{group_by_type, TypeGroup};
use crate::data::model::{Catalog, Product};
use crate::data::series::{self, ScatterChart, ScatterMode};

// ---------------------------------------------------------------------------
// Chart tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartTab {
    #[default]
    ThermalCutoff,
    Bimetallic,
    TemperatureSensor,
}

impl ChartTab {
    pub const ALL: [ChartTab; 3] = [
        ChartTab::ThermalCutoff,
        ChartTab::Bimetallic,
        ChartTab::TemperatureSensor,
    ];

    /// Identifier stored in the persisted preference.
    pub fn id(self) -> &'static str {
        match self {
            ChartTab::ThermalCutoff => "tcoSection",
            ChartTab::Bimetallic => "bimetallicSection",
            ChartTab::TemperatureSensor => "tempSensorSection",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    /// Tab to restore from a stored preference; unknown ids fall back to
    /// the default tab.
    pub fn from_stored(stored: Option<&str>) -> Self {
        stored.and_then(Self::from_id).unwrap_or_default()
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartTab::ThermalCutoff => "Thermal Cut-Off",
            ChartTab::Bimetallic => "Bimetallic",
            ChartTab::TemperatureSensor => "Temperature Sensor",
        }
    }

    /// Suggested file name for the PNG export of this chart.
    pub fn image_file_name(self) -> &'static str {
        match self {
            ChartTab::ThermalCutoff => "tco_scatter.png",
            ChartTab::Bimetallic => "bimetallic_scatter.png",
            ChartTab::TemperatureSensor => "temperature_sensor.png",
        }
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// What the detail area shows for the current selection.
#[derive(Debug, PartialEq)]
pub enum SelectionView<'a> {
    Nothing,
    Details(&'a Product),
    Comparison(Vec<&'a Product>),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Debug, Default)]
pub struct AppState {
    /// Everything from the last load; empty until a load succeeds.
    pub catalog: Catalog,

    /// File the catalog came from, used to resolve datasheet links.
    pub source_path: Option<PathBuf>,

    /// Current free-text filter inputs.
    pub filters: FilterTerms,

    /// Products passing the current filters, rederived from `catalog`.
    pub filtered_products: Vec<Product>,

    /// Names picked in the selector.
    pub selected_names: BTreeSet<String>,

    pub scatter_mode: ScatterMode,
    pub active_tab: ChartTab,
    pub export_style: ExportStyle,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Replace the catalog wholesale and rederive everything from it.
    pub fn set_catalog(&mut self, catalog: Catalog, source_path: Option<PathBuf>) {
        self.catalog = catalog;
        self.source_path = source_path;
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `filtered_products` from the full product set.
    /// The selector is rebuilt, so the selection is dropped.
    pub fn refilter(&mut self) {
        self.filtered_products = filter_products(&self.catalog.products, &self.filters);
        self.selected_names.clear();
    }

    pub fn set_type_filter(&mut self, term: &str) {
        self.filters.type_term = term.to_string();
        self.refilter();
    }

    pub fn set_compliance_filter(&mut self, term: &str) {
        self.filters.compliance_term = term.to_string();
        self.refilter();
    }

    pub fn toggle_selected(&mut self, name: &str) {
        if !self.selected_names.remove(name) {
            self.selected_names.insert(name.to_string());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_names.clear();
    }

    /// Filtered products whose name is selected, in filtered order.
    pub fn selected_products(&self) -> Vec<&Product> {
        self.filtered_products
            .iter()
            .filter(|p| self.selected_names.contains(&p.name))
            .collect()
    }

    pub fn selection_view(&self) -> SelectionView<'_> {
        let selected = self.selected_products();
        match selected.len() {
            0 => SelectionView::Nothing,
            1 => SelectionView::Details(selected[0]),
            _ => SelectionView::Comparison(selected),
        }
    }

    /// Selector option groups for the filtered products.
    pub fn option_groups(&self) -> Vec<TypeGroup<'_>> {
        group_by_type(&self.filtered_products)
    }

    pub fn thermal_chart(&self) -> ScatterChart {
        series::thermal_chart(&self.catalog.thermal)
    }

    pub fn bimetallic_chart(&self) -> ScatterChart {
        series::bimetallic_chart(&self.filtered_products, self.scatter_mode)
    }

    pub fn temperature_sensor_chart(&self) -> ScatterChart {
        series::temperature_sensor_chart(&self.filtered_products)
    }

    /// Datasheet location for `product`, next to the loaded workbook.
    pub fn datasheet_path(&self, product: &Product, config: &CatalogConfig) -> Option<PathBuf> {
        let file_number = product.file_number()?;
        let base = self
            .source_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or_else(|| Path::new(""));
        Some(base.join(config.datasheet_link(&file_number)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn catalog() -> Catalog {
        let products = [
            Record::new().with("name", "A").with("type", "Bimetallic").with("compliance", "UL"),
            Record::new().with("name", "B").with("type", "Temperature Sensor").with("compliance", "RoHS"),
            Record::new().with("name", "C").with("type", "Bimetallic").with("compliance", "CSA"),
            Record::new().with("name", "A").with("type", "Relay").with("filenumber", "F9"),
        ];
        Catalog::from_records(&products, Vec::new())
    }

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.set_catalog(catalog(), Some(PathBuf::from("/data/products.xlsx")));
        state
    }

    #[test]
    fn load_shows_all_products() {
        let state = loaded();
        assert_eq!(state.filtered_products, state.catalog.products);
    }

    #[test]
    fn relaxing_a_filter_restores_products() {
        let mut state = loaded();
        state.set_type_filter("bimetallic");
        assert_eq!(state.filtered_products.len(), 2);
        state.set_compliance_filter("csa");
        assert_eq!(state.filtered_products.len(), 1);
        state.set_type_filter("");
        state.set_compliance_filter("");
        assert_eq!(state.filtered_products.len(), 4);
    }

    #[test]
    fn reload_replaces_instead_of_merging() {
        let mut state = loaded();
        let smaller = Catalog::from_records(&[Record::new().with("name", "Z")], Vec::new());
        state.set_catalog(smaller, None);
        assert_eq!(state.catalog.len(), 1);
        assert_eq!(state.filtered_products.len(), 1);
    }

    #[test]
    fn selection_view_depends_on_count() {
        let mut state = loaded();
        assert_eq!(state.selection_view(), SelectionView::Nothing);

        state.toggle_selected("B");
        match state.selection_view() {
            SelectionView::Details(p) => assert_eq!(p.name, "B"),
            other => panic!("expected details, got {other:?}"),
        }

        state.toggle_selected("C");
        assert!(matches!(state.selection_view(), SelectionView::Comparison(ps) if ps.len() == 2));

        state.toggle_selected("C");
        state.toggle_selected("B");
        assert_eq!(state.selection_view(), SelectionView::Nothing);
    }

    #[test]
    fn selecting_a_shared_name_selects_every_match() {
        let mut state = loaded();
        state.toggle_selected("A");
        let names: Vec<&str> = state.selected_products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "A"]);
    }

    #[test]
    fn filter_change_clears_selection() {
        let mut state = loaded();
        state.toggle_selected("B");
        state.set_type_filter("sensor");
        assert!(state.selected_names.is_empty());
        assert_eq!(state.selection_view(), SelectionView::Nothing);
    }

    #[test]
    fn option_groups_follow_filtered_products() {
        let mut state = loaded();
        state.set_compliance_filter("u");
        let labels: Vec<String> = state.option_groups().into_iter().map(|g| g.label).collect();
        assert_eq!(labels, vec!["Bimetallic"]);
    }

    #[test]
    fn datasheet_path_is_next_to_workbook() {
        let state = loaded();
        let config = CatalogConfig::default();
        let relay = &state.catalog.products[3];
        assert_eq!(
            state.datasheet_path(relay, &config),
            Some(PathBuf::from("/data/files/F9.xlsx"))
        );
        assert_eq!(state.datasheet_path(&state.catalog.products[0], &config), None);
    }

    #[test]
    fn chart_tab_ids_round_trip() {
        for tab in ChartTab::ALL {
            assert_eq!(ChartTab::from_id(tab.id()), Some(tab));
        }
        assert_eq!(ChartTab::from_id("missing"), None);
    }

    #[test]
    fn stored_tab_preference_is_restored() {
        assert_eq!(ChartTab::from_stored(Some("bimetallicSection")), ChartTab::Bimetallic);
        assert_eq!(ChartTab::from_stored(Some("gone")), ChartTab::ThermalCutoff);
        assert_eq!(ChartTab::from_stored(None), ChartTab::ThermalCutoff);
    }
}
