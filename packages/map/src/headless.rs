//! A map with no display, recording what would be painted.
//!
//! [`RenderedMap`] is what the server hands the bundled page at
//! `/render.json` and what the `render` command prints: the view, the
//! basemap, every layer with its interactions, and the display entries.

use geojson_show_features_models::{LatLng, ViewportBounds};
use geojson_show_format::{DisplayPanel, FeatureFormatter};
use serde::Serialize;

use crate::BootstrapError;
use crate::bootstrap::{LoadSummary, bootstrap};
use crate::layer::{Basemap, RenderedLayer};
use crate::selection::Selection;
use crate::source::MapSource;
use crate::viewport::{DEFAULT_ZOOM, MapView, NULL_ISLAND, ViewportDecision};

/// Map state held in memory.
#[derive(Debug, Clone, Serialize)]
pub struct HeadlessMap {
    view: ViewportDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    basemap: Option<Basemap>,
    layers: Vec<RenderedLayer>,
}

impl Default for HeadlessMap {
    fn default() -> Self {
        Self {
            view: ViewportDecision::CenterZoom {
                center: NULL_ISLAND,
                zoom: DEFAULT_ZOOM,
            },
            basemap: None,
            layers: vec![],
        }
    }
}

impl HeadlessMap {
    /// Creates a map showing Null Island at the default zoom.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current view.
    #[must_use]
    pub const fn view(&self) -> ViewportDecision {
        self.view
    }

    /// The current basemap.
    #[must_use]
    pub const fn basemap(&self) -> Option<&Basemap> {
        self.basemap.as_ref()
    }

    /// Layers in the order they were added.
    #[must_use]
    pub fn layers(&self) -> &[RenderedLayer] {
        &self.layers
    }
}

impl MapView for HeadlessMap {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.view = ViewportDecision::CenterZoom { center, zoom };
    }

    fn fit_bounds(&mut self, bounds: ViewportBounds) {
        self.view = ViewportDecision::FitBounds { bounds };
    }

    fn set_basemap(&mut self, basemap: Basemap) {
        self.basemap = Some(basemap);
    }

    fn add_layer(&mut self, layer: RenderedLayer) {
        self.layers.push(layer);
    }

    fn clear_layers(&mut self) {
        self.layers.clear();
    }
}

/// A fully loaded map with its display panel and selection.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedMap {
    map: HeadlessMap,
    panel: DisplayPanel,
    selection: Selection,
    summary: LoadSummary,
}

impl RenderedMap {
    /// Loads `source` into a fresh headless map.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError`] if the map cannot be loaded.
    pub async fn load(
        source: &dyn MapSource,
        formatter: &dyn FeatureFormatter,
    ) -> Result<Self, BootstrapError> {
        let mut map = HeadlessMap::new();
        let mut panel = DisplayPanel::new();

        let summary = bootstrap(source, formatter, &mut map, &mut panel).await?;

        Ok(Self {
            map,
            panel,
            selection: Selection::default(),
            summary,
        })
    }

    /// The painted map.
    #[must_use]
    pub const fn map(&self) -> &HeadlessMap {
        &self.map
    }

    /// The display panel.
    #[must_use]
    pub const fn panel(&self) -> &DisplayPanel {
        &self.panel
    }

    /// The current selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// What the load produced.
    #[must_use]
    pub const fn summary(&self) -> &LoadSummary {
        &self.summary
    }

    /// Clicks the layer at `index`, selecting its feature if the layer is
    /// bound to one. Returns whether a layer was clicked.
    pub fn click_layer(&mut self, index: usize) -> bool {
        let Some(layer) = self.map.layers.get(index) else {
            return false;
        };

        if let Some(id) = &layer.selects {
            self.selection.on_layer_click(id, &mut self.panel);
        }

        true
    }

    /// Clicks the map background, clearing the selection.
    pub fn click_background(&mut self) {
        self.selection.on_background_click(&mut self.panel);
    }
}
