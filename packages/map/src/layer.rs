//! Renderer-independent descriptions of what goes on the map.

use geojson_show_features_models::LatLng;
use geojson_show_map_models::{DisplayId, PathStyle};
use serde::Serialize;

/// Maximum zoom offered by raster tile basemaps.
pub const TILE_MAX_ZOOM: u8 = 19;

/// The basemap painted beneath the features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum Basemap {
    /// Raster tiles from a URL template.
    Leaflet {
        /// Tile URL template.
        tile_url: String,
        /// Maximum zoom level.
        max_zoom: u8,
    },
    /// Protomaps vector tiles.
    Protomaps {
        /// Protomaps endpoint or archive URL.
        url: String,
        /// Theme label.
        theme: String,
    },
}

/// A tooltip attached to a marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    /// Label text.
    pub text: String,
    /// Whether the tooltip stays open instead of showing on hover only.
    pub permanent: bool,
    /// Whether the tooltip receives pointer events.
    pub interactive: bool,
    /// Map pane the tooltip is drawn in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pane: Option<String>,
    /// Link followed when the tooltip is clicked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// One `property: value` line of a popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopupRow {
    /// Property name.
    pub property: String,
    /// Property value as text.
    pub value: String,
}

/// A popup listing selected feature properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Popup {
    /// Rows in configured property order.
    pub rows: Vec<PopupRow>,
}

impl Popup {
    /// Renders the popup as HTML, one `<strong>name</strong> value` per
    /// line.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                format!(
                    "<strong>{}</strong> {}",
                    escape_html(&row.property),
                    escape_html(&row.value)
                )
            })
            .collect::<Vec<_>>()
            .join("<br />")
    }
}

/// The drawable part of a layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerShape {
    /// A circle marker at a single position.
    CircleMarker {
        /// Marker position.
        at: LatLng,
        /// Marker style.
        style: PathStyle,
    },
    /// Any non-point geometry drawn as-is.
    Geometry {
        /// The feature geometry.
        geometry: geojson::Geometry,
        /// Path style.
        style: PathStyle,
    },
}

/// A layer rendered for one feature, with its interactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedLayer {
    /// What is drawn.
    pub shape: LayerShape,
    /// Tooltip, for labelled point markers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Tooltip>,
    /// Popup opened when the layer is clicked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup: Option<Popup>,
    /// Display entry selected when the layer is clicked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selects: Option<DisplayId>,
}

impl RenderedLayer {
    /// Creates a circle marker layer without interactions.
    #[must_use]
    pub const fn marker(at: LatLng, style: PathStyle) -> Self {
        Self::new(LayerShape::CircleMarker { at, style })
    }

    /// Creates a geometry layer without interactions.
    #[must_use]
    pub const fn geometry(geometry: geojson::Geometry, style: PathStyle) -> Self {
        Self::new(LayerShape::Geometry { geometry, style })
    }

    const fn new(shape: LayerShape) -> Self {
        Self {
            shape,
            tooltip: None,
            popup: None,
            selects: None,
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
