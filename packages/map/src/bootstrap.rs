//! Loading the map: basemap, feature layers, viewport and display panel.
//!
//! Configuration and feature data are required; failing to get either
//! aborts the load. Once both are in hand, formatting the display panel
//! and rendering the layers proceed side by side, and a formatting
//! failure only ever degrades the entry it concerns.

use geojson::FeatureCollection;
use geojson_show_features::bounds::collection_bbox;
use geojson_show_format::{
    DisplayPanel, FeatureFormatter, FormatSummary, format_features, stamp_features,
};
use geojson_show_map_models::{DisplayId, MapConfig, MapProvider};
use serde::Serialize;

use crate::BootstrapError;
use crate::interaction::{
    InteractionConfig, LabelContext, LayerContext, MarkerOptions, bind_feature_interactions,
    feature_layers,
};
use crate::layer::{Basemap, TILE_MAX_ZOOM};
use crate::source::MapSource;
use crate::styles::{StyleName, get_style};
use crate::viewport::{DEFAULT_ZOOM, MapView, NULL_ISLAND, ViewportDecision, fit_viewport};

/// Protomaps theme used when the configuration names none.
pub const DEFAULT_PROTOMAPS_THEME: &str = "white";

/// What a completed load produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoadSummary {
    /// Features in the collection.
    pub features: usize,
    /// Layers added to the map.
    pub layers: usize,
    /// How the viewport was fitted, if bounds could be derived.
    pub viewport: Option<ViewportDecision>,
    /// Display entries formatted versus shown raw.
    #[serde(skip)]
    pub formatting: FormatSummary,
}

/// Chooses the basemap described by `config`.
///
/// # Errors
///
/// Returns [`BootstrapError::UnknownProvider`] if the provider is missing
/// or not supported.
pub fn basemap_for(config: &MapConfig) -> Result<Basemap, BootstrapError> {
    let provider = config
        .map_provider()
        .map_err(|_| BootstrapError::UnknownProvider {
            provider: config.provider.clone(),
        })?;

    Ok(match provider {
        MapProvider::Leaflet => Basemap::Leaflet {
            tile_url: config.tile_url.clone(),
            max_zoom: TILE_MAX_ZOOM,
        },
        MapProvider::Protomaps => Basemap::Protomaps {
            url: config.tile_url.clone(),
            theme: config.protomaps.as_ref().map_or_else(
                || DEFAULT_PROTOMAPS_THEME.to_string(),
                |protomaps| protomaps.theme.clone(),
            ),
        },
    })
}

/// Adds the layers for every feature in `collection` to `map`, returning
/// how many were added.
///
/// Layers for the feature at index `i` select display entry
/// [`DisplayId::for_index`]`(i)` when clicked.
pub fn render_collection(
    collection: &FeatureCollection,
    config: &MapConfig,
    map: &mut impl MapView,
) -> usize {
    let labels = LabelContext::from_collection(collection);
    let marker = MarkerOptions {
        style: config
            .point_style
            .clone()
            .unwrap_or_else(|| get_style(StyleName::SearchCentroid).to_path_style()),
        tooltip_pane: None,
    };
    let geometry_style = config
        .style
        .clone()
        .unwrap_or_else(|| get_style(StyleName::ConsensusPolygon).to_path_style());
    let interactions = InteractionConfig {
        label_properties: config.label_properties.clone(),
        select_on_click: true,
    };

    let mut count = 0;

    for (index, feature) in collection.features.iter().enumerate() {
        let context = LayerContext {
            display_id: DisplayId::for_index(index),
        };

        for mut layer in feature_layers(feature, &marker, &geometry_style, &labels) {
            bind_feature_interactions(feature, &mut layer, &context, &interactions);
            map.add_layer(layer);
            count += 1;
        }
    }

    count
}

/// Loads the map from `source` into `map` and `panel`, replacing
/// whatever either held before.
///
/// # Errors
///
/// Returns [`BootstrapError`] if the configuration or feature data cannot
/// be retrieved, or if the configured provider is unknown. Nothing is
/// painted in that case.
pub async fn bootstrap(
    source: &dyn MapSource,
    formatter: &dyn FeatureFormatter,
    map: &mut impl MapView,
    panel: &mut DisplayPanel,
) -> Result<LoadSummary, BootstrapError> {
    let config = source
        .map_config()
        .await
        .map_err(BootstrapError::Config)
        .inspect_err(|e| log::error!("{e}"))?;

    let basemap = basemap_for(&config).inspect_err(|e| log::error!("{e}"))?;

    let features = source
        .features()
        .await
        .map_err(BootstrapError::Features)
        .inspect_err(|e| log::error!("{e}"))?;
    let collection = features.collection();

    map.clear_layers();
    panel.clear();
    map.set_view(NULL_ISLAND, DEFAULT_ZOOM);
    map.set_basemap(basemap);

    let stamped = stamp_features(features.documents());

    let formatting = format_features(&stamped, formatter, panel);
    let rendering = async {
        let layers = render_collection(collection, &config, map);

        let viewport = collection_bbox(collection)
            .map(|bbox| fit_viewport(map, &bbox.to_viewport_bounds()));
        if viewport.is_none() {
            log::warn!("Unable to derive bounds, keeping the default view");
        }

        (layers, viewport)
    };

    let (formatting, (layers, viewport)) = futures::join!(formatting, rendering);

    log::info!(
        "Loaded {} features as {layers} layers ({} entries formatted, {} raw)",
        features.len(),
        formatting.formatted,
        formatting.fallback
    );

    Ok(LoadSummary {
        features: features.len(),
        layers,
        viewport,
        formatting,
    })
}
