//! Turning features into layers and binding labels, popups and
//! click-selection to them.
//!
//! Point labels come from two places. A feature may carry its label
//! directly in [`LABEL_TEXT_PROPERTY`] (and a link in
//! [`LABEL_HREF_PROPERTY`]), or a lookup table keyed by the serialised
//! `[lng, lat]` of the point may be supplied in [`LABEL_NAMES_PROPERTY`]
//! (and [`LABEL_LINKS_PROPERTY`]), either on the feature itself or on the
//! collection's `properties` member.

use geojson::{Feature, FeatureCollection, JsonObject, JsonValue, Value};
use geojson_show_features_models::LatLng;
use geojson_show_map_models::{DisplayId, PathStyle, PropertyValue, js_number};

use crate::LabelError;
use crate::layer::{Popup, PopupRow, RenderedLayer, Tooltip};

/// Direct label text of a point feature.
pub const LABEL_TEXT_PROPERTY: &str = "lflt:label_text";
/// Direct label link of a point feature.
pub const LABEL_HREF_PROPERTY: &str = "lflt:label_href";
/// Label text table keyed by coordinate.
pub const LABEL_NAMES_PROPERTY: &str = "lflt:label_names";
/// Label link table keyed by coordinate.
pub const LABEL_LINKS_PROPERTY: &str = "lflt:label_links";

/// Serialises a point the way the lookup tables key it: `[lng,lat]` with
/// integral ordinates printed without a fractional part.
#[must_use]
pub fn coordinate_key(at: LatLng) -> String {
    format!("[{},{}]", js_number(at.lng), js_number(at.lat))
}

/// Collection-wide label tables.
#[derive(Debug, Clone, Default)]
pub struct LabelContext {
    properties: Option<JsonObject>,
}

impl LabelContext {
    /// Reads the `properties` member of a collection, if it is an object.
    #[must_use]
    pub fn from_collection(collection: &FeatureCollection) -> Self {
        let properties = collection
            .foreign_members
            .as_ref()
            .and_then(|members| members.get("properties"))
            .and_then(JsonValue::as_object)
            .cloned();

        Self { properties }
    }

    /// Creates a context from explicit collection properties.
    #[must_use]
    pub const fn new(properties: Option<JsonObject>) -> Self {
        Self { properties }
    }
}

/// The label, link and popup resolved for one layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelBinding {
    /// Tooltip text.
    pub text: Option<String>,
    /// Link followed from the tooltip.
    pub href: Option<String>,
}

/// Marker appearance for point features.
#[derive(Debug, Clone, Default)]
pub struct MarkerOptions {
    /// Circle marker style.
    pub style: PathStyle,
    /// Pane tooltips are drawn in.
    pub tooltip_pane: Option<String>,
}

/// Which interactions are bound to every feature layer.
#[derive(Debug, Clone, Default)]
pub struct InteractionConfig {
    /// Properties listed in the popup, in order. Empty means no popup.
    pub label_properties: Vec<String>,
    /// Whether clicking the layer selects the feature's display entry.
    pub select_on_click: bool,
}

/// Per-layer state handed to the binder.
#[derive(Debug, Clone)]
pub struct LayerContext {
    /// Display entry of the feature the layer was built from.
    pub display_id: DisplayId,
}

/// Resolves the label text and link for a point at `at`.
///
/// Direct properties win over lookup tables, and the feature's own tables
/// win over the collection's.
///
/// # Errors
///
/// Returns [`LabelError`] if a label property or table has a shape that
/// cannot yield text.
pub fn resolve_label(
    feature: &Feature,
    at: LatLng,
    context: &LabelContext,
) -> Result<LabelBinding, LabelError> {
    let key = coordinate_key(at);
    let own = feature.properties.as_ref();

    let text = resolve(own, context, LABEL_TEXT_PROPERTY, LABEL_NAMES_PROPERTY, &key)?;
    let href = resolve(own, context, LABEL_HREF_PROPERTY, LABEL_LINKS_PROPERTY, &key)?;

    Ok(LabelBinding { text, href })
}

fn resolve(
    own: Option<&JsonObject>,
    context: &LabelContext,
    direct: &str,
    table: &str,
    key: &str,
) -> Result<Option<String>, LabelError> {
    if let Some(properties) = own
        && let Some(text) = direct_text(properties, direct)?
    {
        return Ok(Some(text));
    }

    for properties in [own, context.properties.as_ref()].into_iter().flatten() {
        if let Some(text) = table_text(properties, table, key)? {
            return Ok(Some(text));
        }
    }

    Ok(None)
}

fn direct_text(properties: &JsonObject, property: &str) -> Result<Option<String>, LabelError> {
    PropertyValue::lookup(properties, property).map_or(Ok(None), |value| {
        label_text(&value).ok_or_else(|| LabelError::NotText {
            property: property.to_string(),
        })
    })
}

fn table_text(
    properties: &JsonObject,
    property: &str,
    key: &str,
) -> Result<Option<String>, LabelError> {
    let table = match properties.get(property) {
        None | Some(JsonValue::Null) => return Ok(None),
        Some(JsonValue::Object(table)) => table,
        Some(_) => {
            return Err(LabelError::NotATable {
                property: property.to_string(),
            });
        }
    };

    PropertyValue::lookup(table, key).map_or(Ok(None), |value| {
        label_text(&value).ok_or_else(|| LabelError::NotText {
            property: format!("{property}{key}"),
        })
    })
}

/// `Some(None)` for values that mean "no label", `Some(Some(_))` for text
/// and `None` for values that can never be a label.
fn label_text(value: &PropertyValue) -> Option<Option<String>> {
    match value {
        PropertyValue::Null => Some(None),
        PropertyValue::String(s) if s.is_empty() => Some(None),
        _ => value.as_text().map(Some),
    }
}

/// Creates a circle marker for a point and binds its label, if any.
///
/// A label that cannot be resolved is logged and skipped; the marker is
/// always returned.
#[must_use]
pub fn bind_point_layer(
    feature: &Feature,
    at: LatLng,
    options: &MarkerOptions,
    context: &LabelContext,
) -> RenderedLayer {
    let mut layer = RenderedLayer::marker(at, options.style.clone());

    match resolve_label(feature, at, context) {
        Ok(LabelBinding {
            text: Some(text),
            href,
        }) => {
            layer.tooltip = Some(Tooltip {
                text,
                permanent: true,
                interactive: true,
                pane: options.tooltip_pane.clone(),
                href,
            });
        }
        Ok(LabelBinding { text: None, .. }) => {}
        Err(e) => {
            log::warn!("Failed to bind label for point {}: {e}", coordinate_key(at));
        }
    }

    layer
}

/// Value shown in a popup row for a property the feature lacks.
pub const ABSENT_POPUP_VALUE: &str = "undefined";

/// Builds the popup listing `label_properties` with their current values.
///
/// Every configured property gets a row, with [`ABSENT_POPUP_VALUE`] for
/// those the feature lacks. There is no popup when all of them are absent.
#[must_use]
pub fn build_popup(feature: &Feature, label_properties: &[String]) -> Option<Popup> {
    let properties = feature.properties.as_ref()?;
    let mut any_present = false;

    let rows: Vec<_> = label_properties
        .iter()
        .map(|property| {
            let value = PropertyValue::lookup(properties, property).map_or_else(
                || ABSENT_POPUP_VALUE.to_string(),
                |value| {
                    any_present = true;
                    value.to_string()
                },
            );
            PopupRow {
                property: property.clone(),
                value,
            }
        })
        .collect();

    any_present.then_some(Popup { rows })
}

/// Binds the popup and click-selection configured in `config` to `layer`.
pub fn bind_feature_interactions(
    feature: &Feature,
    layer: &mut RenderedLayer,
    context: &LayerContext,
    config: &InteractionConfig,
) {
    layer.popup = build_popup(feature, &config.label_properties);

    if config.select_on_click {
        layer.selects = Some(context.display_id.clone());
    }
}

/// Builds the layers drawn for one feature.
///
/// Points become circle markers (one per position for a `MultiPoint`);
/// every other geometry is drawn as-is. A feature without geometry draws
/// nothing.
#[must_use]
pub fn feature_layers(
    feature: &Feature,
    marker: &MarkerOptions,
    geometry_style: &PathStyle,
    context: &LabelContext,
) -> Vec<RenderedLayer> {
    let Some(geometry) = &feature.geometry else {
        return vec![];
    };

    match &geometry.value {
        Value::Point(position) => LatLng::from_position(position)
            .map(|at| bind_point_layer(feature, at, marker, context))
            .into_iter()
            .collect(),
        Value::MultiPoint(positions) => positions
            .iter()
            .filter_map(|position| LatLng::from_position(position))
            .map(|at| bind_point_layer(feature, at, marker, context))
            .collect(),
        _ => vec![RenderedLayer::geometry(
            geometry.clone(),
            geometry_style.clone(),
        )],
    }
}
