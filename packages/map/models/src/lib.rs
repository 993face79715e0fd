#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map configuration, path style and feature property types.
//!
//! [`MapConfig`] is the document served at `/map.json` and consumed by the
//! map bootstrap. [`PathStyle`] mirrors the Leaflet path options used for
//! geometries and circle markers. [`PropertyValue`] gives feature
//! properties an explicit shape so that presence is never inferred from
//! truthiness.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Property under which a feature's display identifier is stamped.
pub const SHOW_ID_PROPERTY: &str = "show:id";

/// A supported basemap provider.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MapProvider {
    /// Raster tiles rendered by Leaflet's tile layer.
    Leaflet,
    /// Vector tiles rendered by the Protomaps Leaflet layer.
    Protomaps,
}

/// Configuration details for maps using Protomaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtomapsConfig {
    /// A valid Protomaps theme label (e.g. `"white"`).
    pub theme: String,
}

/// The map configuration document.
///
/// `provider` is kept as the raw string so that an unknown provider
/// survives deserialisation and can be reported by the bootstrap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Map provider label (`leaflet` or `protomaps`).
    pub provider: String,
    /// Tile layer URL template or Protomaps endpoint.
    pub tile_url: String,
    /// Protomaps details, present when the provider is `protomaps`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protomaps: Option<ProtomapsConfig>,
    /// Style applied to non-point geometries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<PathStyle>,
    /// Style applied to point markers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_style: Option<PathStyle>,
    /// Feature properties listed in a feature's popup.
    #[serde(default)]
    pub label_properties: Vec<String>,
}

impl MapConfig {
    /// Parses the provider label.
    ///
    /// # Errors
    ///
    /// Returns [`strum::ParseError`] if the provider is missing or unknown.
    pub fn map_provider(&self) -> Result<MapProvider, strum::ParseError> {
        self.provider.parse()
    }
}

/// Leaflet path options for a geometry or circle marker.
///
/// Every attribute is optional; absent attributes are omitted when
/// serialised so the renderer's defaults apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    /// Stroke color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Fill color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    /// Stroke width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Stroke opacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Circle marker radius in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Fill opacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    /// Stroke dash pattern (e.g. `"5, 5"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<String>,
}

/// A feature property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number.
    Number(f64),
    /// JSON string.
    String(String),
    /// JSON array or object, kept as-is.
    Composite(serde_json::Value),
}

impl PropertyValue {
    /// Looks up `key` in a property map.
    ///
    /// Returns `None` only when the key is absent; a present `null` is
    /// [`PropertyValue::Null`].
    #[must_use]
    pub fn lookup(properties: &serde_json::Map<String, serde_json::Value>, key: &str) -> Option<Self> {
        properties.get(key).map(Self::from)
    }

    /// Returns the value as label text.
    ///
    /// Strings and numbers have a textual form; everything else does not.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Number(n) => Some(js_number(*n)),
            Self::Null | Self::Bool(_) | Self::Composite(_) => None,
        }
    }
}

impl From<&serde_json::Value> for PropertyValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map_or_else(|| Self::Composite(value.clone()), Self::Number),
            serde_json::Value::String(s) => Self::String(s.clone()),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                Self::Composite(value.clone())
            }
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&js_number(*n)),
            Self::String(s) => f.write_str(s),
            Self::Composite(v) => write!(f, "{v}"),
        }
    }
}

/// Formats a number the way a browser prints it.
///
/// Integral values drop the fractional part (`10`, not `10.0`), negative
/// zero prints as `0`, and magnitudes below `1e-6` or from `1e21` up use
/// exponent notation (`1e-7`, `1.5e+21`).
#[must_use]
#[allow(clippy::float_cmp)]
pub fn js_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let exponent = format!("{value:e}");
        return match exponent.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exponent,
        };
    }
    format!("{value}")
}

/// Stable identifier of a feature's entry in the display panel.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayId(String);

impl DisplayId {
    /// Returns the identifier for the feature at `index` (`show-1` for the
    /// first feature).
    #[must_use]
    pub fn for_index(index: usize) -> Self {
        Self(format!("show-{}", index + 1))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
