//! Named style presets for geometry roles.
//!
//! The catalog is a closed set of immutable records. Looking up a preset
//! by an unknown name is a programming error, not a runtime condition.

use geojson_show_map_models::PathStyle;
use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

/// The semantic role a preset is drawn for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum StyleName {
    /// Outline of a bounding box.
    Bbox,
    /// Label centroid marker.
    LabelCentroid,
    /// Mathematical centroid marker.
    MathCentroid,
    /// Geometric centroid marker.
    GeomCentroid,
    /// Search result centroid marker.
    SearchCentroid,
    /// Breach polygon (dashed outline).
    BreachPolygon,
    /// Consensus polygon.
    ConsensusPolygon,
    /// Parent polygon.
    ParentPolygon,
}

impl StyleName {
    /// Every style in the catalog.
    pub const ALL: &[Self] = &[
        Self::Bbox,
        Self::LabelCentroid,
        Self::MathCentroid,
        Self::GeomCentroid,
        Self::SearchCentroid,
        Self::BreachPolygon,
        Self::ConsensusPolygon,
        Self::ParentPolygon,
    ];
}

/// Rendering attributes for one geometry role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePreset {
    /// Stroke color.
    pub color: &'static str,
    /// Stroke width in pixels.
    pub weight: f64,
    /// Stroke opacity.
    pub opacity: f64,
    /// Fill color.
    pub fill_color: &'static str,
    /// Fill opacity.
    pub fill_opacity: f64,
    /// Marker radius, for point roles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Stroke dash pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<&'static str>,
}

impl StylePreset {
    /// Converts the preset into renderer path options.
    #[must_use]
    pub fn to_path_style(&self) -> PathStyle {
        PathStyle {
            color: Some(self.color.to_string()),
            fill_color: Some(self.fill_color.to_string()),
            weight: Some(self.weight),
            opacity: Some(self.opacity),
            radius: self.radius,
            fill_opacity: Some(self.fill_opacity),
            dash_array: self.dash_array.map(str::to_string),
        }
    }
}

const BBOX: StylePreset = StylePreset {
    color: "#000000",
    weight: 0.5,
    opacity: 1.0,
    fill_color: "#000000",
    fill_opacity: 0.4,
    radius: None,
    dash_array: None,
};

const LABEL_CENTROID: StylePreset = StylePreset {
    color: "#fff",
    weight: 3.0,
    opacity: 1.0,
    fill_color: "#ff0099",
    fill_opacity: 0.8,
    radius: Some(10.0),
    dash_array: None,
};

const MATH_CENTROID: StylePreset = StylePreset {
    color: "#fff",
    weight: 2.0,
    opacity: 1.0,
    fill_color: "#ff7800",
    fill_opacity: 0.8,
    radius: Some(6.0),
    dash_array: None,
};

const GEOM_CENTROID: StylePreset = StylePreset {
    color: "#fff",
    weight: 3.0,
    opacity: 1.0,
    fill_color: "#32cd32",
    fill_opacity: 0.8,
    radius: Some(10.0),
    dash_array: None,
};

const SEARCH_CENTROID: StylePreset = StylePreset {
    color: "#000",
    weight: 2.0,
    opacity: 1.0,
    fill_color: "#fe1e9f",
    fill_opacity: 1.0,
    radius: Some(6.0),
    dash_array: None,
};

const BREACH_POLYGON: StylePreset = StylePreset {
    color: "#ffff00",
    weight: 1.5,
    opacity: 1.0,
    fill_color: "#002EA7",
    fill_opacity: 0.1,
    radius: None,
    dash_array: Some("5, 5"),
};

const CONSENSUS_POLYGON: StylePreset = StylePreset {
    color: "#ff0066",
    weight: 2.0,
    opacity: 1.0,
    fill_color: "#ff69b4",
    fill_opacity: 0.6,
    radius: None,
    dash_array: None,
};

const PARENT_POLYGON: StylePreset = StylePreset {
    color: "#000",
    weight: 1.0,
    opacity: 1.0,
    fill_color: "#00308F",
    fill_opacity: 0.5,
    radius: None,
    dash_array: None,
};

/// Returns the preset for `name`.
#[must_use]
pub const fn get_style(name: StyleName) -> &'static StylePreset {
    match name {
        StyleName::Bbox => &BBOX,
        StyleName::LabelCentroid => &LABEL_CENTROID,
        StyleName::MathCentroid => &MATH_CENTROID,
        StyleName::GeomCentroid => &GEOM_CENTROID,
        StyleName::SearchCentroid => &SEARCH_CENTROID,
        StyleName::BreachPolygon => &BREACH_POLYGON,
        StyleName::ConsensusPolygon => &CONSENSUS_POLYGON,
        StyleName::ParentPolygon => &PARENT_POLYGON,
    }
}

/// Returns the preset registered under a `snake_case` name.
///
/// # Panics
///
/// Panics if `name` is not in the catalog. Style names are fixed at
/// development time, so an unknown name is a bug in the caller.
#[must_use]
pub fn style_by_name(name: &str) -> &'static StylePreset {
    let style: StyleName = name
        .parse()
        .unwrap_or_else(|_| panic!("Unknown style preset '{name}'"));
    get_style(style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn names_round_trip() {
        for name in StyleName::ALL {
            let parsed: StyleName = name.as_ref().parse().unwrap();
            assert_eq!(parsed, *name);
        }
        assert_eq!(StyleName::ConsensusPolygon.to_string(), "consensus_polygon");
    }

    #[test]
    fn all_lists_every_name_once() {
        let unique: BTreeSet<_> = StyleName::ALL.iter().collect();
        assert_eq!(unique.len(), StyleName::ALL.len());
        assert_eq!(StyleName::ALL.len(), 8);
    }

    #[test]
    fn point_roles_have_a_radius() {
        for name in [
            StyleName::LabelCentroid,
            StyleName::MathCentroid,
            StyleName::GeomCentroid,
            StyleName::SearchCentroid,
        ] {
            assert!(get_style(name).radius.is_some(), "{name} has no radius");
        }
        assert!(get_style(StyleName::ConsensusPolygon).radius.is_none());
    }

    #[test]
    fn breach_polygon_is_dashed() {
        assert_eq!(get_style(StyleName::BreachPolygon).dash_array, Some("5, 5"));
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(style_by_name("search_centroid"), get_style(StyleName::SearchCentroid));
    }

    #[test]
    #[should_panic(expected = "Unknown style preset")]
    fn unknown_name_panics() {
        let _ = style_by_name("sparkly_polygon");
    }

    #[test]
    fn path_style_carries_every_attribute() {
        let style = get_style(StyleName::SearchCentroid).to_path_style();
        assert_eq!(style.color.as_deref(), Some("#000"));
        assert_eq!(style.fill_color.as_deref(), Some("#fe1e9f"));
        assert_eq!(style.radius, Some(6.0));
        assert_eq!(style.fill_opacity, Some(1.0));
        assert_eq!(style.dash_array, None);
    }
}
