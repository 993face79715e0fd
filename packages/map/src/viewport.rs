//! Fitting the map viewport to derived bounds.
//!
//! Zero-area bounds (a single point, or a collection holding one point)
//! cannot be fitted reliably, so they are centred at [`DEFAULT_ZOOM`]
//! instead.

use geojson_show_features_models::{LatLng, ViewportBounds};
use serde::Serialize;

use crate::layer::{Basemap, RenderedLayer};

/// Baseline zoom level used for the initial view and single points.
pub const DEFAULT_ZOOM: u8 = 12;

/// Where the map starts before any data is fitted.
pub const NULL_ISLAND: LatLng = LatLng::new(0.0, 0.0);

/// A map the bootstrap can paint into.
pub trait MapView {
    /// Centres the view on `center` at `zoom`.
    fn set_view(&mut self, center: LatLng, zoom: u8);

    /// Fits the view so `bounds` is fully visible.
    fn fit_bounds(&mut self, bounds: ViewportBounds);

    /// Replaces the basemap.
    fn set_basemap(&mut self, basemap: Basemap);

    /// Adds a feature layer on top of the existing ones.
    fn add_layer(&mut self, layer: RenderedLayer);

    /// Removes every feature layer.
    fn clear_layers(&mut self);
}

/// How the viewport is adjusted for a set of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewportDecision {
    /// Centre on a point at a fixed zoom.
    CenterZoom {
        /// View centre.
        center: LatLng,
        /// Zoom level.
        zoom: u8,
    },
    /// Fit a rectangle.
    FitBounds {
        /// Corners to fit.
        bounds: ViewportBounds,
    },
}

/// Decides how to show `bounds` without touching any map.
#[must_use]
pub fn decide_viewport(bounds: &ViewportBounds) -> ViewportDecision {
    if bounds.is_degenerate() {
        ViewportDecision::CenterZoom {
            center: bounds.sw,
            zoom: DEFAULT_ZOOM,
        }
    } else {
        ViewportDecision::FitBounds { bounds: *bounds }
    }
}

/// Applies a viewport decision to `map`.
pub fn apply_viewport(map: &mut impl MapView, decision: ViewportDecision) {
    match decision {
        ViewportDecision::CenterZoom { center, zoom } => map.set_view(center, zoom),
        ViewportDecision::FitBounds { bounds } => map.fit_bounds(bounds),
    }
}

/// Decides and applies the viewport for `bounds`, returning the decision.
pub fn fit_viewport(map: &mut impl MapView, bounds: &ViewportBounds) -> ViewportDecision {
    let decision = decide_viewport(bounds);
    log::debug!("Fitting viewport: {decision:?}");
    apply_viewport(map, decision);
    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson_show_features_models::BoundingRectangle;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl MapView for Recorder {
        fn set_view(&mut self, center: LatLng, zoom: u8) {
            self.calls.push(format!("set_view {} {} {zoom}", center.lat, center.lng));
        }

        fn fit_bounds(&mut self, bounds: ViewportBounds) {
            self.calls.push(format!("fit_bounds {:?}", bounds.to_corners()));
        }

        fn set_basemap(&mut self, _basemap: Basemap) {}

        fn add_layer(&mut self, _layer: RenderedLayer) {}

        fn clear_layers(&mut self) {}
    }

    #[test]
    fn degenerate_bounds_center_at_default_zoom() {
        let bounds = BoundingRectangle::from_point(10.0, 20.0).to_viewport_bounds();
        let mut map = Recorder::default();

        let decision = fit_viewport(&mut map, &bounds);

        assert_eq!(
            decision,
            ViewportDecision::CenterZoom {
                center: LatLng::new(20.0, 10.0),
                zoom: DEFAULT_ZOOM
            }
        );
        assert_eq!(map.calls, vec!["set_view 20 10 12"]);
    }

    #[test]
    fn rectangle_bounds_are_fitted() {
        let bounds = BoundingRectangle::new(0.0, 0.0, 10.0, 10.0).to_viewport_bounds();
        let mut map = Recorder::default();

        let decision = fit_viewport(&mut map, &bounds);

        assert_eq!(decision, ViewportDecision::FitBounds { bounds });
        assert_eq!(map.calls, vec!["fit_bounds [[0.0, 0.0], [10.0, 10.0]]"]);
    }

    #[test]
    fn thin_bounds_are_still_fitted() {
        // Same latitude, different longitudes: zero height but not a point.
        let bounds = BoundingRectangle::new(0.0, 5.0, 10.0, 5.0).to_viewport_bounds();
        assert!(matches!(
            decide_viewport(&bounds),
            ViewportDecision::FitBounds { .. }
        ));
    }

    #[test]
    fn decision_serializes_with_kind() {
        let decision = ViewportDecision::CenterZoom {
            center: NULL_ISLAND,
            zoom: DEFAULT_ZOOM,
        };
        assert_eq!(
            serde_json::to_value(decision).unwrap(),
            serde_json::json!({ "kind": "center_zoom", "center": { "lat": 0.0, "lng": 0.0 }, "zoom": 12 })
        );
    }
}
