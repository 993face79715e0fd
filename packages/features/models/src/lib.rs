#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geometric extent types shared across geojson-show.
//!
//! `GeoJSON` orders positions as `[longitude, latitude]` while map
//! viewports address corners as `[latitude, longitude]`. The
//! [`BoundingRectangle`] keeps the `GeoJSON` ordering; [`ViewportBounds`]
//! holds the reordered corners handed to the map.

use serde::{Deserialize, Serialize};

/// An axis-aligned longitude/latitude rectangle in degrees.
///
/// A rectangle derived from exactly one coordinate has zero area
/// (`west == east`, `south == north`). That is a valid state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRectangle {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

impl BoundingRectangle {
    /// Creates a new bounding rectangle from the given extrema.
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Creates the zero-area rectangle covering a single position.
    #[must_use]
    pub const fn from_point(lng: f64, lat: f64) -> Self {
        Self::new(lng, lat, lng, lat)
    }

    /// Creates a rectangle from a `GeoJSON` `bbox` member.
    ///
    /// Accepts the 2D form `[west, south, east, north]` and the 3D form
    /// `[west, south, min_z, east, north, max_z]`. Any other length yields
    /// `None`.
    #[must_use]
    pub fn from_bbox(bbox: &[f64]) -> Option<Self> {
        match *bbox {
            [west, south, east, north] => Some(Self::new(west, south, east, north)),
            [west, south, _, east, north, _] => Some(Self::new(west, south, east, north)),
            _ => None,
        }
    }

    /// Grows the rectangle so that it contains the given position.
    pub fn extend(&mut self, lng: f64, lat: f64) {
        self.west = self.west.min(lng);
        self.south = self.south.min(lat);
        self.east = self.east.max(lng);
        self.north = self.north.max(lat);
    }

    /// Returns the smallest rectangle containing both `self` and `other`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self::new(
            self.west.min(other.west),
            self.south.min(other.south),
            self.east.max(other.east),
            self.north.max(other.north),
        )
    }

    /// Whether the position lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, lng: f64, lat: f64) -> bool {
        lng >= self.west && lng <= self.east && lat >= self.south && lat <= self.north
    }

    /// Whether the rectangle collapses to a single position.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_degenerate(&self) -> bool {
        self.west == self.east && self.south == self.north
    }

    /// Returns the `GeoJSON` `bbox` ordering `[west, south, east, north]`.
    #[must_use]
    pub const fn to_bbox(&self) -> [f64; 4] {
        [self.west, self.south, self.east, self.north]
    }

    /// Reorders the rectangle into south-west/north-east viewport corners.
    #[must_use]
    pub const fn to_viewport_bounds(&self) -> ViewportBounds {
        ViewportBounds {
            sw: LatLng::new(self.south, self.west),
            ne: LatLng::new(self.north, self.east),
        }
    }
}

/// A position in viewport order (latitude first).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl LatLng {
    /// Creates a new position.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Converts a `GeoJSON` `[lng, lat, ...]` position.
    ///
    /// Returns `None` if the position has fewer than two ordinates.
    #[must_use]
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lng, lat, ..] => Some(Self::new(*lat, *lng)),
            _ => None,
        }
    }

    /// Returns `[lat, lng]`.
    #[must_use]
    pub const fn to_array(self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

/// Two viewport corners, `[[south, west], [north, east]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportBounds {
    /// South-west corner.
    pub sw: LatLng,
    /// North-east corner.
    pub ne: LatLng,
}

impl ViewportBounds {
    /// Whether both corners are the same coordinate.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_degenerate(&self) -> bool {
        self.sw.lat == self.ne.lat && self.sw.lng == self.ne.lng
    }

    /// Returns the two-corner array form `[[south, west], [north, east]]`.
    #[must_use]
    pub const fn to_corners(&self) -> [[f64; 2]; 2] {
        [self.sw.to_array(), self.ne.to_array()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_rectangle_is_degenerate() {
        let rect = BoundingRectangle::from_point(10.0, 20.0);
        assert!(rect.is_degenerate());
        assert_eq!(rect.to_bbox(), [10.0, 20.0, 10.0, 20.0]);
        assert_eq!(rect.to_viewport_bounds().to_corners(), [[20.0, 10.0], [20.0, 10.0]]);
    }

    #[test]
    fn extend_grows_in_every_direction() {
        let mut rect = BoundingRectangle::from_point(0.0, 0.0);
        rect.extend(-5.0, 3.0);
        rect.extend(2.0, -7.0);
        assert_eq!(rect, BoundingRectangle::new(-5.0, -7.0, 2.0, 3.0));
        assert!(!rect.is_degenerate());
    }

    #[test]
    fn union_keeps_zero_extrema() {
        let a = BoundingRectangle::new(0.0, 0.0, 1.0, 1.0);
        let b = BoundingRectangle::new(0.5, 0.5, 10.0, 10.0);
        assert_eq!(a.union(b), BoundingRectangle::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn from_bbox_accepts_2d_and_3d() {
        assert_eq!(
            BoundingRectangle::from_bbox(&[1.0, 2.0, 3.0, 4.0]),
            Some(BoundingRectangle::new(1.0, 2.0, 3.0, 4.0))
        );
        assert_eq!(
            BoundingRectangle::from_bbox(&[1.0, 2.0, -10.0, 3.0, 4.0, 10.0]),
            Some(BoundingRectangle::new(1.0, 2.0, 3.0, 4.0))
        );
        assert_eq!(BoundingRectangle::from_bbox(&[1.0, 2.0, 3.0]), None);
    }

    #[test]
    fn contains_is_edge_inclusive() {
        let rect = BoundingRectangle::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(0.0, 10.0));
        assert!(rect.contains(5.0, 5.0));
        assert!(!rect.contains(10.5, 5.0));
    }

    #[test]
    fn lat_lng_from_short_position_is_none() {
        assert_eq!(LatLng::from_position(&[1.0]), None);
        assert_eq!(
            LatLng::from_position(&[1.0, 2.0, 3.0]),
            Some(LatLng::new(2.0, 1.0))
        );
    }

    #[test]
    fn viewport_bounds_serialize_with_named_corners() {
        let bounds = BoundingRectangle::new(0.0, 0.0, 10.0, 10.0).to_viewport_bounds();
        let json = serde_json::to_value(bounds).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "sw": { "lat": 0.0, "lng": 0.0 },
                "ne": { "lat": 10.0, "lng": 10.0 },
            })
        );
    }
}
