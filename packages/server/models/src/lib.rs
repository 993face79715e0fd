#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API response types for the geojson-show server.

use geojson_show_features_models::BoundingRectangle;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Number of features being served.
    pub feature_count: usize,
}

/// Derived extent of the served features.
///
/// Both members are `null` when no bounds can be derived (no features, or
/// none with coordinates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBounds {
    /// `[west, south, east, north]`.
    pub bbox: Option<[f64; 4]>,
    /// `[[south, west], [north, east]]`.
    pub viewport: Option<[[f64; 2]; 2]>,
}

impl From<Option<BoundingRectangle>> for ApiBounds {
    fn from(bbox: Option<BoundingRectangle>) -> Self {
        Self {
            bbox: bbox.map(|b| b.to_bbox()),
            viewport: bbox.map(|b| b.to_viewport_bounds().to_corners()),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    /// What went wrong.
    pub message: String,
}
