#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! `GeoJSON` feature loading and bounding box derivation.
//!
//! [`input`] reads `Feature` and `FeatureCollection` documents from files
//! or stdin and merges them into a single ordered [`FeatureSet`].
//! [`bounds`] walks documents to derive the rectangle the map viewport is
//! fitted to.

pub mod bounds;
pub mod input;

use thiserror::Error;

pub use geojson_show_features_models::{BoundingRectangle, LatLng, ViewportBounds};
pub use input::FeatureSet;

/// Errors that can occur while loading features.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Reading input failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input was not valid JSON or not a valid `GeoJSON` object.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document's `type` is neither `Feature` nor `FeatureCollection`.
    #[error("Invalid type, {type_name}")]
    InvalidType {
        /// The `type` member found in the document (empty when absent).
        type_name: String,
    },

    /// A path could not be opened.
    #[error("Failed to open {path} for reading: {source}")]
    Open {
        /// Path that failed to open.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },
}
