#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map rendering for geojson-show.
//!
//! Features are turned into styled layers ([`interaction`]) using the
//! preset catalog in [`styles`], the viewport is fitted to their bounds
//! ([`viewport`]), and clicks select the matching display panel entry
//! ([`selection`]). [`bootstrap`] ties these together for any
//! [`viewport::MapView`], and [`headless`] provides one that records the
//! result for serving as JSON.

pub mod bootstrap;
pub mod headless;
pub mod interaction;
pub mod layer;
pub mod selection;
pub mod source;
pub mod styles;
pub mod viewport;

use thiserror::Error;

/// A label or link could not be resolved for a point.
///
/// Never fatal: the marker is drawn without a label.
#[derive(Debug, Error)]
pub enum LabelError {
    /// A lookup table property is not an object.
    #[error("{property} is not a table keyed by coordinate")]
    NotATable {
        /// Offending property.
        property: String,
    },

    /// A label value is neither a string nor a number.
    #[error("{property} is not text")]
    NotText {
        /// Offending property (with the coordinate key for table entries).
        property: String,
    },
}

/// Errors retrieving the map documents.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The feature data was not a `Feature` or `FeatureCollection`.
    #[error("Invalid feature data: {0}")]
    Features(#[from] geojson_show_features::FeatureError),

    /// A document URL could not be built.
    #[error("Invalid URL {url}: {message}")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
        /// Parser message.
        message: String,
    },
}

/// Errors that abort loading the map.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The map configuration could not be retrieved.
    #[error("Failed to retrieve map config: {0}")]
    Config(#[source] SourceError),

    /// The configured provider is missing or unsupported.
    #[error("Unknown or unsupported map provider '{provider}'")]
    UnknownProvider {
        /// The provider label found in the configuration.
        provider: String,
    },

    /// The feature data could not be retrieved.
    #[error("Failed to retrieve features: {0}")]
    Features(#[source] SourceError),
}
