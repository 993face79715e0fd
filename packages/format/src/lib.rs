#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Raw `GeoJSON` display for geojson-show.
//!
//! Each feature's source text is shown in a display panel next to the map.
//! Text is pretty-printed by a [`FeatureFormatter`]; when formatting is
//! unavailable or fails for a feature, that feature's entry falls back to
//! the unformatted serialisation. Entries are appended as formatting
//! completes, so panel order is completion order, not feature order.

pub mod display;
pub mod pretty;
pub mod raw;

use async_trait::async_trait;
use thiserror::Error;

pub use display::{DisplayEntry, DisplayPanel};
pub use pretty::PrettyJsonFormatter;
pub use raw::{FormatSummary, StampedFeature, format_features, stamp_features};

/// Errors raised by a formatter.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The formatter could not be loaded at all.
    #[error("Formatter unavailable: {message}")]
    Unavailable {
        /// Why the formatter is unavailable.
        message: String,
    },

    /// A single formatting call was rejected.
    #[error("Formatting rejected: {message}")]
    Rejected {
        /// Why the input was rejected.
        message: String,
    },

    /// JSON (de)serialisation failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// An asynchronous text formatter for serialised features.
#[async_trait]
pub trait FeatureFormatter: Send + Sync {
    /// Prepares the formatter before any feature is submitted.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Unavailable`] if the formatter cannot be used.
    async fn prepare(&self) -> Result<(), FormatError> {
        Ok(())
    }

    /// Formats one serialised feature.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if the text cannot be formatted.
    async fn format(&self, raw: &str) -> Result<String, FormatError>;
}
