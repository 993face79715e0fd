//! Bounding box derivation for `GeoJSON` documents.
//!
//! A document that already carries a `bbox` member is trusted and returned
//! as-is. Otherwise the geometry is walked:
//!
//! | Geometry | Positions folded |
//! |---|---|
//! | `Point` | the point itself |
//! | `MultiPoint`, `LineString` | every position |
//! | `MultiLineString` | every position of every line |
//! | `Polygon` | the outer ring only |
//! | `MultiPolygon` | the outer ring of each polygon |
//!
//! Holes never extend a polygon's bounds. `GeometryCollection`, features
//! without geometry, and empty coordinate lists contribute nothing.

use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use geojson_show_features_models::{BoundingRectangle, ViewportBounds};

/// Derives the bounding rectangle of any `GeoJSON` document.
///
/// Returns `None` when nothing in the document contributes a position.
#[must_use]
pub fn derive_bbox(doc: &GeoJson) -> Option<BoundingRectangle> {
    match doc {
        GeoJson::FeatureCollection(collection) => collection_bbox(collection),
        GeoJson::Feature(feature) => feature_bbox(feature),
        GeoJson::Geometry(geometry) => geometry_bbox(geometry),
    }
}

/// Derives the south-west/north-east viewport corners of a document.
#[must_use]
pub fn derive_bounds(doc: &GeoJson) -> Option<ViewportBounds> {
    derive_bbox(doc).map(|rect| rect.to_viewport_bounds())
}

/// Folds the bounds of every feature in a collection.
///
/// The running extent starts unset rather than at zero, so a first
/// feature sitting on the equator or prime meridian is kept.
#[must_use]
pub fn collection_bbox(collection: &FeatureCollection) -> Option<BoundingRectangle> {
    if let Some(rect) = precomputed(collection.bbox.as_deref()) {
        return Some(rect);
    }

    collection
        .features
        .iter()
        .filter_map(feature_bbox)
        .reduce(BoundingRectangle::union)
}

/// Derives the bounds of a single feature.
#[must_use]
pub fn feature_bbox(feature: &Feature) -> Option<BoundingRectangle> {
    if let Some(rect) = precomputed(feature.bbox.as_deref()) {
        return Some(rect);
    }

    let Some(geometry) = &feature.geometry else {
        log::debug!("Feature {:?} has no geometry", feature.id);
        return None;
    };

    geometry_bbox(geometry)
}

/// Derives the bounds of a bare geometry.
#[must_use]
pub fn geometry_bbox(geometry: &Geometry) -> Option<BoundingRectangle> {
    if let Some(rect) = precomputed(geometry.bbox.as_deref()) {
        return Some(rect);
    }

    match &geometry.value {
        Value::Point(position) => {
            let [lng, lat, ..] = position.as_slice() else {
                return None;
            };
            Some(BoundingRectangle::from_point(*lng, *lat))
        }
        Value::MultiPoint(positions) | Value::LineString(positions) => {
            fold_positions(positions.iter().map(Vec::as_slice))
        }
        Value::MultiLineString(lines) => {
            fold_positions(lines.iter().flatten().map(Vec::as_slice))
        }
        Value::Polygon(rings) => fold_positions(outer_ring(rings)),
        Value::MultiPolygon(polygons) => {
            fold_positions(polygons.iter().flat_map(|rings| outer_ring(rings)))
        }
        Value::GeometryCollection(_) => {
            log::debug!("GeometryCollection does not contribute to bounds");
            None
        }
    }
}

fn precomputed(bbox: Option<&[f64]>) -> Option<BoundingRectangle> {
    let bbox = bbox?;
    let rect = BoundingRectangle::from_bbox(bbox);
    if rect.is_none() {
        log::warn!(
            "Ignoring bbox with {} values, deriving from geometry instead",
            bbox.len()
        );
    }
    rect
}

fn outer_ring(rings: &[Vec<Vec<f64>>]) -> impl Iterator<Item = &[f64]> {
    rings.first().into_iter().flatten().map(Vec::as_slice)
}

fn fold_positions<'a>(positions: impl Iterator<Item = &'a [f64]>) -> Option<BoundingRectangle> {
    let mut rect: Option<BoundingRectangle> = None;

    for position in positions {
        let [lng, lat, ..] = position else {
            continue;
        };
        match rect.as_mut() {
            Some(rect) => rect.extend(*lng, *lat),
            None => rect = Some(BoundingRectangle::from_point(*lng, *lat)),
        }
    }

    rect
}
