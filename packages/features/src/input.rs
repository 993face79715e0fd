//! Reading `GeoJSON` features from files and stdin.
//!
//! Every input document must be a `Feature` or a `FeatureCollection`.
//! Features from all inputs are appended in the order the inputs were
//! given and merged into one [`FeatureSet`].

use std::io::Read;
use std::path::Path;

use geojson::{Feature, FeatureCollection};
use serde::ser::{Serialize, SerializeMap as _, Serializer};
use serde_json::Value;

use crate::FeatureError;

/// The path that means "read from stdin" when it is the only input.
pub const STDIN_PATH: &str = "-";

/// Loaded features, typed and as the JSON documents they were read from.
///
/// The typed collection is what gets measured and drawn. The documents
/// keep the input's key order and number formatting, so anything shown
/// or served back matches what was read.
#[derive(Debug, Clone)]
pub struct FeatureSet {
    collection: FeatureCollection,
    documents: Vec<Value>,
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            collection: into_collection(Vec::new()),
            documents: Vec::new(),
        }
    }

    /// Builds a set from one `Feature` or `FeatureCollection` document.
    ///
    /// A collection keeps its own members (such as `bbox` or a
    /// `properties` table) alongside its features.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::InvalidType`] if the document's `type` is
    /// not `Feature` or `FeatureCollection`, or [`FeatureError::Json`] if
    /// it is not valid `GeoJSON`.
    pub fn from_value(value: Value) -> Result<Self, FeatureError> {
        let type_name = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        match type_name.as_str() {
            "Feature" => {
                let feature: Feature = serde_json::from_value(value.clone())?;
                Ok(Self {
                    collection: into_collection(vec![feature]),
                    documents: vec![value],
                })
            }
            "FeatureCollection" => {
                let collection: FeatureCollection = serde_json::from_value(value.clone())?;
                let documents = match value {
                    Value::Object(mut members) => match members.remove("features") {
                        Some(Value::Array(documents)) => documents,
                        _ => vec![],
                    },
                    _ => vec![],
                };
                Ok(Self {
                    collection,
                    documents,
                })
            }
            other => Err(FeatureError::InvalidType {
                type_name: other.to_string(),
            }),
        }
    }

    /// Builds a set from `Feature` documents, in order.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::Json`] if any document is not a valid
    /// `Feature`.
    pub fn from_documents(documents: Vec<Value>) -> Result<Self, FeatureError> {
        let features = documents
            .iter()
            .map(|document| serde_json::from_value(document.clone()))
            .collect::<Result<Vec<Feature>, _>>()?;

        Ok(Self {
            collection: into_collection(features),
            documents,
        })
    }

    /// Appends the features of `other`, dropping its collection members.
    pub fn extend(&mut self, other: Self) {
        self.collection.features.extend(other.collection.features);
        self.documents.extend(other.documents);
    }

    /// The typed features.
    #[must_use]
    pub const fn collection(&self) -> &FeatureCollection {
        &self.collection
    }

    /// Each feature's source document, in the same order as
    /// [`Self::collection`].
    #[must_use]
    pub fn documents(&self) -> &[Value] {
        &self.documents
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether there are no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Serialize for FeatureSet {
    /// Writes a `FeatureCollection` whose features are the source documents.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "FeatureCollection")?;
        if let Some(bbox) = &self.collection.bbox {
            map.serialize_entry("bbox", bbox)?;
        }
        map.serialize_entry("features", &self.documents)?;
        if let Some(members) = &self.collection.foreign_members {
            for (key, value) in members {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

/// Parses one `GeoJSON` document and returns the features it contains.
///
/// # Errors
///
/// Returns [`FeatureError::InvalidType`] if the document's `type` is not
/// `Feature` or `FeatureCollection`, or [`FeatureError::Json`] if the
/// document does not parse.
pub fn parse_features(body: &str) -> Result<FeatureSet, FeatureError> {
    FeatureSet::from_value(serde_json::from_str(body)?)
}

/// Reads a whole document from `reader` and returns its features.
///
/// # Errors
///
/// Returns [`FeatureError`] if reading or parsing fails.
pub fn read_features(mut reader: impl Read) -> Result<FeatureSet, FeatureError> {
    let mut body = String::new();
    reader.read_to_string(&mut body)?;
    parse_features(&body)
}

/// Loads features from every path in order.
///
/// If the only path is [`STDIN_PATH`], features are read from stdin
/// instead.
///
/// # Errors
///
/// Returns [`FeatureError`] for the first input that cannot be opened or
/// parsed.
pub fn load_features<P: AsRef<Path>>(paths: &[P]) -> Result<FeatureSet, FeatureError> {
    let mut features = FeatureSet::new();

    if let [only] = paths
        && only.as_ref() == Path::new(STDIN_PATH)
    {
        log::debug!("Reading features from stdin");
        features.extend(read_features(std::io::stdin().lock())?);
        return Ok(features);
    }

    for path in paths {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| FeatureError::Open {
            path: path.display().to_string(),
            source,
        })?;

        let loaded = read_features(file)?;
        log::debug!("Loaded {} features from {}", loaded.len(), path.display());
        features.extend(loaded);
    }

    Ok(features)
}

const fn into_collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn feature_document_yields_one_feature() {
        let body = json!({
            "type": "Feature",
            "properties": { "name": "a" },
            "geometry": { "type": "Point", "coordinates": [1, 2] }
        })
        .to_string();

        let features = parse_features(&body).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features.collection().features[0].property("name"), Some(&json!("a")));
        assert_eq!(features.documents()[0]["geometry"]["coordinates"], json!([1, 2]));
    }

    #[test]
    fn collection_document_yields_all_features_in_order() {
        let body = json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "n": 1 }, "geometry": null },
                { "type": "Feature", "properties": { "n": 2 }, "geometry": null },
            ]
        })
        .to_string();

        let features = parse_features(&body).unwrap();
        let ns: Vec<_> = features
            .collection()
            .features
            .iter()
            .map(|f| f.property("n").cloned())
            .collect();
        assert_eq!(ns, vec![Some(json!(1)), Some(json!(2))]);
        assert_eq!(features.documents().len(), 2);
    }

    #[test]
    fn bare_geometry_is_an_invalid_type() {
        let body = json!({ "type": "Point", "coordinates": [1, 2] }).to_string();
        let err = parse_features(&body).unwrap_err();
        assert!(
            matches!(&err, FeatureError::InvalidType { type_name } if type_name == "Point"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn missing_type_is_an_invalid_type() {
        let err = parse_features("{}").unwrap_err();
        assert!(matches!(err, FeatureError::InvalidType { type_name } if type_name.is_empty()));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(
            parse_features("{ not json").unwrap_err(),
            FeatureError::Json(_)
        ));
    }

    #[test]
    fn read_features_from_reader() {
        let body = br#"{"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[0,0]}}"#;
        let features = read_features(&body[..]).unwrap();
        assert_eq!(features.len(), 1);
    }

    #[test]
    fn missing_path_reports_path() {
        let err = load_features(&["/definitely/not/here.geojson"]).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.geojson"));
    }

    #[test]
    fn extending_appends_in_order_and_drops_collection_members() {
        let mut features = parse_features(
            &json!({
                "type": "Feature",
                "properties": { "n": "x" },
                "geometry": null
            })
            .to_string(),
        )
        .unwrap();
        let more = parse_features(
            &json!({
                "type": "FeatureCollection",
                "properties": { "names": {} },
                "features": [
                    { "type": "Feature", "properties": { "n": "y" }, "geometry": null }
                ]
            })
            .to_string(),
        )
        .unwrap();
        assert!(more.collection().foreign_members.is_some());

        features.extend(more);

        assert_eq!(features.len(), 2);
        assert_eq!(features.collection().features[1].property("n"), Some(&json!("y")));
        assert_eq!(features.documents()[1]["properties"]["n"], "y");
        assert!(features.collection().foreign_members.is_none());
    }

    #[test]
    fn served_collection_matches_input_text() {
        let body = r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{"zeta":1,"alpha":2},"geometry":{"type":"Point","coordinates":[1,2]}}],"properties":{"names":{}}}"#;

        let features = parse_features(body).unwrap();

        assert_eq!(serde_json::to_string(&features).unwrap(), body);
    }

    #[test]
    fn invalid_feature_document_is_rejected() {
        let err = FeatureSet::from_documents(vec![json!({ "type": "Feature", "geometry": "nowhere" })]).unwrap_err();
        assert!(matches!(err, FeatureError::Json(_)));
    }
}
