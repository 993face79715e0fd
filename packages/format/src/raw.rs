//! Stamping features with display identifiers and formatting them.
//!
//! Identifiers are stamped onto copies of the features so the canonical
//! features used for rendering are never touched. The identifier is
//! removed again before serialisation, so the text shown matches the
//! input data.

use futures::StreamExt as _;
use futures::stream::FuturesUnordered;
use geojson_show_map_models::{DisplayId, SHOW_ID_PROPERTY};
use serde_json::Value;

use crate::{DisplayEntry, DisplayPanel, FeatureFormatter, FormatError};

/// How the stamp was placed, so it can be taken out again.
#[derive(Debug, Clone)]
enum Stamp {
    /// Added to an existing properties object.
    Inserted,
    /// Replaced an existing `show:id` property holding this value.
    Overwrote(Value),
    /// Replaced a non-object `properties` member holding this value.
    Replaced(Value),
    /// Added a `properties` member the document lacked.
    Added,
}

/// A copy of a feature document carrying its display identifier.
#[derive(Debug, Clone)]
pub struct StampedFeature {
    id: DisplayId,
    document: Value,
    stamp: Stamp,
}

impl StampedFeature {
    /// Copies `document` and stamps `id` into the copy's properties.
    #[must_use]
    pub fn new(id: DisplayId, document: &Value) -> Self {
        let mut document = document.clone();
        let mut stamp = Stamp::Added;

        if let Value::Object(members) = &mut document {
            let value = Value::String(id.as_str().to_string());
            match members.get_mut("properties") {
                Some(Value::Object(existing)) => {
                    stamp = existing
                        .insert(SHOW_ID_PROPERTY.to_string(), value)
                        .map_or(Stamp::Inserted, Stamp::Overwrote);
                }
                Some(slot) => {
                    stamp = Stamp::Replaced(std::mem::replace(slot, stamped_properties(value)));
                }
                None => {
                    members.insert("properties".to_string(), stamped_properties(value));
                }
            }
        }

        Self {
            id,
            document,
            stamp,
        }
    }

    /// The stamped identifier.
    #[must_use]
    pub const fn id(&self) -> &DisplayId {
        &self.id
    }

    /// The stamped copy.
    #[must_use]
    pub const fn document(&self) -> &Value {
        &self.document
    }

    /// Serialises the document as it was before stamping.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Json`] if serialisation fails.
    pub fn to_raw_text(&self) -> Result<String, FormatError> {
        let mut document = self.document.clone();

        if let Value::Object(members) = &mut document {
            match &self.stamp {
                Stamp::Inserted => {
                    if let Some(Value::Object(existing)) = members.get_mut("properties") {
                        existing.remove(SHOW_ID_PROPERTY);
                    }
                }
                Stamp::Overwrote(previous) => {
                    if let Some(Value::Object(existing)) = members.get_mut("properties") {
                        existing.insert(SHOW_ID_PROPERTY.to_string(), previous.clone());
                    }
                }
                Stamp::Replaced(previous) => {
                    members.insert("properties".to_string(), previous.clone());
                }
                Stamp::Added => {
                    members.remove("properties");
                }
            }
        }

        Ok(serde_json::to_string(&document)?)
    }
}

fn stamped_properties(stamp: Value) -> Value {
    let mut properties = serde_json::Map::new();
    properties.insert(SHOW_ID_PROPERTY.to_string(), stamp);
    Value::Object(properties)
}

/// Stamps `show-1`, `show-2`, ... onto copies of the feature `documents`
/// in order.
#[must_use]
pub fn stamp_features(documents: &[Value]) -> Vec<StampedFeature> {
    documents
        .iter()
        .enumerate()
        .map(|(index, document)| StampedFeature::new(DisplayId::for_index(index), document))
        .collect()
}

/// How many entries were formatted versus shown raw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatSummary {
    /// Entries holding formatter output.
    pub formatted: usize,
    /// Entries holding the raw serialisation.
    pub fallback: usize,
}

impl FormatSummary {
    fn record(&mut self, entry: &DisplayEntry) {
        if entry.formatted {
            self.formatted += 1;
        } else {
            self.fallback += 1;
        }
    }
}

/// Formats every stamped feature and appends one entry per feature to
/// `panel`.
///
/// Submissions run concurrently and entries are appended as each one
/// completes. If the formatter cannot be prepared, every feature gets its
/// raw text instead. A failure never leaves a feature without an entry.
pub async fn format_features(
    features: &[StampedFeature],
    formatter: &dyn FeatureFormatter,
    panel: &mut DisplayPanel,
) -> FormatSummary {
    let mut summary = FormatSummary::default();

    if let Err(e) = formatter.prepare().await {
        log::warn!("Unable to load formatter, showing raw features: {e}");
        for feature in features {
            let entry = raw_entry(feature);
            summary.record(&entry);
            panel.append(entry);
        }
        return summary;
    }

    let mut pending: FuturesUnordered<_> = features
        .iter()
        .map(|feature| format_one(feature, formatter))
        .collect();

    while let Some(entry) = pending.next().await {
        summary.record(&entry);
        panel.append(entry);
    }

    log::debug!(
        "Formatted {} features ({} shown raw)",
        summary.formatted,
        summary.fallback
    );

    summary
}

async fn format_one(feature: &StampedFeature, formatter: &dyn FeatureFormatter) -> DisplayEntry {
    let raw = match feature.to_raw_text() {
        Ok(raw) => raw,
        Err(e) => {
            log::error!("Unable to serialize feature {}: {e}", feature.id());
            return DisplayEntry::raw(feature.id().clone(), feature.document().to_string());
        }
    };

    match formatter.format(&raw).await {
        Ok(text) => DisplayEntry::formatted(feature.id().clone(), text),
        Err(e) => {
            log::warn!("Unable to format feature {}: {e}", feature.id());
            DisplayEntry::raw(feature.id().clone(), raw)
        }
    }
}

fn raw_entry(feature: &StampedFeature) -> DisplayEntry {
    let text = feature.to_raw_text().unwrap_or_else(|e| {
        log::error!("Unable to serialize feature {}: {e}", feature.id());
        feature.document().to_string()
    });
    DisplayEntry::raw(feature.id().clone(), text)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;

    fn sample_documents() -> Vec<Value> {
        vec![
            json!({
                "type": "Feature",
                "properties": { "name": "first" },
                "geometry": { "type": "Point", "coordinates": [1, 2] }
            }),
            json!({
                "type": "Feature",
                "properties": { "name": "second" },
                "geometry": { "type": "Point", "coordinates": [3, 4] }
            }),
        ]
    }

    struct Rejecting;

    #[async_trait]
    impl FeatureFormatter for Rejecting {
        async fn format(&self, _raw: &str) -> Result<String, FormatError> {
            Err(FormatError::Rejected {
                message: "nope".to_string(),
            })
        }
    }

    struct Unavailable;

    #[async_trait]
    impl FeatureFormatter for Unavailable {
        async fn prepare(&self) -> Result<(), FormatError> {
            Err(FormatError::Unavailable {
                message: "engine missing".to_string(),
            })
        }

        async fn format(&self, _raw: &str) -> Result<String, FormatError> {
            panic!("format must not be called when prepare fails");
        }
    }

    /// Delays the first feature so it finishes last.
    struct SlowFirst;

    #[async_trait]
    impl FeatureFormatter for SlowFirst {
        async fn format(&self, raw: &str) -> Result<String, FormatError> {
            if raw.contains("\"first\"") {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            Ok(format!("formatted:{raw}"))
        }
    }

    #[test]
    fn stamping_leaves_originals_untouched() {
        let documents = sample_documents();
        let stamped = stamp_features(&documents);

        assert_eq!(stamped[0].id().as_str(), "show-1");
        assert_eq!(stamped[1].id().as_str(), "show-2");
        assert_eq!(stamped[1].document()["properties"][SHOW_ID_PROPERTY], "show-2");
        assert!(documents[0]["properties"].get(SHOW_ID_PROPERTY).is_none());
    }

    #[test]
    fn raw_text_is_the_input_text() {
        let body = r#"{"type":"Feature","properties":{"zeta":1,"alpha":2},"geometry":{"type":"Point","coordinates":[1,2]}}"#;
        let document: Value = serde_json::from_str(body).unwrap();

        let stamped = StampedFeature::new(DisplayId::for_index(0), &document);

        assert!(stamped.document().to_string().contains(SHOW_ID_PROPERTY));
        assert_eq!(stamped.to_raw_text().unwrap(), body);
    }

    #[test]
    fn raw_text_restores_missing_null_and_existing_properties() {
        let cases = [
            r#"{"type":"Feature","properties":null,"geometry":null}"#,
            r#"{"type":"Feature","geometry":null}"#,
            r#"{"type":"Feature","properties":{"show:id":"mine","a":1},"geometry":null}"#,
        ];

        for body in cases {
            let document: Value = serde_json::from_str(body).unwrap();
            let stamped = StampedFeature::new(DisplayId::for_index(3), &document);

            assert_eq!(stamped.document()["properties"][SHOW_ID_PROPERTY], "show-4");
            assert_eq!(stamped.to_raw_text().unwrap(), body);
        }
    }

    #[tokio::test]
    async fn rejected_formatting_falls_back_to_raw_text() {
        let stamped = stamp_features(&sample_documents()[..1]);
        let mut panel = DisplayPanel::new();

        let summary = format_features(&stamped, &Rejecting, &mut panel).await;

        assert_eq!(summary, FormatSummary { formatted: 0, fallback: 1 });
        assert_eq!(panel.len(), 1);
        let entry = &panel.entries()[0];
        assert_eq!(entry.id.as_str(), "show-1");
        assert!(!entry.formatted);
        assert_eq!(entry.text, stamped[0].to_raw_text().unwrap());
        assert!(!entry.text.is_empty());
    }

    #[tokio::test]
    async fn unavailable_formatter_shows_every_feature_raw() {
        let stamped = stamp_features(&sample_documents());
        let mut panel = DisplayPanel::new();

        let summary = format_features(&stamped, &Unavailable, &mut panel).await;

        assert_eq!(summary.fallback, 2);
        let ids: Vec<_> = panel.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["show-1", "show-2"]);
    }

    #[tokio::test]
    async fn entries_follow_completion_order_with_correct_text() {
        let stamped = stamp_features(&sample_documents());
        let mut panel = DisplayPanel::new();

        let summary = format_features(&stamped, &SlowFirst, &mut panel).await;

        assert_eq!(summary.formatted, 2);
        let ids: Vec<_> = panel.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["show-2", "show-1"]);

        let first = panel.entry(&DisplayId::for_index(0)).unwrap();
        assert!(first.text.contains("\"first\""));
        let second = panel.entry(&DisplayId::for_index(1)).unwrap();
        assert!(second.text.contains("\"second\""));
    }

    #[tokio::test]
    async fn pretty_formatter_produces_formatted_entries() {
        let stamped = stamp_features(&sample_documents());
        let mut panel = DisplayPanel::new();

        let summary =
            format_features(&stamped, &crate::PrettyJsonFormatter::default(), &mut panel).await;

        assert_eq!(summary.formatted, 2);
        assert!(panel.entries().iter().all(|e| e.text.contains('\n')));
    }
}
