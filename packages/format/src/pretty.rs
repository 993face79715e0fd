//! Pretty-printing formatter backed by `serde_json`.

use async_trait::async_trait;
use serde::Serialize as _;

use crate::{FeatureFormatter, FormatError};

/// Re-indents a JSON document with a fixed indent width.
#[derive(Debug, Clone)]
pub struct PrettyJsonFormatter {
    indent: Vec<u8>,
}

impl PrettyJsonFormatter {
    /// Creates a formatter indenting with `width` spaces.
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            indent: vec![b' '; width],
        }
    }
}

impl Default for PrettyJsonFormatter {
    fn default() -> Self {
        Self::new(2)
    }
}

#[async_trait]
impl FeatureFormatter for PrettyJsonFormatter {
    async fn format(&self, raw: &str) -> Result<String, FormatError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;

        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&self.indent);
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        value.serialize(&mut serializer)?;

        String::from_utf8(out).map_err(|e| FormatError::Rejected {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn indents_nested_values() {
        let formatter = PrettyJsonFormatter::new(2);
        let out = formatter.format(r#"{"a":[1,2],"b":1}"#).await.unwrap();
        assert_eq!(out, "{\n  \"a\": [\n    1,\n    2\n  ],\n  \"b\": 1\n}");
    }

    #[tokio::test]
    async fn keeps_key_order_and_integers() {
        let formatter = PrettyJsonFormatter::new(2);
        let out = formatter.format(r#"{"zeta":1,"alpha":[1,2.5]}"#).await.unwrap();
        assert_eq!(
            out,
            "{\n  \"zeta\": 1,\n  \"alpha\": [\n    1,\n    2.5\n  ]\n}"
        );
    }

    #[tokio::test]
    async fn custom_indent_width() {
        let formatter = PrettyJsonFormatter::new(4);
        let out = formatter.format(r#"{"a":1}"#).await.unwrap();
        assert_eq!(out, "{\n    \"a\": 1\n}");
    }

    #[tokio::test]
    async fn rejects_invalid_json() {
        let formatter = PrettyJsonFormatter::default();
        assert!(matches!(
            formatter.format("{ nope").await,
            Err(FormatError::Json(_))
        ));
    }
}
