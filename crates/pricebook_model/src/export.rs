//! Import/export document shape.

use crate::item::PriceItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current export document version.
pub const EXPORT_VERSION: u32 = 1;

/// Result type for export document parsing and rendering.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors raised while parsing or rendering an export document.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The document is not valid JSON or does not carry an item array.
    #[error("malformed export document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The file shape produced by export and accepted by import.
///
/// Timestamps are serialized as ISO 8601 text. Importing tolerates a
/// missing version or export date, but `items` must be an array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// Document format version.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Instant the document was produced.
    #[serde(default = "Utc::now")]
    pub export_date: DateTime<Utc>,
    /// The full item collection.
    pub items: Vec<PriceItem>,
}

fn default_version() -> u32 {
    EXPORT_VERSION
}

impl ExportDocument {
    /// Wraps an item collection in a version-stamped document dated now.
    #[must_use]
    pub fn new(items: Vec<PriceItem>) -> Self {
        Self {
            version: EXPORT_VERSION,
            export_date: Utc::now(),
            items,
        }
    }

    /// Renders the document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> ExportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Malformed`] if the text is not valid JSON
    /// or `items` is missing or not an array.
    pub fn from_json(text: &str) -> ExportResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let items = vec![
            PriceItem::new("Apple Juice", 2.5, 3.0),
            PriceItem::new("Tea", 1.2, 0.0),
        ];
        let doc = ExportDocument::new(items.clone());

        let text = doc.to_json().unwrap();
        let back = ExportDocument::from_json(&text).unwrap();

        assert_eq!(back.version, EXPORT_VERSION);
        assert_eq!(back.items, items);
    }

    #[test]
    fn export_date_is_iso8601_text() {
        let doc = ExportDocument::new(vec![]);
        let value: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        let date = value.get("exportDate").unwrap().as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(date).is_ok());
    }

    #[test]
    fn rejects_missing_items() {
        let result = ExportDocument::from_json(r#"{"version": 1}"#);
        assert!(matches!(result, Err(ExportError::Malformed(_))));
    }

    #[test]
    fn rejects_non_array_items() {
        let result = ExportDocument::from_json(r#"{"version": 1, "items": "nope"}"#);
        assert!(matches!(result, Err(ExportError::Malformed(_))));
    }

    #[test]
    fn tolerates_missing_version_and_date() {
        let doc = ExportDocument::from_json(r#"{"items": []}"#).unwrap();
        assert_eq!(doc.version, EXPORT_VERSION);
        assert!(doc.items.is_empty());
    }
}
