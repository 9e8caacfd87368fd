//! The price item entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A single priced entry in the collection.
///
/// `PriceItem` is the sole entity of the system. The `id` is the join key
/// across local storage, the remote table, and the in-memory collection;
/// it is assigned once at creation and never changes.
///
/// # Invariants
///
/// - `name` is normalized (see [`crate::normalize_name`]) and non-empty
/// - `price` is finite and greater than zero
/// - `gross_price` is finite and at least zero; NaN read from any source
///   deserializes as `0.0`
/// - `created_at` is set once and immutable
/// - `last_edited_at` is present only after an update that actually
///   changed `name`, `price`, or `gross_price`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceItem {
    /// Unique identifier, assigned at creation.
    pub id: Uuid,
    /// Normalized display name.
    pub name: String,
    /// Net price, canonical precision two decimal places.
    pub price: f64,
    /// Gross price; zero when never provided.
    #[serde(default, deserialize_with = "de_gross_price")]
    pub gross_price: f64,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Instant of the last effective edit, absent until the first one.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_last_edited_at"
    )]
    pub last_edited_at: Option<DateTime<Utc>>,
}

impl PriceItem {
    /// Creates a new item with a fresh id and `created_at = now`.
    ///
    /// The caller is responsible for passing an already normalized name
    /// and validated prices; this constructor only coerces a non-finite
    /// gross price to zero.
    #[must_use]
    pub fn new(name: impl Into<String>, price: f64, gross_price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price,
            gross_price: if gross_price.is_finite() {
                gross_price
            } else {
                0.0
            },
            created_at: Utc::now(),
            last_edited_at: None,
        }
    }

    /// Returns a copy with non-finite numeric fields coerced to zero.
    ///
    /// Applied to every record arriving from a remote fetch or a change
    /// event, so a NaN produced elsewhere never becomes a stored value.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if !self.gross_price.is_finite() {
            self.gross_price = 0.0;
        }
        self
    }

    /// Returns true if `name`, `price`, or `gross_price` differ from the
    /// given values.
    #[must_use]
    pub fn differs_from(&self, name: &str, price: f64, gross_price: f64) -> bool {
        self.name != name || self.price != price || self.gross_price != gross_price
    }
}

/// Rounds a price to the canonical two-decimal precision.
#[must_use]
pub fn round_price(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn de_gross_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<f64> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|value| value.is_finite()).unwrap_or(0.0))
}

fn de_last_edited_at<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    // Unparsable or missing edit timestamps stay absent rather than
    // failing the whole record.
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|text| {
        DateTime::parse_from_rfc3339(&text)
            .ok()
            .map(|instant| instant.with_timezone(&Utc))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_has_no_edit_timestamp() {
        let item = PriceItem::new("Apple Juice", 2.5, 3.0);
        assert_eq!(item.name, "Apple Juice");
        assert_eq!(item.price, 2.5);
        assert_eq!(item.gross_price, 3.0);
        assert!(item.last_edited_at.is_none());
    }

    #[test]
    fn new_item_coerces_nan_gross_price() {
        let item = PriceItem::new("Tea", 1.0, f64::NAN);
        assert_eq!(item.gross_price, 0.0);
    }

    #[test]
    fn sanitized_coerces_non_finite_gross_price() {
        let mut item = PriceItem::new("Tea", 1.0, 2.0);
        item.gross_price = f64::INFINITY;
        assert_eq!(item.sanitized().gross_price, 0.0);
    }

    #[test]
    fn differs_from_detects_each_field() {
        let item = PriceItem::new("Tea", 1.0, 2.0);
        assert!(!item.differs_from("Tea", 1.0, 2.0));
        assert!(item.differs_from("Coffee", 1.0, 2.0));
        assert!(item.differs_from("Tea", 1.5, 2.0));
        assert!(item.differs_from("Tea", 1.0, 0.0));
    }

    #[test]
    fn round_price_two_decimals() {
        assert_eq!(round_price(2.678), 2.68);
        assert_eq!(round_price(2.4999), 2.5);
        assert_eq!(round_price(1.0 / 3.0), 0.33);
        assert_eq!(round_price(3.0), 3.0);
    }

    #[test]
    fn serializes_camel_case_rfc3339() {
        let item = PriceItem::new("Tea", 1.0, 0.0);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("grossPrice").is_some());
        assert!(json.get("createdAt").unwrap().is_string());
        // Absent edit timestamp is omitted entirely.
        assert!(json.get("lastEditedAt").is_none());
    }

    #[test]
    fn deserializes_missing_gross_price_as_zero() {
        let json = r#"{
            "id": "4f1c5f2e-54f6-4d07-9c8e-0d6c2a8b9e11",
            "name": "Tea",
            "price": 1.5,
            "createdAt": "2024-03-01T10:00:00Z"
        }"#;
        let item: PriceItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.gross_price, 0.0);
        assert!(item.last_edited_at.is_none());
    }

    #[test]
    fn deserializes_null_gross_price_as_zero() {
        let json = r#"{
            "id": "4f1c5f2e-54f6-4d07-9c8e-0d6c2a8b9e11",
            "name": "Tea",
            "price": 1.5,
            "grossPrice": null,
            "createdAt": "2024-03-01T10:00:00Z"
        }"#;
        let item: PriceItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.gross_price, 0.0);
    }

    #[test]
    fn deserializes_invalid_edit_timestamp_as_absent() {
        let json = r#"{
            "id": "4f1c5f2e-54f6-4d07-9c8e-0d6c2a8b9e11",
            "name": "Tea",
            "price": 1.5,
            "grossPrice": 2.0,
            "createdAt": "2024-03-01T10:00:00Z",
            "lastEditedAt": "not-a-timestamp"
        }"#;
        let item: PriceItem = serde_json::from_str(json).unwrap();
        assert!(item.last_edited_at.is_none());
    }

    #[test]
    fn timestamps_round_trip_through_text() {
        let mut item = PriceItem::new("Tea", 1.5, 2.0);
        item.last_edited_at = Some(Utc::now());

        let text = serde_json::to_string(&item).unwrap();
        let back: PriceItem = serde_json::from_str(&text).unwrap();
        assert_eq!(back.created_at, item.created_at);
        assert_eq!(back.last_edited_at, item.last_edited_at);
        assert_eq!(back.id, item.id);
    }
}
