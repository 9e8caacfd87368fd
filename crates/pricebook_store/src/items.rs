//! Collection wrapper over a local store.

use crate::error::StorageResult;
use crate::store::LocalStore;
use pricebook_model::PriceItem;
use std::sync::Arc;
use tracing::warn;

/// Fixed key the whole item collection is stored under.
pub const ITEMS_KEY: &str = "pricebook.items.v1";

/// Reads and writes the item collection through a [`LocalStore`].
///
/// The collection is serialized as one JSON array under a single fixed
/// key; every save fully overwrites prior content. Timestamps round-trip
/// through RFC 3339 text and a NaN gross price reads back as zero.
///
/// An absent key or malformed content loads as an empty collection -
/// only an unreachable store is an error.
#[derive(Clone)]
pub struct ItemStore {
    store: Arc<dyn LocalStore>,
    key: String,
}

impl ItemStore {
    /// Creates a wrapper over `store` using [`ITEMS_KEY`].
    #[must_use]
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self::with_key(store, ITEMS_KEY)
    }

    /// Creates a wrapper using a custom key.
    #[must_use]
    pub fn with_key(store: Arc<dyn LocalStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Loads the full collection.
    ///
    /// Returns an empty collection if nothing is stored or the stored
    /// text cannot be parsed; the malformed text is logged and discarded
    /// on the next save.
    ///
    /// # Errors
    ///
    /// Returns an error only if the underlying store cannot be read.
    pub fn load_all(&self) -> StorageResult<Vec<PriceItem>> {
        let Some(text) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<PriceItem>>(&text) {
            Ok(items) => Ok(items.into_iter().map(PriceItem::sanitized).collect()),
            Err(err) => {
                warn!(key = %self.key, %err, "discarding malformed stored collection");
                Ok(Vec::new())
            }
        }
    }

    /// Saves the full collection, overwriting prior content.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails;
    /// the caller must treat the surrounding mutation as failed.
    pub fn save_all(&self, items: &[PriceItem]) -> StorageResult<()> {
        let text = serde_json::to_string(items)?;
        self.store.set(&self.key, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::StorageError;

    fn memory_item_store() -> (Arc<MemoryStore>, ItemStore) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), ItemStore::new(store))
    }

    #[test]
    fn empty_store_loads_empty_collection() {
        let (_, items) = memory_item_store();
        assert!(items.load_all().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_, store) = memory_item_store();
        let items = vec![
            PriceItem::new("Apple Juice", 2.5, 3.0),
            PriceItem::new("Tea", 1.2, 0.0),
        ];

        store.save_all(&items).unwrap();
        assert_eq!(store.load_all().unwrap(), items);
    }

    #[test]
    fn save_overwrites_prior_collection() {
        let (_, store) = memory_item_store();
        store
            .save_all(&[PriceItem::new("Old", 1.0, 0.0)])
            .unwrap();

        let replacement = vec![PriceItem::new("New", 2.0, 0.0)];
        store.save_all(&replacement).unwrap();
        assert_eq!(store.load_all().unwrap(), replacement);
    }

    #[test]
    fn malformed_content_loads_empty() {
        let (raw, store) = memory_item_store();
        raw.set(ITEMS_KEY, "{not json").unwrap();
        assert!(store.load_all().unwrap().is_empty());

        raw.set(ITEMS_KEY, r#"{"items": "wrong shape"}"#).unwrap();
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn unavailable_store_is_an_error() {
        let (raw, store) = memory_item_store();
        raw.set_fail_reads(true);
        assert!(matches!(
            store.load_all(),
            Err(StorageError::Unavailable(_))
        ));

        raw.set_fail_reads(false);
        raw.set_fail_writes(true);
        assert!(matches!(
            store.save_all(&[]),
            Err(StorageError::Unavailable(_))
        ));
    }

    #[test]
    fn nan_gross_price_loads_as_zero() {
        let (raw, store) = memory_item_store();
        raw.set(
            ITEMS_KEY,
            r#"[{
                "id": "4f1c5f2e-54f6-4d07-9c8e-0d6c2a8b9e11",
                "name": "Tea",
                "price": 1.5,
                "grossPrice": null,
                "createdAt": "2024-03-01T10:00:00Z"
            }]"#,
        )
        .unwrap();

        let items = store.load_all().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].gross_price, 0.0);
    }
}
