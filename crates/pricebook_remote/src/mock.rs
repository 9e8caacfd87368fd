//! A scripted remote store for testing.

use crate::adapter::RemoteStore;
use crate::error::{RemoteError, RemoteResult};
use crate::event::{ChangeEvent, Subscription, SubscriptionStatus};
use async_trait::async_trait;
use parking_lot::RwLock;
use pricebook_model::PriceItem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};
use uuid::Uuid;

/// An in-memory remote store with scriptable failures.
///
/// Each operation can be made to fail on demand, an artificial response
/// delay can be set for timeout tests, and [`MockRemoteStore::push_event`]
/// feeds live subscribers directly - the knobs tests need to exercise the
/// core's degrade and merge paths.
#[derive(Debug, Default)]
pub struct MockRemoteStore {
    rows: RwLock<Vec<PriceItem>>,
    subscribers: RwLock<Vec<UnboundedSender<ChangeEvent>>>,
    fail_fetch: AtomicBool,
    fail_insert: AtomicBool,
    fail_update: AtomicBool,
    fail_delete: AtomicBool,
    fail_replace: AtomicBool,
    fail_subscribe: AtomicBool,
    response_delay: RwLock<Option<Duration>>,
}

impl MockRemoteStore {
    /// Creates an empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock store pre-populated with rows.
    #[must_use]
    pub fn with_rows(rows: Vec<PriceItem>) -> Self {
        Self {
            rows: RwLock::new(rows),
            ..Self::default()
        }
    }

    /// Returns a copy of the current table contents.
    #[must_use]
    pub fn rows(&self) -> Vec<PriceItem> {
        self.rows.read().clone()
    }

    /// Makes `fetch_all` fail.
    pub fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    /// Makes `insert` fail.
    pub fn set_fail_insert(&self, fail: bool) {
        self.fail_insert.store(fail, Ordering::SeqCst);
    }

    /// Makes `update` fail.
    pub fn set_fail_update(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::SeqCst);
    }

    /// Makes `delete` fail.
    pub fn set_fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    /// Makes `replace_all` fail.
    pub fn set_fail_replace(&self, fail: bool) {
        self.fail_replace.store(fail, Ordering::SeqCst);
    }

    /// Makes `subscribe` fail.
    pub fn set_fail_subscribe(&self, fail: bool) {
        self.fail_subscribe.store(fail, Ordering::SeqCst);
    }

    /// Delays every async response, for timeout tests.
    pub fn set_response_delay(&self, delay: Option<Duration>) {
        *self.response_delay.write() = delay;
    }

    /// Delivers an event to all live subscribers.
    pub fn push_event(&self, event: ChangeEvent) {
        let mut subscribers = self.subscribers.write();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Returns the number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        let mut subscribers = self.subscribers.write();
        subscribers.retain(|tx| !tx.is_closed());
        subscribers.len()
    }

    async fn respond(&self, fail: &AtomicBool, what: &str) -> RemoteResult<()> {
        let delay = *self.response_delay.read();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if fail.load(Ordering::SeqCst) {
            return Err(RemoteError::Transport(format!("scripted {what} failure")));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for MockRemoteStore {
    async fn fetch_all(&self) -> RemoteResult<Vec<PriceItem>> {
        self.respond(&self.fail_fetch, "fetch").await?;
        let mut rows = self.rows.read().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert(&self, item: &PriceItem) -> RemoteResult<()> {
        self.respond(&self.fail_insert, "insert").await?;
        let mut rows = self.rows.write();
        if rows.iter().any(|row| {
            row.id == item.id || row.name.to_lowercase() == item.name.to_lowercase()
        }) {
            return Err(RemoteError::Conflict(item.name.clone()));
        }
        rows.push(item.clone());
        Ok(())
    }

    async fn update(&self, item: &PriceItem) -> RemoteResult<()> {
        self.respond(&self.fail_update, "update").await?;
        let mut rows = self.rows.write();
        if let Some(row) = rows.iter_mut().find(|row| row.id == item.id) {
            *row = item.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RemoteResult<()> {
        self.respond(&self.fail_delete, "delete").await?;
        self.rows.write().retain(|row| row.id != id);
        Ok(())
    }

    async fn replace_all(&self, items: &[PriceItem]) -> RemoteResult<()> {
        self.respond(&self.fail_replace, "replace").await?;
        *self.rows.write() = items.to_vec();
        Ok(())
    }

    fn subscribe(&self) -> RemoteResult<Subscription> {
        if self.fail_subscribe.load(Ordering::SeqCst) {
            return Err(RemoteError::Subscription(
                "scripted subscribe failure".into(),
            ));
        }
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.write().push(tx);
        let status = Arc::new(RwLock::new(SubscriptionStatus::Subscribed));
        Ok(Subscription::new(rx, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    #[tokio::test]
    async fn fetch_all_orders_newest_first() {
        let mut old = PriceItem::new("Old", 1.0, 0.0);
        old.created_at -= ChronoDuration::hours(1);
        let new = PriceItem::new("New", 2.0, 0.0);

        let store = MockRemoteStore::with_rows(vec![old.clone(), new.clone()]);
        let rows = store.fetch_all().await.unwrap();
        assert_eq!(rows[0].id, new.id);
        assert_eq!(rows[1].id, old.id);
    }

    #[tokio::test]
    async fn insert_detects_conflicts() {
        let store = MockRemoteStore::new();
        let item = PriceItem::new("Tea", 1.0, 0.0);
        store.insert(&item).await.unwrap();

        // Same id.
        assert!(matches!(
            store.insert(&item).await,
            Err(RemoteError::Conflict(_))
        ));

        // Same name, different case.
        let twin = PriceItem::new("TEA", 2.0, 0.0);
        assert!(matches!(
            store.insert(&twin).await,
            Err(RemoteError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn update_and_delete_by_id() {
        let mut item = PriceItem::new("Tea", 1.0, 0.0);
        let store = MockRemoteStore::with_rows(vec![item.clone()]);

        item.price = 2.0;
        store.update(&item).await.unwrap();
        assert_eq!(store.rows()[0].price, 2.0);

        store.delete(item.id).await.unwrap();
        assert!(store.rows().is_empty());

        // Deleting an absent id is a no-op.
        store.delete(item.id).await.unwrap();
    }

    #[tokio::test]
    async fn replace_all_swaps_the_table() {
        let store = MockRemoteStore::with_rows(vec![PriceItem::new("Old", 1.0, 0.0)]);
        let replacement = vec![
            PriceItem::new("A", 1.0, 0.0),
            PriceItem::new("B", 2.0, 0.0),
        ];

        store.replace_all(&replacement).await.unwrap();
        assert_eq!(store.rows(), replacement);
    }

    #[tokio::test]
    async fn scripted_failures() {
        let store = MockRemoteStore::new();
        store.set_fail_fetch(true);
        assert!(store.fetch_all().await.is_err());

        store.set_fail_fetch(false);
        assert!(store.fetch_all().await.is_ok());
    }

    #[tokio::test]
    async fn push_event_reaches_subscribers() {
        let store = MockRemoteStore::new();
        let mut sub = store.subscribe().unwrap();
        assert_eq!(store.subscriber_count(), 1);

        let item = PriceItem::new("Tea", 1.0, 0.0);
        store.push_event(ChangeEvent::insert(item.clone()));

        let event = sub.recv().await.unwrap();
        assert_eq!(event.item_id, item.id);

        sub.close();
        store.push_event(ChangeEvent::delete(item.id));
        assert_eq!(store.subscriber_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn response_delay_applies() {
        let store = Arc::new(MockRemoteStore::new());
        store.set_response_delay(Some(Duration::from_secs(30)));

        let slow = store.clone();
        let fetch = tokio::spawn(async move { slow.fetch_all().await });
        let timed_out =
            tokio::time::timeout(Duration::from_secs(5), async { fetch.await.unwrap() }).await;
        assert!(timed_out.is_err());
    }
}
