//! The state surface and synchronization core.

use crate::config::{CoreConfig, GrossPricePolicy};
use crate::error::{CoreError, CoreResult};
use crate::query::{self, SortOption};
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use pricebook_model::{normalize_name, round_price, ExportDocument, PriceItem};
use pricebook_remote::{ChangeEvent, ChangeKind, RemoteError, RemoteStore, Subscription};
use pricebook_store::ItemStore;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

/// Load phase of the state surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// `load` has not been called yet.
    #[default]
    Idle,
    /// The local collection is being read.
    Loading,
    /// The collection is usable (possibly offline).
    Ready,
    /// Even the local load failed; the collection is empty.
    Degraded,
}

impl LoadPhase {
    /// Returns true while the initial load is running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadPhase::Loading)
    }

    /// Returns true once the collection is usable.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadPhase::Ready)
    }

    /// Returns true if the local load itself failed.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, LoadPhase::Degraded)
    }
}

/// State shared with the background reconciliation and merge tasks.
struct Shared {
    items: RwLock<Vec<PriceItem>>,
    store: ItemStore,
    remote: Option<Arc<dyn RemoteStore>>,
    config: CoreConfig,
    phase: RwLock<LoadPhase>,
    last_error: RwLock<Option<String>>,
}

/// The price-list state surface.
///
/// One `PriceBook` owns the whole in-memory collection and is the only
/// way callers mutate or query it. Its lifecycle is explicit: construct,
/// [`PriceBook::load`] on session start, [`PriceBook::close`] on session
/// end (dropping the book closes it too).
///
/// Every mutation follows the same protocol: validate, apply in memory
/// and persist locally (rolling back on a failed write), then propagate
/// to the remote store best-effort under a bounded deadline. The remote
/// store is optional; without one the book runs fully offline.
///
/// # Example
///
/// ```rust
/// use pricebook_core::{PriceBook, SortOption};
/// use pricebook_store::{ItemStore, MemoryStore};
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let book = PriceBook::offline(ItemStore::new(Arc::new(MemoryStore::new())));
/// book.load().await;
///
/// book.add("apple juice", 2.5, Some(3.0)).await.unwrap();
/// let hits = book.search("apple", SortOption::NameAsc);
/// assert_eq!(hits[0].name, "Apple Juice");
/// # }
/// ```
pub struct PriceBook {
    shared: Arc<Shared>,
    reconcile_task: Mutex<Option<JoinHandle<()>>>,
    merge_task: Mutex<Option<JoinHandle<()>>>,
}

impl PriceBook {
    /// Creates a book over a local store and an optional remote store.
    #[must_use]
    pub fn new(
        store: ItemStore,
        remote: Option<Arc<dyn RemoteStore>>,
        config: CoreConfig,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                items: RwLock::new(Vec::new()),
                store,
                remote,
                config,
                phase: RwLock::new(LoadPhase::Idle),
                last_error: RwLock::new(None),
            }),
            reconcile_task: Mutex::new(None),
            merge_task: Mutex::new(None),
        }
    }

    /// Creates a book with no remote store configured.
    #[must_use]
    pub fn offline(store: ItemStore) -> Self {
        Self::new(store, None, CoreConfig::new())
    }

    /// Loads the collection, local-first.
    ///
    /// The local store is read synchronously and its collection is
    /// visible as soon as this returns; the remote fetch and the
    /// change-notification stream are started as background tasks and
    /// never block the caller. A failed remote fetch silently leaves the
    /// local collection in place; a failed local read yields an empty
    /// collection, a user-visible error, and the [`LoadPhase::Degraded`]
    /// phase - the book is never stuck in [`LoadPhase::Loading`].
    pub async fn load(&self) {
        self.stop_tasks();
        *self.shared.phase.write() = LoadPhase::Loading;
        *self.shared.last_error.write() = None;

        match self.shared.store.load_all() {
            Ok(items) => {
                *self.shared.items.write() = items;
                *self.shared.phase.write() = LoadPhase::Ready;
            }
            Err(err) => {
                warn!(%err, "local load failed; starting with an empty collection");
                self.shared.items.write().clear();
                *self.shared.last_error.write() =
                    Some(format!("could not load saved items: {err}"));
                *self.shared.phase.write() = LoadPhase::Degraded;
            }
        }

        if let Some(remote) = &self.shared.remote {
            *self.reconcile_task.lock() = Some(tokio::spawn(reconcile(self.shared.clone())));
            match remote.subscribe() {
                Ok(subscription) => {
                    *self.merge_task.lock() =
                        Some(tokio::spawn(merge_loop(self.shared.clone(), subscription)));
                }
                Err(err) => warn!(%err, "change stream unavailable; live updates disabled"),
            }
        }
    }

    /// Ends the session: cancels the merge loop and releases the
    /// change-notification stream.
    ///
    /// Results of remote requests still in flight are ignored.
    pub fn close(&self) {
        self.stop_tasks();
    }

    /// Adds a new item.
    ///
    /// The name is normalized and must not end up empty; the price must
    /// be finite and greater than zero and is rounded to two decimals; a
    /// missing or NaN gross price becomes zero. The item is prepended to
    /// the collection and persisted locally before the remote insert is
    /// attempted; a remote failure is logged and does not fail the call.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for bad input and
    /// [`CoreError::Storage`] if the local write fails (the in-memory
    /// prepend is rolled back).
    pub async fn add(
        &self,
        name: &str,
        price: f64,
        gross_price: Option<f64>,
    ) -> CoreResult<PriceItem> {
        self.begin_mutation();
        let name = self.validated_name(name)?;
        let price = self.validated_price(price)?;
        let gross_price = self.resolved_gross(gross_price, GrossPricePolicy::Optional)?;

        let item = PriceItem::new(name, price, gross_price);
        {
            let mut items = self.shared.items.write();
            items.insert(0, item.clone());
            if let Err(err) = self.shared.store.save_all(&items) {
                items.remove(0);
                return self.fail(err.into());
            }
        }

        if let Some(remote) = &self.shared.remote {
            self.propagate("insert", remote.insert(&item)).await;
        }
        Ok(item)
    }

    /// Updates an existing item.
    ///
    /// Validation matches [`PriceBook::add`], except the gross-price
    /// rule follows [`CoreConfig::gross_price_policy`]. `last_edited_at`
    /// is set only when the update actually changes the name, price, or
    /// gross price; a no-op update leaves it exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] for an unknown id,
    /// [`CoreError::Validation`] for bad input, and
    /// [`CoreError::Storage`] if the local write fails (the previous
    /// record is restored).
    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        price: f64,
        gross_price: Option<f64>,
    ) -> CoreResult<PriceItem> {
        self.begin_mutation();
        if !self.shared.items.read().iter().any(|item| item.id == id) {
            return self.fail(CoreError::NotFound(id));
        }
        let name = self.validated_name(name)?;
        let price = self.validated_price(price)?;
        let gross_price =
            self.resolved_gross(gross_price, self.shared.config.gross_price_policy)?;

        let updated = {
            let mut items = self.shared.items.write();
            // The merge loop may have removed the item since the check
            // above; that still reads as not-found.
            let Some(pos) = items.iter().position(|item| item.id == id) else {
                return self.fail(CoreError::NotFound(id));
            };
            let existing = items[pos].clone();

            let mut updated = existing.clone();
            updated.name = name;
            updated.price = price;
            updated.gross_price = gross_price;
            if existing.differs_from(&updated.name, updated.price, updated.gross_price) {
                updated.last_edited_at = Some(Utc::now());
            }

            items[pos] = updated.clone();
            if let Err(err) = self.shared.store.save_all(&items) {
                items[pos] = existing;
                return self.fail(err.into());
            }
            updated
        };

        if let Some(remote) = &self.shared.remote {
            self.propagate("update", remote.update(&updated)).await;
        }
        Ok(updated)
    }

    /// Removes an item by id.
    ///
    /// Removing an absent id is a no-op, not an error. The remote delete
    /// is attempted either way so both stores converge.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Storage`] if the local write fails (the
    /// removed item is restored).
    pub async fn remove(&self, id: Uuid) -> CoreResult<()> {
        self.begin_mutation();
        {
            let mut items = self.shared.items.write();
            if let Some(pos) = items.iter().position(|item| item.id == id) {
                let removed = items.remove(pos);
                if let Err(err) = self.shared.store.save_all(&items) {
                    items.insert(pos, removed);
                    return self.fail(err.into());
                }
            }
        }

        if let Some(remote) = &self.shared.remote {
            self.propagate("delete", remote.delete(id)).await;
        }
        Ok(())
    }

    /// Replaces the whole collection with an imported set.
    ///
    /// The one operation without partial-success tolerance: with a
    /// remote store configured the remote table is cleared and refilled
    /// first, and any remote failure (including the deadline elapsing)
    /// fails the import with memory and local storage untouched. Only
    /// then are memory and local storage replaced.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Remote`] if the remote replacement fails and
    /// [`CoreError::Storage`] if the local write fails (memory is rolled
    /// back).
    pub async fn import_all(&self, items: Vec<PriceItem>) -> CoreResult<usize> {
        self.begin_mutation();
        let items: Vec<PriceItem> = items.into_iter().map(PriceItem::sanitized).collect();

        if let Some(remote) = &self.shared.remote {
            match tokio::time::timeout(
                self.shared.config.remote_timeout,
                remote.replace_all(&items),
            )
            .await
            {
                Ok(Ok(())) => {}
                Ok(Err(err)) => return self.fail(err.into()),
                Err(_) => return self.fail(RemoteError::Timeout.into()),
            }
        }

        let count = items.len();
        {
            let mut current = self.shared.items.write();
            let previous = std::mem::replace(&mut *current, items);
            if let Err(err) = self.shared.store.save_all(&current) {
                *current = previous;
                return self.fail(err.into());
            }
        }
        Ok(count)
    }

    /// Returns the in-memory collection in storage order.
    #[must_use]
    pub fn items(&self) -> Vec<PriceItem> {
        self.shared.items.read().clone()
    }

    /// Searches by name and sorts the result.
    ///
    /// An empty query returns the full collection; the result is always
    /// a freshly ordered copy.
    #[must_use]
    pub fn search(&self, query: &str, option: SortOption) -> Vec<PriceItem> {
        let items = self.shared.items.read();
        query::sort(&query::search(&items, query), option)
    }

    /// Wraps the current collection in an export document.
    #[must_use]
    pub fn export(&self) -> ExportDocument {
        ExportDocument::new(self.items())
    }

    /// Returns the current load phase.
    #[must_use]
    pub fn phase(&self) -> LoadPhase {
        *self.shared.phase.read()
    }

    /// Returns true while the initial load is running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase().is_loading()
    }

    /// Returns the most recent operation failure, if any.
    ///
    /// One slot, overwritten by the latest failure and cleared when the
    /// next mutation starts.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.shared.last_error.read().clone()
    }

    fn begin_mutation(&self) {
        *self.shared.last_error.write() = None;
    }

    fn fail<T>(&self, err: CoreError) -> CoreResult<T> {
        *self.shared.last_error.write() = Some(err.to_string());
        Err(err)
    }

    fn validated_name(&self, raw: &str) -> CoreResult<String> {
        let name = normalize_name(raw);
        if name.is_empty() {
            return self.fail(CoreError::Validation("name must not be empty".into()));
        }
        Ok(name)
    }

    fn validated_price(&self, price: f64) -> CoreResult<f64> {
        if !price.is_finite() || price <= 0.0 {
            return self.fail(CoreError::Validation(
                "price must be a number greater than zero".into(),
            ));
        }
        Ok(round_price(price))
    }

    fn resolved_gross(&self, gross: Option<f64>, policy: GrossPricePolicy) -> CoreResult<f64> {
        let gross = gross.filter(|value| value.is_finite()).unwrap_or(0.0);
        match policy {
            GrossPricePolicy::Optional if gross < 0.0 => self.fail(CoreError::Validation(
                "gross price must not be negative".into(),
            )),
            GrossPricePolicy::Required if gross <= 0.0 => self.fail(CoreError::Validation(
                "gross price must be greater than zero".into(),
            )),
            _ => Ok(gross),
        }
    }

    async fn propagate<F>(&self, action: &str, request: F)
    where
        F: Future<Output = Result<(), RemoteError>>,
    {
        match tokio::time::timeout(self.shared.config.remote_timeout, request).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => warn!(%err, action, "remote propagation failed; local result stands"),
            Err(_) => warn!(action, "remote propagation timed out; local result stands"),
        }
    }

    fn stop_tasks(&self) {
        if let Some(task) = self.merge_task.lock().take() {
            task.abort();
        }
        if let Some(task) = self.reconcile_task.lock().take() {
            task.abort();
        }
    }
}

impl Drop for PriceBook {
    fn drop(&mut self) {
        self.stop_tasks();
    }
}

/// Replaces the collection with a remote snapshot, once, in the
/// background.
async fn reconcile(shared: Arc<Shared>) {
    let Some(remote) = shared.remote.clone() else {
        return;
    };

    match tokio::time::timeout(shared.config.remote_timeout, remote.fetch_all()).await {
        Ok(Ok(records)) => {
            let records: Vec<PriceItem> =
                records.into_iter().map(PriceItem::sanitized).collect();
            let mut items = shared.items.write();
            *items = records;
            if let Err(err) = shared.store.save_all(&items) {
                warn!(%err, "could not persist reconciled collection");
            }
            debug!(count = items.len(), "reconciled collection from remote");
        }
        // Offline is not an error; the local collection stands.
        Ok(Err(err)) => debug!(%err, "remote fetch failed; staying on local data"),
        Err(_) => debug!("remote fetch timed out; staying on local data"),
    }
}

/// Drains the change-notification stream for the lifetime of the session.
async fn merge_loop(shared: Arc<Shared>, mut subscription: Subscription) {
    while let Some(event) = subscription.recv().await {
        apply_change(&shared, event);
    }
    debug!("change stream ended");
}

fn apply_change(shared: &Shared, event: ChangeEvent) {
    let mut items = shared.items.write();
    let applied = match event.kind {
        ChangeKind::Insert => match event.item {
            // Already present: duplicate delivery or a race with a
            // local add.
            Some(item) if !items.iter().any(|existing| existing.id == item.id) => {
                items.insert(0, item.sanitized());
                true
            }
            _ => false,
        },
        ChangeKind::Update => match event.item {
            Some(item) => match items.iter_mut().find(|existing| existing.id == item.id) {
                Some(slot) => {
                    *slot = item.sanitized();
                    true
                }
                // Out-of-order delivery referencing an unknown id.
                None => false,
            },
            None => false,
        },
        ChangeKind::Delete => {
            let before = items.len();
            items.retain(|existing| existing.id != event.item_id);
            items.len() != before
        }
    };

    if applied {
        if let Err(err) = shared.store.save_all(&items) {
            warn!(%err, "could not persist merged change");
        }
    }
}
