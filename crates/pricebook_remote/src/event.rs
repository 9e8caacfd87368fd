//! Change-notification events and the subscription stream.

use parking_lot::RwLock;
use pricebook_model::PriceItem;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use uuid::Uuid;

/// Type of change pushed by the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A record was inserted.
    Insert,
    /// A record was updated.
    Update,
    /// A record was deleted.
    Delete,
}

/// A single change notification from the remote store.
///
/// Insert and update events carry the new record; delete events carry
/// only the id of the removed record.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    /// Type of change.
    pub kind: ChangeKind,
    /// Id of the affected record.
    pub item_id: Uuid,
    /// New record state, for inserts and updates.
    pub item: Option<PriceItem>,
}

impl ChangeEvent {
    /// Creates an insert event.
    #[must_use]
    pub fn insert(item: PriceItem) -> Self {
        Self {
            kind: ChangeKind::Insert,
            item_id: item.id,
            item: Some(item),
        }
    }

    /// Creates an update event.
    #[must_use]
    pub fn update(item: PriceItem) -> Self {
        Self {
            kind: ChangeKind::Update,
            item_id: item.id,
            item: Some(item),
        }
    }

    /// Creates a delete event.
    #[must_use]
    pub fn delete(item_id: Uuid) -> Self {
        Self {
            kind: ChangeKind::Delete,
            item_id,
            item: None,
        }
    }
}

/// Lifecycle state of a change-notification subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionStatus {
    /// The stream is live.
    Subscribed,
    /// The stream broke.
    Error,
    /// Establishing the stream timed out.
    TimedOut,
    /// The stream was closed by the consumer.
    Closed,
}

/// A live change-notification stream.
///
/// One subscription is opened per session. The consumer drains events
/// with [`Subscription::recv`] and must call [`Subscription::close`]
/// when the session ends so the underlying connection is released.
#[derive(Debug)]
pub struct Subscription {
    receiver: UnboundedReceiver<ChangeEvent>,
    status: Arc<RwLock<SubscriptionStatus>>,
}

impl Subscription {
    /// Wraps a receiver and a shared status handle.
    #[must_use]
    pub fn new(
        receiver: UnboundedReceiver<ChangeEvent>,
        status: Arc<RwLock<SubscriptionStatus>>,
    ) -> Self {
        Self { receiver, status }
    }

    /// Waits for the next event.
    ///
    /// Returns `None` once the stream is closed and drained.
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        self.receiver.recv().await
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn status(&self) -> SubscriptionStatus {
        *self.status.read()
    }

    /// Closes the stream and releases the underlying connection.
    ///
    /// No further events are accepted; `recv` drains what is already
    /// queued and then returns `None`.
    pub fn close(&mut self) {
        *self.status.write() = SubscriptionStatus::Closed;
        self.receiver.close();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // A dropped subscription releases its connection even when the
        // consumer never called close() explicitly.
        let mut status = self.status.write();
        if *status == SubscriptionStatus::Subscribed {
            *status = SubscriptionStatus::Closed;
        }
        self.receiver.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn subscription() -> (mpsc::UnboundedSender<ChangeEvent>, Subscription) {
        let (tx, rx) = mpsc::unbounded_channel();
        let status = Arc::new(RwLock::new(SubscriptionStatus::Subscribed));
        (tx, Subscription::new(rx, status))
    }

    #[test]
    fn event_constructors() {
        let item = PriceItem::new("Tea", 1.0, 0.0);
        let id = item.id;

        let event = ChangeEvent::insert(item.clone());
        assert_eq!(event.kind, ChangeKind::Insert);
        assert_eq!(event.item_id, id);
        assert!(event.item.is_some());

        let event = ChangeEvent::delete(id);
        assert_eq!(event.kind, ChangeKind::Delete);
        assert!(event.item.is_none());
    }

    #[tokio::test]
    async fn recv_delivers_in_order() {
        let (tx, mut sub) = subscription();
        let first = PriceItem::new("First", 1.0, 0.0);
        let second = PriceItem::new("Second", 2.0, 0.0);

        tx.send(ChangeEvent::insert(first.clone())).unwrap();
        tx.send(ChangeEvent::insert(second.clone())).unwrap();

        assert_eq!(sub.recv().await.unwrap().item_id, first.id);
        assert_eq!(sub.recv().await.unwrap().item_id, second.id);
    }

    #[tokio::test]
    async fn close_ends_the_stream() {
        let (tx, mut sub) = subscription();
        assert_eq!(sub.status(), SubscriptionStatus::Subscribed);

        sub.close();
        assert_eq!(sub.status(), SubscriptionStatus::Closed);
        assert!(sub.recv().await.is_none());
        assert!(tx.send(ChangeEvent::delete(Uuid::new_v4())).is_err());
    }
}
