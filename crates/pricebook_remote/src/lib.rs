//! # Pricebook Remote
//!
//! Remote store adapter contract for the Pricebook core.
//!
//! The remote store itself is an external collaborator; this crate
//! defines only the contract the core depends on:
//! - [`RemoteStore`] - async create/read/update/delete plus subscribe
//! - [`ChangeEvent`] / [`ChangeKind`] - change-notification payloads
//! - [`Subscription`] - the live event stream with explicit lifecycle
//! - [`MockRemoteStore`] - a scripted implementation for tests
//!
//! Remote writes are best-effort from the core's point of view; the
//! adapter reports failures and the core decides what survives them.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod adapter;
mod error;
mod event;
mod mock;

pub use adapter::RemoteStore;
pub use error::{RemoteError, RemoteResult};
pub use event::{ChangeEvent, ChangeKind, Subscription, SubscriptionStatus};
pub use mock::MockRemoteStore;
