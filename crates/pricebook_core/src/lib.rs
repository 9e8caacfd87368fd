//! # Pricebook Core
//!
//! Synchronization core and state surface for the Pricebook price-list
//! manager.
//!
//! This crate provides:
//! - [`PriceBook`] - the single owned state object callers mutate and
//!   query, with an explicit `load`/`close` lifecycle
//! - Local-first load with background remote reconciliation
//! - A mutation protocol with a local durability floor and best-effort
//!   remote propagation
//! - A merge loop applying live change notifications
//! - [`search`]/[`sort`] over the in-memory collection
//!
//! ## Architecture
//!
//! The core is **local-first**: every mutation writes to durable local
//! storage before reporting success, and the initial load never blocks on
//! the remote round trip. The remote store is an explicit optional
//! dependency; when it is absent the core simply runs offline.
//!
//! ## Key Invariants
//!
//! - Exactly one in-memory collection, keyed by item id
//! - The local load is visible before any remote reconciliation or
//!   change event is applied
//! - A failed local write aborts the mutation and rolls back memory
//! - A failed remote write never fails add/update/remove, and always
//!   fails import

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod query;
mod state;

pub use config::{CoreConfig, GrossPricePolicy};
pub use error::{CoreError, CoreResult};
pub use query::{search, sort, SortOption, UnknownSortOption};
pub use state::{LoadPhase, PriceBook};
