//! # Pricebook Model
//!
//! Shared entity types for the Pricebook state-and-sync core.
//!
//! This crate provides:
//! - [`PriceItem`] - the single entity every store references by id
//! - [`normalize_name`] - display-name normalization
//! - [`ExportDocument`] - the import/export file shape
//!
//! The same record shape is used by local storage, the remote table, and
//! export files: camelCase JSON with RFC 3339 timestamps. Values that a
//! source cannot represent cleanly (a NaN gross price, an unparsable edit
//! timestamp) are normalized during deserialization so they never reach
//! the in-memory collection.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod export;
mod format;
mod item;

pub use export::{ExportDocument, ExportError, ExportResult, EXPORT_VERSION};
pub use format::normalize_name;
pub use item::{round_price, PriceItem};
