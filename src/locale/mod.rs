//! Locale documents and the append-only merge.
//!
//! ## Module Structure
//!
//! - `document`: ordered key → value JSON mapping, parse and serialize
//! - `merge`: appends extracted keys, derives default values
//! - `store`: loading and saving documents by locale identifier

pub mod document;
pub mod merge;
pub mod store;

pub use document::{DEFAULT_INDENT, LocaleDocument};
pub use merge::{MergeMode, MergeOutcome, ValueMismatch, default_value, humanize, merge};
pub use store::{DiskLocaleStore, LocaleStore};
