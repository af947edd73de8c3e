//! Verdant Storage - Primary-keyed in-memory tables for Verdant.
//!
//! This crate provides `Table`, the sole owner of a primary mapping from key
//! to value, and the driver of the prepare/commit/abandon protocol that keeps
//! attached indexes in lock-step with it.
//!
//! # Example
//!
//! ```rust
//! use verdant_storage::Table;
//! use verdant_index::UniqueIndex;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Plant {
//!     id: u32,
//!     name: &'static str,
//! }
//!
//! let mut table = Table::new(|p: &Plant| p.id);
//! let by_name = table.attach(UniqueIndex::new(|p: &Plant| p.name));
//!
//! assert_eq!(table.insert(Plant { id: 1, name: "Apple" }), Some(1));
//! // Rejected by the unique index: nothing is written.
//! assert_eq!(table.insert(Plant { id: 2, name: "Apple" }), None);
//!
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.lookup_unique(&by_name, &"Apple").map(|p| p.id), Some(1));
//! ```

#![no_std]

extern crate alloc;

pub mod table;

pub use table::{IndexHandle, KeyFn, Table, TableId};
