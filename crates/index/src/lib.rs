//! Verdant Index - Transactional secondary indexes for Verdant tables.
//!
//! This crate provides the index side of the table write protocol:
//!
//! - `Index`: The prepare/commit/abandon protocol every index implements
//! - `Pending`: The staged-change state machine indexes delegate to
//! - `UniqueIndex`: Enforces a one-to-one relation between primary keys and a derived key
//! - `HashIndex`: Groups primary keys by a derived key
//!
//! # Example
//!
//! ```rust
//! use verdant_index::{Index, UniqueIndex};
//!
//! let mut index: UniqueIndex<u32, (u32, &str), &str> = UniqueIndex::new(|v: &(u32, &str)| v.1);
//!
//! assert!(index.will_insert(&1, &(1, "apple")));
//! index.commit_pending_change();
//!
//! // A second key may not claim the same unique key.
//! assert!(!index.will_insert(&2, &(2, "apple")));
//! index.abandon_pending_change();
//!
//! assert_eq!(index.key_for(&"apple"), Some(&1));
//! ```

#![no_std]

extern crate alloc;

pub mod bimap;
pub mod hash;
pub mod pending;
pub mod traits;
pub mod unique;

pub use bimap::BiMap;
pub use hash::HashIndex;
pub use pending::Pending;
pub use traits::Index;
pub use unique::UniqueIndex;
