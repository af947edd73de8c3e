//! Verdant - In-memory tables with transactional indexes and reactive queries.
//!
//! This crate re-exports the Verdant crates under one roof:
//!
//! - `Table`: A primary-keyed store that drives attached indexes through a
//!   prepare/commit/abandon protocol, so every write lands everywhere or nowhere
//! - `UniqueIndex` / `HashIndex`: Secondary indexes kept in lock-step with a table
//! - `Query` / `Subscription`: A memoized value over a model, pushed to
//!   subscribers only when it changes
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use verdant::{HashIndex, Query, Table, UniqueIndex};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Plant {
//!     id: String,
//!     name: String,
//!     genus: String,
//! }
//!
//! let plant = |id: &str, name: &str, genus: &str| Plant {
//!     id: id.into(),
//!     name: name.into(),
//!     genus: genus.into(),
//! };
//!
//! let mut plants = Table::new(|p: &Plant| p.id.clone());
//! plants.attach(UniqueIndex::new(|p: &Plant| (p.genus.clone(), p.name.clone())));
//! let by_genus = plants.attach(HashIndex::new(|p: &Plant| p.genus.clone()));
//!
//! let mut malus_count = Query::new(move |table: &Table<String, Plant>, previous: Option<&usize>| {
//!     let count = table.index(&by_genus).count(&"Malus".to_string());
//!     (previous != Some(&count)).then_some(count)
//! });
//! let counts = Rc::new(RefCell::new(Vec::new()));
//! let sink = counts.clone();
//! let _subscription = malus_count.subscribe(move |n: &usize| sink.borrow_mut().push(*n));
//!
//! plants.insert(plant("1", "Apple", "Malus"));
//! malus_count.evaluate(&plants);
//! plants.insert(plant("2", "Apple", "Malus")); // refused: same genus and name
//! malus_count.evaluate(&plants);
//! plants.insert(plant("3", "Crabapple", "Malus"));
//! malus_count.evaluate(&plants);
//!
//! assert_eq!(*counts.borrow(), vec![1, 2]);
//! ```

#![no_std]

pub use verdant_core::{Error, Result, WriteKind};
pub use verdant_index::{BiMap, HashIndex, Index, Pending, UniqueIndex};
pub use verdant_reactive::{Query, Subscription, SubscriptionId};
pub use verdant_storage::{IndexHandle, Table, TableId};
