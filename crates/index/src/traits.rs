//! Index trait definitions for Verdant tables.
//!
//! This module defines the `Index` trait that every secondary index attached
//! to a table must satisfy. A table drives its indexes through a two-phase
//! protocol for each write:
//!
//! 1. `will_insert` / `will_update` / `will_remove` propose the write. An
//!    index that accepts stages the change in its `Pending` state.
//! 2. Once every index has accepted, `commit_pending_change` applies the
//!    staged change. If any index refuses, `abandon_pending_change` is called
//!    on the refusing index and every index before it, in reverse order.
//!
//! Implementations delegate staging to `Pending` explicitly from each
//! `will_*` hook rather than relying on a default.

use core::any::Any;
use verdant_core::WriteKind;

/// Core trait for all secondary index implementations.
///
/// `K` is the table's primary key type and `V` its value type. Both must have
/// structural equality: they key hash maps inside the index.
pub trait Index<K, V>: Any {
    /// Proposes inserting `value` under `key`. Returns false to refuse.
    fn will_insert(&mut self, key: &K, value: &V) -> bool;

    /// Proposes replacing the value stored under `key`. Returns false to refuse.
    fn will_update(&mut self, key: &K, value: &V) -> bool;

    /// Proposes removing `key`, whose stored value is `value`. Returns false to refuse.
    fn will_remove(&mut self, key: &K, value: &V) -> bool;

    /// Applies the staged change to the index and clears it.
    fn commit_pending_change(&mut self);

    /// Discards the staged change, if any.
    fn abandon_pending_change(&mut self);

    /// Returns the number of primary keys the index currently covers.
    fn len(&self) -> usize;

    /// Returns true if the index covers no keys.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispatches to the `will_*` hook matching `kind`.
    fn propose(&mut self, kind: WriteKind, key: &K, value: &V) -> bool {
        match kind {
            WriteKind::Insertion => self.will_insert(key, value),
            WriteKind::Update => self.will_update(key, value),
            WriteKind::Removal => self.will_remove(key, value),
        }
    }

    /// Back-fills the index from a table's existing entries.
    ///
    /// Each entry is replayed as an insertion and committed immediately.
    /// Existing entries were already accepted by the table, so a refusal
    /// here means the index itself is inconsistent.
    ///
    /// # Panics
    ///
    /// Panics if the index refuses any entry.
    fn initialize(&mut self, entries: &mut dyn Iterator<Item = (&K, &V)>) -> usize {
        let mut count = 0;
        for (key, value) in entries {
            if !self.will_insert(key, value) {
                self.abandon_pending_change();
                panic!("index refused an existing table entry during backfill");
            }
            self.commit_pending_change();
            count += 1;
        }
        count
    }

    /// Returns the index as `Any` so a table can hand back the concrete type.
    fn as_any(&self) -> &dyn Any;
}
