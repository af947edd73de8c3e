//! Unique index implementation for Verdant tables.
//!
//! A `UniqueIndex` derives a secondary key from every value in a table and
//! refuses writes that would give two primary keys the same secondary key.
//! It keeps a bijection between primary keys and unique keys that mirrors the
//! committed table contents only; proposals live in `Pending` until commit.

use crate::bimap::BiMap;
use crate::pending::Pending;
use crate::traits::Index;
use alloc::boxed::Box;
use core::any::Any;
use core::fmt;
use core::hash::Hash;
use log::trace;
use verdant_core::WriteKind;

/// Derives a unique key from a stored value.
pub type UniqueBy<V, U> = Box<dyn Fn(&V) -> U>;

/// A secondary index enforcing a one-to-one relation between primary keys
/// and keys derived by `unique_by`.
pub struct UniqueIndex<K, V, U> {
    unique_by: UniqueBy<V, U>,
    entries: BiMap<K, U>,
    pending: Pending<K, U>,
}

impl<K, V, U> UniqueIndex<K, V, U>
where
    K: Eq + Hash + Clone,
    U: Eq + Hash + Clone,
{
    /// Creates an empty unique index. It is populated when attached to a table.
    pub fn new<F>(unique_by: F) -> Self
    where
        F: Fn(&V) -> U + 'static,
    {
        Self {
            unique_by: Box::new(unique_by),
            entries: BiMap::new(),
            pending: Pending::new(),
        }
    }

    /// Computes the unique key for `value`.
    #[inline]
    pub fn unique_key(&self, value: &V) -> U {
        (self.unique_by)(value)
    }

    /// Returns the primary key currently holding `unique_key`.
    #[inline]
    pub fn key_for(&self, unique_key: &U) -> Option<&K> {
        self.entries.get_by_right(unique_key)
    }

    /// Returns the unique key committed for primary key `key`.
    #[inline]
    pub fn unique_key_of(&self, key: &K) -> Option<&U> {
        self.entries.get_by_left(key)
    }

    /// Checks whether some primary key holds `unique_key`.
    #[inline]
    pub fn contains_unique(&self, unique_key: &U) -> bool {
        self.entries.contains_right(unique_key)
    }

    /// Returns the committed bijection.
    pub fn entries(&self) -> &BiMap<K, U> {
        &self.entries
    }

    /// Returns true if a write is staged and not yet committed or abandoned.
    pub fn has_pending_change(&self) -> bool {
        !self.pending.is_idle()
    }
}

impl<K, V, U> Index<K, V> for UniqueIndex<K, V, U>
where
    K: Eq + Hash + Clone + 'static,
    V: 'static,
    U: Eq + Hash + Clone + 'static,
{
    fn will_insert(&mut self, key: &K, value: &V) -> bool {
        let unique_key = self.unique_key(value);
        if self.entries.contains_right(&unique_key) {
            trace!("unique index refused {}: unique key taken", WriteKind::Insertion);
            return false;
        }
        self.pending.will_insert(key, unique_key)
    }

    fn will_update(&mut self, key: &K, value: &V) -> bool {
        let Some(previous) = self.entries.get_by_left(key) else {
            panic!("unique index has no entry for a key being updated");
        };
        let unique_key = self.unique_key(value);

        // An unchanged unique key still stages, so commit rewrites the same pair.
        if *previous != unique_key && self.entries.contains_right(&unique_key) {
            trace!("unique index refused {}: unique key taken", WriteKind::Update);
            return false;
        }
        self.pending.will_update(key, unique_key)
    }

    fn will_remove(&mut self, key: &K, value: &V) -> bool {
        let unique_key = self.unique_key(value);
        self.pending.will_remove(key, unique_key)
    }

    fn commit_pending_change(&mut self) {
        let (kind, key, unique_key) = self.pending.take();
        match kind {
            WriteKind::Insertion | WriteKind::Update => self.entries.insert(key, unique_key),
            WriteKind::Removal => {
                self.entries.remove_by_left(&key);
            }
        }
    }

    fn abandon_pending_change(&mut self) {
        self.pending.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<K, V, U> fmt::Debug for UniqueIndex<K, V, U>
where
    K: fmt::Debug,
    U: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniqueIndex")
            .field("entries", &self.entries)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
