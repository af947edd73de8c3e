//! Primary-keyed table storage for Verdant.
//!
//! This module provides the `Table` struct, which owns the primary mapping
//! from key to value and keeps every attached index in lock-step with it.
//!
//! Each write runs in two phases. The prepare phase proposes the write to
//! every index in registration order. If all accept, the primary mapping is
//! written and every index commits, in the same order. If index `i` refuses,
//! indexes `i, i-1, ..., 0` abandon their staged change and nothing is
//! written. A write either lands everywhere or nowhere.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;
use core::marker::PhantomData;
use core::sync::atomic::{AtomicU64, Ordering};
use hashbrown::HashMap;
use log::{debug, trace};
use verdant_core::{Error, Result, WriteKind};
use verdant_index::{Index, UniqueIndex};

/// Global table ID counter.
static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

/// Table ID type.
pub type TableId = u64;

/// Derives the primary key of a value.
pub type KeyFn<K, V> = Box<dyn Fn(&V) -> K>;

/// Typed reference to an index attached to a particular table.
///
/// Returned by `Table::attach` and accepted by `Table::index`.
pub struct IndexHandle<I> {
    table: TableId,
    slot: usize,
    _index: PhantomData<fn() -> I>,
}

impl<I> IndexHandle<I> {
    /// Returns the ID of the table that issued this handle.
    #[inline]
    pub fn table_id(&self) -> TableId {
        self.table
    }

    /// Returns the registration position of the index.
    #[inline]
    pub fn position(&self) -> usize {
        self.slot
    }
}

impl<I> Clone for IndexHandle<I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for IndexHandle<I> {}

impl<I> fmt::Debug for IndexHandle<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexHandle")
            .field("table", &self.table)
            .field("slot", &self.slot)
            .finish()
    }
}

/// An in-memory table of values keyed by a derived primary key.
///
/// `K` must have structural equality and hashing: two keys that compare equal
/// address the same entry. Both `K` and `V` must be `'static`, since attached
/// indexes are stored as `Box<dyn Index<K, V>>` and `Index` extends `Any`.
pub struct Table<K, V> {
    id: TableId,
    key_fn: KeyFn<K, V>,
    data: HashMap<K, V>,
    indexes: Vec<Box<dyn Index<K, V>>>,
}

impl<K, V> Table<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: 'static,
{
    /// Creates an empty table whose primary keys are computed by `key_fn`.
    pub fn new<F>(key_fn: F) -> Self
    where
        F: Fn(&V) -> K + 'static,
    {
        Self::with_capacity(key_fn, 0)
    }

    /// Creates an empty table with room for `capacity` entries.
    pub fn with_capacity<F>(key_fn: F, capacity: usize) -> Self
    where
        F: Fn(&V) -> K + 'static,
    {
        Self {
            id: NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed),
            key_fn: Box::new(key_fn),
            data: HashMap::with_capacity(capacity),
            indexes: Vec::new(),
        }
    }

    /// Returns the table ID.
    #[inline]
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Computes the primary key of `value`.
    #[inline]
    pub fn key_of(&self, value: &V) -> K {
        (self.key_fn)(value)
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of attached indexes.
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indexes.len()
    }

    /// Checks whether an entry exists for `key`.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.data.contains_key(key)
    }

    /// Returns the value stored under `key`.
    #[inline]
    pub fn lookup(&self, key: &K) -> Option<&V> {
        self.data.get(key)
    }

    /// Returns the value stored under `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not in the table. Use `lookup` when absence is expected.
    pub fn find(&self, key: &K) -> &V {
        match self.data.get(key) {
            Some(value) => value,
            None => panic!("find called with a key that is not in table {}", self.id),
        }
    }

    /// Iterates over all entries in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.data.iter()
    }

    /// Iterates over all primary keys.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.data.keys()
    }

    /// Iterates over all values.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.data.values()
    }

    /// Inserts a value under its primary key.
    ///
    /// Returns the key, or `None` if the key is already present or an index
    /// refused the value. Use `try_insert` to tell those apart.
    pub fn insert(&mut self, value: V) -> Option<K> {
        self.try_insert(value).ok()
    }

    /// Inserts a value, reporting why it was refused.
    pub fn try_insert(&mut self, value: V) -> Result<K> {
        let key = (self.key_fn)(&value);
        if self.data.contains_key(&key) {
            return Err(Error::DuplicateKey);
        }

        Self::prepare(&mut self.indexes, WriteKind::Insertion, &key, &value)?;
        self.data.insert(key.clone(), value);
        Self::commit(&mut self.indexes);
        Ok(key)
    }

    /// Replaces the value stored under the primary key of `value`.
    ///
    /// Returns the key, or `None` if an index refused the new value.
    ///
    /// # Panics
    ///
    /// Panics if the key is not already in the table.
    pub fn update(&mut self, value: V) -> Option<K> {
        self.try_update(value).ok()
    }

    /// Replaces a value, reporting why it was refused.
    ///
    /// # Panics
    ///
    /// Panics if the key is not already in the table.
    pub fn try_update(&mut self, value: V) -> Result<K> {
        let key = (self.key_fn)(&value);
        assert!(
            self.data.contains_key(&key),
            "update called with a key that is not in table {}",
            self.id
        );

        if !self.indexes.is_empty() {
            Self::prepare(&mut self.indexes, WriteKind::Update, &key, &value)?;
        }
        self.data.insert(key.clone(), value);
        Self::commit(&mut self.indexes);
        Ok(key)
    }

    /// Removes the entry whose key matches the primary key of `value`.
    ///
    /// The stored value, not `value`, is what the indexes see and what is returned.
    pub fn remove(&mut self, value: &V) -> Option<V> {
        let key = (self.key_fn)(value);
        self.remove_by_key(&key)
    }

    /// Removes the entry stored under `key`.
    ///
    /// Returns the removed value, or `None` if the key is absent or an index
    /// refused the removal.
    pub fn remove_by_key(&mut self, key: &K) -> Option<V> {
        self.try_remove_by_key(key).ok()
    }

    /// Removes an entry, reporting why it was not removed.
    pub fn try_remove_by_key(&mut self, key: &K) -> Result<V> {
        let Some(stored) = self.data.get(key) else {
            return Err(Error::KeyNotFound);
        };

        Self::prepare(&mut self.indexes, WriteKind::Removal, key, stored)?;
        match self.data.remove(key) {
            Some(removed) => {
                Self::commit(&mut self.indexes);
                Ok(removed)
            }
            None => unreachable!("entry disappeared between prepare and commit"),
        }
    }

    /// Attaches an index and back-fills it from the current entries.
    ///
    /// The index joins the end of the protocol order. The returned handle
    /// gives read access to it through `Table::index`.
    ///
    /// # Panics
    ///
    /// Panics if the index refuses any existing entry.
    pub fn attach<I>(&mut self, mut index: I) -> IndexHandle<I>
    where
        I: Index<K, V>,
    {
        let slot = self.indexes.len();
        let backfilled = index.initialize(&mut self.data.iter());
        debug!(
            "attached index {} to table {} ({} entries back-filled)",
            slot, self.id, backfilled
        );

        self.indexes.push(Box::new(index));
        IndexHandle {
            table: self.id,
            slot,
            _index: PhantomData,
        }
    }

    /// Returns the index behind `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` was issued by a different table.
    pub fn index<I>(&self, handle: &IndexHandle<I>) -> &I
    where
        I: Index<K, V>,
    {
        assert_eq!(
            handle.table, self.id,
            "index handle from table {} used on table {}",
            handle.table, self.id
        );
        match self.indexes[handle.slot].as_any().downcast_ref::<I>() {
            Some(index) => index,
            None => panic!("index at position {} has a different type", handle.slot),
        }
    }

    /// Looks up a value by the unique key of an attached `UniqueIndex`.
    pub fn lookup_unique<U>(
        &self,
        handle: &IndexHandle<UniqueIndex<K, V, U>>,
        unique_key: &U,
    ) -> Option<&V>
    where
        U: Eq + Hash + Clone + 'static,
    {
        let key = self.index(handle).key_for(unique_key)?;
        self.data.get(key)
    }

    /// Runs the prepare phase, abandoning on the first refusal.
    fn prepare(
        indexes: &mut [Box<dyn Index<K, V>>],
        kind: WriteKind,
        key: &K,
        value: &V,
    ) -> Result<()> {
        for position in 0..indexes.len() {
            if indexes[position].propose(kind, key, value) {
                continue;
            }

            trace!(
                "index {} refused {}; abandoning indexes {}..=0",
                position,
                kind,
                position
            );
            for index in indexes[..=position].iter_mut().rev() {
                index.abandon_pending_change();
            }
            return Err(Error::rejected(position, kind));
        }
        Ok(())
    }

    fn commit(indexes: &mut [Box<dyn Index<K, V>>]) {
        for index in indexes.iter_mut() {
            index.commit_pending_change();
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Table<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("id", &self.id)
            .field("data", &self.data)
            .field("indexes", &self.indexes.len())
            .finish_non_exhaustive()
    }
}
