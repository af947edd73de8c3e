//! Hash index implementation for Verdant tables.
//!
//! This module provides a non-unique index that groups primary keys by a key
//! derived from each value. It never refuses a write.

use crate::pending::Pending;
use crate::traits::Index;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;
use core::hash::Hash;
use hashbrown::HashMap;
use verdant_core::WriteKind;

/// Derives a group key from a stored value.
pub type GroupBy<V, G> = Box<dyn Fn(&V) -> G>;

/// A hash-based index from group keys to the primary keys in each group.
///
/// Keys within a group are kept in the order they joined it.
pub struct HashIndex<K, V, G> {
    group_by: GroupBy<V, G>,
    /// Group key to member primary keys.
    groups: HashMap<G, Vec<K>>,
    /// Primary key to its current group, needed to move keys on update.
    membership: HashMap<K, G>,
    pending: Pending<K, G>,
}

impl<K, V, G> HashIndex<K, V, G>
where
    K: Eq + Hash + Clone,
    G: Eq + Hash + Clone,
{
    /// Creates an empty hash index. It is populated when attached to a table.
    pub fn new<F>(group_by: F) -> Self
    where
        F: Fn(&V) -> G + 'static,
    {
        Self {
            group_by: Box::new(group_by),
            groups: HashMap::new(),
            membership: HashMap::new(),
            pending: Pending::new(),
        }
    }

    /// Returns the primary keys in `group`.
    pub fn get(&self, group: &G) -> Vec<K> {
        self.groups.get(group).cloned().unwrap_or_default()
    }

    /// Returns the number of primary keys in `group`.
    pub fn count(&self, group: &G) -> usize {
        self.groups.get(group).map(|v| v.len()).unwrap_or(0)
    }

    /// Returns the group `key` belongs to.
    pub fn group_of(&self, key: &K) -> Option<&G> {
        self.membership.get(key)
    }

    /// Iterates over the non-empty groups.
    pub fn groups(&self) -> impl Iterator<Item = &G> {
        self.groups.keys()
    }

    /// Returns the number of non-empty groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    fn detach(&mut self, key: &K) {
        let Some(group) = self.membership.remove(key) else {
            return;
        };
        if let Some(members) = self.groups.get_mut(&group) {
            members.retain(|k| k != key);
            if members.is_empty() {
                self.groups.remove(&group);
            }
        }
    }

    fn attach(&mut self, key: K, group: G) {
        self.groups
            .entry(group.clone())
            .or_insert_with(Vec::new)
            .push(key.clone());
        self.membership.insert(key, group);
    }
}

impl<K, V, G> Index<K, V> for HashIndex<K, V, G>
where
    K: Eq + Hash + Clone + 'static,
    V: 'static,
    G: Eq + Hash + Clone + 'static,
{
    fn will_insert(&mut self, key: &K, value: &V) -> bool {
        let group = (self.group_by)(value);
        self.pending.will_insert(key, group)
    }

    fn will_update(&mut self, key: &K, value: &V) -> bool {
        let group = (self.group_by)(value);
        self.pending.will_update(key, group)
    }

    fn will_remove(&mut self, key: &K, value: &V) -> bool {
        let group = (self.group_by)(value);
        self.pending.will_remove(key, group)
    }

    fn commit_pending_change(&mut self) {
        let (kind, key, group) = self.pending.take();
        match kind {
            WriteKind::Insertion => self.attach(key, group),
            WriteKind::Update => {
                if self.membership.get(&key) != Some(&group) {
                    self.detach(&key);
                    self.attach(key, group);
                }
            }
            WriteKind::Removal => self.detach(&key),
        }
    }

    fn abandon_pending_change(&mut self) {
        self.pending.clear();
    }

    fn len(&self) -> usize {
        self.membership.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<K, V, G> fmt::Debug for HashIndex<K, V, G>
where
    K: fmt::Debug,
    G: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashIndex")
            .field("groups", &self.groups)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
