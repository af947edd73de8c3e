//! Bijective map used by the unique index.

use core::hash::Hash;
use hashbrown::HashMap;

/// A one-to-one mapping between left and right values.
///
/// Each left value maps to at most one right value and vice versa. Inserting
/// a pair evicts any pairs that share either side with it.
#[derive(Clone, Debug)]
pub struct BiMap<L, R> {
    forward: HashMap<L, R>,
    backward: HashMap<R, L>,
}

impl<L, R> Default for BiMap<L, R> {
    fn default() -> Self {
        Self {
            forward: HashMap::new(),
            backward: HashMap::new(),
        }
    }
}

impl<L, R> BiMap<L, R>
where
    L: Eq + Hash + Clone,
    R: Eq + Hash + Clone,
{
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs `left` with `right`, dropping any pair either was part of.
    pub fn insert(&mut self, left: L, right: R) {
        if let Some(old_right) = self.forward.remove(&left) {
            self.backward.remove(&old_right);
        }
        if let Some(old_left) = self.backward.remove(&right) {
            self.forward.remove(&old_left);
        }
        self.forward.insert(left.clone(), right.clone());
        self.backward.insert(right, left);
    }

    /// Returns the right value paired with `left`.
    #[inline]
    pub fn get_by_left(&self, left: &L) -> Option<&R> {
        self.forward.get(left)
    }

    /// Returns the left value paired with `right`.
    #[inline]
    pub fn get_by_right(&self, right: &R) -> Option<&L> {
        self.backward.get(right)
    }

    /// Checks whether `left` is paired.
    #[inline]
    pub fn contains_left(&self, left: &L) -> bool {
        self.forward.contains_key(left)
    }

    /// Checks whether `right` is paired.
    #[inline]
    pub fn contains_right(&self, right: &R) -> bool {
        self.backward.contains_key(right)
    }

    /// Removes the pair containing `left`, returning its right value.
    pub fn remove_by_left(&mut self, left: &L) -> Option<R> {
        let right = self.forward.remove(left)?;
        self.backward.remove(&right);
        Some(right)
    }

    /// Iterates over all pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&L, &R)> {
        self.forward.iter()
    }

    /// Returns the number of pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns true if there are no pairs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

impl<L, R> PartialEq for BiMap<L, R>
where
    L: Eq + Hash,
    R: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.forward == other.forward
    }
}

impl<L: Eq + Hash, R: Eq + Hash> Eq for BiMap<L, R> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bimap_insert_get() {
        let mut map = BiMap::new();
        map.insert(1, "a");
        map.insert(2, "b");

        assert_eq!(map.get_by_left(&1), Some(&"a"));
        assert_eq!(map.get_by_right(&"b"), Some(&2));
        assert_eq!(map.get_by_left(&3), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_bimap_insert_evicts_left() {
        let mut map = BiMap::new();
        map.insert(1, "a");
        map.insert(1, "b");

        assert_eq!(map.get_by_left(&1), Some(&"b"));
        assert!(!map.contains_right(&"a"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_bimap_insert_evicts_right() {
        let mut map = BiMap::new();
        map.insert(1, "a");
        map.insert(2, "a");

        assert_eq!(map.get_by_right(&"a"), Some(&2));
        assert!(!map.contains_left(&1));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_bimap_reinsert_same_pair() {
        let mut map = BiMap::new();
        map.insert(1, "a");
        map.insert(1, "a");

        assert_eq!(map.get_by_left(&1), Some(&"a"));
        assert_eq!(map.get_by_right(&"a"), Some(&1));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_bimap_remove() {
        let mut map = BiMap::new();
        map.insert(1, "a");
        map.insert(2, "b");

        assert_eq!(map.remove_by_left(&1), Some("a"));
        assert!(!map.contains_right(&"a"));
        assert_eq!(map.remove_by_left(&1), None);

        assert_eq!(map.remove_by_left(&2), Some("b"));
        assert!(map.is_empty());
    }

    #[test]
    fn test_bimap_equality_ignores_order() {
        let mut a = BiMap::new();
        let mut b = BiMap::new();
        a.insert(1, 10);
        a.insert(2, 20);
        b.insert(2, 20);
        b.insert(1, 10);
        assert_eq!(a, b);

        b.remove_by_left(&1);
        assert_ne!(a, b);
    }
}
