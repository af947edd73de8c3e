//! Property-based tests for verdant-index using proptest.

use proptest::prelude::*;
use std::collections::HashMap;
use verdant_index::{BiMap, HashIndex, Index, UniqueIndex};

proptest! {
    /// Both directions of a BiMap always agree.
    #[test]
    fn bimap_stays_bijective(pairs in prop::collection::vec((0u8..20, 0u8..20), 1..200)) {
        let mut map = BiMap::new();
        for &(l, r) in &pairs {
            map.insert(l, r);
            prop_assert_eq!(map.get_by_left(&l), Some(&r));
            prop_assert_eq!(map.get_by_right(&r), Some(&l));
        }
        for (l, r) in map.iter() {
            prop_assert_eq!(map.get_by_right(r), Some(l));
        }
    }

    /// A unique index accepts a key exactly when its unique key is free.
    #[test]
    fn unique_index_accepts_free_keys(values in prop::collection::vec(0u16..50, 1..200)) {
        let mut index: UniqueIndex<usize, u16, u16> = UniqueIndex::new(|v: &u16| *v);
        let mut owners: HashMap<u16, usize> = HashMap::new();

        for (key, value) in values.iter().enumerate() {
            let accepted = index.will_insert(&key, value);
            prop_assert_eq!(accepted, !owners.contains_key(value));
            if accepted {
                index.commit_pending_change();
                owners.insert(*value, key);
            } else {
                index.abandon_pending_change();
            }
        }

        prop_assert_eq!(index.len(), owners.len());
        for (value, key) in &owners {
            prop_assert_eq!(index.key_for(value), Some(key));
        }
    }

    /// Group sizes of a hash index sum to the number of keys it covers.
    #[test]
    fn hash_index_group_sizes(values in prop::collection::vec(0u8..8, 1..200)) {
        let mut index: HashIndex<usize, u8, u8> = HashIndex::new(|v: &u8| *v);
        for (key, value) in values.iter().enumerate() {
            prop_assert!(index.will_insert(&key, value));
            index.commit_pending_change();
        }

        let total: usize = index.groups().map(|g| index.count(g)).sum();
        prop_assert_eq!(total, values.len());
        prop_assert_eq!(index.len(), values.len());
    }
}
