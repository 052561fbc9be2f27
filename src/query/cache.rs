//! Memoized predicate construction.

use super::predicate::Predicate;
use dashmap::{DashMap, Entry};
use std::hash::Hash;
use std::sync::{Arc, OnceLock};

/// A concurrent memo computing each value once per distinct key.
///
/// Concurrent first use of one key computes the value exactly once: the
/// computation runs while the key's shard is held.
pub struct MemoCache<K, V> {
    compute: fn(&K) -> V,
    memo: DashMap<K, V, ahash::RandomState>,
}

impl<K: Eq + Hash, V: Clone> MemoCache<K, V> {
    pub fn new(compute: fn(&K) -> V) -> Self {
        Self {
            compute,
            memo: DashMap::default(),
        }
    }

    /// Return the memoized value for `key`, computing it on first use.
    pub fn get_value(&self, key: K) -> V {
        if let Some(value) = self.memo.get(&key) {
            return value.value().clone();
        }

        match self.memo.entry(key) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(slot) => {
                let value = (self.compute)(slot.key());
                slot.insert(value).value().clone()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }
}

/// Key of the equality cache: state attribute name and target label.
pub type EqualityKey = (&'static str, Arc<str>);

fn equality_predicate(key: &EqualityKey) -> Predicate {
    let (attribute, target) = key;
    Predicate::equals(*attribute, Arc::clone(target))
}

/// Process-wide cache of "state attribute equals target" predicates.
pub fn equality_cache() -> &'static MemoCache<EqualityKey, Predicate> {
    static CACHE: OnceLock<MemoCache<EqualityKey, Predicate>> = OnceLock::new();
    CACHE.get_or_init(|| MemoCache::new(equality_predicate))
}
