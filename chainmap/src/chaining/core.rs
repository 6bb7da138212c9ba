//! Declares core types for [`ChainedHashMap`].
use crate::hashing::hashers::StdHasher;
use bitvec::prelude::*;
use chainmap_core::{HashMap, Hasher};

/// Hash table that resolves collisions by chaining entries in per-bucket lists.
///
/// The number of buckets is chosen at construction (997 by default) and never changes, the
/// table doesn't rehash regardless of how full it gets. A bucket is allocated by the first
/// [`put`](chainmap_core::HashMap::put) that lands in it and stays allocated afterwards, even if
/// [`remove`](chainmap_core::HashMap::remove) or [`clear`](chainmap_core::HashMap::clear) empties
/// it.
///
/// # Counters
///
/// Insertions are instrumented (see [`chainmap_core::Instrumented`]):
///
/// - `num_collisions` is incremented by every `put` that lands in an already allocated bucket,
///   whether or not the bucket holds a different key. Updating an existing key and putting the
///   same key twice both count. It is not the number of distinct keys sharing a bucket.
/// - `num_probes` is incremented once per key comparison made while scanning a bucket in `put`.
///
/// Lookups and removals don't touch the counters and nothing ever resets them.
///
/// # Examples
///
/// ```rust
/// use chainmap::{ChainedHashMap, HashMap, Instrumented};
///
/// let mut ratings: ChainedHashMap<&str, u8> = ChainedHashMap::new();
/// assert_eq!(ratings.put("The Great Gatsby", 5), None);
/// assert_eq!(ratings.put("Moby Dick", 3), None);
/// assert_eq!(ratings.put("Moby Dick", 4), Some(3));
///
/// assert_eq!(ratings.get(&"Moby Dick"), Some(&4));
/// assert_eq!(ratings.get(&"War and Peace"), None);
/// assert!(ratings.num_collisions() >= 1);
/// ```
pub struct ChainedHashMap<K: Eq, V, H: Hasher<K> = StdHasher<K>> {
    pub(crate) hasher: H,
    pub(crate) buckets: Box<[Bucket<K, V>]>,
    /// Bit per bucket, set once the bucket has been allocated.
    pub(crate) allocated: BitVec,
    pub(crate) len: usize,
    pub(crate) num_collisions: usize,
    pub(crate) num_probes: usize,
}

/// A key-value pair stored in a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V> Entry<K, V> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }
}

/// A chain of entries whose keys hash to the same index, in insertion order.
#[derive(Debug, Clone)]
pub struct Bucket<K, V> {
    pub(crate) entries: Vec<Entry<K, V>>,
}

impl<K, V> Default for Bucket<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Eq, V> Bucket<K, V> {
    /// Position of the entry with the given `key` within the chain.
    #[inline]
    pub(crate) fn position(&self, key: &K) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key == *key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry<K, V>] {
        &self.entries
    }
}

impl<K: Eq, V, H: Hasher<K>> ChainedHashMap<K, V, H> {
    /// Computes the index of the bucket the given `key` belongs to.
    #[inline]
    pub fn bucket_index(&self, key: &K) -> usize {
        let bucket_idx = self.hasher.hash(key) as usize;
        debug_assert!(
            bucket_idx < self.buckets.len(),
            "Hasher produced index {} for {} buckets.",
            bucket_idx,
            self.buckets.len()
        );
        bucket_idx
    }

    /// Gets the bucket at the given index if it has been allocated.
    pub fn bucket(&self, bucket_idx: usize) -> Option<&Bucket<K, V>> {
        if *self.allocated.get(bucket_idx)? {
            Some(&self.buckets[bucket_idx])
        } else {
            None
        }
    }

    /// Gets the fixed number of buckets.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Gets the number of buckets that have been allocated so far.
    pub fn num_allocated_buckets(&self) -> usize {
        self.allocated.count_ones()
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }
}

impl<K: Eq + Clone, V: Clone, H: Hasher<K>> Clone for ChainedHashMap<K, V, H> {
    /// Clones the entries together with the bucket allocation and the counters.
    fn clone(&self) -> Self {
        Self {
            hasher: H::from_state(self.hasher.state().clone()),
            buckets: self.buckets.clone(),
            allocated: self.allocated.clone(),
            len: self.len,
            num_collisions: self.num_collisions,
            num_probes: self.num_probes,
        }
    }
}

impl<K: Eq, V: PartialEq, H: Hasher<K>> PartialEq for ChainedHashMap<K, V, H> {
    /// Two maps are equal when they hold the same entries.
    ///
    /// Capacity, bucket allocation and the counters are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|v| *v == *value))
    }
}

impl<K: Eq, V: Eq, H: Hasher<K>> Eq for ChainedHashMap<K, V, H> {}
