//! Implements constructors for [`ChainedHashMap`].
use crate::chaining::{Bucket, ChainedHashMap};
use crate::config::{ChainConfig, DEFAULT_CAPACITY, DEFAULT_SEED};
use bitvec::prelude::*;
use chainmap_core::{ChainMapError, HashMap, Hasher};

impl<K: Eq, V, H: Hasher<K>> ChainedHashMap<K, V, H> {
    fn build(num_buckets: u32, seed: u64) -> Self {
        let hasher = H::from_seed(seed, num_buckets);
        // Size the table by what the hasher can actually produce.
        let num_buckets = hasher.num_buckets() as usize;

        debug_assert!(num_buckets > 0, "A table must have at least one bucket.");
        log::debug!("Creating a chained hash map with {num_buckets} buckets and seed {seed}.");

        Self {
            hasher,
            buckets: (0..num_buckets).map(|_| Bucket::default()).collect(),
            allocated: bitvec![0; num_buckets],
            len: 0,
            num_collisions: 0,
            num_probes: 0,
        }
    }

    /// Creates an empty map with 997 buckets and the default seed.
    pub fn new() -> Self {
        Self::build(DEFAULT_CAPACITY, DEFAULT_SEED)
    }

    /// Creates an empty map with the number of buckets and the seed taken from `config`.
    ///
    /// # Errors
    ///
    /// Fails if the capacity is zero or can't be addressed by a `u32` bucket index.
    pub fn with_config(config: ChainConfig) -> Result<Self, ChainMapError> {
        let num_buckets = config.validate()?;
        Ok(Self::build(num_buckets, config.seed))
    }

    /// Creates a map with the default configuration and puts every pair of `source` into it in
    /// iteration order.
    ///
    /// The counters reflect the collisions and probes incurred while loading.
    pub fn from_entries<I: IntoIterator<Item = (K, V)>>(source: I) -> Self {
        let mut map = Self::new();
        map.put_all(source);
        map
    }

    /// Puts every pair of `source` into the map in iteration order.
    ///
    /// Equivalent to calling [`HashMap::put`] repeatedly, including the effect on the counters.
    pub fn put_all<I: IntoIterator<Item = (K, V)>>(&mut self, source: I) {
        for (key, value) in source {
            self.put(key, value);
        }
    }
}

impl<K: Eq, V, H: Hasher<K>> Default for ChainedHashMap<K, V, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq, V, H: Hasher<K>> FromIterator<(K, V)> for ChainedHashMap<K, V, H> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl<K: Eq, V, H: Hasher<K>> Extend<(K, V)> for ChainedHashMap<K, V, H> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.put_all(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::hashers::{ModHasher, StdHasher};
    use chainmap_core::Instrumented;
    use chainmap_testing::init_logging;
    use std::collections::BTreeMap;

    #[test]
    fn test_new_is_empty() {
        init_logging();

        let map = ChainedHashMap::<String, u32>::new();
        assert_eq!(map.capacity(), 997);
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_eq!(map.num_allocated_buckets(), 0);
        assert_eq!(map.num_collisions(), 0);
        assert_eq!(map.num_probes(), 0);
    }

    #[test]
    fn test_with_config() {
        let config = ChainConfig::default().with_capacity(13).with_seed(42);
        let map = ChainedHashMap::<u64, u64, StdHasher<u64>>::with_config(config).unwrap();
        assert_eq!(map.capacity(), 13);
        assert_eq!(map.hasher().num_buckets(), 13);
    }

    #[test]
    fn test_with_config_zero_capacity() {
        let config = ChainConfig::default().with_capacity(0);
        let result = ChainedHashMap::<u64, u64>::with_config(config);
        assert_eq!(result.err(), Some(ChainMapError::ZeroCapacity));
    }

    #[test]
    fn test_from_entries_counts_bulk_load() {
        init_logging();

        // 1, 998 and 1995 share bucket 1, 2 is alone in bucket 2.
        let source = BTreeMap::from([(1_u32, "a"), (2, "b"), (998, "c"), (1995, "d")]);
        let map = ChainedHashMap::<u32, &str, ModHasher<u32>>::from_entries(source);

        assert_eq!(map.len(), 4);
        assert_eq!(map.get(&998), Some(&"c"));
        assert_eq!(map.num_allocated_buckets(), 2);
        assert_eq!(map.num_collisions(), 2);
        // 998 compared against 1, 1995 against 1 and 998.
        assert_eq!(map.num_probes(), 3);
    }

    #[test]
    fn test_from_entries_with_duplicates_keeps_last() {
        let map: ChainedHashMap<&str, i32> =
            ChainedHashMap::from_entries([("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"a"), Some(&3));
        let shared_bucket = map.bucket_index(&"a") == map.bucket_index(&"b");
        assert_eq!(map.num_collisions(), 1 + shared_bucket as usize);
    }

    #[test]
    fn test_from_iterator() {
        let map: ChainedHashMap<u64, u64> = (0..100_u64).map(|i| (i, i * i)).collect();
        assert_eq!(map.len(), 100);
        for i in 0..100_u64 {
            assert_eq!(map.get(&i), Some(&(i * i)));
        }
    }

    #[test]
    fn test_put_all_and_extend() {
        let mut map = ChainedHashMap::<u8, char, ModHasher<u8>>::new();
        map.put_all([(1, 'a'), (2, 'b')]);
        map.extend([(2, 'c'), (3, 'd')]);

        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&2), Some(&'c'));
        // Only the update of 2 landed in an allocated bucket and compared one key.
        assert_eq!(map.num_collisions(), 1);
        assert_eq!(map.num_probes(), 1);
    }

    #[test]
    fn test_default() {
        let map = ChainedHashMap::<i32, i32, ModHasher<i32>>::default();
        assert_eq!(map.capacity(), 997);
        assert!(map.is_empty());
    }
}
