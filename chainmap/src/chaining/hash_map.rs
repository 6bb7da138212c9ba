//! Implements [`HashMap`] and [`Instrumented`] for [`ChainedHashMap`].
use crate::chaining::{ChainedHashMap, Entry};
use chainmap_core::{HashMap, Hasher, Instrumented};
use std::mem;

impl<K: Eq, V, H: Hasher<K>> HashMap<K, V, H> for ChainedHashMap<K, V, H> {
    fn put(&mut self, key: K, value: V) -> Option<V> {
        let bucket_idx = self.bucket_index(&key);

        if self.allocated[bucket_idx] {
            self.num_collisions += 1;
        } else {
            log::trace!("Allocating bucket {bucket_idx}.");
            self.allocated.set(bucket_idx, true);
        }

        let bucket = &mut self.buckets[bucket_idx];
        for entry in bucket.entries.iter_mut() {
            self.num_probes += 1;
            if entry.key == key {
                return Some(mem::replace(&mut entry.value, value));
            }
        }

        bucket.entries.push(Entry { key, value });
        self.len += 1;
        None
    }

    fn get(&self, key: &K) -> Option<&V> {
        let bucket = self.bucket(self.bucket_index(key))?;
        bucket
            .entries
            .iter()
            .find(|entry| entry.key == *key)
            .map(|entry| &entry.value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let bucket_idx = self.bucket_index(key);
        if !self.allocated[bucket_idx] {
            return None;
        }

        let bucket = &mut self.buckets[bucket_idx];
        let entry_idx = bucket.position(key)?;
        self.len -= 1;
        Some(bucket.entries.remove(entry_idx).value)
    }

    fn clear(&mut self) {
        log::debug!(
            "Clearing {} entries from {} allocated buckets.",
            self.len,
            self.allocated.count_ones()
        );

        for bucket_idx in self.allocated.iter_ones() {
            self.buckets[bucket_idx].entries.clear();
        }
        self.len = 0;
    }

    fn len(&self) -> usize {
        self.len
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }
}

impl<K: Eq, V, H: Hasher<K>> Instrumented for ChainedHashMap<K, V, H> {
    fn num_collisions(&self) -> usize {
        self.num_collisions
    }

    fn num_probes(&self) -> usize {
        self.num_probes
    }
}

impl<K: Eq, V, H: Hasher<K>> ChainedHashMap<K, V, H> {
    /// Get a mutable reference to the value associated with the given `key`.
    ///
    /// Not instrumented, just like [`HashMap::get`].
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let bucket_idx = self.bucket_index(key);
        if !self.allocated[bucket_idx] {
            return None;
        }

        self.buckets[bucket_idx]
            .entries
            .iter_mut()
            .find(|entry| entry.key == *key)
            .map(|entry| &mut entry.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChainConfig;
    use crate::hashing::hashers::{ModHasher, StdHasher};
    use chainmap_testing::*;
    use rand::prelude::*;
    use rand_chacha::ChaCha20Rng;

    type IntMap = ChainedHashMap<u32, u32, ModHasher<u32>>;

    fn factory<K: Eq, V, H: Hasher<K>>() -> ChainedHashMap<K, V, H> {
        ChainedHashMap::new()
    }

    generate_map_tests!(ChainedHashMap, factory);

    #[test]
    fn test_concrete_scenario() {
        init_logging();

        let mut map: ChainedHashMap<String, i32> = ChainedHashMap::new();
        assert_eq!(map.put("a".to_string(), 1), None);
        assert_eq!((map.num_collisions(), map.num_probes()), (0, 0));

        let a_idx = map.bucket_index(&"a".to_string());
        let b_shares_bucket = map.bucket_index(&"b".to_string()) == a_idx;
        assert_eq!(map.put("b".to_string(), 2), None);
        assert_eq!(map.num_collisions(), b_shares_bucket as usize);

        let c = (0..)
            .map(|i| format!("c{i}"))
            .find(|key| map.bucket_index(key) == a_idx)
            .unwrap();
        let (collisions, probes) = (map.num_collisions(), map.num_probes());
        assert_eq!(map.put(c.clone(), 3), None);
        assert_eq!(map.num_collisions(), collisions + 1);
        assert_eq!(map.num_probes(), probes + 1 + b_shares_bucket as usize);

        assert_eq!(map.get(&"a".to_string()), Some(&1));
        assert_eq!(map.remove(&"a".to_string()), Some(1));
        assert_eq!(map.get(&"a".to_string()), None);
        assert_eq!(map.get(&c), Some(&3));
        assert_eq!(map.get(&"b".to_string()), Some(&2));
    }

    #[test]
    fn test_engineered_collision() {
        let mut map = IntMap::new();
        assert_eq!(map.put(1, 10), None);
        assert_eq!(map.put(2, 20), None);
        assert_eq!((map.num_collisions(), map.num_probes()), (0, 0));

        assert_eq!(map.put(998, 30), None);
        assert_eq!((map.num_collisions(), map.num_probes()), (1, 1));

        assert_eq!(map.get(&1), Some(&10));
        assert_eq!(map.get(&998), Some(&30));
        assert_eq!(map.remove(&1), Some(10));
        assert_eq!(map.get(&1), None);
        assert_eq!(map.get(&998), Some(&30));
    }

    #[test]
    fn test_update_counts_collision_and_probes() {
        let mut map = IntMap::new();
        map.put(5, 0);
        map.put(5 + 997, 1);
        map.put(5 + 2 * 997, 2);
        let (collisions, probes) = (map.num_collisions(), map.num_probes());
        assert_eq!((collisions, probes), (2, 3));

        // Found at position 1: two comparisons.
        assert_eq!(map.put(5 + 997, 11), Some(1));
        assert_eq!(map.num_collisions(), collisions + 1);
        assert_eq!(map.num_probes(), probes + 2);

        // Repeating the same put still counts.
        assert_eq!(map.put(5 + 997, 11), Some(11));
        assert_eq!(map.num_collisions(), collisions + 2);
        assert_eq!(map.num_probes(), probes + 4);

        // Absent key in a bucket of three: three comparisons.
        assert_eq!(map.put(5 + 3 * 997, 3), None);
        assert_eq!(map.num_probes(), probes + 7);
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_get_and_remove_are_not_instrumented() {
        let mut map = IntMap::new();
        map.put(7, 7);
        map.put(7 + 997, 8);
        let counters = (map.num_collisions(), map.num_probes());

        assert_eq!(map.get(&(7 + 997)), Some(&8));
        assert_eq!(map.get(&(7 + 2 * 997)), None);
        assert_eq!(map.get(&8), None);
        assert!(map.contains_key(&7));
        assert_eq!(map.remove(&7), Some(7));
        assert_eq!(map.remove(&7), None);
        assert_eq!(map.remove(&9), None);

        assert_eq!((map.num_collisions(), map.num_probes()), counters);
    }

    #[test]
    fn test_remove_keeps_bucket_allocated() {
        let mut map = IntMap::new();
        map.put(3, 3);
        assert_eq!(map.remove(&3), Some(3));
        assert!(map.is_empty());
        assert_eq!(map.num_allocated_buckets(), 1);
        assert!(map.bucket(3).is_some_and(|b| b.is_empty()));

        // The bucket still exists, so putting into it again is a collision, with no probes.
        map.put(3, 4);
        assert_eq!(map.num_collisions(), 1);
        assert_eq!(map.num_probes(), 0);
    }

    #[test]
    fn test_remove_preserves_chain_order() {
        let mut map = IntMap::new();
        for i in 0..4 {
            map.put(11 + i * 997, i);
        }
        assert_eq!(map.remove(&(11 + 997)), Some(1));

        let bucket = map.bucket(11).unwrap();
        assert_eq!(bucket.len(), 3);
        let keys: Vec<u32> = bucket
            .entries()
            .iter()
            .map(|entry| *entry.key())
            .collect();
        assert_eq!(keys, vec![11, 11 + 2 * 997, 11 + 3 * 997]);
    }

    #[test]
    fn test_clear_keeps_buckets_allocated() {
        init_logging();

        let mut map = IntMap::new();
        map.put_all((0..10).map(|i| (i, i)));
        assert_eq!(map.num_allocated_buckets(), 10);
        let counters = (map.num_collisions(), map.num_probes());
        assert_eq!(counters, (0, 0));

        map.clear();
        assert!(map.is_empty());
        for i in 0..10 {
            assert_eq!(map.get(&i), None);
        }
        assert_eq!(map.num_allocated_buckets(), 10);
        assert_eq!((map.num_collisions(), map.num_probes()), counters);

        // Previously allocated bucket: collision without probes.
        assert_eq!(map.put(4, 40), None);
        assert_eq!(map.num_collisions(), 1);
        assert_eq!(map.num_probes(), 0);

        // Fresh bucket: no collision.
        assert_eq!(map.put(500, 5), None);
        assert_eq!(map.num_collisions(), 1);
        assert_eq!(map.num_allocated_buckets(), 11);
    }

    #[test]
    fn test_get_mut() {
        let mut map = IntMap::new();
        map.put(1, 1);
        map.put(998, 2);

        *map.get_mut(&998).unwrap() += 40;
        assert_eq!(map.get(&998), Some(&42));
        assert_eq!(map.get_mut(&1995), None);
        assert_eq!(map.get_mut(&2), None);
        assert_eq!(map.num_probes(), 1);
    }

    #[test]
    fn test_load_factor() {
        let config = ChainConfig::default().with_capacity(10);
        let mut map = ChainedHashMap::<u32, u32, ModHasher<u32>>::with_config(config).unwrap();
        assert_eq!(map.load_factor(), 0.0);
        map.put_all((0..25).map(|i| (i, i)));
        assert_eq!(map.load_factor(), 2.5);
        assert_eq!(map.num_allocated_buckets(), 10);
    }

    #[test]
    fn test_single_bucket() {
        let config = ChainConfig::default().with_capacity(1);
        let mut map = ChainedHashMap::<String, usize>::with_config(config).unwrap();
        let keys: Vec<String> = (0..20).map(|i| format!("key-{i}")).collect();
        for (i, key) in keys.iter().enumerate() {
            assert_eq!(map.put(key.clone(), i), None);
        }
        // Every put after the first collides and the i-th one compares against i entries.
        assert_eq!(map.num_collisions(), 19);
        assert_eq!(map.num_probes(), (0..20).sum::<usize>());
        for (i, key) in keys.iter().enumerate() {
            assert_eq!(map.get(key), Some(&i));
        }
    }

    #[test]
    fn test_option_keys() {
        let mut map: ChainedHashMap<Option<u8>, &str> = ChainedHashMap::new();
        assert_eq!(map.put(None, "nothing"), None);
        assert_eq!(map.put(Some(0), "zero"), None);
        assert_eq!(map.get(&None), Some(&"nothing"));
        assert_eq!(map.remove(&None), Some("nothing"));
        assert_eq!(map.remove(&None), None);
        assert_eq!(map.get(&Some(0)), Some(&"zero"));
    }

    #[test]
    fn test_counters_match_model() {
        init_logging();

        let mut rng = ChaCha20Rng::seed_from_u64(0);
        for seed in 0..4 {
            let config = ChainConfig::default().with_capacity(31).with_seed(seed);
            let map = ChainedHashMap::<u64, u64>::with_config(config).unwrap();
            let hasher = StdHasher::<u64>::from_seed(seed, 31);
            test_counters(
                &mut rng,
                map,
                |key: &u64| hasher.hash(key) as usize,
                &NumParams::new(0, 200),
                500,
            );
        }
    }

    #[test]
    fn test_counters_match_model_mod_hasher() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let hasher = ModHasher::<i16>::from_seed(0, 997);
        test_counters(
            &mut rng,
            ChainedHashMap::<i16, u64, ModHasher<i16>>::new(),
            |key: &i16| hasher.hash(key) as usize,
            &NumParams::new(-5000, 5000),
            2000,
        );
    }
}
