//! Utilities for testing map implementations.
use crate::generate::Generate;
use chainmap_core::{HashMap, Hasher, Instrumented};
use rand::Rng;
use std::collections::{HashMap as StdHashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

/// Generates `count` keys that are absent from `data`.
fn absent_keys<R, K, V>(
    rng: &mut R,
    data: &[(K, V)],
    params: &K::GenerateParams,
    count: usize,
) -> Vec<K>
where
    R: Rng,
    K: Eq + Hash + Generate<R>,
{
    let keys: HashSet<&K> = data.iter().map(|(k, _)| k).collect();
    let mut absent = Vec::with_capacity(count);
    while absent.len() < count {
        let key = K::generate(rng, params);
        if !keys.contains(&key) {
            absent.push(key);
        }
    }
    absent
}

/// Tests that every put key can be retrieved and that absent keys are not found.
pub fn test_put_get<R, K, V, H, M>(
    rng: &mut R,
    mut map: M,
    data: &[(K, V)],
    key_params: &K::GenerateParams,
) where
    R: Rng,
    K: Eq + Hash + Clone + Debug + Generate<R>,
    V: Clone + PartialEq + Debug,
    H: Hasher<K>,
    M: HashMap<K, V, H>,
{
    for (key, val) in data {
        assert_eq!(map.put(key.clone(), val.clone()), None, "Key: {:?}", key);
    }
    assert_eq!(map.len(), data.len());
    assert_eq!(map.is_empty(), data.is_empty());

    for (key, val) in data {
        assert_eq!(map.get(key), Some(val), "Key: {:?}", key);
        assert!(map.contains_key(key), "Key: {:?}", key);
    }
    // The key space must have room for the absent keys.
    for key in absent_keys(rng, data, key_params, data.len().div_ceil(3)) {
        assert_eq!(map.get(&key), None, "Key: {:?}", key);
        assert!(!map.contains_key(&key), "Key: {:?}", key);
    }
}

/// Tests that putting an existing key replaces its value and returns the old one.
pub fn test_update<K, V, H, M>(mut map: M, data: &[(K, V)])
where
    K: Eq + Clone + Debug,
    V: Clone + PartialEq + Debug,
    H: Hasher<K>,
    M: HashMap<K, V, H>,
{
    for (key, val) in data {
        map.put(key.clone(), val.clone());
    }

    // Shift the values by one so that every key gets the value of its neighbour.
    let shifted: Vec<(K, V)> = data
        .iter()
        .zip(data.iter().cycle().skip(1))
        .map(|((key, _), (_, val))| (key.clone(), val.clone()))
        .collect();

    for ((key, old_val), (_, new_val)) in data.iter().zip(&shifted) {
        assert_eq!(
            map.put(key.clone(), new_val.clone()),
            Some(old_val.clone()),
            "Key: {:?}",
            key
        );
    }
    assert_eq!(map.len(), data.len());

    for (key, val) in &shifted {
        assert_eq!(map.get(key), Some(val), "Key: {:?}", key);
    }
}

/// Tests that removed keys are gone while the rest stay retrievable.
pub fn test_remove<K, V, H, M>(mut map: M, data: &[(K, V)])
where
    K: Eq + Clone + Debug,
    V: Clone + PartialEq + Debug,
    H: Hasher<K>,
    M: HashMap<K, V, H>,
{
    for (key, val) in data {
        map.put(key.clone(), val.clone());
    }

    let (removed, kept): (Vec<_>, Vec<_>) = data.iter().enumerate().partition(|(i, _)| i % 2 == 0);

    for (_, (key, val)) in &removed {
        assert_eq!(map.remove(key), Some(val.clone()), "Key: {:?}", key);
        assert_eq!(map.get(key), None, "Key: {:?}", key);
        assert_eq!(map.remove(key), None, "Key: {:?}", key);
    }
    assert_eq!(map.len(), kept.len());

    for (_, (key, val)) in &kept {
        assert_eq!(map.get(key), Some(val), "Key: {:?}", key);
    }
}

/// Tests that clearing drops every entry and that the map stays usable afterwards.
pub fn test_clear<K, V, H, M>(mut map: M, data: &[(K, V)])
where
    K: Eq + Clone + Debug,
    V: Clone + PartialEq + Debug,
    H: Hasher<K>,
    M: HashMap<K, V, H>,
{
    for (key, val) in data {
        map.put(key.clone(), val.clone());
    }

    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    for (key, _) in data {
        assert_eq!(map.get(key), None, "Key: {:?}", key);
    }

    for (key, val) in data {
        assert_eq!(map.put(key.clone(), val.clone()), None, "Key: {:?}", key);
    }
    assert_eq!(map.len(), data.len());
}

/// Reference model of a separate-chaining table used to predict the instrumentation counters.
struct ChainModel<K> {
    allocated: HashSet<usize>,
    chains: StdHashMap<usize, Vec<K>>,
    num_collisions: usize,
    num_probes: usize,
}

impl<K: Eq + Clone> ChainModel<K> {
    fn new() -> Self {
        Self {
            allocated: HashSet::new(),
            chains: StdHashMap::new(),
            num_collisions: 0,
            num_probes: 0,
        }
    }

    fn put(&mut self, bucket_idx: usize, key: &K) {
        if !self.allocated.insert(bucket_idx) {
            self.num_collisions += 1;
        }
        let chain = self.chains.entry(bucket_idx).or_default();
        match chain.iter().position(|k| k == key) {
            Some(position) => self.num_probes += position + 1,
            None => {
                self.num_probes += chain.len();
                chain.push(key.clone());
            }
        }
    }

    fn remove(&mut self, bucket_idx: usize, key: &K) {
        if let Some(chain) = self.chains.get_mut(&bucket_idx) {
            chain.retain(|k| k != key);
        }
    }

    fn clear(&mut self) {
        self.chains.values_mut().for_each(Vec::clear);
    }
}

/// Runs a random sequence of puts, gets, removes and occasional clears against `map` and checks
/// both the results and the collision and probe counters against a reference model.
///
/// # Parameters
///
/// - `rng`: A random number generator.
/// - `map`: An empty map.
/// - `index_of`: The bucket index the map is expected to use for a key.
/// - `key_params`: Parameters of the keys, a narrow range gives more updates and collisions.
/// - `num_ops`: The number of operations to perform.
pub fn test_counters<R, K, H, M, F>(
    rng: &mut R,
    mut map: M,
    index_of: F,
    key_params: &K::GenerateParams,
    num_ops: usize,
) where
    R: Rng,
    K: Eq + Hash + Clone + Debug + Generate<R>,
    H: Hasher<K>,
    M: HashMap<K, u64, H> + Instrumented,
    F: Fn(&K) -> usize,
{
    let mut model = ChainModel::new();
    let mut expected: StdHashMap<K, u64> = StdHashMap::new();
    let mut last_collisions = 0;
    let mut last_probes = 0;

    for op_idx in 0..num_ops {
        let key = K::generate(rng, key_params);
        let bucket_idx = index_of(&key);

        match rng.random_range(0..100) {
            0..=59 => {
                let value: u64 = rng.random();
                model.put(bucket_idx, &key);
                assert_eq!(
                    map.put(key.clone(), value),
                    expected.insert(key.clone(), value),
                    "Op: {}, key: {:?}",
                    op_idx,
                    key
                );
            }
            60..=79 => {
                assert_eq!(map.get(&key), expected.get(&key), "Op: {}, key: {:?}", op_idx, key);
            }
            80..=98 => {
                model.remove(bucket_idx, &key);
                assert_eq!(
                    map.remove(&key),
                    expected.remove(&key),
                    "Op: {}, key: {:?}",
                    op_idx,
                    key
                );
            }
            _ => {
                model.clear();
                expected.clear();
                map.clear();
            }
        }

        assert_eq!(map.len(), expected.len(), "Op: {}", op_idx);
        assert_eq!(map.num_collisions(), model.num_collisions, "Op: {}", op_idx);
        assert_eq!(map.num_probes(), model.num_probes, "Op: {}", op_idx);
        assert!(map.num_collisions() >= last_collisions, "Op: {}", op_idx);
        assert!(map.num_probes() >= last_probes, "Op: {}", op_idx);
        last_collisions = map.num_collisions();
        last_probes = map.num_probes();
    }
}

/// Generates a suite of map tests for one integer key type and one hasher.
///
/// # Parameters
///
/// - `Map`: The map type, instantiated as `Map<K, u128, Hasher<K>>`.
/// - `factory`: A function creating an empty map.
/// - `Hasher`: The hasher type, instantiated as `Hasher<K>`.
/// - `tag`: A short identifier of the hasher used in the names of the generated tests.
/// - `K`: The key type.
#[macro_export]
macro_rules! generate_map_int_tests {
    ($Map:ident, $factory:expr, $Hasher:ident, $tag:ident, $K:ty) => {
        $crate::compose_idents!(suite = [$tag, _map_, $K], {
            mod suite {
                use super::*;
                use rand::SeedableRng;
                use rand_chacha::ChaCha20Rng;

                type TestMap = $Map<$K, u128, $Hasher<$K>>;

                fn data(rng: &mut ChaCha20Rng) -> Box<[($K, u128)]> {
                    let size: usize = if <$K>::BITS >= u32::BITS {
                        9999
                    } else {
                        (1_usize << <$K>::BITS) / 2
                    };
                    $crate::generate_map_data::<_, $K, u128>(
                        rng,
                        size,
                        &Default::default(),
                        &Default::default(),
                    )
                }

                #[test]
                fn test_put_get() {
                    $crate::init_logging();
                    let mut rng = ChaCha20Rng::from_os_rng();
                    let data = data(&mut rng);
                    let map: TestMap = $factory();
                    $crate::map::test_put_get(&mut rng, map, &data, &Default::default());
                }

                #[test]
                fn test_update() {
                    let mut rng = ChaCha20Rng::from_os_rng();
                    let data = data(&mut rng);
                    let map: TestMap = $factory();
                    $crate::map::test_update(map, &data);
                }

                #[test]
                fn test_remove() {
                    let mut rng = ChaCha20Rng::from_os_rng();
                    let data = data(&mut rng);
                    let map: TestMap = $factory();
                    $crate::map::test_remove(map, &data);
                }

                #[test]
                fn test_clear() {
                    let mut rng = ChaCha20Rng::from_os_rng();
                    let data = data(&mut rng);
                    let map: TestMap = $factory();
                    $crate::map::test_clear(map, &data);
                }

                #[test]
                fn test_get_key_zero() {
                    let mut rng = ChaCha20Rng::from_os_rng();
                    let data: Vec<($K, u128)> = data(&mut rng)
                        .iter()
                        .filter(|item| item.0 != 0 as $K)
                        .copied()
                        .collect();
                    let mut map: TestMap = $factory();
                    for (key, val) in data {
                        map.put(key, val);
                    }
                    assert_eq!(map.get(&(0 as $K)), None);
                    assert_eq!(map.remove(&(0 as $K)), None);
                }
            }
        });
    };
}

/// Generates a suite of map tests for string keys and one hasher.
#[macro_export]
macro_rules! generate_map_str_tests {
    ($Map:ident, $factory:expr, $Hasher:ident, $tag:ident) => {
        $crate::compose_idents!(suite = [$tag, _map_str], {
            mod suite {
                use super::*;
                use rand::SeedableRng;
                use rand_chacha::ChaCha20Rng;

                type TestMap = $Map<String, u128, $Hasher<String>>;

                fn data(rng: &mut ChaCha20Rng) -> Box<[(String, u128)]> {
                    $crate::generate_map_data::<_, String, u128>(
                        rng,
                        9999,
                        &Default::default(),
                        &Default::default(),
                    )
                }

                #[test]
                fn test_put_get() {
                    $crate::init_logging();
                    let mut rng = ChaCha20Rng::from_os_rng();
                    let data = data(&mut rng);
                    let map: TestMap = $factory();
                    $crate::map::test_put_get(&mut rng, map, &data, &Default::default());
                }

                #[test]
                fn test_update() {
                    let mut rng = ChaCha20Rng::from_os_rng();
                    let data = data(&mut rng);
                    let map: TestMap = $factory();
                    $crate::map::test_update(map, &data);
                }

                #[test]
                fn test_remove() {
                    let mut rng = ChaCha20Rng::from_os_rng();
                    let data = data(&mut rng);
                    let map: TestMap = $factory();
                    $crate::map::test_remove(map, &data);
                }

                #[test]
                fn test_clear() {
                    let mut rng = ChaCha20Rng::from_os_rng();
                    let data = data(&mut rng);
                    let map: TestMap = $factory();
                    $crate::map::test_clear(map, &data);
                }

                #[test]
                fn test_get_key_empty() {
                    let mut rng = ChaCha20Rng::from_os_rng();
                    let mut map: TestMap = $factory();
                    for (key, val) in data(&mut rng).into_vec() {
                        map.put(key, val);
                    }
                    assert_eq!(map.get(&String::new()), None);
                    assert_eq!(map.put(String::new(), 0), None);
                    assert_eq!(map.get(&String::new()), Some(&0));
                }
            }
        });
    };
}

/// Generates the map test suites for all the integer types and strings.
///
/// Integer keys are tested with both `StdHasher` and `ModHasher`, strings with `StdHasher`.
/// `factory` must be generic over the key, value and hasher types.
/// Both hashers must be in scope at the invocation site.
#[macro_export]
macro_rules! generate_map_tests {
    ($Map:ident, $factory:expr) => {
        $crate::generate_map_int_tests!($Map, $factory, StdHasher, std, u8);
        $crate::generate_map_int_tests!($Map, $factory, StdHasher, std, i16);
        $crate::generate_map_int_tests!($Map, $factory, StdHasher, std, u32);
        $crate::generate_map_int_tests!($Map, $factory, StdHasher, std, i64);
        $crate::generate_map_int_tests!($Map, $factory, StdHasher, std, u128);
        $crate::generate_map_int_tests!($Map, $factory, ModHasher, modulo, u8);
        $crate::generate_map_int_tests!($Map, $factory, ModHasher, modulo, i8);
        $crate::generate_map_int_tests!($Map, $factory, ModHasher, modulo, u16);
        $crate::generate_map_int_tests!($Map, $factory, ModHasher, modulo, i32);
        $crate::generate_map_int_tests!($Map, $factory, ModHasher, modulo, u64);
        $crate::generate_map_int_tests!($Map, $factory, ModHasher, modulo, i128);
        $crate::generate_map_str_tests!($Map, $factory, StdHasher, std);
    };
}
