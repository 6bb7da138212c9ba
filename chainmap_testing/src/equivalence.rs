//! Implements a utility-function for testing equivalence between hash function families.
use rand::prelude::*;
use std::fmt::Debug;

type HashFunctionFamily<K> = dyn Fn(u64, u32) -> (Box<dyn Fn(&K) -> u32>, u32);

/// Verifies that two hash function families produce identical outputs for the same inputs.
///
/// # Parameters
///
/// - `rng`: A random number generator used to create test keys and seeds.
/// - `family1`: The first hash function family to test.
///              Takes a seed and a bucket count, returns a hash function
///              and the bucket count it actually hashes into.
/// - `family2`: The second hash function family to test.
/// - `gen_key`: Key generator function.
/// - `num_buckets`: The number of buckets to use for testing.
/// - `num_trials`: Number of different (seed, key) pairs to test.
///
/// # Panics
///
/// - If either family hashes into a different number of buckets than requested.
/// - For any (seed, key) pair, the hash values differ between the families or are out of range.
pub fn equivalence<R, K>(
    rng: &mut R,
    family1: &HashFunctionFamily<K>,
    family2: &HashFunctionFamily<K>,
    gen_key: &dyn Fn(&mut R) -> K,
    num_buckets: u32,
    num_trials: usize,
) where
    R: Rng,
    K: Debug,
{
    let (_, num_buckets1) = family1(0, num_buckets);
    let (_, num_buckets2) = family2(0, num_buckets);

    assert_eq!(
        (num_buckets1, num_buckets2),
        (num_buckets, num_buckets),
        "Hash function families resolve a different number of buckets"
    );

    for _ in 0..num_trials {
        let seed = rng.next_u64();

        let (hash_fn1, _) = family1(seed, num_buckets);
        let (hash_fn2, _) = family2(seed, num_buckets);

        let key = gen_key(rng);

        let hash1 = hash_fn1(&key);
        let hash2 = hash_fn2(&key);

        assert_eq!(
            hash1, hash2,
            "Hash functions produce different results for seed {}, key {:?}: {}, {}",
            seed, key, hash1, hash2,
        );
        assert!(
            hash1 < num_buckets,
            "Hash {} of key {:?} is out of range {}",
            hash1,
            key,
            num_buckets
        );
    }
}

/// Checks that a hasher created with `from_seed` behaves the same as one restored from a copy of
/// its state.
#[macro_export]
macro_rules! hasher_equivalence {
    ($H:ty, $K:ty, $rng: expr, $gen_key:expr, $num_buckets:expr, $num_trials:expr) => {{
        use chainmap_core::Hasher;
        use rand::Rng;
        use $crate::equivalence::equivalence;

        pub fn _hasher_equivalence<R>(
            rng: &mut R,
            gen_key: &dyn Fn(&mut R) -> $K,
            num_buckets: u32,
            num_trials: usize,
        ) where
            R: Rng,
        {
            let family1 = |seed: u64, num_buckets: u32| {
                let hasher = <$H>::from_seed(seed, num_buckets);
                let num_buckets = hasher.num_buckets();

                (
                    Box::new(move |value: &$K| hasher.hash(value)) as Box<dyn Fn(&$K) -> u32>,
                    num_buckets,
                )
            };
            let family2 = |seed: u64, num_buckets: u32| {
                let state = <$H>::make_state(seed, num_buckets);
                let hasher = <$H>::from_state(<$H>::from_state(state).state().clone());
                let num_buckets = hasher.num_buckets();

                (
                    Box::new(move |value: &$K| hasher.hash(value)) as Box<dyn Fn(&$K) -> u32>,
                    num_buckets,
                )
            };

            equivalence::<R, $K>(
                rng,
                &family1,
                &family2,
                gen_key,
                num_buckets,
                num_trials,
            );
        }

        _hasher_equivalence($rng, &$gen_key, $num_buckets, $num_trials)
    }};
}
pub use hasher_equivalence;
