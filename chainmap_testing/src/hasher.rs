/// Generates standard test cases for hashers.
///
/// This macro generates test functions that verify:
/// - Equivalence between hashers built from a seed and restored from a state
/// - Hashes staying within the requested number of buckets
///
/// # Parameters
///
/// - `hasher_type`: The hasher type to test (e.g., `StdHasher<u32>`)
/// - `key_type`: The key type to test (e.g., `u32`)
/// - `generate_key`: A function that generates a key value for testing
///
/// # Example
///
/// ```ignore
/// generate_hasher_tests!(
///     StdHasher<u32>,
///     u32,
///     |rng: &mut ChaCha20Rng| rng.random::<u32>()
/// );
/// ```
#[macro_export]
macro_rules! generate_hasher_tests {
    ($hasher_type:ty, $key_type:ty, $generate_key:expr$(,)?) => {
        $crate::compose_idents!(test_fn = [test_hasher_equivalence_, $key_type], {
            #[test]
            #[allow(non_snake_case)]
            fn test_fn() {
                #[allow(unused_imports)]
                use rand::{Rng, SeedableRng};
                use rand_chacha::ChaCha20Rng;

                for num_buckets in [1, 2, 997, 1 << 16] {
                    $crate::hasher_equivalence!(
                        $hasher_type,
                        $key_type,
                        &mut ChaCha20Rng::from_os_rng(),
                        $generate_key,
                        num_buckets,
                        50
                    );
                }
            }
        });
    };
}
pub use generate_hasher_tests;
