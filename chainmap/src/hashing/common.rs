/// Reduce a 64-bit hash into `[0, num_buckets)`.
///
/// The hash is unsigned, so unlike reducing a signed hash code there is no need to take the
/// absolute value first and no way to end up with a negative index.
#[inline]
pub const fn reduce_u64(hash: u64, num_buckets: u32) -> u32 {
    debug_assert!(num_buckets > 0, r#""num_buckets" must be greater than 0"#);

    (hash % num_buckets as u64) as u32
}

/// Reduce a 128-bit magnitude into `[0, num_buckets)`.
#[inline]
pub const fn reduce_u128(value: u128, num_buckets: u32) -> u32 {
    debug_assert!(num_buckets > 0, r#""num_buckets" must be greater than 0"#);

    (value % num_buckets as u128) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_u64_range() {
        for num_buckets in [1_u32, 2, 13, 997, u32::MAX] {
            for hash in [0_u64, 1, 996, 997, 998, u64::MAX] {
                assert!(reduce_u64(hash, num_buckets) < num_buckets);
            }
        }
    }

    #[test]
    fn test_reduce_u64_values() {
        assert_eq!(reduce_u64(0, 997), 0);
        assert_eq!(reduce_u64(998, 997), 1);
        assert_eq!(reduce_u64(u64::MAX, 1), 0);
    }

    #[test]
    fn test_reduce_u128_values() {
        assert_eq!(reduce_u128(1 << 100, 2), 0);
        assert_eq!(reduce_u128(u128::MAX, 997), (u128::MAX % 997) as u32);
        assert_eq!(reduce_u128(1994, 997), 0);
    }
}
