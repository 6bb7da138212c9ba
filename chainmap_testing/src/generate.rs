//! Data generation utilities useful for testing.
use rand::distr::Alphanumeric;
use rand::Rng;
use std::collections::HashSet;
use std::hash::Hash;

/// Provides capabilities to generate random values of the implementer-type.
pub trait Generate<R: Rng>: Sized {
    /// Parameters for data-generation specific for the type.
    type GenerateParams: Default;

    /// Generates a single random value of the type.
    fn generate(rng: &mut R, params: &Self::GenerateParams) -> Self;

    /// Generates a slice of **unique** random values of the type.
    ///
    /// The values come out in generation order, so a seeded `rng` gives a reproducible slice.
    fn generate_many(rng: &mut R, params: &Self::GenerateParams, size: usize) -> Box<[Self]>
    where
        Self: Hash + Eq + Clone,
    {
        let mut seen = HashSet::with_capacity(size);
        let mut values = Vec::with_capacity(size);
        while values.len() < size {
            let value = Self::generate(rng, params);
            if seen.insert(value.clone()) {
                values.push(value);
            }
        }
        values.into_boxed_slice()
    }
}

/// Parameters for [`Generate`] implementations that generate numeric values.
pub struct NumParams<T> {
    min: T,
    max: T,
}

impl<T> NumParams<T> {
    /// Creates a new instance of [`NumParams`] with the specified inclusive bounds.
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

macro_rules! impl_generate_num {
    ($($type:ty),*) => {
        $(
            impl Default for NumParams<$type> {
                fn default() -> Self {
                    Self { min: <$type>::MIN, max: <$type>::MAX }
                }
            }

            impl<R: Rng> Generate<R> for $type {
                type GenerateParams = NumParams<$type>;

                fn generate(rng: &mut R, params: &Self::GenerateParams) -> Self {
                    rng.random_range(params.min..=params.max)
                }
            }
        )*
    };
}

impl_generate_num!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128);

/// Parameters for [`Generate`] implementations that generate strings.
pub struct StringParams {
    min_length: usize,
    max_length: usize,
}

impl StringParams {
    pub fn new(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
        }
    }
}

impl Default for StringParams {
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: 64,
        }
    }
}

impl<R: Rng> Generate<R> for String {
    type GenerateParams = StringParams;

    fn generate(rng: &mut R, params: &Self::GenerateParams) -> Self {
        let length = rng.random_range(params.min_length..=params.max_length);
        let iter = rng.sample_iter(&Alphanumeric);
        iter.take(length).map(char::from).collect()
    }
}

/// Generates key-value pairs with unique keys.
pub fn generate_map_data<R, K, V>(
    rng: &mut R,
    size: usize,
    key_params: &K::GenerateParams,
    val_params: &V::GenerateParams,
) -> Box<[(K, V)]>
where
    R: Rng,
    K: Eq + Hash + Clone + Generate<R>,
    V: Generate<R>,
{
    K::generate_many(rng, key_params, size)
        .into_vec()
        .into_iter()
        .map(|key| (key, V::generate(rng, val_params)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_generate_many_is_unique() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let values = u8::generate_many(&mut rng, &NumParams::new(0, 99), 100);
        let unique: HashSet<u8> = values.iter().copied().collect();
        assert_eq!(unique.len(), 100);
        assert!(values.iter().all(|v| *v < 100));
    }

    #[test]
    fn test_num_params_bounds() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        for _ in 0..100 {
            let v = i8::generate(&mut rng, &NumParams::new(-3, 3));
            assert!((-3..=3).contains(&v));
            let v = i128::generate(&mut rng, &NumParams::new(i128::MIN, i128::MIN + 1));
            assert!(v <= i128::MIN + 1);
        }
        let _ = u128::generate(&mut rng, &NumParams::default());
    }

    #[test]
    fn test_generate_many_is_reproducible() {
        let params = StringParams::new(1, 8);
        let a = String::generate_many(&mut ChaCha20Rng::seed_from_u64(3), &params, 50);
        let b = String::generate_many(&mut ChaCha20Rng::seed_from_u64(3), &params, 50);
        assert_eq!(a, b);
    }

    #[test]
    fn test_string_params() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for _ in 0..100 {
            let s = String::generate(&mut rng, &StringParams::new(2, 5));
            assert!((2..=5).contains(&s.len()));
            assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }
}
