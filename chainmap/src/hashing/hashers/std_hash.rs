//! Implements a general purpose hasher on top of the standard [`Hash`] trait.
use crate::hashing::common::reduce_u64;
use chainmap_core::Hasher;
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::fmt::{Debug, Formatter};
use std::hash::{DefaultHasher, Hash, Hasher as _};
use std::marker::PhantomData;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StdState {
    num_buckets: u32,
    key: u64,
}

/// Hasher for any [`Hash`] type based on [`DefaultHasher`].
///
/// A key derived from the seed is written into the hasher ahead of the value, so different seeds
/// give different bucket assignments while the same seed is always reproducible.
pub struct StdHasher<T: Eq> {
    state: StdState,
    value_type: PhantomData<fn(&T)>,
}

impl<T: Eq> Default for StdHasher<T> {
    fn default() -> Self {
        Self {
            state: StdState::default(),
            value_type: PhantomData,
        }
    }
}

impl<T: Eq> Debug for StdHasher<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdHasher")
            .field("state", &self.state)
            .finish()
    }
}

impl<T: Hash + Eq> Hasher<T> for StdHasher<T> {
    type State = StdState;

    fn make_state(seed: u64, num_buckets: u32) -> Self::State {
        debug_assert!(num_buckets > 0, r#""num_buckets" must be greater than 0"#);

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        StdState {
            num_buckets,
            key: rng.next_u64(),
        }
    }

    fn from_state(state: Self::State) -> Self {
        Self {
            state,
            value_type: PhantomData,
        }
    }

    fn state(&self) -> &Self::State {
        &self.state
    }

    fn num_buckets(&self) -> u32 {
        self.state.num_buckets
    }

    #[inline]
    fn hash(&self, value: &T) -> u32 {
        let mut hasher = DefaultHasher::new();
        hasher.write_u64(self.state.key);
        value.hash(&mut hasher);
        reduce_u64(hasher.finish(), self.state.num_buckets)
    }
}
