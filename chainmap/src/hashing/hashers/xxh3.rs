//! Implements a hasher for any [`Hash`] type backed by the seeded XXH3 streaming hasher.
use crate::hashing::common::reduce_u64;
use chainmap_core::Hasher;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher as _};
use std::marker::PhantomData;
use xxhash_rust::xxh3::Xxh3;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Xxh3State {
    num_buckets: u32,
    seed: u64,
}

/// Hasher based on XXH3.
pub struct Xxh3Hasher<T: Eq> {
    state: Xxh3State,
    value_type: PhantomData<fn(&T)>,
}

impl<T: Eq> Default for Xxh3Hasher<T> {
    fn default() -> Self {
        Self {
            state: Xxh3State::default(),
            value_type: PhantomData,
        }
    }
}

impl<T: Eq> Debug for Xxh3Hasher<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Xxh3Hasher")
            .field("state", &self.state)
            .finish()
    }
}

impl<T: Hash + Eq> Hasher<T> for Xxh3Hasher<T> {
    type State = Xxh3State;

    fn make_state(seed: u64, num_buckets: u32) -> Self::State {
        debug_assert!(num_buckets > 0, r#""num_buckets" must be greater than 0"#);

        Xxh3State { num_buckets, seed }
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
        let mut hasher = Xxh3::with_seed(self.state.seed);
        value.hash(&mut hasher);
        reduce_u64(hasher.finish(), self.state.num_buckets)
    }
}
