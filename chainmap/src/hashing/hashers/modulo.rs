//! Implements a hasher for primitive integers that uses the magnitude of the value as its hash.
//!
//! The bucket of a value `x` is `|x| % num_buckets`, so the distribution is only as good as the
//! keys are. It's predictable on purpose: `k` and `k + num_buckets` always share a bucket, which
//! makes it easy to set up collisions when studying the behaviour of a table.
use crate::hashing::common::reduce_u128;
use chainmap_core::Hasher;
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ModState {
    num_buckets: u32,
}

/// Identity-then-modulo hasher for primitive integers.
///
/// The seed is ignored.
pub struct ModHasher<T: Eq> {
    state: ModState,
    value_type: PhantomData<fn(&T)>,
}

impl<T: Eq> Default for ModHasher<T> {
    fn default() -> Self {
        Self {
            state: ModState::default(),
            value_type: PhantomData,
        }
    }
}

impl<T: Eq> Debug for ModHasher<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModHasher")
            .field("state", &self.state)
            .finish()
    }
}

macro_rules! impl_mod_hasher {
    ($magnitude:expr, $($type:ty),*) => {
        $(
            impl Hasher<$type> for ModHasher<$type> {
                type State = ModState;

                fn make_state(_seed: u64, num_buckets: u32) -> Self::State {
                    debug_assert!(num_buckets > 0, r#""num_buckets" must be greater than 0"#);

                    ModState { num_buckets }
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
                fn hash(&self, value: &$type) -> u32 {
                    let magnitude: fn($type) -> u128 = $magnitude;
                    reduce_u128(magnitude(*value), self.state.num_buckets)
                }
            }
        )*
    };
}

impl_mod_hasher!(|v| v as u128, u8, u16, u32, u64, u128, usize);
impl_mod_hasher!(|v| v.unsigned_abs() as u128, i8, i16, i32, i64, i128, isize);
