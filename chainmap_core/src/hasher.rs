/// Hasher for the specific data-type that maps values directly into bucket indices.
///
/// Differs from [`core::hash::Hasher`] in the way that it is constructed for a fixed number of
/// buckets and its output is already reduced into `[0, num_buckets)`, so the table using it never
/// has to deal with out-of-range or negative indices.
pub trait Hasher<T>
where
    Self: Default,
    T: Eq,
{
    /// State of the hasher instance.
    ///
    /// Usually contains such information as seed-values and number of buckets. But it's up to
    /// the implementation to decide what to store in it.
    type State: Clone + Default;

    /// Make a state for a hasher with a given `seed` and `num_buckets` number of buckets.
    fn make_state(seed: u64, num_buckets: u32) -> Self::State;

    /// Create a new hasher with a given `seed` and `num_buckets` number of buckets.
    fn from_seed(seed: u64, num_buckets: u32) -> Self {
        Self::from_state(Self::make_state(seed, num_buckets))
    }

    /// Create a new hasher from the given `state`.
    fn from_state(state: Self::State) -> Self;

    /// Get the state of the hasher.
    fn state(&self) -> &Self::State;

    /// Get the number of buckets (hash values are always less than it).
    fn num_buckets(&self) -> u32;

    /// Hash the given `value` into a bucket index.
    fn hash(&self, value: &T) -> u32;
}
