use crate::Hasher;

/// A mutable hash map.
///
/// Mostly serves as a seam for generic test suites, implementations are free to expose more.
pub trait HashMap<K: Eq, V, H: Hasher<K>> {
    /// Associate `value` with `key` returning the previously associated value if any.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Get the value associated with the given `key`.
    fn get(&self, key: &K) -> Option<&V>;

    /// Remove the entry of the given `key` returning its value.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Remove all the entries.
    fn clear(&mut self);

    /// Get the number of elements in the map.
    fn len(&self) -> usize;

    /// Check if the map is empty.
    fn is_empty(&self) -> bool;

    /// Check if the map contains the given `key`.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Get the load factor of the map.
    fn load_factor(&self) -> f64;
}

/// A data structure that keeps diagnostic counters about its hashing activity.
pub trait Instrumented {
    /// Get the number of insertions that landed in an already allocated bucket.
    fn num_collisions(&self) -> usize;

    /// Get the number of key comparisons performed while inserting.
    fn num_probes(&self) -> usize;
}
