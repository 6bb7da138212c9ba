//! Iteration over the entries of [`ChainedHashMap`].
//!
//! The order is the order of the buckets and then the insertion order within each bucket, which
//! callers shouldn't rely on.
use crate::chaining::{Bucket, ChainedHashMap, Entry};
use chainmap_core::Hasher;
use std::fmt::{Debug, Formatter};
use std::iter::{Flatten, FusedIterator};
use std::slice;

impl<'a, K, V> IntoIterator for &'a Bucket<K, V> {
    type Item = &'a Entry<K, V>;
    type IntoIter = slice::Iter<'a, Entry<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Borrowing iterator over the entries of a [`ChainedHashMap`].
pub struct Iter<'a, K, V> {
    entries: Flatten<slice::Iter<'a, Bucket<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.next()?;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K: Eq, V, H: Hasher<K>> ChainedHashMap<K, V, H> {
    /// Iterates over all the entries in unspecified order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            entries: self.buckets.iter().flatten(),
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Collects a snapshot of all the entries in unspecified order.
    ///
    /// The result is detached from the map: changing it has no effect on the map.
    pub fn entries(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<'a, K: Eq, V, H: Hasher<K>> IntoIterator for &'a ChainedHashMap<K, V, H> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, H> Debug for ChainedHashMap<K, V, H>
where
    K: Eq + Debug,
    V: Debug,
    H: Hasher<K>,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
