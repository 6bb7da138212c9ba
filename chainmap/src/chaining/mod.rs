//! The implementation of a separate-chaining hash table with a fixed number of buckets.
mod core;
pub use self::core::*;
mod ctors;
mod hash_map;
mod iter;
pub use iter::*;
