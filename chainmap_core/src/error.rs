//! Error definitions.
use thiserror::Error;

/// Project-wise error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainMapError {
    /// A hash table needs at least one bucket to address its keys.
    #[error("Capacity must be greater than 0.")]
    ZeroCapacity,
    /// Hashers produce `u32` bucket indices, so the number of buckets can't exceed `u32::MAX`.
    #[error("Capacity {capacity} exceeds the maximum number of buckets ({}).", u32::MAX)]
    CapacityTooLarge { capacity: usize },
}
