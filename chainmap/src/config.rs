//! Construction-time configuration of [`crate::ChainedHashMap`].
use chainmap_core::ChainMapError;

/// Number of buckets used when nothing else is requested.
///
/// A prime, so that keys with regular structure (multiples, strides) don't cluster.
pub const DEFAULT_CAPACITY: u32 = 997;

/// Seed passed to the hasher when nothing else is requested.
pub const DEFAULT_SEED: u64 = 0;

/// Parameters that are fixed for the whole lifetime of a map.
///
/// # Examples
///
/// ```rust
/// use chainmap::ChainConfig;
///
/// let config = ChainConfig::default().with_capacity(13).with_seed(42);
/// assert_eq!(config.validate(), Ok(13));
/// assert!(ChainConfig::default().with_capacity(0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainConfig {
    /// The number of buckets.
    pub capacity: usize,
    /// The seed of the hasher.
    pub seed: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY as usize,
            seed: DEFAULT_SEED,
        }
    }
}

impl ChainConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks the configuration and returns the number of buckets in the form hashers accept.
    pub fn validate(&self) -> Result<u32, ChainMapError> {
        match u32::try_from(self.capacity) {
            Ok(0) => Err(ChainMapError::ZeroCapacity),
            Ok(num_buckets) => Ok(num_buckets),
            Err(_) => Err(ChainMapError::CapacityTooLarge {
                capacity: self.capacity,
            }),
        }
    }
}
