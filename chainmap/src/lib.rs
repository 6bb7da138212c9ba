//! A fixed-capacity separate-chaining hash map that counts its own collisions and probes.
//!
//! See [`ChainedHashMap`] for the details.
pub mod chaining;
pub mod config;
pub mod hashing;

pub use chaining::ChainedHashMap;
pub use chainmap_core::{ChainMapError, HashMap, Hasher, Instrumented};
pub use config::ChainConfig;
