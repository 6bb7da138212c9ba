//! [`chainmap_core::Hasher`] implementations.
//!
//! # Notes
//!
//! - All of the hashers reduce into exactly `num_buckets` values, none of them rounds the number
//!   of buckets up.
mod std_hash;
pub use std_hash::*;
mod modulo;
pub use modulo::*;
#[cfg(feature = "xxh3")]
mod xxh3;
#[cfg(feature = "xxh3")]
pub use xxh3::*;
