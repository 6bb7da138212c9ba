//! Hash functions that map keys into bucket indices.
pub mod common;
pub mod hashers;
