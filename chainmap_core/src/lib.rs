//! Core trait and type declarations shared by the workspace.
pub mod error;
pub use error::*;

mod hasher;
pub use hasher::*;

mod map;
pub use map::*;
