//! Run Setup
//!
//! Input loading and roster construction.

pub mod load;
pub mod roster;

pub use load::*;
pub use roster::*;
