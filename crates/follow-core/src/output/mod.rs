//! Output
//!
//! Run statistics and the JSON output writer.

pub mod stats;
pub mod writer;

pub use stats::*;
pub use writer::*;
