//! Output
//!
//! Fixation statistics and run summaries.

pub mod stats;

pub use stats::*;
