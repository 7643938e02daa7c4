//! Logical Timestamp Types
//!
//! Every record in a network is stamped with the generation it was created in
//! and a per-network sequence number. The sequence is strictly increasing, so
//! stamp order is creation order.
//!
//! # Example
//!
//! ```
//! use netdrift_events::Stamp;
//!
//! let stamp = Stamp::new(3, 12);
//! assert_eq!(stamp.to_string(), "gen_3.seq_12");
//! assert_eq!("gen_3.seq_12".parse::<Stamp>().unwrap(), stamp);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical creation time of a record.
///
/// Ordering compares the generation first and the sequence second. Since both
/// only ever grow inside one network, this matches the sequence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Stamp {
    /// Network generation (completed process steps) at creation.
    pub generation: u64,
    /// Per-network monotonically increasing sequence number.
    pub sequence: u64,
}

impl Stamp {
    /// Creates a new stamp.
    pub fn new(generation: u64, sequence: u64) -> Self {
        Self {
            generation,
            sequence,
        }
    }

    /// The stamp of an empty network, before any record exists.
    pub fn origin() -> Self {
        Self::new(0, 0)
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen_{}.seq_{}", self.generation, self.sequence)
    }
}

/// Error parsing a stamp from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseStampError {
    /// The string was not of the form `gen_N.seq_M`
    InvalidFormat(String),
    /// One of the numeric parts did not parse
    InvalidNumber(String),
}

impl fmt::Display for ParseStampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseStampError::InvalidFormat(s) => write!(f, "invalid stamp format: {}", s),
            ParseStampError::InvalidNumber(s) => write!(f, "invalid stamp number: {}", s),
        }
    }
}

impl std::error::Error for ParseStampError {}

impl FromStr for Stamp {
    type Err = ParseStampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (generation, sequence) = s
            .split_once('.')
            .ok_or_else(|| ParseStampError::InvalidFormat(s.to_string()))?;

        let generation = generation
            .strip_prefix("gen_")
            .ok_or_else(|| ParseStampError::InvalidFormat(s.to_string()))?;
        let sequence = sequence
            .strip_prefix("seq_")
            .ok_or_else(|| ParseStampError::InvalidFormat(s.to_string()))?;

        let generation = generation
            .parse()
            .map_err(|_| ParseStampError::InvalidNumber(generation.to_string()))?;
        let sequence = sequence
            .parse()
            .map_err(|_| ParseStampError::InvalidNumber(sequence.to_string()))?;

        Ok(Stamp::new(generation, sequence))
    }
}
