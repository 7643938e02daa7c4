//! Sample data fixtures for testing.
//!
//! This module provides ready-made test data for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // netdrift-events = { path = "../netdrift-events", features = ["test-fixtures"] }
//!
//! use netdrift_events::fixtures;
//!
//! let snapshot = fixtures::sample_snapshot();
//! ```

use crate::NetworkSnapshot;

/// Returns a sample snapshot from the fixtures file.
///
/// A fully-connected network of three agents seeded by one global source,
/// one generation into a cultural Moran run:
/// - agent-1 and agent-2 hold "01"
/// - agent-3 holds "00"
/// - the source's original "11" has already been displaced
pub fn sample_snapshot() -> NetworkSnapshot {
    let json = include_str!("../tests/fixtures/sample_snapshot.json");
    NetworkSnapshot::from_json(json).expect("Failed to parse sample_snapshot.json")
}

/// The seed contents the sample source broadcast, in agent order.
pub fn sample_seed_contents() -> Vec<String> {
    vec!["01".to_string(), "11".to_string(), "00".to_string()]
}
