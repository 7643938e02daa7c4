//! Shared record types and serialization for network diffusion simulations.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for all other crates in the workspace.

pub mod event;
pub mod snapshot;
pub mod timestamp;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

// Re-export timestamp types
pub use timestamp::{ParseStampError, Stamp};

// Re-export event types
pub use event::{
    generate_event_id, EventKind, EventType, NetworkEvent, NodeRole, NodeStatus,
    TransmissionStatus,
};

// Re-export snapshot types
pub use snapshot::{
    generate_snapshot_id, InfoSnapshot, NetworkSnapshot, NodeSnapshot, TransmissionSnapshot,
    VectorSnapshot,
};
