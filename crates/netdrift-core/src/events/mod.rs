//! Event Logging
//!
//! The event records themselves live in `netdrift_events`; this module
//! persists them.

pub mod logger;

pub use logger::EventLogger;
pub use netdrift_events::{EventKind, EventType, NetworkEvent};
