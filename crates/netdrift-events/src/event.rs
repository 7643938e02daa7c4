//! Event Types
//!
//! The append-only record stream emitted by a network. Every creation,
//! receipt, death and generation advance becomes one `NetworkEvent`; a
//! persistence layer can replay the stream to rebuild the records by id and
//! by their structural joins.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Stamp;

/// Role of a node in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    /// Accepts transmissions and replicates content
    Agent,
    /// Generates content and ignores inbound transmissions
    Source,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRole::Agent => write!(f, "agent"),
            NodeRole::Source => write!(f, "source"),
        }
    }
}

/// Lifecycle status of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    #[default]
    Alive,
    Dead,
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeStatus::Alive => write!(f, "alive"),
            NodeStatus::Dead => write!(f, "dead"),
        }
    }
}

/// Delivery status of a transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransmissionStatus {
    #[default]
    Pending,
    Received,
    /// The destination died before receiving it
    Dropped,
}

impl fmt::Display for TransmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransmissionStatus::Pending => write!(f, "pending"),
            TransmissionStatus::Received => write!(f, "received"),
            TransmissionStatus::Dropped => write!(f, "dropped"),
        }
    }
}

/// Primary event categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Node,
    Vector,
    Info,
    Transmission,
    Generation,
}

impl EventType {
    /// Returns all event type variants.
    pub fn all() -> &'static [EventType] {
        &[
            EventType::Node,
            EventType::Vector,
            EventType::Info,
            EventType::Transmission,
            EventType::Generation,
        ]
    }
}

/// What happened, with the ids of every record involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    NodeCreated {
        node_id: String,
        role: NodeRole,
    },
    NodeDied {
        node_id: String,
    },
    InfoAdopted {
        node_id: String,
        info_id: String,
    },
    VectorCreated {
        vector_id: String,
        origin_id: String,
        destination_id: String,
    },
    VectorFailed {
        vector_id: String,
    },
    InfoCreated {
        info_id: String,
        origin_id: String,
        contents: String,
    },
    TransmissionCreated {
        transmission_id: String,
        info_id: String,
        vector_id: String,
    },
    TransmissionReceived {
        transmission_id: String,
        destination_id: String,
    },
    TransmissionDropped {
        transmission_id: String,
        destination_id: String,
    },
    GenerationAdvanced {
        generation: u64,
        process: String,
    },
}

impl EventKind {
    /// Returns the category this event belongs to.
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::NodeCreated { .. }
            | EventKind::NodeDied { .. }
            | EventKind::InfoAdopted { .. } => EventType::Node,
            EventKind::VectorCreated { .. } | EventKind::VectorFailed { .. } => EventType::Vector,
            EventKind::InfoCreated { .. } => EventType::Info,
            EventKind::TransmissionCreated { .. }
            | EventKind::TransmissionReceived { .. }
            | EventKind::TransmissionDropped { .. } => EventType::Transmission,
            EventKind::GenerationAdvanced { .. } => EventType::Generation,
        }
    }
}

/// A single journaled event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEvent {
    /// Unique identifier (e.g., "evt_00000042")
    pub event_id: String,
    /// When the event occurred
    pub stamp: Stamp,
    /// Event details
    #[serde(flatten)]
    pub kind: EventKind,
}

impl NetworkEvent {
    /// Create a new event.
    pub fn new(event_id: impl Into<String>, stamp: Stamp, kind: EventKind) -> Self {
        Self {
            event_id: event_id.into(),
            stamp,
            kind,
        }
    }

    /// Returns the event's category.
    pub fn event_type(&self) -> EventType {
        self.kind.event_type()
    }

    /// Serializes the event to a single JSON line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes an event from a JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

/// Generates an event ID with the given sequence number.
pub fn generate_event_id(sequence: u64) -> String {
    format!("evt_{:08}", sequence)
}
