//! Snapshot Types
//!
//! Serialization structs for network snapshots.
//!
//! A snapshot captures every node, vector, info and transmission of a network
//! at a point in time, including dead nodes and failed vectors. It is the
//! read-only export handed to archiving and analysis tools.

use serde::{Deserialize, Serialize};

use crate::{NodeRole, NodeStatus, Stamp, TransmissionStatus};

/// Generates a snapshot ID with the given sequence number.
pub fn generate_snapshot_id(sequence: u64) -> String {
    format!("snap_{:06}", sequence)
}

/// Node snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub node_id: String,
    pub role: NodeRole,
    #[serde(default)]
    pub status: NodeStatus,
    pub created: Stamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_info: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outgoing: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub incoming: Vec<String>,
}

impl NodeSnapshot {
    /// Create an alive node snapshot with no info or vectors.
    pub fn new(node_id: impl Into<String>, role: NodeRole, created: Stamp) -> Self {
        Self {
            node_id: node_id.into(),
            role,
            status: NodeStatus::Alive,
            created,
            current_info: None,
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.status == NodeStatus::Alive
    }
}

/// Vector snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorSnapshot {
    pub vector_id: String,
    pub origin_id: String,
    pub destination_id: String,
    pub created: Stamp,
    #[serde(default)]
    pub failed: bool,
}

/// Info snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoSnapshot {
    pub info_id: String,
    pub origin_id: String,
    pub contents: String,
    pub created: Stamp,
}

/// Transmission snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransmissionSnapshot {
    pub transmission_id: String,
    pub info_id: String,
    pub vector_id: String,
    pub status: TransmissionStatus,
    pub created: Stamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received: Option<Stamp>,
}

/// Complete network snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub snapshot_id: String,
    pub network_id: String,
    pub generation: u64,
    pub taken: Stamp,
    pub nodes: Vec<NodeSnapshot>,
    pub vectors: Vec<VectorSnapshot>,
    pub infos: Vec<InfoSnapshot>,
    pub transmissions: Vec<TransmissionSnapshot>,
}

impl NetworkSnapshot {
    /// Create an empty snapshot.
    pub fn new(
        snapshot_id: impl Into<String>,
        network_id: impl Into<String>,
        generation: u64,
        taken: Stamp,
    ) -> Self {
        Self {
            snapshot_id: snapshot_id.into(),
            network_id: network_id.into(),
            generation,
            taken,
            nodes: Vec::new(),
            vectors: Vec::new(),
            infos: Vec::new(),
            transmissions: Vec::new(),
        }
    }

    /// Serializes the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Find a node by ID.
    pub fn find_node(&self, node_id: &str) -> Option<&NodeSnapshot> {
        self.nodes.iter().find(|n| n.node_id == node_id)
    }

    /// Find an info by ID.
    pub fn find_info(&self, info_id: &str) -> Option<&InfoSnapshot> {
        self.infos.iter().find(|i| i.info_id == info_id)
    }

    /// Alive agents, in insertion order.
    pub fn alive_agents(&self) -> Vec<&NodeSnapshot> {
        self.nodes
            .iter()
            .filter(|n| n.role == NodeRole::Agent && n.is_alive())
            .collect()
    }

    /// Contents currently held by a node, if any.
    pub fn contents_of(&self, node_id: &str) -> Option<&str> {
        let info_id = self.find_node(node_id)?.current_info.as_deref()?;
        self.find_info(info_id).map(|i| i.contents.as_str())
    }

    /// Transmissions still waiting to be received.
    pub fn pending_transmissions(&self) -> Vec<&TransmissionSnapshot> {
        self.transmissions
            .iter()
            .filter(|t| t.status == TransmissionStatus::Pending)
            .collect()
    }
}
