//! Node Components
//!
//! A node is one participant in the network. There is a single `Node` type
//! whose role-specific behaviour lives in `NodeKind`; `Agent` and `Source` are
//! the unattached blueprints callers build and hand to the network.

use netdrift_events::{NodeRole, NodeSnapshot, NodeStatus, Stamp};
use rand::Rng;
use std::fmt;

use super::behavior::{
    AdoptLatest, ContentGenerator, Emission, RandomBinaryString, ReplicationRule,
};
use super::ids::{InfoId, NetworkId, NodeId, VectorId};

/// Agent-specific behaviour.
pub struct AgentBehavior {
    pub(crate) replication: Box<dyn ReplicationRule>,
}

impl AgentBehavior {
    pub fn replication(&self) -> &dyn ReplicationRule {
        self.replication.as_ref()
    }
}

/// Source-specific behaviour.
pub struct SourceBehavior {
    pub(crate) generator: Box<dyn ContentGenerator>,
    pub(crate) emission: Emission,
}

impl SourceBehavior {
    pub fn generator_name(&self) -> &'static str {
        self.generator.name()
    }

    pub fn emission(&self) -> Emission {
        self.emission
    }
}

/// Role-specific behaviour of a node.
pub enum NodeKind {
    Agent(AgentBehavior),
    Source(SourceBehavior),
}

impl NodeKind {
    pub fn role(&self) -> NodeRole {
        match self {
            NodeKind::Agent(_) => NodeRole::Agent,
            NodeKind::Source(_) => NodeRole::Source,
        }
    }
}

impl fmt::Debug for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Agent(a) => f
                .debug_struct("Agent")
                .field("replication", &a.replication.name())
                .finish(),
            NodeKind::Source(s) => f
                .debug_struct("Source")
                .field("generator", &s.generator.name())
                .field("emission", &s.emission)
                .finish(),
        }
    }
}

/// An unattached agent, ready to be added with `Network::add_agent`.
pub struct Agent {
    id: NodeId,
    replication: Box<dyn ReplicationRule>,
}

impl Agent {
    /// Agent that overwrites its info with every delivery.
    pub fn new() -> Self {
        Self::with_id(NodeId::new())
    }

    pub fn with_id(id: NodeId) -> Self {
        Self {
            id,
            replication: Box::new(AdoptLatest),
        }
    }

    pub fn with_replication(mut self, rule: impl ReplicationRule + 'static) -> Self {
        self.replication = Box::new(rule);
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub(crate) fn into_parts(self) -> (NodeId, NodeKind) {
        (
            self.id,
            NodeKind::Agent(AgentBehavior {
                replication: self.replication,
            }),
        )
    }
}

impl Default for Agent {
    fn default() -> Self {
        Self::new()
    }
}

/// An unattached source, ready to be added with `Network::add_source_local`
/// or `Network::add_source_global`.
pub struct Source {
    id: NodeId,
    generator: Box<dyn ContentGenerator>,
    emission: Emission,
}

impl Source {
    pub fn new(generator: impl ContentGenerator + 'static) -> Self {
        Self {
            id: NodeId::new(),
            generator: Box::new(generator),
            emission: Emission::Shared,
        }
    }

    /// Source of random two-character binary strings.
    pub fn random_binary<R: Rng + Send + 'static>(rng: R) -> Self {
        Self::new(RandomBinaryString::new(
            RandomBinaryString::<R>::DEFAULT_LENGTH,
            rng,
        ))
    }

    pub fn with_emission(mut self, emission: Emission) -> Self {
        self.emission = emission;
        self
    }

    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub(crate) fn into_parts(self) -> (NodeId, NodeKind) {
        (
            self.id,
            NodeKind::Source(SourceBehavior {
                generator: self.generator,
                emission: self.emission,
            }),
        )
    }
}

/// A network member.
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    pub(crate) kind: NodeKind,
    status: NodeStatus,
    network: NetworkId,
    created: Stamp,
    /// Every vector ever created from this node, failed ones included
    pub(crate) outgoing: Vec<VectorId>,
    /// Every vector ever created into this node, failed ones included
    pub(crate) incoming: Vec<VectorId>,
    pub(crate) current_info: Option<InfoId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, kind: NodeKind, network: NetworkId, created: Stamp) -> Self {
        Self {
            id,
            kind,
            status: NodeStatus::Alive,
            network,
            created,
            outgoing: Vec::new(),
            incoming: Vec::new(),
            current_info: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn role(&self) -> NodeRole {
        self.kind.role()
    }

    pub fn is_agent(&self) -> bool {
        matches!(self.kind, NodeKind::Agent(_))
    }

    pub fn is_source(&self) -> bool {
        matches!(self.kind, NodeKind::Source(_))
    }

    pub fn status(&self) -> NodeStatus {
        self.status
    }

    pub fn is_alive(&self) -> bool {
        self.status == NodeStatus::Alive
    }

    /// The network this node belongs to.
    pub fn network(&self) -> NetworkId {
        self.network
    }

    pub fn created(&self) -> Stamp {
        self.created
    }

    /// The most recently adopted info. Sources never hold one.
    pub fn current_info(&self) -> Option<InfoId> {
        self.current_info
    }

    /// All outgoing vectors in creation order, including failed ones.
    pub fn outgoing(&self) -> &[VectorId] {
        &self.outgoing
    }

    /// All incoming vectors in creation order, including failed ones.
    pub fn incoming(&self) -> &[VectorId] {
        &self.incoming
    }

    pub(crate) fn kill(&mut self) {
        self.status = NodeStatus::Dead;
    }

    pub fn to_snapshot(&self) -> NodeSnapshot {
        let mut snapshot = NodeSnapshot::new(self.id.to_string(), self.role(), self.created);
        snapshot.status = self.status;
        snapshot.current_info = self.current_info.map(|i| i.to_string());
        snapshot.outgoing = self.outgoing.iter().map(|v| v.to_string()).collect();
        snapshot.incoming = self.incoming.iter().map(|v| v.to_string()).collect();
        snapshot
    }
}
