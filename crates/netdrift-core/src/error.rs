//! Error types for network operations.
//!
//! Every error is a local, synchronous misuse of the API or a malformed
//! topology. None are transient, so nothing here is worth retrying: fix the
//! topology or the call order and invoke again. A failed operation leaves the
//! network unchanged.

use thiserror::Error;

use crate::components::{NodeId, VectorId};

/// Result type for network operations.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Errors that can occur while building or stepping a network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// The operation referenced a node or vector this network does not own
    #[error("topology error: {0}")]
    Topology(#[from] TopologyFault),

    /// A vector already exists for this ordered pair
    #[error("vector {origin} -> {destination} already exists")]
    DuplicateVector { origin: NodeId, destination: NodeId },

    /// The node is not a member of any network
    #[error("node {0} is not attached to this network")]
    DetachedNode(NodeId),

    /// The random-walk carrier has nowhere to go
    #[error("carrier {0} has no outgoing vector")]
    DeadEnd(NodeId),

    /// A node tried to relay content before receiving any
    #[error("node {0} has no current info to transmit")]
    UninitializedCarrier(NodeId),

    /// No alive agent has a neighbour able to act as a parent
    #[error("no alive agent has an eligible parent among {population} alive agents")]
    InsufficientNeighbors { population: usize },

    /// No alive agent has a neighbour able to transmit to it
    #[error("no alive agent has an eligible neighbour among {population} alive agents")]
    NoEligibleAgent { population: usize },

    /// The process needs at least one alive agent
    #[error("network has no alive agents")]
    EmptyPopulation,

    /// Dead nodes neither originate nor receive transmissions
    #[error("node {0} is dead")]
    DeadNode(NodeId),
}

/// The specific way an operation disagreed with the network's topology.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyFault {
    #[error("node {0} already exists in the network")]
    DuplicateNode(NodeId),

    #[error("node {0} is not a member of the network")]
    UnknownNode(NodeId),

    #[error("vector {0} is not owned by the network")]
    UnknownVector(VectorId),

    #[error("vector {vector} does not originate at node {node}")]
    VectorNotOwned { vector: VectorId, node: NodeId },

    #[error("vector {0} has failed")]
    FailedVector(VectorId),

    #[error("no vector from {origin} to {destination}")]
    NoVector { origin: NodeId, destination: NodeId },

    #[error("node {0} cannot connect to itself")]
    SelfLoop(NodeId),

    #[error("node {0} is not an agent")]
    NotAnAgent(NodeId),

    #[error("node {0} is not a source")]
    NotASource(NodeId),

    #[error("source {node} must have exactly one outgoing vector, found {found}")]
    NotLocalSource { node: NodeId, found: usize },

    #[error("process requires a source node")]
    MissingSource,

    #[error("process is attached to a different network")]
    ForeignProcess,
}
