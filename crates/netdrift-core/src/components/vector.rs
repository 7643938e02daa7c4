//! Vector Records
//!
//! A vector is a directed edge that gates who may send to whom. Vector(A->B)
//! says nothing about Vector(B->A).

use netdrift_events::{Stamp, VectorSnapshot};

use super::ids::{NodeId, VectorId};

/// Directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vector {
    id: VectorId,
    origin: NodeId,
    destination: NodeId,
    created: Stamp,
    /// Set when either endpoint dies; failed vectors stay in the record
    failed: bool,
}

impl Vector {
    pub(crate) fn new(id: VectorId, origin: NodeId, destination: NodeId, created: Stamp) -> Self {
        Self {
            id,
            origin,
            destination,
            created,
            failed: false,
        }
    }

    pub fn id(&self) -> VectorId {
        self.id
    }

    pub fn origin(&self) -> NodeId {
        self.origin
    }

    pub fn destination(&self) -> NodeId {
        self.destination
    }

    pub fn created(&self) -> Stamp {
        self.created
    }

    /// Active vectors take part in topology queries and transmission.
    pub fn is_active(&self) -> bool {
        !self.failed
    }

    pub(crate) fn fail(&mut self) {
        self.failed = true;
    }

    pub fn to_snapshot(&self) -> VectorSnapshot {
        VectorSnapshot {
            vector_id: self.id.to_string(),
            origin_id: self.origin.to_string(),
            destination_id: self.destination.to_string(),
            created: self.created,
            failed: self.failed,
        }
    }
}
