//! Transmission Records
//!
//! A transmission is one info travelling along one vector. It stays pending
//! until the destination consumes it with `receive_all`, exactly once.

use netdrift_events::{Stamp, TransmissionSnapshot, TransmissionStatus};

use super::ids::{InfoId, NodeId, TransmissionId, VectorId};

/// Queued, consumable delivery of an info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    id: TransmissionId,
    info: InfoId,
    vector: VectorId,
    origin: NodeId,
    destination: NodeId,
    status: TransmissionStatus,
    created: Stamp,
    received: Option<Stamp>,
}

impl Transmission {
    pub(crate) fn new(
        id: TransmissionId,
        info: InfoId,
        vector: VectorId,
        origin: NodeId,
        destination: NodeId,
        created: Stamp,
    ) -> Self {
        Self {
            id,
            info,
            vector,
            origin,
            destination,
            status: TransmissionStatus::Pending,
            created,
            received: None,
        }
    }

    pub fn id(&self) -> TransmissionId {
        self.id
    }

    pub fn info(&self) -> InfoId {
        self.info
    }

    pub fn vector(&self) -> VectorId {
        self.vector
    }

    pub fn origin(&self) -> NodeId {
        self.origin
    }

    pub fn destination(&self) -> NodeId {
        self.destination
    }

    pub fn status(&self) -> TransmissionStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == TransmissionStatus::Pending
    }

    pub fn created(&self) -> Stamp {
        self.created
    }

    pub fn received(&self) -> Option<Stamp> {
        self.received
    }

    /// Ordering key for "most recent delivery": creation stamp, then id.
    pub(crate) fn recency(&self) -> (Stamp, TransmissionId) {
        (self.created, self.id)
    }

    pub(crate) fn mark_received(&mut self, at: Stamp) {
        self.status = TransmissionStatus::Received;
        self.received = Some(at);
    }

    pub(crate) fn mark_dropped(&mut self) {
        self.status = TransmissionStatus::Dropped;
    }

    pub fn to_snapshot(&self) -> TransmissionSnapshot {
        TransmissionSnapshot {
            transmission_id: self.id.to_string(),
            info_id: self.info.to_string(),
            vector_id: self.vector.to_string(),
            status: self.status,
            created: self.created,
            received: self.received,
        }
    }
}
