//! Read-only queries over a network.

use netdrift_events::{generate_snapshot_id, NetworkSnapshot};

use super::Network;
use crate::components::{
    Info, InfoId, Node, NodeId, NodeKind, Transmission, TransmissionId, Vector, VectorId,
};
use crate::error::{NetworkError, Result, TopologyFault};

impl Network {
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.node_index.get(&id).map(|&slot| &self.nodes[slot])
    }

    /// Every node ever added, dead ones included, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Alive agents in insertion order.
    pub fn agents(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.is_agent() && n.is_alive())
            .map(|n| n.id())
            .collect()
    }

    pub fn sources(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.is_source())
            .map(|n| n.id())
            .collect()
    }

    /// Destinations of the node's active outgoing vectors.
    pub fn neighbors_out(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let slot = self.slot_of(id)?;
        Ok(self.active_outgoing(slot).map(|v| v.destination()).collect())
    }

    /// Origins of the node's active incoming vectors.
    pub fn neighbors_in(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let slot = self.slot_of(id)?;
        Ok(self.active_incoming(slot).map(|v| v.origin()).collect())
    }

    pub fn outgoing_vectors(&self, id: NodeId) -> Result<Vec<&Vector>> {
        let slot = self.slot_of(id)?;
        Ok(self.active_outgoing(slot).collect())
    }

    pub fn incoming_vectors(&self, id: NodeId) -> Result<Vec<&Vector>> {
        let slot = self.slot_of(id)?;
        Ok(self.active_incoming(slot).collect())
    }

    pub fn vector(&self, id: VectorId) -> Option<&Vector> {
        id.slot_in(self.id).and_then(|slot| self.vectors.get(slot))
    }

    /// Every vector ever created, failed ones included.
    pub fn vectors(&self) -> impl Iterator<Item = &Vector> {
        self.vectors.iter()
    }

    /// The vector for the ordered pair, active or failed.
    pub fn vector_between(&self, origin: NodeId, destination: NodeId) -> Option<&Vector> {
        self.vector_index
            .get(&(origin, destination))
            .and_then(|&id| self.vector(id))
    }

    pub fn info(&self, id: InfoId) -> Option<&Info> {
        id.slot_in(self.id).and_then(|slot| self.infos.get(slot))
    }

    pub fn infos(&self) -> impl Iterator<Item = &Info> {
        self.infos.iter()
    }

    pub fn transmission(&self, id: TransmissionId) -> Option<&Transmission> {
        id.slot_in(self.id).and_then(|slot| self.transmissions.get(slot))
    }

    pub fn transmissions(&self) -> impl Iterator<Item = &Transmission> {
        self.transmissions.iter()
    }

    /// The info the node currently holds.
    pub fn current_info(&self, id: NodeId) -> Option<&Info> {
        self.node(id)
            .and_then(|n| n.current_info())
            .and_then(|info| self.info(info))
    }

    pub fn contents_of(&self, id: NodeId) -> Option<&str> {
        self.current_info(id).map(|i| i.contents())
    }

    /// Transmissions addressed to the node that have not been received yet.
    pub fn pending_for(&self, id: NodeId) -> Vec<&Transmission> {
        self.pending
            .get(&id)
            .map(|ids| ids.iter().filter_map(|t| self.transmission(*t)).collect())
            .unwrap_or_default()
    }

    /// Active vectors into `id` whose origin is an agent holding an info.
    pub(crate) fn eligible_incoming(&self, id: NodeId) -> Vec<&Vector> {
        let Ok(slot) = self.slot_of(id) else {
            return Vec::new();
        };
        self.active_incoming(slot)
            .filter(|v| {
                self.node(v.origin())
                    .map(|n| n.is_agent() && n.is_alive() && n.current_info().is_some())
                    .unwrap_or(false)
            })
            .collect()
    }

    pub fn snapshot(&self) -> NetworkSnapshot {
        let mut snapshot = NetworkSnapshot::new(
            generate_snapshot_id(self.generation),
            self.id.to_string(),
            self.generation,
            self.clock(),
        );
        snapshot.nodes = self.nodes.iter().map(|n| n.to_snapshot()).collect();
        snapshot.vectors = self.vectors.iter().map(|v| v.to_snapshot()).collect();
        snapshot.infos = self.infos.iter().map(|i| i.to_snapshot()).collect();
        snapshot.transmissions = self
            .transmissions
            .iter()
            .map(|t| t.to_snapshot())
            .collect();
        snapshot
    }

    pub(crate) fn slot_of(&self, id: NodeId) -> Result<usize> {
        self.node_index
            .get(&id)
            .copied()
            .ok_or_else(|| TopologyFault::UnknownNode(id).into())
    }

    pub(crate) fn require_vector(&self, id: VectorId) -> Result<&Vector> {
        self.vector(id)
            .ok_or_else(|| TopologyFault::UnknownVector(id).into())
    }

    pub(crate) fn require_alive_agent(&self, id: NodeId) -> Result<usize> {
        let slot = self.slot_of(id)?;
        let node = &self.nodes[slot];
        if !matches!(node.kind, NodeKind::Agent(_)) {
            return Err(TopologyFault::NotAnAgent(id).into());
        }
        if !node.is_alive() {
            return Err(NetworkError::DeadNode(id));
        }
        Ok(slot)
    }

    pub(crate) fn active_outgoing(&self, slot: usize) -> impl Iterator<Item = &Vector> {
        self.nodes[slot]
            .outgoing
            .iter()
            .filter_map(|&v| self.vector(v))
            .filter(|v| v.is_active())
    }

    pub(crate) fn active_incoming(&self, slot: usize) -> impl Iterator<Item = &Vector> {
        self.nodes[slot]
            .incoming
            .iter()
            .filter_map(|&v| self.vector(v))
            .filter(|v| v.is_active())
    }
}
