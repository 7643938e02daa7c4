//! Network
//!
//! The network owns every node, vector, info and transmission, and is the only
//! place they are created or changed. Records are kept in creation-ordered
//! arenas and never removed: dead nodes and failed vectors stay queryable.
//!
//! Every mutation is journaled as a `NetworkEvent`; callers drain the journal
//! to persist it (see `EventLogger`).

mod shared;
mod topology;

pub use shared::SharedNetwork;

use netdrift_events::{generate_event_id, EventKind, NetworkEvent, Stamp};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::components::{
    AdoptLatest, Adoption, Agent, AgentBehavior, Emission, Info, InfoId, NetworkId, Node,
    NodeId, NodeKind, ReplicationRule, Source, Transmission, TransmissionId, Vector, VectorId,
};
use crate::error::{NetworkError, Result, TopologyFault};

/// A set of nodes and the directed vectors between them.
#[derive(Debug)]
pub struct Network {
    id: NetworkId,
    generation: u64,
    sequence: u64,
    nodes: Vec<Node>,
    node_index: HashMap<NodeId, usize>,
    vectors: Vec<Vector>,
    /// Every vector ever created, keyed by its ordered endpoint pair
    vector_index: HashMap<(NodeId, NodeId), VectorId>,
    infos: Vec<Info>,
    transmissions: Vec<Transmission>,
    /// Pending transmissions by destination, in creation order
    pending: HashMap<NodeId, Vec<TransmissionId>>,
    journal: Vec<NetworkEvent>,
    journaling: bool,
    events_recorded: u64,
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

impl Network {
    /// An empty network with journaling on. The journal grows until it is
    /// drained with `drain_events`; long runs that never drain should call
    /// `set_journaling(false)`.
    pub fn new() -> Self {
        Self {
            id: NetworkId::new(),
            generation: 0,
            sequence: 0,
            nodes: Vec::new(),
            node_index: HashMap::new(),
            vectors: Vec::new(),
            vector_index: HashMap::new(),
            infos: Vec::new(),
            transmissions: Vec::new(),
            pending: HashMap::new(),
            journal: Vec::new(),
            journaling: true,
            events_recorded: 0,
        }
    }

    pub fn id(&self) -> NetworkId {
        self.id
    }

    /// Number of completed process steps.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stamp of the most recent record.
    pub fn clock(&self) -> Stamp {
        Stamp::new(self.generation, self.sequence)
    }

    /// Enable or disable the event journal. Disabled networks record nothing.
    pub fn set_journaling(&mut self, enabled: bool) {
        self.journaling = enabled;
    }

    /// Events recorded since the last drain.
    pub fn events(&self) -> &[NetworkEvent] {
        &self.journal
    }

    /// Takes every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<NetworkEvent> {
        std::mem::take(&mut self.journal)
    }

    fn next_stamp(&mut self) -> Stamp {
        self.sequence += 1;
        Stamp::new(self.generation, self.sequence)
    }

    fn record(&mut self, stamp: Stamp, kind: EventKind) {
        if !self.journaling {
            return;
        }
        self.events_recorded += 1;
        self.journal.push(NetworkEvent::new(
            generate_event_id(self.events_recorded),
            stamp,
            kind,
        ));
    }

    // ------------------------------------------------------------------
    // Membership
    // ------------------------------------------------------------------

    /// Inserts an agent with no vectors.
    pub fn add_agent(&mut self, agent: Agent) -> Result<NodeId> {
        self.ensure_new_node(agent.id())?;
        let (id, kind) = agent.into_parts();
        Ok(self.insert_node(id, kind))
    }

    /// Inserts a source connected to exactly one agent.
    pub fn add_source_local(&mut self, source: Source, target: NodeId) -> Result<NodeId> {
        self.ensure_new_node(source.id())?;
        self.require_alive_agent(target)?;

        let (id, kind) = source.into_parts();
        self.insert_node(id, kind);
        self.insert_vector(id, target);
        info!(source = %id, target = %target, "Added local source");
        Ok(id)
    }

    /// Inserts a source connected to every agent alive right now. Agents
    /// added later are not connected.
    pub fn add_source_global(&mut self, source: Source) -> Result<NodeId> {
        self.ensure_new_node(source.id())?;

        let targets = self.agents();
        let (id, kind) = source.into_parts();
        self.insert_node(id, kind);
        for target in &targets {
            self.insert_vector(id, *target);
        }
        info!(source = %id, targets = targets.len(), "Added global source");
        Ok(id)
    }

    /// Marks an alive agent dead, e.g. when a participant departs. Its
    /// vectors fail but stay in the record, and so does its final info.
    pub fn retire_agent(&mut self, node: NodeId) -> Result<()> {
        self.require_alive_agent(node)?;
        self.kill_node(node);
        Ok(())
    }

    fn ensure_new_node(&self, id: NodeId) -> Result<()> {
        if self.node_index.contains_key(&id) {
            return Err(TopologyFault::DuplicateNode(id).into());
        }
        Ok(())
    }

    fn insert_node(&mut self, id: NodeId, kind: NodeKind) -> NodeId {
        let stamp = self.next_stamp();
        let role = kind.role();
        self.node_index.insert(id, self.nodes.len());
        self.nodes.push(Node::new(id, kind, self.id, stamp));
        self.record(
            stamp,
            EventKind::NodeCreated {
                node_id: id.to_string(),
                role,
            },
        );
        debug!(node = %id, %role, "Node created");
        id
    }

    fn kill_node(&mut self, id: NodeId) {
        let Some(&slot) = self.node_index.get(&id) else {
            return;
        };
        let stamp = self.next_stamp();
        self.nodes[slot].kill();

        let touching: Vec<VectorId> = self.nodes[slot]
            .outgoing
            .iter()
            .chain(self.nodes[slot].incoming.iter())
            .copied()
            .collect();
        for vector_id in touching {
            let Some(vslot) = vector_id.slot_in(self.id) else {
                continue;
            };
            if self.vectors[vslot].is_active() {
                self.vectors[vslot].fail();
                self.record(
                    stamp,
                    EventKind::VectorFailed {
                        vector_id: vector_id.to_string(),
                    },
                );
            }
        }

        for transmission in self.pending.remove(&id).unwrap_or_default() {
            let Some(tslot) = transmission.slot_in(self.id) else {
                continue;
            };
            self.transmissions[tslot].mark_dropped();
            self.record(
                stamp,
                EventKind::TransmissionDropped {
                    transmission_id: transmission.to_string(),
                    destination_id: id.to_string(),
                },
            );
        }

        self.record(
            stamp,
            EventKind::NodeDied {
                node_id: id.to_string(),
            },
        );
        info!(node = %id, generation = self.generation, "Agent died");
    }

    // ------------------------------------------------------------------
    // Vectors
    // ------------------------------------------------------------------

    /// Creates the vector `origin -> destination`.
    pub fn connect(&mut self, origin: NodeId, destination: NodeId) -> Result<VectorId> {
        let origin_slot = self.slot_of(origin)?;
        let destination_slot = self.slot_of(destination)?;

        if origin == destination {
            return Err(TopologyFault::SelfLoop(origin).into());
        }
        if !self.nodes[origin_slot].is_alive() {
            return Err(NetworkError::DeadNode(origin));
        }
        if !self.nodes[destination_slot].is_alive() {
            return Err(NetworkError::DeadNode(destination));
        }
        if self.vector_index.contains_key(&(origin, destination)) {
            return Err(NetworkError::DuplicateVector {
                origin,
                destination,
            });
        }

        Ok(self.insert_vector(origin, destination))
    }

    /// Creates vectors in both directions.
    pub fn connect_both(&mut self, a: NodeId, b: NodeId) -> Result<(VectorId, VectorId)> {
        if self.vector_index.contains_key(&(b, a)) {
            return Err(NetworkError::DuplicateVector {
                origin: b,
                destination: a,
            });
        }
        let forward = self.connect(a, b)?;
        let backward = self.connect(b, a)?;
        Ok((forward, backward))
    }

    fn insert_vector(&mut self, origin: NodeId, destination: NodeId) -> VectorId {
        let stamp = self.next_stamp();
        let id = VectorId::new(self.id, self.vectors.len() as u64 + 1);
        self.vectors.push(Vector::new(id, origin, destination, stamp));
        self.vector_index.insert((origin, destination), id);

        if let Some(&slot) = self.node_index.get(&origin) {
            self.nodes[slot].outgoing.push(id);
        }
        if let Some(&slot) = self.node_index.get(&destination) {
            self.nodes[slot].incoming.push(id);
        }

        self.record(
            stamp,
            EventKind::VectorCreated {
                vector_id: id.to_string(),
                origin_id: origin.to_string(),
                destination_id: destination.to_string(),
            },
        );
        debug!(vector = %id, %origin, %destination, "Vector created");
        id
    }

    // ------------------------------------------------------------------
    // Transmission
    // ------------------------------------------------------------------

    /// Sends content from `origin` along one named vector, or along every
    /// active outgoing vector when `to` is `None`.
    ///
    /// Agents relay their current info. Sources generate new info first,
    /// either one shared info or one per target depending on their emission.
    pub fn transmit(
        &mut self,
        origin: NodeId,
        to: Option<VectorId>,
    ) -> Result<Vec<TransmissionId>> {
        let slot = self.slot_of(origin)?;
        if !self.nodes[slot].is_alive() {
            return Err(NetworkError::DeadNode(origin));
        }

        let targets: Vec<(VectorId, NodeId)> = match to {
            Some(vector_id) => {
                let vector = self.require_vector(vector_id)?;
                if vector.origin() != origin {
                    return Err(TopologyFault::VectorNotOwned {
                        vector: vector_id,
                        node: origin,
                    }
                    .into());
                }
                if !vector.is_active() {
                    return Err(TopologyFault::FailedVector(vector_id).into());
                }
                vec![(vector_id, vector.destination())]
            }
            None => self
                .active_outgoing(slot)
                .map(|v| (v.id(), v.destination()))
                .collect(),
        };

        let relayed = match &self.nodes[slot].kind {
            NodeKind::Agent(_) => Some(
                self.nodes[slot]
                    .current_info
                    .ok_or(NetworkError::UninitializedCarrier(origin))?,
            ),
            NodeKind::Source(_) => None,
        };

        let sent = match relayed {
            Some(info) => targets
                .into_iter()
                .map(|(vector, destination)| self.send_info(vector, origin, destination, info))
                .collect(),
            None => self.emit(slot, origin, targets),
        };
        Ok(sent)
    }

    /// Sends content from `origin` along its vector to `destination`.
    pub fn transmit_to(
        &mut self,
        origin: NodeId,
        destination: NodeId,
    ) -> Result<Vec<TransmissionId>> {
        let vector = self
            .vector_between(origin, destination)
            .filter(|v| v.is_active())
            .map(|v| v.id())
            .ok_or(TopologyFault::NoVector {
                origin,
                destination,
            })?;
        self.transmit(origin, Some(vector))
    }

    /// A source transmitting along all of its outgoing vectors.
    pub fn broadcast(&mut self, source: NodeId) -> Result<Vec<TransmissionId>> {
        let slot = self.slot_of(source)?;
        if !self.nodes[slot].is_source() {
            return Err(TopologyFault::NotASource(source).into());
        }
        self.transmit(source, None)
    }

    fn emit(
        &mut self,
        slot: usize,
        origin: NodeId,
        targets: Vec<(VectorId, NodeId)>,
    ) -> Vec<TransmissionId> {
        let emission = match &self.nodes[slot].kind {
            NodeKind::Source(source) => source.emission,
            NodeKind::Agent(_) => return Vec::new(),
        };

        let mut sent = Vec::with_capacity(targets.len());
        let mut shared: Option<InfoId> = None;
        for (vector, destination) in targets {
            let info = match (emission, shared) {
                (Emission::Shared, Some(info)) => info,
                _ => {
                    let contents = self.generate(slot);
                    let info = self.create_info(origin, contents);
                    if emission == Emission::Shared {
                        shared = Some(info);
                    }
                    info
                }
            };
            sent.push(self.send_info(vector, origin, destination, info));
        }
        sent
    }

    fn generate(&mut self, slot: usize) -> String {
        match &mut self.nodes[slot].kind {
            NodeKind::Source(source) => source.generator.generate(),
            NodeKind::Agent(_) => String::new(),
        }
    }

    pub(crate) fn create_info(&mut self, origin: NodeId, contents: String) -> InfoId {
        let stamp = self.next_stamp();
        let id = InfoId::new(self.id, self.infos.len() as u64 + 1);
        self.record(
            stamp,
            EventKind::InfoCreated {
                info_id: id.to_string(),
                origin_id: origin.to_string(),
                contents: contents.clone(),
            },
        );
        debug!(info = %id, %origin, %contents, "Info created");
        self.infos.push(Info::new(id, origin, contents, stamp));
        id
    }

    pub(crate) fn send_info(
        &mut self,
        vector: VectorId,
        origin: NodeId,
        destination: NodeId,
        info: InfoId,
    ) -> TransmissionId {
        let stamp = self.next_stamp();
        let id = TransmissionId::new(self.id, self.transmissions.len() as u64 + 1);
        self.transmissions.push(Transmission::new(
            id,
            info,
            vector,
            origin,
            destination,
            stamp,
        ));
        self.pending.entry(destination).or_default().push(id);
        self.record(
            stamp,
            EventKind::TransmissionCreated {
                transmission_id: id.to_string(),
                info_id: info.to_string(),
                vector_id: vector.to_string(),
            },
        );
        debug!(transmission = %id, %info, %origin, %destination, "Transmission created");
        id
    }

    /// Consumes every pending transmission addressed to `node`.
    ///
    /// All of them are marked received; the most recent one (by creation,
    /// ties broken by id) goes through the agent's replication rule. Returns
    /// the info adopted, if any. Sources and dead agents consume nothing.
    pub fn receive_all(&mut self, node: NodeId) -> Result<Option<InfoId>> {
        let slot = *self
            .node_index
            .get(&node)
            .ok_or(NetworkError::DetachedNode(node))?;
        if !self.nodes[slot].is_alive() || self.nodes[slot].is_source() {
            return Ok(None);
        }

        let pending = self.pending.remove(&node).unwrap_or_default();
        if pending.is_empty() {
            return Ok(None);
        }

        let latest = pending
            .iter()
            .filter_map(|t| t.slot_in(self.id))
            .map(|s| &self.transmissions[s])
            .max_by_key(|t| t.recency())
            .map(|t| t.info());

        let stamp = self.next_stamp();
        for transmission in &pending {
            let Some(tslot) = transmission.slot_in(self.id) else {
                continue;
            };
            self.transmissions[tslot].mark_received(stamp);
            self.record(
                stamp,
                EventKind::TransmissionReceived {
                    transmission_id: transmission.to_string(),
                    destination_id: node.to_string(),
                },
            );
        }

        let Some(incoming) = latest else {
            return Ok(None);
        };
        let adoption = {
            let current = self.nodes[slot].current_info.and_then(|i| self.info(i));
            match (&self.nodes[slot].kind, self.info(incoming)) {
                (NodeKind::Agent(agent), Some(incoming_info)) => {
                    agent.replication.replicate(current, incoming_info)
                }
                _ => Adoption::Keep,
            }
        };

        debug!(%node, received = pending.len(), ?adoption, "Transmissions received");
        if adoption == Adoption::Keep {
            return Ok(None);
        }

        self.nodes[slot].current_info = Some(incoming);
        self.record(
            stamp,
            EventKind::InfoAdopted {
                node_id: node.to_string(),
                info_id: incoming.to_string(),
            },
        );
        Ok(Some(incoming))
    }

    /// Calls `receive_all` on every alive agent, returning how many adopted.
    pub fn receive_all_agents(&mut self) -> Result<usize> {
        let mut adopted = 0;
        for agent in self.agents() {
            if self.receive_all(agent)?.is_some() {
                adopted += 1;
            }
        }
        Ok(adopted)
    }

    // ------------------------------------------------------------------
    // Process support
    // ------------------------------------------------------------------

    pub(crate) fn advance_generation(&mut self, process: &str) -> u64 {
        self.generation += 1;
        let stamp = self.next_stamp();
        self.record(
            stamp,
            EventKind::GenerationAdvanced {
                generation: self.generation,
                process: process.to_string(),
            },
        );
        self.generation
    }

    /// Kills `dead` and attaches a newborn agent at its vector positions.
    ///
    /// The newborn inherits the dead agent's replication rule and is wired
    /// from every alive in-neighbour and to every alive out-neighbour. The
    /// vector from `donor` is created first and returned alongside the
    /// newborn. Nothing is changed unless every check passes.
    pub(crate) fn replace_agent(
        &mut self,
        dead: NodeId,
        donor: NodeId,
    ) -> Result<(NodeId, VectorId)> {
        let slot = self.require_alive_agent(dead)?;
        let in_neighbors = self.neighbors_in(dead)?;
        let out_neighbors = self.neighbors_out(dead)?;
        if !in_neighbors.contains(&donor) {
            return Err(TopologyFault::NoVector {
                origin: donor,
                destination: dead,
            }
            .into());
        }

        let replication: Box<dyn ReplicationRule> = match &self.nodes[slot].kind {
            NodeKind::Agent(agent) => agent.replication.duplicate(),
            NodeKind::Source(_) => Box::new(AdoptLatest),
        };

        self.kill_node(dead);
        let newborn = self.insert_node(
            NodeId::new(),
            NodeKind::Agent(AgentBehavior { replication }),
        );
        let donor_vector = self.insert_vector(donor, newborn);
        for origin in in_neighbors.into_iter().filter(|n| *n != donor) {
            self.insert_vector(origin, newborn);
        }
        for destination in out_neighbors {
            self.insert_vector(newborn, destination);
        }

        info!(%dead, %newborn, %donor, "Agent replaced by descendant");
        Ok((newborn, donor_vector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{AdoptOnce, ContentSequence, FixedContent};
    use netdrift_events::{EventType, NodeStatus, TransmissionStatus};

    fn agents(net: &mut Network, n: usize) -> Vec<NodeId> {
        (0..n).map(|_| net.add_agent(Agent::new()).unwrap()).collect()
    }

    #[test]
    fn test_add_agent_rejects_duplicate_id() {
        let mut net = Network::new();
        let id = NodeId::new();
        net.add_agent(Agent::with_id(id)).unwrap();

        let err = net.add_agent(Agent::with_id(id)).unwrap_err();
        assert_eq!(err, NetworkError::Topology(TopologyFault::DuplicateNode(id)));
        assert_eq!(net.node_count(), 1);
    }

    #[test]
    fn test_connect_is_directed_and_unique() {
        let mut net = Network::new();
        let ids = agents(&mut net, 2);

        net.connect(ids[0], ids[1]).unwrap();
        assert_eq!(net.neighbors_out(ids[0]).unwrap(), vec![ids[1]]);
        assert!(net.neighbors_out(ids[1]).unwrap().is_empty());

        let err = net.connect(ids[0], ids[1]).unwrap_err();
        assert!(matches!(err, NetworkError::DuplicateVector { .. }));

        // The reverse direction is a different vector
        net.connect(ids[1], ids[0]).unwrap();
        assert_eq!(net.vectors().count(), 2);
    }

    #[test]
    fn test_connect_requires_membership() {
        let mut net = Network::new();
        let ids = agents(&mut net, 1);
        let stranger = NodeId::new();

        let err = net.connect(ids[0], stranger).unwrap_err();
        assert_eq!(
            err,
            NetworkError::Topology(TopologyFault::UnknownNode(stranger))
        );
        assert_eq!(
            net.connect(ids[0], ids[0]).unwrap_err(),
            NetworkError::Topology(TopologyFault::SelfLoop(ids[0]))
        );
    }

    #[test]
    fn test_connect_both_checks_before_creating() {
        let mut net = Network::new();
        let ids = agents(&mut net, 2);
        net.connect(ids[1], ids[0]).unwrap();

        assert!(net.connect_both(ids[0], ids[1]).is_err());
        assert_eq!(net.vectors().count(), 1);
    }

    #[test]
    fn test_local_source_transmits_generated_info() {
        let mut net = Network::new();
        let ids = agents(&mut net, 1);
        let source = net
            .add_source_local(Source::new(FixedContent("10".to_string())), ids[0])
            .unwrap();

        let sent = net.broadcast(source).unwrap();
        assert_eq!(sent.len(), 1);

        let tx = net.transmission(sent[0]).unwrap();
        assert!(tx.is_pending());
        assert_eq!(tx.destination(), ids[0]);

        let info = net.info(tx.info()).unwrap();
        assert_eq!(info.origin(), source);
        assert_eq!(info.contents(), "10");

        // Not adopted until received
        assert!(net.current_info(ids[0]).is_none());
        net.receive_all(ids[0]).unwrap();
        assert_eq!(net.contents_of(ids[0]), Some("10"));
    }

    #[test]
    fn test_shared_emission_reuses_one_info() {
        let mut net = Network::new();
        agents(&mut net, 3);
        let source = net
            .add_source_global(Source::new(ContentSequence::new(["00", "01", "10"])))
            .unwrap();

        let sent = net.broadcast(source).unwrap();
        assert_eq!(sent.len(), 3);
        assert_eq!(net.infos().count(), 1);
        net.receive_all_agents().unwrap();
        for agent in net.agents() {
            assert_eq!(net.contents_of(agent), Some("00"));
        }
    }

    #[test]
    fn test_per_target_emission_generates_independent_infos() {
        let mut net = Network::new();
        let ids = agents(&mut net, 3);
        let source = net
            .add_source_global(
                Source::new(ContentSequence::new(["00", "01", "10"]))
                    .with_emission(Emission::PerTarget),
            )
            .unwrap();

        net.broadcast(source).unwrap();
        assert_eq!(net.infos().count(), 3);
        net.receive_all_agents().unwrap();
        assert_eq!(net.contents_of(ids[0]), Some("00"));
        assert_eq!(net.contents_of(ids[1]), Some("01"));
        assert_eq!(net.contents_of(ids[2]), Some("10"));
    }

    #[test]
    fn test_global_source_snapshot_isolation() {
        let mut net = Network::new();
        let early = agents(&mut net, 2);
        let source = net
            .add_source_global(Source::new(FixedContent("11".to_string())))
            .unwrap();
        let late = net.add_agent(Agent::new()).unwrap();

        net.broadcast(source).unwrap();

        assert!(net.pending_for(late).is_empty());
        assert_eq!(net.receive_all(late).unwrap(), None);
        assert!(net.current_info(late).is_none());
        for agent in early {
            assert_eq!(net.pending_for(agent).len(), 1);
        }
    }

    #[test]
    fn test_agent_relays_current_info() {
        let mut net = Network::new();
        let ids = agents(&mut net, 2);
        net.connect(ids[0], ids[1]).unwrap();
        let source = net
            .add_source_local(Source::new(FixedContent("01".to_string())), ids[0])
            .unwrap();

        // Nothing to relay yet
        assert_eq!(
            net.transmit(ids[0], None).unwrap_err(),
            NetworkError::UninitializedCarrier(ids[0])
        );

        net.broadcast(source).unwrap();
        let adopted = net.receive_all(ids[0]).unwrap();
        net.transmit_to(ids[0], ids[1]).unwrap();
        net.receive_all(ids[1]).unwrap();

        // Relaying forwards the same info, not a copy
        assert_eq!(net.node(ids[1]).unwrap().current_info(), adopted);
        assert_eq!(net.infos().count(), 1);
    }

    #[test]
    fn test_transmit_rejects_foreign_and_unowned_vectors() {
        let mut net = Network::new();
        let ids = agents(&mut net, 3);
        let v01 = net.connect(ids[0], ids[1]).unwrap();
        net.connect(ids[1], ids[2]).unwrap();

        let mut other = Network::new();
        let other_ids = agents(&mut other, 2);
        let foreign = other.connect(other_ids[0], other_ids[1]).unwrap();

        assert_eq!(
            net.transmit(ids[0], Some(foreign)).unwrap_err(),
            NetworkError::Topology(TopologyFault::UnknownVector(foreign))
        );
        assert_eq!(
            net.transmit(ids[1], Some(v01)).unwrap_err(),
            NetworkError::Topology(TopologyFault::VectorNotOwned {
                vector: v01,
                node: ids[1]
            })
        );
        assert!(matches!(
            net.transmit_to(ids[0], ids[2]).unwrap_err(),
            NetworkError::Topology(TopologyFault::NoVector { .. })
        ));
    }

    #[test]
    fn test_receive_all_adopts_most_recent_and_is_idempotent() {
        let mut net = Network::new();
        let ids = agents(&mut net, 1);
        let source = net
            .add_source_local(Source::new(ContentSequence::new(["00", "11"])), ids[0])
            .unwrap();

        let first = net.broadcast(source).unwrap();
        let second = net.broadcast(source).unwrap();

        let adopted = net.receive_all(ids[0]).unwrap();
        assert!(adopted.is_some());
        assert_eq!(net.contents_of(ids[0]), Some("11"));
        for tx in first.iter().chain(second.iter()) {
            let tx = net.transmission(*tx).unwrap();
            assert_eq!(tx.status(), TransmissionStatus::Received);
            assert!(tx.received().is_some());
        }

        let events_before = net.events().len();
        let received_at = net.transmission(first[0]).unwrap().received();
        assert_eq!(net.receive_all(ids[0]).unwrap(), None);
        assert_eq!(net.events().len(), events_before);
        assert_eq!(net.transmission(first[0]).unwrap().received(), received_at);
        assert_eq!(net.contents_of(ids[0]), Some("11"));
    }

    #[test]
    fn test_replication_rule_can_keep_current() {
        let mut net = Network::new();
        let agent = net
            .add_agent(Agent::new().with_replication(AdoptOnce))
            .unwrap();
        let source = net
            .add_source_local(Source::new(ContentSequence::new(["00", "11"])), agent)
            .unwrap();

        net.broadcast(source).unwrap();
        net.receive_all(agent).unwrap();
        net.broadcast(source).unwrap();

        assert_eq!(net.receive_all(agent).unwrap(), None);
        assert_eq!(net.contents_of(agent), Some("00"));
        assert!(net.pending_for(agent).is_empty());
    }

    #[test]
    fn test_receive_all_on_unknown_node_is_detached() {
        let mut net = Network::new();
        let stranger = NodeId::new();
        assert_eq!(
            net.receive_all(stranger).unwrap_err(),
            NetworkError::DetachedNode(stranger)
        );
    }

    #[test]
    fn test_source_ignores_inbound() {
        let mut net = Network::new();
        let ids = agents(&mut net, 1);
        let source = net
            .add_source_local(Source::new(FixedContent("01".to_string())), ids[0])
            .unwrap();
        net.connect(ids[0], source).unwrap();

        net.broadcast(source).unwrap();
        net.receive_all(ids[0]).unwrap();
        net.transmit_to(ids[0], source).unwrap();

        assert_eq!(net.receive_all(source).unwrap(), None);
        assert!(net.current_info(source).is_none());
    }

    #[test]
    fn test_retire_agent_fails_vectors_and_keeps_record() {
        let mut net = Network::new();
        let ids = agents(&mut net, 2);
        net.connect_both(ids[0], ids[1]).unwrap();
        let source = net
            .add_source_local(Source::new(FixedContent("01".to_string())), ids[0])
            .unwrap();
        net.broadcast(source).unwrap();
        net.receive_all(ids[0]).unwrap();

        net.retire_agent(ids[0]).unwrap();

        let node = net.node(ids[0]).unwrap();
        assert_eq!(node.status(), NodeStatus::Dead);
        assert_eq!(net.contents_of(ids[0]), Some("01"));
        assert_eq!(node.outgoing().len(), 1);
        assert!(net.neighbors_in(ids[1]).unwrap().is_empty());
        assert_eq!(net.agents(), vec![ids[1]]);
        assert_eq!(net.nodes().count(), 3);

        assert_eq!(
            net.transmit(ids[0], None).unwrap_err(),
            NetworkError::DeadNode(ids[0])
        );
        assert_eq!(
            net.retire_agent(ids[0]).unwrap_err(),
            NetworkError::DeadNode(ids[0])
        );
    }

    #[test]
    fn test_death_drops_pending_transmissions() {
        let mut net = Network::new();
        let ids = agents(&mut net, 2);
        let source = net
            .add_source_global(Source::new(FixedContent("01".to_string())))
            .unwrap();
        net.broadcast(source).unwrap();
        net.drain_events();

        net.retire_agent(ids[0]).unwrap();
        assert_eq!(net.receive_all(ids[0]).unwrap(), None);

        assert!(net.pending_for(ids[0]).is_empty());
        let dropped: Vec<_> = net
            .transmissions()
            .filter(|t| t.status() == TransmissionStatus::Dropped)
            .collect();
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].destination(), ids[0]);
        assert!(dropped[0].received().is_none());

        let snapshot = net.snapshot();
        assert_eq!(snapshot.pending_transmissions().len(), 1);
        assert_eq!(net.pending_for(ids[1]).len(), 1);

        let kinds: Vec<_> = net.drain_events().into_iter().map(|e| e.kind).collect();
        assert!(kinds
            .iter()
            .any(|k| matches!(k, EventKind::TransmissionDropped { .. })));
    }

    #[test]
    fn test_replace_agent_rewires_descendant() {
        let mut net = Network::new();
        let ids = agents(&mut net, 3);
        for &a in &ids {
            for &b in &ids {
                if a != b {
                    net.connect(a, b).unwrap();
                }
            }
        }

        let (newborn, donor_vector) = net.replace_agent(ids[0], ids[1]).unwrap();

        assert!(!net.node(ids[0]).unwrap().is_alive());
        assert_eq!(net.vector(donor_vector).unwrap().origin(), ids[1]);
        let mut ins = net.neighbors_in(newborn).unwrap();
        ins.sort_by_key(|n| n.0);
        let mut expected = vec![ids[1], ids[2]];
        expected.sort_by_key(|n| n.0);
        assert_eq!(ins, expected);
        assert_eq!(net.neighbors_out(newborn).unwrap().len(), 2);
        assert_eq!(net.agents().len(), 3);
    }

    #[test]
    fn test_replace_agent_rejects_non_neighbor_donor() {
        let mut net = Network::new();
        let ids = agents(&mut net, 3);
        net.connect(ids[1], ids[0]).unwrap();

        assert!(net.replace_agent(ids[0], ids[2]).is_err());
        assert!(net.node(ids[0]).unwrap().is_alive());
        assert_eq!(net.node_count(), 3);
    }

    #[test]
    fn test_journal_records_mutations_in_order() {
        let mut net = Network::new();
        let ids = agents(&mut net, 2);
        net.connect(ids[0], ids[1]).unwrap();

        let events = net.drain_events();
        let types: Vec<EventType> = events.iter().map(|e| e.event_type()).collect();
        assert_eq!(types, vec![EventType::Node, EventType::Node, EventType::Vector]);
        assert!(events.windows(2).all(|w| w[0].stamp < w[1].stamp));
        assert!(net.events().is_empty());

        net.set_journaling(false);
        net.add_agent(Agent::new()).unwrap();
        assert!(net.events().is_empty());
    }
}
