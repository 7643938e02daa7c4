//! Random walk from a local source.
//!
//! A single carrier hops along one uniformly chosen outgoing vector per step,
//! relaying the content it holds. The walk begins at the source itself, so
//! the first step draws fresh content and hands it to the source's only
//! target.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{ensure_attached, Process, ProcessKind, ProcessState, StepOutcome};
use crate::components::{NetworkId, NodeId, VectorId};
use crate::error::{NetworkError, Result, TopologyFault};
use crate::network::Network;

pub struct RandomWalkFromSource<R> {
    network: NetworkId,
    source: NodeId,
    carrier: NodeId,
    state: ProcessState,
    rng: R,
}

impl<R: Rng> RandomWalkFromSource<R> {
    /// Fails unless `source` is a source with exactly one active outgoing
    /// vector.
    pub fn new(network: &Network, source: NodeId, rng: R) -> Result<Self> {
        let node = network
            .node(source)
            .ok_or(TopologyFault::UnknownNode(source))?;
        if !node.is_source() {
            return Err(TopologyFault::NotASource(source).into());
        }
        let found = network.outgoing_vectors(source)?.len();
        if found != 1 {
            return Err(TopologyFault::NotLocalSource {
                node: source,
                found,
            }
            .into());
        }

        Ok(Self {
            network: network.id(),
            source,
            carrier: source,
            state: ProcessState::Idle,
            rng,
        })
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    /// The node that transmits on the next step.
    pub fn carrier(&self) -> NodeId {
        self.carrier
    }
}

impl<R: Rng + Send> Process for RandomWalkFromSource<R> {
    fn step(&mut self, network: &mut Network) -> Result<StepOutcome> {
        ensure_attached(self.network, network)?;

        let carrier = network
            .node(self.carrier)
            .ok_or(NetworkError::DetachedNode(self.carrier))?;
        if !carrier.is_alive() {
            return Err(NetworkError::DeadNode(self.carrier));
        }
        let uninitialized = carrier.is_agent() && carrier.current_info().is_none();

        let options: Vec<(VectorId, NodeId)> = network
            .outgoing_vectors(self.carrier)?
            .into_iter()
            .map(|v| (v.id(), v.destination()))
            .collect();
        let &(vector, destination) = options
            .choose(&mut self.rng)
            .ok_or(NetworkError::DeadEnd(self.carrier))?;
        if uninitialized {
            return Err(NetworkError::UninitializedCarrier(self.carrier));
        }

        let transmissions = network.transmit(self.carrier, Some(vector))?;
        let generation = network.advance_generation(self.kind().name());
        tracing::debug!(
            generation,
            from = %self.carrier,
            to = %destination,
            "Carrier advanced"
        );

        self.carrier = destination;
        self.state = ProcessState::Running;
        Ok(StepOutcome::relay(generation, transmissions, destination))
    }

    fn state(&self) -> ProcessState {
        self.state
    }

    fn kind(&self) -> ProcessKind {
        ProcessKind::RandomWalk
    }

    fn network(&self) -> NetworkId {
        self.network
    }
}
