//! Neutral cultural Moran process.
//!
//! Each step picks a focal agent and one of its in-neighbours, and the
//! neighbour copies its info to the focal agent. Nobody dies.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{eligible_agents, ensure_attached, Process, ProcessKind, ProcessState, StepOutcome};
use crate::components::NetworkId;
use crate::error::{NetworkError, Result};
use crate::network::Network;

pub struct MoranProcessCultural<R> {
    network: NetworkId,
    state: ProcessState,
    rng: R,
}

impl<R: Rng> MoranProcessCultural<R> {
    pub fn new(network: &Network, rng: R) -> Self {
        Self {
            network: network.id(),
            state: ProcessState::Idle,
            rng,
        }
    }
}

impl<R: Rng + Send> Process for MoranProcessCultural<R> {
    /// The focal agent is drawn uniformly from alive agents that have at
    /// least one alive in-neighbour agent holding an info, which matches
    /// resampling any alive agent until one qualifies.
    fn step(&mut self, network: &mut Network) -> Result<StepOutcome> {
        ensure_attached(self.network, network)?;

        let population = network.agents().len();
        if population == 0 {
            return Err(NetworkError::EmptyPopulation);
        }

        let candidates = eligible_agents(network);
        let (focal, incoming) = candidates
            .choose(&mut self.rng)
            .ok_or(NetworkError::NoEligibleAgent { population })?;
        let &(vector, neighbor) = incoming
            .choose(&mut self.rng)
            .ok_or(NetworkError::NoEligibleAgent { population })?;

        let transmissions = network.transmit(neighbor, Some(vector))?;
        let generation = network.advance_generation(self.kind().name());
        tracing::debug!(generation, focal = %focal, %neighbor, "Moran copy");

        self.state = ProcessState::Running;
        Ok(StepOutcome::relay(generation, transmissions, *focal))
    }

    fn state(&self) -> ProcessState {
        self.state
    }

    fn kind(&self) -> ProcessKind {
        ProcessKind::MoranCultural
    }

    fn network(&self) -> NetworkId {
        self.network
    }
}
