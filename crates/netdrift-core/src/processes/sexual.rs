//! Sexual Moran process.
//!
//! Each step kills a focal agent and replaces it with a newborn that takes
//! over its vector positions. The newborn's content comes from two parents
//! drawn from the dead agent's in-neighbours and reaches it through a
//! transmission along a parent's new vector.

use rand::seq::SliceRandom;
use rand::Rng;

use super::inheritance::{Inheritance, Offspring};
use super::{eligible_agents, ensure_attached, Process, ProcessKind, ProcessState, StepOutcome};
use crate::components::{InfoId, NetworkId, NodeId};
use crate::error::{NetworkError, Result};
use crate::network::Network;

pub struct MoranProcessSexual<R> {
    network: NetworkId,
    state: ProcessState,
    inheritance: Inheritance,
    rng: R,
}

impl<R: Rng> MoranProcessSexual<R> {
    pub fn new(network: &Network, rng: R) -> Self {
        Self {
            network: network.id(),
            state: ProcessState::Idle,
            inheritance: Inheritance::default(),
            rng,
        }
    }

    pub fn with_inheritance(mut self, inheritance: Inheritance) -> Self {
        self.inheritance = inheritance;
        self
    }

    pub fn inheritance(&self) -> Inheritance {
        self.inheritance
    }
}

impl<R: Rng + Send> Process for MoranProcessSexual<R> {
    fn step(&mut self, network: &mut Network) -> Result<StepOutcome> {
        ensure_attached(self.network, network)?;

        let population = network.agents().len();
        if population == 0 {
            return Err(NetworkError::EmptyPopulation);
        }

        let candidates = eligible_agents(network);
        let (dead, incoming) = candidates
            .choose(&mut self.rng)
            .ok_or(NetworkError::InsufficientNeighbors { population })?;
        let dead = *dead;

        // Origins are distinct: there is one vector per ordered pair
        let parents: Vec<NodeId> = if incoming.len() >= 2 {
            incoming
                .choose_multiple(&mut self.rng, 2)
                .map(|&(_, origin)| origin)
                .collect()
        } else {
            let (_, only) = incoming[0];
            vec![only, only]
        };

        let mut infos: Vec<InfoId> = Vec::with_capacity(2);
        for parent in &parents {
            let info = network
                .node(*parent)
                .and_then(|n| n.current_info())
                .ok_or(NetworkError::InsufficientNeighbors { population })?;
            infos.push(info);
        }

        let offspring = {
            let (Some(first), Some(second)) = (network.info(infos[0]), network.info(infos[1]))
            else {
                return Err(NetworkError::InsufficientNeighbors { population });
            };
            self.inheritance.inherit([first, second], &mut self.rng)
        };
        let donor = match offspring {
            Offspring::Copy(i) => parents[i],
            Offspring::Recombined(_) => parents[0],
        };

        // Every check is done; from here on the step cannot fail halfway
        let (newborn, donor_vector) = network.replace_agent(dead, donor)?;
        let info = match offspring {
            Offspring::Copy(i) => infos[i],
            Offspring::Recombined(contents) => network.create_info(parents[0], contents),
        };
        let transmission = network.send_info(donor_vector, donor, newborn, info);
        let generation = network.advance_generation(self.kind().name());
        tracing::debug!(
            generation,
            %dead,
            %newborn,
            mother = %parents[0],
            father = %parents[1],
            "Moran replacement"
        );

        self.state = ProcessState::Running;
        Ok(StepOutcome {
            generation,
            transmissions: vec![transmission],
            recipients: vec![newborn],
            died: Some(dead),
            born: Some(newborn),
        })
    }

    fn state(&self) -> ProcessState {
        self.state
    }

    fn kind(&self) -> ProcessKind {
        ProcessKind::MoranSexual
    }

    fn network(&self) -> NetworkId {
        self.network
    }
}
