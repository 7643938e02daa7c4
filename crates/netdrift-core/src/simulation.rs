//! Configured simulation runs.
//!
//! Builds a network, a source and a process from a `SimulationConfig`, then
//! steps and delivers until the step budget runs out.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::info;

use crate::components::{NodeId, RandomBinaryString, Source};
use crate::config::{SimulationConfig, SourcePlacement};
use crate::error::NetworkError;
use crate::events::EventLogger;
use crate::network::Network;
use crate::output::{has_content_fixation, RunSummary};
use crate::processes::{build_process, Process, StepOutcome};
use crate::setup::build_topology;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("event log: {0}")]
    Io(#[from] std::io::Error),
}

/// A network with its source and process.
pub struct Simulation {
    config: SimulationConfig,
    network: Network,
    process: Box<dyn Process>,
    founders: Vec<NodeId>,
    source: NodeId,
    steps_run: u64,
}

impl Simulation {
    pub fn from_config(config: SimulationConfig) -> Result<Self, NetworkError> {
        let mut master = SmallRng::seed_from_u64(config.simulation.seed);
        let source_rng = SmallRng::seed_from_u64(master.gen());
        let process_rng = SmallRng::seed_from_u64(master.gen());

        let mut network = Network::new();
        let founders = build_topology(&mut network, config.topology.kind, config.topology.agents)?;

        let source = Source::new(RandomBinaryString::new(
            config.source.content_length,
            source_rng,
        ))
        .with_emission(config.source.emission);
        let source = match (config.source.placement, founders.first()) {
            (SourcePlacement::Local, Some(&first)) => network.add_source_local(source, first)?,
            _ => network.add_source_global(source)?,
        };

        if config.source.seed_population && config.source.placement == SourcePlacement::Global {
            network.broadcast(source)?;
            network.receive_all_agents()?;
        }

        let process = build_process(
            config.process.kind,
            &network,
            Some(source),
            process_rng,
            config.process.inheritance,
        )?;

        info!(
            seed = config.simulation.seed,
            agents = founders.len(),
            process = %config.process.kind,
            "Simulation initialized"
        );

        Ok(Self {
            config,
            network,
            process,
            founders,
            source,
            steps_run: 0,
        })
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    /// Agents created at setup.
    pub fn founders(&self) -> &[NodeId] {
        &self.founders
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn steps_run(&self) -> u64 {
        self.steps_run
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// One process step followed by delivery to its recipients.
    pub fn step(&mut self) -> Result<StepOutcome, NetworkError> {
        let outcome = self.process.step(&mut self.network)?;
        outcome.deliver(&mut self.network)?;
        self.steps_run += 1;
        Ok(outcome)
    }

    /// Steps until the budget is spent, the population fixates (when
    /// configured) or a random walk reaches a dead end. Events are drained
    /// into `logger` after setup and after every step.
    pub fn run(&mut self, logger: &mut EventLogger) -> Result<RunSummary, RunError> {
        logger.drain_from(&mut self.network)?;

        for _ in 0..self.config.simulation.steps {
            if self.config.simulation.stop_at_fixation && has_content_fixation(&self.network) {
                info!(generation = self.network.generation(), "Population fixated");
                break;
            }
            match self.step() {
                Ok(_) => {}
                Err(NetworkError::DeadEnd(carrier)) => {
                    info!(%carrier, "Walk reached a dead end");
                    break;
                }
                Err(e) => return Err(e.into()),
            }
            logger.drain_from(&mut self.network)?;
        }

        logger.flush()?;
        Ok(self.summary())
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::collect(
            &self.network,
            self.config.process.kind,
            self.config.simulation.seed,
            self.steps_run,
        )
    }
}
