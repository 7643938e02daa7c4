//! Processes
//!
//! A process drives a network one generation at a time. Each `step` performs
//! a single mutation and creates transmissions, but never consumes them: the
//! caller delivers to the nodes listed in the returned `StepOutcome` before
//! stepping again.
//!
//! Processes never decide when to stop. Fixation is observed from outside
//! (see `output::stats`).

pub mod cultural;
pub mod inheritance;
pub mod random_walk;
pub mod sexual;

pub use cultural::MoranProcessCultural;
pub use inheritance::Inheritance;
pub use random_walk::RandomWalkFromSource;
pub use sexual::MoranProcessSexual;

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::{InfoId, NetworkId, NodeId, TransmissionId, VectorId};
use crate::error::{NetworkError, Result, TopologyFault};
use crate::network::Network;

/// Lifecycle of a process instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Constructed, never stepped
    #[default]
    Idle,
    /// Stepped at least once
    Running,
}

/// The available dynamics.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ProcessKind {
    /// Relay one lineage of content a hop per step
    RandomWalk,
    /// Neutral Moran drift, no deaths
    #[default]
    MoranCultural,
    /// Moran replacement with death and birth
    MoranSexual,
}

impl ProcessKind {
    pub fn name(&self) -> &'static str {
        match self {
            ProcessKind::RandomWalk => "random_walk_from_source",
            ProcessKind::MoranCultural => "moran_cultural",
            ProcessKind::MoranSexual => "moran_sexual",
        }
    }

    /// Whether the dynamic kills agents.
    pub fn is_mortal(&self) -> bool {
        matches!(self, ProcessKind::MoranSexual)
    }
}

impl fmt::Display for ProcessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What one step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Generation the network reached
    pub generation: u64,
    pub transmissions: Vec<TransmissionId>,
    /// Nodes that must call `receive_all` before the next step
    pub recipients: Vec<NodeId>,
    pub died: Option<NodeId>,
    pub born: Option<NodeId>,
}

impl StepOutcome {
    pub(crate) fn relay(generation: u64, transmissions: Vec<TransmissionId>, to: NodeId) -> Self {
        Self {
            generation,
            transmissions,
            recipients: vec![to],
            died: None,
            born: None,
        }
    }

    /// Calls `receive_all` on every recipient, returning what each adopted.
    pub fn deliver(&self, network: &mut Network) -> Result<Vec<Option<InfoId>>> {
        self.recipients
            .iter()
            .map(|&node| network.receive_all(node))
            .collect()
    }
}

/// A stepping rule bound to one network.
pub trait Process: Send {
    /// Performs one mutation and advances the network's generation. On error
    /// the network is left unchanged.
    fn step(&mut self, network: &mut Network) -> Result<StepOutcome>;

    fn state(&self) -> ProcessState;

    fn kind(&self) -> ProcessKind;

    /// The network this process was constructed for.
    fn network(&self) -> NetworkId;
}

pub(crate) fn ensure_attached(process: NetworkId, network: &Network) -> Result<()> {
    if process != network.id() {
        return Err(TopologyFault::ForeignProcess.into());
    }
    Ok(())
}

/// Alive agents paired with the eligible vectors into them, skipping agents
/// that have none. Each vector comes with its origin.
pub(crate) fn eligible_agents(network: &Network) -> Vec<(NodeId, Vec<(VectorId, NodeId)>)> {
    network
        .agents()
        .into_iter()
        .filter_map(|agent| {
            let incoming: Vec<(VectorId, NodeId)> = network
                .eligible_incoming(agent)
                .into_iter()
                .map(|v| (v.id(), v.origin()))
                .collect();
            (!incoming.is_empty()).then_some((agent, incoming))
        })
        .collect()
}

/// Builds a process from configuration.
///
/// `source` is required by the random walk and ignored otherwise.
/// `inheritance` only applies to sexual Moran.
pub fn build_process<R>(
    kind: ProcessKind,
    network: &Network,
    source: Option<NodeId>,
    rng: R,
    inheritance: Inheritance,
) -> Result<Box<dyn Process>>
where
    R: Rng + Send + 'static,
{
    let process: Box<dyn Process> = match kind {
        ProcessKind::RandomWalk => {
            let source = source.ok_or(NetworkError::Topology(TopologyFault::MissingSource))?;
            Box::new(RandomWalkFromSource::new(network, source, rng)?)
        }
        ProcessKind::MoranCultural => Box::new(MoranProcessCultural::new(network, rng)),
        ProcessKind::MoranSexual => {
            Box::new(MoranProcessSexual::new(network, rng).with_inheritance(inheritance))
        }
    };
    tracing::info!(process = %kind, network = %network.id(), "Process attached");
    Ok(process)
}
