//! Network Setup
//!
//! Populating a network with agents and wiring the common topologies.

use serde::{Deserialize, Serialize};

use crate::components::{Agent, NodeId};
use crate::error::Result;
use crate::network::Network;

/// Agent-to-agent wiring.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// No agent-to-agent vectors
    Isolated,
    /// a1 -> a2 -> ... -> an
    Chain,
    /// A chain closed back onto its first agent
    Ring,
    /// Every ordered pair of distinct agents
    #[default]
    FullyConnected,
}

/// Adds `count` fresh agents, returned in insertion order.
pub fn populate(network: &mut Network, count: usize) -> Result<Vec<NodeId>> {
    (0..count).map(|_| network.add_agent(Agent::new())).collect()
}

pub fn chain(network: &mut Network, agents: &[NodeId]) -> Result<()> {
    for pair in agents.windows(2) {
        network.connect(pair[0], pair[1])?;
    }
    Ok(())
}

/// Needs at least three agents to close the loop; smaller groups are
/// wired as a chain.
pub fn ring(network: &mut Network, agents: &[NodeId]) -> Result<()> {
    chain(network, agents)?;
    if let (true, Some(&first), Some(&last)) = (agents.len() > 2, agents.first(), agents.last()) {
        network.connect(last, first)?;
    }
    Ok(())
}

pub fn fully_connect(network: &mut Network, agents: &[NodeId]) -> Result<()> {
    for &origin in agents {
        for &destination in agents {
            if origin != destination {
                network.connect(origin, destination)?;
            }
        }
    }
    Ok(())
}

/// Adds `count` agents wired with `topology`.
pub fn build_topology(
    network: &mut Network,
    topology: Topology,
    count: usize,
) -> Result<Vec<NodeId>> {
    let agents = populate(network, count)?;
    match topology {
        Topology::Isolated => {}
        Topology::Chain => chain(network, &agents)?,
        Topology::Ring => ring(network, &agents)?,
        Topology::FullyConnected => fully_connect(network, &agents)?,
    }
    tracing::debug!(?topology, agents = count, "Topology built");
    Ok(agents)
}
