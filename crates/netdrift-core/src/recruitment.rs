//! Recruitment
//!
//! Recruiters bring new participants into a running network as agents.
//! Nothing here talks to an outside service: `SimulatedRecruiter` creates the
//! agents itself and `HotAirRecruiter` only reports what it would do.

use thiserror::Error;
use tracing::info;

use crate::components::{Agent, NodeId};
use crate::error::NetworkError;
use crate::network::Network;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecruitmentError {
    #[error("recruitment is closed")]
    Closed,

    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Supplies newly arriving participants.
pub trait Recruiter {
    /// Opens recruitment, returning any participants admitted on opening.
    fn open_recruitment(&mut self, network: &mut Network)
        -> Result<Vec<NodeId>, RecruitmentError>;

    fn recruit_participants(
        &mut self,
        network: &mut Network,
        n: usize,
    ) -> Result<Vec<NodeId>, RecruitmentError>;

    fn close_recruitment(&mut self);

    fn is_open(&self) -> bool;
}

/// How a simulated newcomer is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wiring {
    /// Added with no vectors
    #[default]
    Isolated,
    /// Connected both ways to every alive agent
    ConnectAll,
}

/// Adds fresh agents to the network on demand. Opening admits one.
#[derive(Debug, Default)]
pub struct SimulatedRecruiter {
    wiring: Wiring,
    open: bool,
    recruited: usize,
}

impl SimulatedRecruiter {
    pub fn new(wiring: Wiring) -> Self {
        Self {
            wiring,
            open: false,
            recruited: 0,
        }
    }

    /// Total participants admitted so far.
    pub fn recruited(&self) -> usize {
        self.recruited
    }

    fn admit(&mut self, network: &mut Network) -> Result<NodeId, NetworkError> {
        let existing = match self.wiring {
            Wiring::Isolated => Vec::new(),
            Wiring::ConnectAll => network.agents(),
        };
        let newcomer = network.add_agent(Agent::new())?;
        for agent in existing {
            network.connect_both(newcomer, agent)?;
        }
        self.recruited += 1;
        info!(%newcomer, wiring = ?self.wiring, "Participant recruited");
        Ok(newcomer)
    }
}

impl Recruiter for SimulatedRecruiter {
    fn open_recruitment(
        &mut self,
        network: &mut Network,
    ) -> Result<Vec<NodeId>, RecruitmentError> {
        self.open = true;
        self.recruit_participants(network, 1)
    }

    fn recruit_participants(
        &mut self,
        network: &mut Network,
        n: usize,
    ) -> Result<Vec<NodeId>, RecruitmentError> {
        if !self.open {
            return Err(RecruitmentError::Closed);
        }
        let mut newcomers = Vec::with_capacity(n);
        for _ in 0..n {
            newcomers.push(self.admit(network)?);
        }
        Ok(newcomers)
    }

    fn close_recruitment(&mut self) {
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

/// Talks the talk: logs every request and admits nobody.
#[derive(Debug, Default)]
pub struct HotAirRecruiter {
    open: bool,
}

impl HotAirRecruiter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Recruiter for HotAirRecruiter {
    fn open_recruitment(
        &mut self,
        _network: &mut Network,
    ) -> Result<Vec<NodeId>, RecruitmentError> {
        self.open = true;
        info!("Opening recruitment");
        Ok(Vec::new())
    }

    fn recruit_participants(
        &mut self,
        _network: &mut Network,
        n: usize,
    ) -> Result<Vec<NodeId>, RecruitmentError> {
        info!(requested = n, "Recruiting participants");
        Ok(Vec::new())
    }

    fn close_recruitment(&mut self) {
        self.open = false;
        info!("Closing recruitment");
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_recruiter_admits_on_open() {
        let mut net = Network::new();
        let mut recruiter = SimulatedRecruiter::default();

        assert_eq!(
            recruiter.recruit_participants(&mut net, 2).unwrap_err(),
            RecruitmentError::Closed
        );

        let first = recruiter.open_recruitment(&mut net).unwrap();
        assert_eq!(first.len(), 1);
        let more = recruiter.recruit_participants(&mut net, 3).unwrap();
        assert_eq!(more.len(), 3);
        assert_eq!(net.agents().len(), 4);
        assert_eq!(recruiter.recruited(), 4);
        assert_eq!(net.vectors().count(), 0);

        recruiter.close_recruitment();
        assert!(!recruiter.is_open());
        assert!(recruiter.recruit_participants(&mut net, 1).is_err());
    }

    #[test]
    fn test_connect_all_wiring() {
        let mut net = Network::new();
        let mut recruiter = SimulatedRecruiter::new(Wiring::ConnectAll);
        recruiter.open_recruitment(&mut net).unwrap();
        let ids = recruiter.recruit_participants(&mut net, 2).unwrap();

        // Three agents, every ordered pair wired
        assert_eq!(net.vectors().count(), 6);
        assert_eq!(net.neighbors_in(ids[1]).unwrap().len(), 2);
    }

    #[test]
    fn test_departure_is_a_retired_agent() {
        let mut net = Network::new();
        let mut recruiter = SimulatedRecruiter::new(Wiring::ConnectAll);
        recruiter.open_recruitment(&mut net).unwrap();
        let ids = recruiter.recruit_participants(&mut net, 1).unwrap();

        net.retire_agent(ids[0]).unwrap();
        assert_eq!(net.agents().len(), 1);
        assert!(!net.node(ids[0]).unwrap().is_alive());
    }

    #[test]
    fn test_hot_air_recruiter_adds_nobody() {
        let mut net = Network::new();
        let mut recruiter = HotAirRecruiter::new();

        assert!(recruiter.open_recruitment(&mut net).unwrap().is_empty());
        assert!(recruiter.is_open());
        assert!(recruiter
            .recruit_participants(&mut net, 5)
            .unwrap()
            .is_empty());
        recruiter.close_recruitment();
        assert_eq!(net.node_count(), 0);
    }
}
