//! Statistics Output
//!
//! Fixation measures over the alive population and the run summary the
//! binary writes at the end of a run.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::components::NodeId;
use crate::network::Network;
use crate::processes::ProcessKind;

/// Contents held by alive agents, in agent insertion order. Agents that have
/// not received anything yet are skipped.
pub fn alive_contents(network: &Network) -> Vec<String> {
    network
        .agents()
        .into_iter()
        .filter_map(|agent| network.contents_of(agent).map(str::to_string))
        .collect()
}

/// How many alive agents hold each content.
pub fn content_frequencies(network: &Network) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for contents in alive_contents(network) {
        *counts.entry(contents).or_insert(0) += 1;
    }
    counts
}

/// The content every alive agent holds, if they all hold the same one.
pub fn fixed_content(network: &Network) -> Option<String> {
    let agents = network.agents();
    let first = agents.first().and_then(|a| network.contents_of(*a))?;
    agents
        .iter()
        .all(|a| network.contents_of(*a) == Some(first))
        .then(|| first.to_string())
}

/// True once every alive agent holds content-equal info.
pub fn has_content_fixation(network: &Network) -> bool {
    fixed_content(network).is_some()
}

/// True when none of `nodes` is still alive.
pub fn all_dead(network: &Network, nodes: &[NodeId]) -> bool {
    nodes
        .iter()
        .all(|n| network.node(*n).map_or(true, |node| !node.is_alive()))
}

/// End-of-run summary
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub process: ProcessKind,
    pub seed: u64,
    pub steps_run: u64,
    pub generation: u64,
    pub alive_agents: usize,
    pub dead_agents: usize,
    pub infos: usize,
    pub transmissions: usize,
    pub content_frequencies: BTreeMap<String, usize>,
    pub fixed_content: Option<String>,
}

impl RunSummary {
    pub fn collect(network: &Network, process: ProcessKind, seed: u64, steps_run: u64) -> Self {
        let dead_agents = network
            .nodes()
            .filter(|n| n.is_agent() && !n.is_alive())
            .count();
        Self {
            process,
            seed,
            steps_run,
            generation: network.generation(),
            alive_agents: network.agents().len(),
            dead_agents,
            infos: network.infos().count(),
            transmissions: network.transmissions().count(),
            content_frequencies: content_frequencies(network),
            fixed_content: fixed_content(network),
        }
    }

    /// Print summary to stdout
    pub fn print_summary(&self) {
        println!("\n=== Run Summary ===");
        println!("Process: {}", self.process);
        println!("Seed: {}", self.seed);
        println!("Steps run: {}", self.steps_run);
        println!("Alive agents: {}", self.alive_agents);
        println!("Dead agents: {}", self.dead_agents);
        println!("Infos created: {}", self.infos);
        println!("Transmissions: {}", self.transmissions);

        println!("\nContent frequencies:");
        let mut sorted: Vec<_> = self.content_frequencies.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(a.1));
        for (contents, count) in sorted {
            println!("  {}: {}", contents, count);
        }

        match &self.fixed_content {
            Some(contents) => println!("\nFixated on {}", contents),
            None => println!("\nNo fixation"),
        }
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Agent, ContentSequence, Emission, Source};

    fn seeded(contents: &[&str]) -> (Network, Vec<NodeId>) {
        let mut net = Network::new();
        let ids: Vec<NodeId> = contents
            .iter()
            .map(|_| net.add_agent(Agent::new()).unwrap())
            .collect();
        let source = net
            .add_source_global(
                Source::new(ContentSequence::new(contents.iter().copied()))
                    .with_emission(Emission::PerTarget),
            )
            .unwrap();
        net.broadcast(source).unwrap();
        net.receive_all_agents().unwrap();
        (net, ids)
    }

    #[test]
    fn test_frequencies_and_fixation() {
        let (net, _) = seeded(&["01", "01", "10"]);
        let freq = content_frequencies(&net);
        assert_eq!(freq.get("01"), Some(&2));
        assert_eq!(freq.get("10"), Some(&1));
        assert!(!has_content_fixation(&net));

        let (net, _) = seeded(&["11", "11"]);
        assert_eq!(fixed_content(&net), Some("11".to_string()));
    }

    #[test]
    fn test_unseeded_population_is_not_fixated() {
        let mut net = Network::new();
        net.add_agent(Agent::new()).unwrap();
        assert!(!has_content_fixation(&net));
        assert!(alive_contents(&net).is_empty());
    }

    #[test]
    fn test_all_dead() {
        let (mut net, ids) = seeded(&["01", "10"]);
        assert!(!all_dead(&net, &ids));
        net.retire_agent(ids[0]).unwrap();
        assert!(!all_dead(&net, &ids));
        net.retire_agent(ids[1]).unwrap();
        assert!(all_dead(&net, &ids));
    }

    #[test]
    fn test_summary_serializes() {
        let (net, _) = seeded(&["01", "10"]);
        let summary = RunSummary::collect(&net, ProcessKind::MoranCultural, 42, 0);
        assert_eq!(summary.alive_agents, 2);
        assert_eq!(summary.infos, 2);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        summary.write_json(&path).unwrap();
        let json = std::fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"moran_cultural\""));
    }
}
