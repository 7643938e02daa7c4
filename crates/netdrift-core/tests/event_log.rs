//! Event log and snapshot output tests

use netdrift_core::{EventLogger, Simulation, SimulationConfig};
use netdrift_events::{EventKind, EventType, NetworkEvent, NetworkSnapshot};
use std::fs;

#[test]
fn test_run_writes_complete_journal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.jsonl");

    let mut config = SimulationConfig::default();
    config.simulation.steps = 10;
    let mut sim = Simulation::from_config(config).unwrap();
    {
        let mut logger = EventLogger::new(&path).unwrap();
        sim.run(&mut logger).unwrap();
    }

    let events: Vec<NetworkEvent> = fs::read_to_string(&path)
        .unwrap()
        .lines()
        .map(|line| NetworkEvent::from_jsonl(line).unwrap())
        .collect();

    // Ids count up from one with no gaps
    for (i, event) in events.iter().enumerate() {
        assert_eq!(event.event_id, format!("evt_{:08}", i + 1));
    }
    assert!(events.windows(2).all(|w| w[0].stamp <= w[1].stamp));

    let generations = events
        .iter()
        .filter(|e| e.event_type() == EventType::Generation)
        .count();
    assert_eq!(generations, 10);

    let nodes_created = events
        .iter()
        .filter(|e| matches!(e.kind, EventKind::NodeCreated { .. }))
        .count();
    // Three agents and the source
    assert_eq!(nodes_created, 4);
}

#[test]
fn test_snapshot_export_matches_network() {
    let mut config = SimulationConfig::default();
    config.process.kind = netdrift_core::ProcessKind::MoranSexual;
    config.simulation.steps = 5;
    let mut sim = Simulation::from_config(config).unwrap();
    sim.run(&mut EventLogger::null()).unwrap();

    let network = sim.network();
    let snapshot = network.snapshot();
    assert_eq!(snapshot.generation, 5);
    assert_eq!(snapshot.nodes.len(), network.node_count());
    assert_eq!(snapshot.alive_agents().len(), 3);
    assert!(snapshot.pending_transmissions().is_empty());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    fs::write(&path, snapshot.to_json().unwrap()).unwrap();
    let restored = NetworkSnapshot::from_json(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(restored.nodes.len(), snapshot.nodes.len());
    assert_eq!(restored.to_json().unwrap(), snapshot.to_json().unwrap());
}

#[test]
fn test_sample_snapshot_fixture_loads() {
    let snapshot = netdrift_events::fixtures::sample_snapshot();
    assert_eq!(snapshot.alive_agents().len(), 3);
    for agent in snapshot.alive_agents() {
        let contents = snapshot.contents_of(&agent.node_id).unwrap();
        assert!(netdrift_events::fixtures::sample_seed_contents()
            .iter()
            .any(|seed| seed == contents));
    }
}
