//! Process behaviour tests
//!
//! Each dynamic is stepped on a small network with a seeded RNG and checked
//! against the property it is meant to produce.

use netdrift_core::output::{all_dead, alive_contents, fixed_content};
use netdrift_core::setup::{chain, fully_connect, populate};
use netdrift_core::{
    Emission, Inheritance, MoranProcessCultural, MoranProcessSexual, Network, NodeId, Process,
    RandomWalkFromSource, Source,
};
use netdrift_events::NodeStatus;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::HashSet;

/// Three fully connected agents, each seeded with an independent random
/// binary string by a global source.
fn seeded_triangle(seed: u64) -> (Network, Vec<NodeId>, Vec<String>) {
    let mut net = Network::new();
    net.set_journaling(false);
    let agents = populate(&mut net, 3).unwrap();
    fully_connect(&mut net, &agents).unwrap();

    let source = net
        .add_source_global(
            Source::random_binary(SmallRng::seed_from_u64(seed))
                .with_emission(Emission::PerTarget),
        )
        .unwrap();
    net.broadcast(source).unwrap();
    for agent in &agents {
        net.receive_all(*agent).unwrap();
    }

    let seeds = alive_contents(&net);
    assert_eq!(seeds.len(), 3);
    (net, agents, seeds)
}

#[test]
fn test_random_walk_preserves_content_end_to_end() {
    let mut net = Network::new();
    let agents = populate(&mut net, 3).unwrap();
    chain(&mut net, &agents).unwrap();
    let source = net
        .add_source_local(Source::random_binary(SmallRng::seed_from_u64(7)), agents[0])
        .unwrap();

    let mut walk = RandomWalkFromSource::new(&net, source, SmallRng::seed_from_u64(8)).unwrap();
    for agent in &agents {
        walk.step(&mut net).unwrap();
        net.receive_all(*agent).unwrap();
    }

    let first = net.current_info(agents[0]).unwrap();
    let last = net.current_info(agents[2]).unwrap();
    assert_eq!(first.contents().len(), 2);
    assert_eq!(last.contents(), first.contents());
    // The same info, relayed, not a lookalike
    assert_eq!(last.id(), first.id());
}

#[test]
fn test_cultural_moran_fixates() {
    for seed in [1, 2, 3] {
        let (mut net, agents, seeds) = seeded_triangle(seed);
        let mut moran = MoranProcessCultural::new(&net, SmallRng::seed_from_u64(seed + 100));

        for _ in 0..100 {
            let outcome = moran.step(&mut net).unwrap();
            outcome.deliver(&mut net).unwrap();
        }

        let fixed = fixed_content(&net).expect("population should fixate");
        assert!(seeds.contains(&fixed));
        assert_eq!(net.agents(), agents, "no agent dies in cultural drift");
        assert_eq!(net.generation(), 100);
    }
}

#[test]
fn test_sexual_moran_replaces_every_founder() {
    for seed in [1, 2, 3] {
        let (mut net, founders, seeds) = seeded_triangle(seed);
        let mut moran = MoranProcessSexual::new(&net, SmallRng::seed_from_u64(seed + 200));

        for _ in 0..100 {
            let outcome = moran.step(&mut net).unwrap();
            outcome.deliver(&mut net).unwrap();
        }

        assert!(all_dead(&net, &founders));
        for founder in &founders {
            assert_eq!(net.node(*founder).unwrap().status(), NodeStatus::Dead);
            assert!(net.contents_of(*founder).is_some());
        }

        let alive = net.agents();
        assert_eq!(alive.len(), 3);
        for agent in alive {
            let contents = net.contents_of(agent).unwrap().to_string();
            assert!(seeds.contains(&contents));
        }
    }
}

#[test]
fn test_sexual_moran_crossover_keeps_shape() {
    let (mut net, _, _) = seeded_triangle(5);
    let mut moran = MoranProcessSexual::new(&net, SmallRng::seed_from_u64(6))
        .with_inheritance(Inheritance::UniformCrossover);

    for _ in 0..30 {
        moran.step(&mut net).unwrap().deliver(&mut net).unwrap();
    }

    for contents in alive_contents(&net) {
        assert_eq!(contents.len(), 2);
        assert!(contents.chars().all(|c| c == '0' || c == '1'));
    }
}

#[test]
fn test_vectors_stay_unique_through_replacement() {
    let (mut net, _, _) = seeded_triangle(9);
    let mut moran = MoranProcessSexual::new(&net, SmallRng::seed_from_u64(10));
    for _ in 0..20 {
        moran.step(&mut net).unwrap().deliver(&mut net).unwrap();
    }

    let mut pairs = HashSet::new();
    for vector in net.vectors() {
        assert!(pairs.insert((vector.origin(), vector.destination())));
    }
    // Every active vector joins alive nodes
    for vector in net.vectors().filter(|v| v.is_active()) {
        assert!(net.node(vector.origin()).unwrap().is_alive());
        assert!(net.node(vector.destination()).unwrap().is_alive());
    }
}

#[test]
fn test_info_contents_never_change() {
    let (mut net, _, _) = seeded_triangle(4);
    let before: Vec<(String, String)> = net
        .infos()
        .map(|i| (i.id().to_string(), i.contents().to_string()))
        .collect();

    let mut moran = MoranProcessCultural::new(&net, SmallRng::seed_from_u64(4));
    for _ in 0..50 {
        moran.step(&mut net).unwrap().deliver(&mut net).unwrap();
    }

    for (id, contents) in before {
        let info = net.infos().find(|i| i.id().to_string() == id).unwrap();
        assert_eq!(info.contents(), contents);
    }
    // Cultural drift relays existing infos only
    assert_eq!(net.infos().count(), 3);
}
