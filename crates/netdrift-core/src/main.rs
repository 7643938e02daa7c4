//! netdrift
//!
//! Runs a configured diffusion process and writes the event log, the final
//! network snapshot and a run summary.

use anyhow::Context;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use netdrift_core::{
    default_config_toml, EventLogger, Inheritance, ProcessKind, Simulation, SimulationConfig,
    SourcePlacement, Topology,
};

/// Command line arguments for a run
#[derive(Parser, Debug)]
#[command(name = "netdrift")]
#[command(about = "Information diffusion and Moran dynamics on networks")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of process steps
    #[arg(long)]
    steps: Option<u64>,

    /// Number of agents
    #[arg(long)]
    agents: Option<usize>,

    #[arg(long, value_enum)]
    topology: Option<Topology>,

    #[arg(long, value_enum)]
    process: Option<ProcessKind>,

    #[arg(long, value_enum)]
    inheritance: Option<Inheritance>,

    /// Source placement; a random walk defaults to local
    #[arg(long, value_enum)]
    placement: Option<SourcePlacement>,

    /// Stop as soon as every alive agent holds the same content
    #[arg(long)]
    stop_at_fixation: bool,

    /// Output directory
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut SimulationConfig) {
        if let Some(seed) = self.seed {
            config.simulation.seed = seed;
        }
        if let Some(steps) = self.steps {
            config.simulation.steps = steps;
        }
        if let Some(agents) = self.agents {
            config.topology.agents = agents;
        }
        if let Some(topology) = self.topology {
            config.topology.kind = topology;
        }
        if let Some(process) = self.process {
            config.process.kind = process;
            if process == ProcessKind::RandomWalk && self.placement.is_none() {
                config.source.placement = SourcePlacement::Local;
            }
        }
        if let Some(placement) = self.placement {
            config.source.placement = placement;
        }
        if let Some(inheritance) = self.inheritance {
            config.process.inheritance = inheritance;
        }
        if self.stop_at_fixation {
            config.simulation.stop_at_fixation = true;
        }
        if let Some(output) = &self.output {
            config.output.directory = output.clone();
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if args.print_default_config {
        print!("{}", default_config_toml());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;

    println!("netdrift");
    println!("========");
    println!("Seed: {}", config.simulation.seed);
    println!("Process: {}", config.process.kind);
    println!(
        "Topology: {:?} with {} agents",
        config.topology.kind, config.topology.agents
    );
    println!("Steps: {}", config.simulation.steps);
    println!();

    fs::create_dir_all(&config.output.directory)
        .with_context(|| format!("creating {}", config.output.directory.display()))?;

    let mut logger = match config.output.events_path() {
        Some(path) => EventLogger::new(&path)
            .with_context(|| format!("opening event log {}", path.display()))?,
        None => EventLogger::null(),
    };

    let output = config.output.clone();
    let mut simulation = Simulation::from_config(config)?;
    let summary = simulation.run(&mut logger)?;

    let snapshot = simulation.network().snapshot();
    fs::write(output.snapshot_path(), snapshot.to_json()?)
        .with_context(|| format!("writing {}", output.snapshot_path().display()))?;
    summary.write_json(output.summary_path())?;

    summary.print_summary();
    println!("\nEvents logged: {}", logger.event_count());
    println!("Output written to {}", output.directory.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(argv: &[&str]) -> SimulationConfig {
        let args = Args::try_parse_from(argv).unwrap();
        let mut config = SimulationConfig::default();
        args.apply(&mut config);
        config
    }

    #[test]
    fn test_no_arguments_is_valid() {
        assert!(configured(&["netdrift"]).validate().is_ok());
    }

    #[test]
    fn test_random_walk_flag_places_source_locally() {
        let config = configured(&["netdrift", "--process", "random-walk"]);
        assert_eq!(config.source.placement, SourcePlacement::Local);
        assert!(config.validate().is_ok());
        assert!(Simulation::from_config(config).is_ok());
    }

    #[test]
    fn test_explicit_placement_wins() {
        let config = configured(&[
            "netdrift",
            "--process",
            "random-walk",
            "--placement",
            "global",
        ]);
        assert_eq!(config.source.placement, SourcePlacement::Global);
        assert!(config.validate().is_err());
    }
}
