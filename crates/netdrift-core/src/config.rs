//! Configuration loading for simulation runs.
//!
//! Every section and field has a default, so an empty file is a valid
//! configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::components::Emission;
use crate::processes::{Inheritance, ProcessKind};
use crate::setup::Topology;

/// Complete run configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub simulation: RunConfig,
    #[serde(default)]
    pub topology: TopologyConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub process: ProcessConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl SimulationConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Rejects combinations the run cannot start from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.topology.agents == 0 {
            return Err(ConfigError::Invalid(
                "topology.agents must be at least 1".to_string(),
            ));
        }
        if self.source.content_length == 0 {
            return Err(ConfigError::Invalid(
                "source.content_length must be at least 1".to_string(),
            ));
        }
        if self.process.kind == ProcessKind::RandomWalk
            && self.source.placement != SourcePlacement::Local
        {
            return Err(ConfigError::Invalid(
                "the random walk needs source.placement = \"local\"".to_string(),
            ));
        }
        Ok(())
    }
}

/// General run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Seed for every random draw in the run
    pub seed: u64,
    /// Maximum number of process steps
    pub steps: u64,
    /// Stop early once the alive population is fixated
    pub stop_at_fixation: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            steps: 100,
            stop_at_fixation: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
    pub kind: Topology,
    pub agents: usize,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            kind: Topology::FullyConnected,
            agents: 3,
        }
    }
}

/// Where the source attaches.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum SourcePlacement {
    /// One vector, to the first agent
    Local,
    /// One vector to every agent present at setup
    #[default]
    Global,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub placement: SourcePlacement,
    pub emission: Emission,
    /// Length of the random binary strings the source emits
    pub content_length: usize,
    /// Broadcast once and deliver before the first step (global sources)
    pub seed_population: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            placement: SourcePlacement::Global,
            emission: Emission::PerTarget,
            content_length: 2,
            seed_population: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessConfig {
    pub kind: ProcessKind,
    pub inheritance: Inheritance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    /// JSONL event log; omitted to disable
    pub events_file: Option<String>,
    pub snapshot_file: String,
    pub summary_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            events_file: Some("events.jsonl".to_string()),
            snapshot_file: "snapshot.json".to_string(),
            summary_file: "summary.json".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn events_path(&self) -> Option<PathBuf> {
        self.events_file.as_ref().map(|f| self.directory.join(f))
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.directory.join(&self.snapshot_file)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.directory.join(&self.summary_file)
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# netdrift run configuration

[simulation]
seed = 42
steps = 100
stop_at_fixation = false

[topology]
kind = "fully_connected"
agents = 3

[source]
placement = "global"
emission = "per_target"
content_length = 2
seed_population = true

[process]
kind = "moran_cultural"
inheritance = "copy_parent"

[output]
directory = "output"
events_file = "events.jsonl"
snapshot_file = "snapshot.json"
summary_file = "summary.json"
"#
    .to_string()
}
