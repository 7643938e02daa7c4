//! Network Information Diffusion Engine
//!
//! Nodes exchange content along directed vectors while a process steps the
//! network through random-walk relay or Moran dynamics.

pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod network;
pub mod output;
pub mod processes;
pub mod recruitment;
pub mod setup;
pub mod simulation;

pub use components::*;
pub use config::{default_config_toml, ConfigError, SimulationConfig, SourcePlacement};
pub use error::{NetworkError, Result, TopologyFault};
pub use events::EventLogger;
pub use network::{Network, SharedNetwork};
pub use processes::{
    build_process, Inheritance, MoranProcessCultural, MoranProcessSexual, Process, ProcessKind,
    ProcessState, RandomWalkFromSource, StepOutcome,
};
pub use recruitment::{HotAirRecruiter, Recruiter, RecruitmentError, SimulatedRecruiter, Wiring};
pub use setup::Topology;
pub use simulation::{RunError, Simulation};
