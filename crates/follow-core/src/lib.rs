//! Follow Graph Simulation Library
//!
//! Simulates who follows whom among a set of personas grouped into
//! factions. Each unordered pair of personas is evaluated once; reach
//! within the faction, reach overall and directional faction affinity
//! decide, against a dice roll, whether each follows the other.
//!
//! # Modules
//!
//! - [`components`]: persona index and faction affinity table
//! - [`systems`]: dice, the follow decision, and the pairwise run
//! - [`setup`]: input loading and the roster
//! - [`output`]: run statistics and the JSON output writer
//! - [`config`]: TOML run configuration

use thiserror::Error;

pub mod components;
pub mod config;
pub mod output;
pub mod setup;
pub mod simulation;
pub mod systems;

pub use components::{AffinityTable, Persona, PersonaIndex};
pub use config::{default_config_toml, Config, ConfigError, FollowConfig};
pub use output::{OutputError, OutputWriter};
pub use setup::{LoadError, Roster};
pub use simulation::{Simulation, SimulationResult};
pub use systems::{
    Decision, DecisionError, Dice, FollowDecider, FollowRng, PairEvaluation, PairwiseRun,
    RunOutcome, ScriptedDice,
};

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Load error: {0}")]
    Load(#[from] LoadError),
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}
