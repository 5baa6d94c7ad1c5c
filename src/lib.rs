//! Multi-agent particle environments.
//!
//! Agents and landmarks are discs in a 2D world with simple contact physics.
//! A [`Scenario`] populates the world and defines each agent's observation and reward;
//! a [`ParticleEnv`] runs the joint step loop.
#![warn(clippy::cast_lossless)]
#![warn(clippy::cast_possible_truncation)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::missing_const_for_fn)] // has some false positives
#![warn(clippy::needless_borrow)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::use_self)] // also triggered by macro expansions
pub mod envs;
mod error;
pub mod logging;
pub mod scenarios;
pub mod simulation;
pub mod spaces;
pub mod utils;
pub mod world;

pub use envs::{BuildEnv, BuildEnvError, EnvStructure, ParticleEnv, ParticleEnvConfig, StepError};
pub use error::ParticleEnvError;
pub use scenarios::{Scenario, ScenarioConfig};
pub use simulation::{run_random_episodes, RolloutSummary};
pub use world::{Move, World};

/// Pseudo-random number generator type used by environments.
pub type Prng = rand_chacha::ChaCha8Rng;
