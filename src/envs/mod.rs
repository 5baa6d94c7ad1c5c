//! Multi-agent reinforcement learning environments
mod builder;
mod particle;
#[cfg(test)]
pub mod testing;

pub use builder::{BuildEnv, BuildEnvError};
pub use particle::{MultiAgentStep, ParticleEnv, ParticleEnvConfig};

use crate::spaces::Space;
use thiserror::Error;

/// The external structure of a multi-agent environment.
pub trait EnvStructure {
    type ObservationSpace: Space;
    type ActionSpace: Space;

    /// Number of agents acting in the environment.
    fn num_agents(&self) -> usize;

    /// Space containing all possible observations of an agent.
    ///
    /// This is not required to be tight:
    /// the space may contain elements that can never be produced as an observation.
    fn observation_space(&self, agent: usize) -> Self::ObservationSpace;

    /// The space of all possible actions of an agent.
    fn action_space(&self, agent: usize) -> Self::ActionSpace;

    /// A lower and upper bound on possible reward values.
    fn reward_range(&self) -> (f64, f64);

    /// A discount factor applied to future rewards.
    ///
    /// A value between `0` and `1`, inclusive.
    fn discount_factor(&self) -> f64;
}

/// Error taking an environment step.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum StepError {
    #[error("expected one action for each of the {expected} agents, got {actual}")]
    ActionCount { expected: usize, actual: usize },
    #[error("the episode is done; reset the environment before stepping")]
    EpisodeDone,
}
