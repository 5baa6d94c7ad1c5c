//! Particle world scenarios.
//!
//! A scenario populates a [`World`], randomizes it at the start of each episode and
//! defines what each agent observes and how it is rewarded.
mod roster;
mod search_and_rescue;
pub mod shaping;
mod team_push;

pub use roster::AgentCounts;
pub use search_and_rescue::SearchAndRescue;
pub use team_push::TeamPush;

use crate::envs::BuildEnvError;
use crate::world::World;
use crate::Prng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Configuration of agents, landmarks, observations and rewards for one environment variant.
///
/// Observations and rewards are pure functions of the world state.
/// Agent arguments are indices into [`World::agents`]; out-of-range indices panic.
pub trait Scenario {
    /// Create the world and perform an initial reset.
    fn make_world(&self, rng: &mut Prng) -> Result<World, BuildEnvError>;

    /// Randomize the world state in place for a new episode.
    fn reset_world(&self, world: &mut World, rng: &mut Prng);

    /// Reward for an agent in the current world state.
    fn reward(&self, agent: usize, world: &World) -> f64;

    /// Observation vector for an agent in the current world state.
    fn observation(&self, agent: usize, world: &World) -> Vec<f64>;

    /// Benchmark statistic for an agent.
    fn benchmark_data(&self, _agent: usize, _world: &World) -> u64 {
        0
    }
}

impl<S: Scenario + ?Sized> Scenario for Box<S> {
    fn make_world(&self, rng: &mut Prng) -> Result<World, BuildEnvError> {
        S::make_world(self, rng)
    }
    fn reset_world(&self, world: &mut World, rng: &mut Prng) {
        S::reset_world(self, world, rng)
    }
    fn reward(&self, agent: usize, world: &World) -> f64 {
        S::reward(self, agent, world)
    }
    fn observation(&self, agent: usize, world: &World) -> Vec<f64> {
        S::observation(self, agent, world)
    }
    fn benchmark_data(&self, agent: usize, world: &World) -> u64 {
        S::benchmark_data(self, agent, world)
    }
}

/// Any of the available scenarios, selected by name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ScenarioConfig {
    SearchAndRescue(SearchAndRescue),
    TeamPush(TeamPush),
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::SearchAndRescue(SearchAndRescue::default())
    }
}

impl ScenarioConfig {
    /// Names of all available scenarios.
    pub const NAMES: [&'static str; 2] = ["search_and_rescue", "team_push"];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::SearchAndRescue(_) => Self::NAMES[0],
            Self::TeamPush(_) => Self::NAMES[1],
        }
    }

    fn inner(&self) -> &dyn Scenario {
        match self {
            Self::SearchAndRescue(s) => s,
            Self::TeamPush(s) => s,
        }
    }
}

impl fmt::Display for ScenarioConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error parsing a scenario name.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
#[error("unknown scenario `{0}`; expected one of search_and_rescue, team_push")]
pub struct ParseScenarioError(pub String);

/// Parse a scenario name into its default configuration.
impl FromStr for ScenarioConfig {
    type Err = ParseScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "search_and_rescue" => Ok(Self::SearchAndRescue(SearchAndRescue::default())),
            "team_push" => Ok(Self::TeamPush(TeamPush::default())),
            _ => Err(ParseScenarioError(s.into())),
        }
    }
}

impl Scenario for ScenarioConfig {
    fn make_world(&self, rng: &mut Prng) -> Result<World, BuildEnvError> {
        self.inner().make_world(rng)
    }
    fn reset_world(&self, world: &mut World, rng: &mut Prng) {
        self.inner().reset_world(world, rng)
    }
    fn reward(&self, agent: usize, world: &World) -> f64 {
        self.inner().reward(agent, world)
    }
    fn observation(&self, agent: usize, world: &World) -> Vec<f64> {
        self.inner().observation(agent, world)
    }
    fn benchmark_data(&self, agent: usize, world: &World) -> u64 {
        self.inner().benchmark_data(agent, world)
    }
}
