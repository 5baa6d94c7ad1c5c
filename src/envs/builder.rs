use crate::Prng;
use thiserror::Error;

/// Build an environment instance.
pub trait BuildEnv {
    type Environment;

    /// Build an environment instance.
    ///
    /// # Args
    /// * `rng` - Random number generator for the initial world state.
    fn build_env(&self, rng: &mut Prng) -> Result<Self::Environment, BuildEnvError>;
}

/// Error building an environment
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildEnvError {
    #[error("the world must contain at least one agent")]
    NoAgents,
    #[error("{num_adversaries} adversaries need at least one trapped agent to pursue")]
    NoTrappedAgents { num_adversaries: usize },
    #[error("{num_movable} movable landmarks need at least one goal landmark")]
    NoGoalLandmarks { num_movable: usize },
    #[error("invalid value {value} for parameter `{name}`")]
    InvalidParameter { name: &'static str, value: f64 },
}

impl BuildEnvError {
    /// Check that a parameter lies in `[low, high]`.
    pub fn check_range(name: &'static str, value: f64, low: f64, high: f64) -> Result<(), Self> {
        if (low..=high).contains(&value) {
            Ok(())
        } else {
            Err(Self::InvalidParameter { name, value })
        }
    }
}
