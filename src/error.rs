//! Error type
use crate::envs::{BuildEnvError, StepError};
use crate::scenarios::ParseScenarioError;
use std::io;
use std::num::ParseIntError;
use thiserror::Error;

/// Error from the particle environments crate.
#[derive(Error, Debug)]
pub enum ParticleEnvError {
    #[error("error building environment")]
    BuildEnv(#[from] BuildEnvError),
    #[error("error stepping environment")]
    Step(#[from] StepError),
    #[error(transparent)]
    ParseScenario(#[from] ParseScenarioError),
    #[error("invalid configuration file")]
    Config(#[from] serde_json::Error),
    #[error("error reading configuration file")]
    Io(#[from] io::Error),
    #[error("invalid number of episodes `{value}`")]
    NumEpisodes {
        value: String,
        #[source]
        source: ParseIntError,
    },
}
