//! Running environments with simple actors.
mod summary;

pub use summary::RolloutSummary;

use crate::envs::{EnvStructure, ParticleEnv, StepError};
use crate::logging::StatsLogger;
use crate::scenarios::Scenario;
use crate::spaces::IndexedTypeSpace;
use crate::world::Move;
use crate::Prng;
use rand::distributions::Distribution;

/// Selects a uniformly random move for every agent.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct RandomActor {
    action_space: IndexedTypeSpace<Move>,
}

impl RandomActor {
    pub const fn new() -> Self {
        Self {
            action_space: IndexedTypeSpace::new(),
        }
    }

    /// Sample one move for each of `num_agents` agents.
    pub fn act(&self, num_agents: usize, rng: &mut Prng) -> Vec<Move> {
        (0..num_agents)
            .map(|_| self.action_space.sample(rng))
            .collect()
    }
}

/// Run an environment for a number of complete episodes with random actions.
///
/// # Args
/// * `env` - Environment. It is reset at the start of each episode.
/// * `num_episodes` - Number of episodes to run.
/// * `rng` - Random state for both the actions and the environment.
/// * `logger` - Logger for environment step statistics.
pub fn run_random_episodes<S: Scenario>(
    env: &mut ParticleEnv<S>,
    num_episodes: u64,
    rng: &mut Prng,
    logger: &mut dyn StatsLogger,
) -> Result<RolloutSummary, StepError> {
    let actor = RandomActor::new();
    let num_agents = env.num_agents();
    let mut summary = RolloutSummary::default();
    let mut returns = vec![0.0; num_agents];

    for _ in 0..num_episodes {
        env.reset(rng);
        returns.iter_mut().for_each(|r| *r = 0.0);
        loop {
            let actions = actor.act(num_agents, rng);
            let step = env.step(&actions, rng, logger)?;
            summary.num_steps += 1;
            summary.total_benchmark += step.benchmarks.iter().sum::<u64>();
            for (ret, reward) in returns.iter_mut().zip(&step.rewards) {
                *ret += reward;
            }
            if step.episode_done() {
                break;
            }
        }
        summary.num_episodes += 1;
        for (agent, ret) in env.world().agents.iter().zip(&returns) {
            summary.episode_returns[agent.role].push(*ret);
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envs::{BuildEnv, ParticleEnvConfig};
    use crate::scenarios::{SearchAndRescue, TeamPush};
    use crate::world::AgentRole;
    use rand::SeedableRng;

    #[test]
    fn random_episodes_search_and_rescue() {
        let mut rng = Prng::seed_from_u64(0);
        let mut env = ParticleEnvConfig::new(SearchAndRescue::default())
            .build_env(&mut rng)
            .unwrap();
        let summary = run_random_episodes(&mut env, 4, &mut rng, &mut ()).unwrap();
        assert_eq!(summary.num_episodes, 4);
        assert_eq!(summary.num_steps, 4 * 25);
        assert_eq!(summary.episode_returns[AgentRole::Trapped].count(), 4);
        assert_eq!(summary.episode_returns[AgentRole::Rescue].count(), 3 * 4);
        assert_eq!(summary.episode_returns[AgentRole::Adversary].count(), 3 * 4);
    }

    #[test]
    fn random_episodes_team_push() {
        let mut rng = Prng::seed_from_u64(1);
        let mut env = ParticleEnvConfig {
            max_episode_steps: 10,
            ..ParticleEnvConfig::new(TeamPush::default())
        }
        .build_env(&mut rng)
        .unwrap();
        let summary = run_random_episodes(&mut env, 2, &mut rng, &mut ()).unwrap();
        assert_eq!(summary.num_steps, 20);
        assert_eq!(summary.total_benchmark, 0);
        assert_eq!(summary.episode_returns[AgentRole::Trapped].count(), 0);
        // Team reward is a negated distance
        let mean = summary.episode_returns[AgentRole::Rescue].mean().unwrap();
        assert!(mean <= 0.0);
    }

    #[test]
    fn random_rollouts_reproducible() {
        let run = || {
            let mut rng = Prng::seed_from_u64(7);
            let mut env = ParticleEnvConfig::new(SearchAndRescue::default())
                .build_env(&mut rng)
                .unwrap();
            run_random_episodes(&mut env, 2, &mut rng, &mut ()).unwrap()
        };
        assert_eq!(run(), run());
    }
}
