//! Gym-style environment loop over a particle world scenario.
use super::{BuildEnv, BuildEnvError, EnvStructure, StepError};
use crate::logging::{Id, Loggable, StatsLogger};
use crate::scenarios::Scenario;
use crate::spaces::{FiniteSpace, IndexedTypeSpace, IntervalSpace, PowerSpace};
use crate::world::{Move, PhysicsConfig, World};
use crate::Prng;
use serde::{Deserialize, Serialize};

/// Configuration for a [`ParticleEnv`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "S: Deserialize<'de> + Default"))]
pub struct ParticleEnvConfig<S> {
    /// Scenario configuration
    pub scenario: S,
    /// Physics parameters of the world
    pub physics: PhysicsConfig,
    /// Number of steps after which an episode ends.
    pub max_episode_steps: u64,
    /// Give every agent the sum of all agents' rewards.
    pub shared_reward: bool,
    /// Discount factor
    pub discount_factor: f64,
}

impl<S: Default> Default for ParticleEnvConfig<S> {
    fn default() -> Self {
        Self {
            scenario: S::default(),
            physics: PhysicsConfig::default(),
            max_episode_steps: 25,
            shared_reward: false,
            discount_factor: 0.95,
        }
    }
}

impl<S> ParticleEnvConfig<S> {
    pub fn new(scenario: S) -> Self {
        Self {
            scenario,
            physics: PhysicsConfig::default(),
            max_episode_steps: 25,
            shared_reward: false,
            discount_factor: 0.95,
        }
    }

    fn validate(&self) -> Result<(), BuildEnvError> {
        BuildEnvError::check_range("discount_factor", self.discount_factor, 0.0, 1.0)?;
        BuildEnvError::check_range("physics.damping", self.physics.damping, 0.0, 1.0)?;
        BuildEnvError::check_range("physics.dt", self.physics.dt, f64::MIN_POSITIVE, f64::MAX)?;
        BuildEnvError::check_range(
            "physics.contact_margin",
            self.physics.contact_margin,
            f64::MIN_POSITIVE,
            f64::MAX,
        )?;
        BuildEnvError::check_range(
            "physics.contact_force",
            self.physics.contact_force,
            0.0,
            f64::MAX,
        )?;
        if self.max_episode_steps == 0 {
            return Err(BuildEnvError::InvalidParameter {
                name: "max_episode_steps",
                value: 0.0,
            });
        }
        Ok(())
    }
}

impl<S: Scenario + Clone> BuildEnv for ParticleEnvConfig<S> {
    type Environment = ParticleEnv<S>;

    fn build_env(&self, rng: &mut Prng) -> Result<Self::Environment, BuildEnvError> {
        self.validate()?;
        let mut world = self.scenario.make_world(rng)?;
        world.physics = self.physics;
        Ok(ParticleEnv {
            scenario: self.scenario.clone(),
            world,
            max_episode_steps: self.max_episode_steps,
            shared_reward: self.shared_reward,
            discount_factor: self.discount_factor,
            episode_step: 0,
            episode_returns: vec![],
        })
    }
}

/// Result of a joint step of all agents.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiAgentStep {
    /// Observation of each agent after the step.
    pub observations: Vec<Vec<f64>>,
    /// Reward of each agent.
    pub rewards: Vec<f64>,
    /// Whether the episode is done for each agent.
    pub dones: Vec<bool>,
    /// Benchmark statistic of each agent.
    pub benchmarks: Vec<u64>,
}

impl MultiAgentStep {
    /// Whether the episode has ended for all agents.
    pub fn episode_done(&self) -> bool {
        self.dones.iter().all(|&d| d)
    }
}

/// Multi-agent particle environment.
///
/// Each step applies one [`Move`] per agent, advances the world physics,
/// then queries the scenario for every agent's observation and reward.
/// Episodes end after a fixed number of steps.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleEnv<S> {
    scenario: S,
    world: World,
    max_episode_steps: u64,
    shared_reward: bool,
    discount_factor: f64,
    episode_step: u64,
    /// Undiscounted return of each agent in the current episode.
    episode_returns: Vec<f64>,
}

impl<S: Scenario> ParticleEnv<S> {
    pub const fn world(&self) -> &World {
        &self.world
    }

    pub const fn scenario(&self) -> &S {
        &self.scenario
    }

    /// Number of steps taken in the current episode.
    pub const fn episode_step(&self) -> u64 {
        self.episode_step
    }

    /// Start a new episode.
    ///
    /// # Returns
    /// The initial observation of each agent.
    pub fn reset(&mut self, rng: &mut Prng) -> Vec<Vec<f64>> {
        self.scenario.reset_world(&mut self.world, rng);
        self.episode_step = 0;
        self.episode_returns.clear();
        self.observations()
    }

    /// Current observation of each agent.
    pub fn observations(&self) -> Vec<Vec<f64>> {
        (0..self.world.num_agents())
            .map(|i| self.scenario.observation(i, &self.world))
            .collect()
    }

    /// Take a joint step.
    ///
    /// # Args
    /// * `actions` - One move per agent, in world order.
    /// * `rng` - Random number generator for the physics noise.
    /// * `logger` - Logs each agent's reward and action under `reward/<role>` and `action/<role>`
    ///              and counts `steps`. At the end of an episode also logs the agents' returns
    ///              under `episode_return/<role>`, the `episode_length` and counts `episodes`.
    pub fn step(
        &mut self,
        actions: &[Move],
        rng: &mut Prng,
        logger: &mut dyn StatsLogger,
    ) -> Result<MultiAgentStep, StepError> {
        let num_agents = self.world.num_agents();
        if actions.len() != num_agents {
            return Err(StepError::ActionCount {
                expected: num_agents,
                actual: actions.len(),
            });
        }
        if self.episode_step >= self.max_episode_steps {
            return Err(StepError::EpisodeDone);
        }

        for (agent, action) in self.world.agents.iter_mut().zip(actions) {
            agent.action_force = action.force(agent.accel);
        }
        self.world.step(rng);
        self.episode_step += 1;

        let observations = self.observations();
        let mut rewards: Vec<f64> = (0..num_agents)
            .map(|i| self.scenario.reward(i, &self.world))
            .collect();
        if self.shared_reward {
            let total = rewards.iter().sum();
            rewards.iter_mut().for_each(|r| *r = total);
        }
        let benchmarks = (0..num_agents)
            .map(|i| self.scenario.benchmark_data(i, &self.world))
            .collect();
        let episode_done = self.episode_step >= self.max_episode_steps;

        self.episode_returns.resize(num_agents, 0.0);
        for (ret, reward) in self.episode_returns.iter_mut().zip(&rewards) {
            *ret += reward;
        }
        self.log_step(actions, &rewards, episode_done, logger);

        Ok(MultiAgentStep {
            observations,
            rewards,
            dones: vec![episode_done; num_agents],
            benchmarks,
        })
    }

    fn log_step(
        &self,
        actions: &[Move],
        rewards: &[f64],
        episode_done: bool,
        logger: &mut dyn StatsLogger,
    ) {
        let action_space = IndexedTypeSpace::<Move>::new();
        // Logging errors only arise from mismatched value types under one ID
        logger.group_start();
        for ((agent, action), reward) in self.world.agents.iter().zip(actions).zip(rewards) {
            let role = agent.role.name();
            let _ = logger.group_log(Id::new("reward").with(role), Loggable::Scalar(*reward));
            let _ = logger.group_log(
                Id::new("action").with(role),
                action_space.as_loggable(action),
            );
        }
        if episode_done {
            for (agent, ret) in self.world.agents.iter().zip(&self.episode_returns) {
                let id = Id::new("episode_return").with(agent.role.name());
                let _ = logger.group_log(id, Loggable::Scalar(*ret));
            }
            #[allow(clippy::cast_precision_loss)]
            let length = self.episode_step as f64;
            let _ = logger.group_log("episode_length".into(), Loggable::Scalar(length));
            let _ = logger.group_log("episodes".into(), Loggable::CounterIncrement(1));
        }
        let _ = logger.group_log("steps".into(), Loggable::CounterIncrement(1));
        logger.group_end();
    }
}

impl<S: Scenario> EnvStructure for ParticleEnv<S> {
    type ObservationSpace = PowerSpace<IntervalSpace<f64>>;
    type ActionSpace = IndexedTypeSpace<Move>;

    fn num_agents(&self) -> usize {
        self.world.num_agents()
    }

    fn observation_space(&self, agent: usize) -> Self::ObservationSpace {
        let len = self.scenario.observation(agent, &self.world).len();
        PowerSpace::new(IntervalSpace::default(), len)
    }

    fn action_space(&self, _agent: usize) -> Self::ActionSpace {
        IndexedTypeSpace::new()
    }

    fn reward_range(&self) -> (f64, f64) {
        (f64::NEG_INFINITY, f64::INFINITY)
    }

    fn discount_factor(&self) -> f64 {
        self.discount_factor
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing;
    use super::*;
    use crate::logging::LogError;
    use crate::scenarios::{ScenarioConfig, SearchAndRescue, TeamPush};
    use crate::spaces::Space;
    use rand::SeedableRng;

    fn build<S: Scenario + Clone>(config: ParticleEnvConfig<S>) -> ParticleEnv<S> {
        config.build_env(&mut Prng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn run_search_and_rescue() {
        testing::check_env(
            &mut build(ParticleEnvConfig::new(SearchAndRescue::default())),
            1000,
            0,
        );
    }

    #[test]
    fn run_team_push() {
        testing::check_env(
            &mut build(ParticleEnvConfig::new(TeamPush::default())),
            1000,
            1,
        );
    }

    #[test]
    fn run_scenario_config() {
        let mut env = build(ParticleEnvConfig::new(
            "team_push".parse::<ScenarioConfig>().unwrap(),
        ));
        testing::check_env(&mut env, 200, 2);
    }

    #[test]
    fn wrong_action_count() {
        let mut env = build(ParticleEnvConfig::new(TeamPush::default()));
        let mut rng = Prng::seed_from_u64(0);
        assert_eq!(
            env.step(&[Move::NoOp], &mut rng, &mut ()),
            Err(StepError::ActionCount {
                expected: 3,
                actual: 1
            })
        );
    }

    #[test]
    fn episode_ends_at_step_limit() {
        let mut env = build(ParticleEnvConfig {
            max_episode_steps: 3,
            ..ParticleEnvConfig::new(TeamPush::default())
        });
        let mut rng = Prng::seed_from_u64(0);
        let actions = [Move::NoOp; 3];
        for _ in 0..2 {
            let step = env.step(&actions, &mut rng, &mut ()).unwrap();
            assert!(!step.episode_done());
        }
        let step = env.step(&actions, &mut rng, &mut ()).unwrap();
        assert!(step.episode_done());
        assert_eq!(
            env.step(&actions, &mut rng, &mut ()),
            Err(StepError::EpisodeDone)
        );

        env.reset(&mut rng);
        assert_eq!(env.episode_step(), 0);
        assert!(env.step(&actions, &mut rng, &mut ()).is_ok());
    }

    #[test]
    fn shared_reward_sums() {
        let mut rng = Prng::seed_from_u64(5);
        let config = ParticleEnvConfig::new(SearchAndRescue::default());
        let mut individual = config.build_env(&mut rng.clone()).unwrap();
        let mut shared = ParticleEnvConfig {
            shared_reward: true,
            ..config
        }
        .build_env(&mut rng.clone())
        .unwrap();

        let actions = [Move::Up; 7];
        let a = individual.step(&actions, &mut rng.clone(), &mut ()).unwrap();
        let b = shared.step(&actions, &mut rng, &mut ()).unwrap();
        let total: f64 = a.rewards.iter().sum();
        assert!(b.rewards.iter().all(|r| (r - total).abs() < 1e-9));
    }

    #[test]
    fn observation_space_contains_observations() {
        let mut env = build(ParticleEnvConfig::new(SearchAndRescue::default()));
        let mut rng = Prng::seed_from_u64(0);
        let observations = env.reset(&mut rng);
        for (i, obs) in observations.iter().enumerate() {
            assert!(env.observation_space(i).contains(obs));
        }
    }

    #[test]
    fn invalid_discount_rejected() {
        let config = ParticleEnvConfig {
            discount_factor: 1.5,
            ..ParticleEnvConfig::new(TeamPush::default())
        };
        assert!(matches!(
            config.build_env(&mut Prng::seed_from_u64(0)),
            Err(BuildEnvError::InvalidParameter {
                name: "discount_factor",
                ..
            })
        ));
    }

    #[test]
    fn physics_config_applied() {
        let env = build(ParticleEnvConfig {
            physics: PhysicsConfig {
                dt: 0.05,
                ..PhysicsConfig::default()
            },
            ..ParticleEnvConfig::new(TeamPush::default())
        });
        assert_eq!(env.world().physics.dt, 0.05);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: ParticleEnvConfig<ScenarioConfig> = serde_json::from_str(
            r#"{"scenario": {"name": "search_and_rescue"}, "max_episode_steps": 50}"#,
        )
        .unwrap();
        assert_eq!(config.max_episode_steps, 50);
        assert_eq!(config.discount_factor, 0.95);
        assert_eq!(
            config.scenario,
            ScenarioConfig::SearchAndRescue(SearchAndRescue::default())
        );
    }

    /// Keeps every logged group.
    #[derive(Debug, Default)]
    struct GroupRecorder {
        groups: Vec<Vec<(String, Loggable)>>,
    }

    impl GroupRecorder {
        fn ids(&self, group: usize) -> Vec<&str> {
            self.groups[group].iter().map(|(id, _)| id.as_str()).collect()
        }

        fn values<'a>(&'a self, group: usize, id: &'a str) -> impl Iterator<Item = Loggable> + 'a {
            self.groups[group]
                .iter()
                .filter(move |(i, _)| i == id)
                .map(|(_, v)| *v)
        }
    }

    impl StatsLogger for GroupRecorder {
        fn group_start(&mut self) {
            self.groups.push(Vec::new());
        }
        fn group_log(&mut self, id: Id, value: Loggable) -> Result<(), LogError> {
            self.groups
                .last_mut()
                .expect("value logged outside a group")
                .push((id.to_string(), value));
            Ok(())
        }
        fn group_end(&mut self) {}
        fn flush(&mut self) {}
    }

    #[test]
    fn step_logs_per_role_stats() {
        let mut env = build(ParticleEnvConfig::new(SearchAndRescue::default()));
        let mut rng = Prng::seed_from_u64(3);
        let mut logger = GroupRecorder::default();
        let step = env.step(&[Move::Up; 7], &mut rng, &mut logger).unwrap();

        assert_eq!(logger.groups.len(), 1);
        let ids = logger.ids(0);
        for (id, count) in [
            ("reward/trapped", 1),
            ("reward/rescue", 3),
            ("reward/adversary", 3),
            ("action/trapped", 1),
            ("action/rescue", 3),
            ("action/adversary", 3),
            ("steps", 1),
        ] {
            assert_eq!(ids.iter().filter(|&&i| i == id).count(), count, "{}", id);
        }
        assert!(!ids.iter().any(|i| i.starts_with("episode")));

        let trapped_reward: Vec<_> = logger.values(0, "reward/trapped").collect();
        assert_eq!(trapped_reward, [Loggable::Scalar(step.rewards[0])]);
        assert!(logger
            .values(0, "action/rescue")
            .all(|v| v == Loggable::Index { value: 3, size: 5 }));
        assert_eq!(
            logger.values(0, "steps").collect::<Vec<_>>(),
            [Loggable::CounterIncrement(1)]
        );
    }

    #[test]
    fn final_step_logs_episode_stats() {
        let mut env = build(ParticleEnvConfig {
            max_episode_steps: 2,
            ..ParticleEnvConfig::new(TeamPush::default())
        });
        let mut rng = Prng::seed_from_u64(4);
        let mut logger = GroupRecorder::default();
        let actions = [Move::Right; 3];
        let first = env.step(&actions, &mut rng, &mut logger).unwrap();
        let second = env.step(&actions, &mut rng, &mut logger).unwrap();

        assert_eq!(logger.groups.len(), 2);
        assert!(!logger.ids(0).iter().any(|i| i.starts_with("episode")));

        let returns: Vec<_> = logger.values(1, "episode_return/rescue").collect();
        assert_eq!(returns.len(), 3);
        for (i, ret) in returns.into_iter().enumerate() {
            assert_eq!(
                ret,
                Loggable::Scalar(first.rewards[i] + second.rewards[i])
            );
        }
        assert_eq!(
            logger.values(1, "episode_length").collect::<Vec<_>>(),
            [Loggable::Scalar(2.0)]
        );
        assert_eq!(
            logger.values(1, "episodes").collect::<Vec<_>>(),
            [Loggable::CounterIncrement(1)]
        );
        assert_eq!(logger.values(1, "steps").count(), 1);
    }
}
