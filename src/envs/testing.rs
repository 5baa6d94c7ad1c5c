//! Environment testing utilities
use super::{EnvStructure, ParticleEnv};
use crate::scenarios::Scenario;
use crate::spaces::{IndexedTypeSpace, Space};
use crate::world::{Entity, Move};
use crate::Prng;
use rand::distributions::Distribution;
use rand::SeedableRng;

/// Run an environment with uniform random actions and check that invariants are satisfied.
pub fn check_env<S: Scenario>(env: &mut ParticleEnv<S>, num_steps: u64, seed: u64) {
    let (min_reward, max_reward) = env.reward_range();
    let discount_factor = env.discount_factor();
    assert!(discount_factor >= 0.0);
    assert!(discount_factor <= 1.0);

    let num_agents = env.num_agents();
    let observation_spaces: Vec<_> = (0..num_agents)
        .map(|i| env.observation_space(i))
        .collect();
    let action_space = IndexedTypeSpace::<Move>::new();
    let mut rng = Prng::seed_from_u64(seed);

    let observations = env.reset(&mut rng);
    assert_eq!(observations.len(), num_agents);

    for _ in 0..num_steps {
        let actions: Vec<Move> = (0..num_agents)
            .map(|i| {
                let action = action_space.sample(&mut rng);
                assert!(env.action_space(i).contains(&action));
                action
            })
            .collect();
        let step = env.step(&actions, &mut rng, &mut ()).unwrap();

        assert_eq!(step.rewards.len(), num_agents);
        assert_eq!(step.dones.len(), num_agents);
        assert_eq!(step.benchmarks.len(), num_agents);
        for (space, obs) in observation_spaces.iter().zip(&step.observations) {
            assert!(space.contains(obs));
            assert!(obs.iter().all(|x| x.is_finite()));
        }
        for &reward in &step.rewards {
            assert!(reward.is_finite());
            assert!(reward >= min_reward);
            assert!(reward <= max_reward);
        }
        for agent in &env.world().agents {
            assert!(agent.position().is_finite());
            if let Some(max_speed) = agent.max_speed {
                assert!(agent.state.physical.velocity.norm() <= max_speed + 1e-9);
            }
        }
        assert!(step.dones.iter().all(|&d| d == step.dones[0]));

        if step.episode_done() {
            env.reset(&mut rng);
        }
    }
}
