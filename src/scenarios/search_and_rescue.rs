//! Search and rescue: adversaries chase trapped agents while rescuers try to keep them away.
use super::roster::AgentCounts;
use super::shaping::{self, CAUGHT_PENALTY, DISTANCE_WEIGHT};
use super::Scenario;
use crate::envs::BuildEnvError;
use crate::world::{Agent, AgentRole, Color, Entity, Landmark, LandmarkKind, World};
use crate::Prng;
use serde::{Deserialize, Serialize};

/// Color of the rescue agents.
pub const RESCUE_COLOR: Color = Color([0.35, 0.35, 0.85]);

/// Search and rescue scenario.
///
/// Adversaries are rewarded for reaching and colliding with trapped agents.
/// All other agents are rewarded for keeping their distance from the adversaries,
/// penalized for every adversary touching them and for leaving the unit square.
///
/// Rescue agents share the evasion reward of the trapped agents, so they are penalized
/// for body-blocking adversaries even though that is their role.
/// This is a known defect of the reward design and is kept for comparability.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchAndRescue {
    pub agents: AgentCounts,
    /// Number of obstacle landmarks.
    pub num_landmarks: usize,
}

impl Default for SearchAndRescue {
    fn default() -> Self {
        Self {
            agents: AgentCounts {
                trapped: 1,
                rescue: 3,
                adversaries: 3,
            },
            num_landmarks: 2,
        }
    }
}

impl SearchAndRescue {
    /// Reward for non-adversary agents (trapped and rescue).
    pub fn agent_reward(&self, agent: &Agent, world: &World) -> f64 {
        let mut reward = 0.0;
        for adversary in world.agents_with_role(AgentRole::Adversary) {
            reward += DISTANCE_WEIGHT * agent.position().distance(&adversary.position());
        }
        if agent.collide {
            for adversary in world.agents_with_role(AgentRole::Adversary) {
                if shaping::is_collision(adversary, agent) {
                    reward -= CAUGHT_PENALTY;
                }
            }
        }
        reward - shaping::out_of_bounds_penalty(agent.position())
    }

    /// Reward for adversaries.
    pub fn adversary_reward(&self, agent: &Agent, world: &World) -> f64 {
        shaping::adversary_reward(agent, world)
    }
}

impl Scenario for SearchAndRescue {
    fn make_world(&self, rng: &mut Prng) -> Result<World, BuildEnvError> {
        self.agents.validate()?;

        // Communication is set up but never observed
        let mut world = World::new(2);
        self.agents.populate(&mut world, RESCUE_COLOR);

        world.landmarks = (0..self.num_landmarks)
            .map(|i| {
                let mut landmark = Landmark::new(format!("landmark_{}", i), LandmarkKind::Obstacle);
                landmark.collide = true;
                landmark.movable = false;
                landmark.size = 0.2;
                landmark.color = Color::GREY;
                landmark
            })
            .collect();

        self.reset_world(&mut world, rng);
        Ok(world)
    }

    fn reset_world(&self, world: &mut World, rng: &mut Prng) {
        shaping::reset_uniform(world, rng)
    }

    fn reward(&self, agent: usize, world: &World) -> f64 {
        let agent = &world.agents[agent];
        if agent.role.is_adversary() {
            self.adversary_reward(agent, world)
        } else {
            self.agent_reward(agent, world)
        }
    }

    fn observation(&self, agent: usize, world: &World) -> Vec<f64> {
        shaping::relative_observation(agent, world)
    }

    fn benchmark_data(&self, agent: usize, world: &World) -> u64 {
        shaping::adversary_collisions(&world.agents[agent], world)
    }
}
