//! Team push: agents cooperate to push a movable landmark onto a goal.
use super::roster::AgentCounts;
use super::shaping;
use super::Scenario;
use crate::envs::BuildEnvError;
use crate::world::{Agent, Color, Entity, Landmark, LandmarkKind, World};
use crate::Prng;
use serde::{Deserialize, Serialize};

/// Color of the pushing agents.
pub const RESCUE_COLOR: Color = Color([0.35, 0.35, 0.75]);
pub const GOAL_COLOR: Color = Color([0.25, 0.85, 0.25]);
pub const MOVABLE_COLOR: Color = Color([0.25, 0.25, 0.95]);

/// Team push scenario.
///
/// Every non-adversary agent receives the same team reward: the negated sum, over movable
/// landmarks, of the distance to the nearest goal. Goals are intangible; movable landmarks
/// collide with agents and obstacles and are pushed around by contact forces.
///
/// The default population has no trapped agents or adversaries. If adversaries are
/// configured they receive the same pursuit reward as in search and rescue.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamPush {
    pub agents: AgentCounts,
    pub num_goals: usize,
    pub num_movable: usize,
    pub num_static: usize,
}

impl Default for TeamPush {
    fn default() -> Self {
        Self {
            agents: AgentCounts {
                trapped: 0,
                rescue: 3,
                adversaries: 0,
            },
            num_goals: 1,
            num_movable: 1,
            num_static: 4,
        }
    }
}

fn goal_landmark(index: usize) -> Landmark {
    let mut landmark = Landmark::new(format!("goal_landmark_{}", index), LandmarkKind::Goal);
    landmark.collide = false;
    landmark.movable = false;
    landmark.size = 0.2;
    landmark.color = GOAL_COLOR;
    landmark
}

fn movable_landmark(index: usize) -> Landmark {
    let mut landmark = Landmark::new(format!("move_landmark_{}", index), LandmarkKind::Move);
    landmark.collide = true;
    landmark.movable = true;
    landmark.size = 0.15;
    landmark.color = MOVABLE_COLOR;
    landmark
}

fn static_landmark(index: usize) -> Landmark {
    let mut landmark = Landmark::new(format!("static_landmark_{}", index), LandmarkKind::Static);
    landmark.collide = true;
    landmark.movable = false;
    landmark.size = 0.1;
    landmark.color = Color::GREY;
    landmark
}

impl TeamPush {
    /// Team reward for non-adversary agents.
    pub fn agent_reward(&self, _agent: &Agent, world: &World) -> f64 {
        let mut reward = 0.0;
        for movable in world.landmarks_of_kind(LandmarkKind::Move) {
            let nearest_goal = world
                .landmarks_of_kind(LandmarkKind::Goal)
                .map(|goal| movable.position().distance(&goal.position()))
                .reduce(f64::min);
            if let Some(distance) = nearest_goal {
                reward -= distance;
            }
        }
        reward
    }

    /// Reward for adversaries.
    pub fn adversary_reward(&self, agent: &Agent, world: &World) -> f64 {
        shaping::adversary_reward(agent, world)
    }
}

impl Scenario for TeamPush {
    fn make_world(&self, rng: &mut Prng) -> Result<World, BuildEnvError> {
        self.agents.validate()?;
        if self.num_movable > 0 && self.num_goals == 0 {
            return Err(BuildEnvError::NoGoalLandmarks {
                num_movable: self.num_movable,
            });
        }

        // Communication is set up but never observed
        let mut world = World::new(2);
        self.agents.populate(&mut world, RESCUE_COLOR);

        world
            .landmarks
            .reserve(self.num_goals + self.num_movable + self.num_static);
        world.landmarks.extend((0..self.num_goals).map(goal_landmark));
        world
            .landmarks
            .extend((0..self.num_movable).map(movable_landmark));
        world
            .landmarks
            .extend((0..self.num_static).map(static_landmark));

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::vector::Vector;
    use crate::world::AgentRole;
    use rand::SeedableRng;

    fn world() -> World {
        let mut rng = Prng::seed_from_u64(0);
        TeamPush::default().make_world(&mut rng).unwrap()
    }

    #[test]
    fn default_population() {
        let world = world();
        assert_eq!(world.agents.len(), 3);
        assert!(world.agents.iter().all(|a| a.role == AgentRole::Rescue));
        assert!(world.agents.iter().all(|a| a.color == RESCUE_COLOR));

        let kinds: Vec<_> = world.landmarks.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            [
                LandmarkKind::Goal,
                LandmarkKind::Move,
                LandmarkKind::Static,
                LandmarkKind::Static,
                LandmarkKind::Static,
                LandmarkKind::Static
            ]
        );

        let goal = &world.landmarks[0];
        assert_eq!(goal.name, "goal_landmark_0");
        assert!(!goal.collide && !goal.movable);
        assert_eq!(goal.size, 0.2);

        let movable = &world.landmarks[1];
        assert_eq!(movable.name, "move_landmark_0");
        assert!(movable.collide && movable.movable);
        assert_eq!(movable.size, 0.15);

        let obstacle = &world.landmarks[2];
        assert_eq!(obstacle.name, "static_landmark_0");
        assert!(obstacle.collide && !obstacle.movable);
        assert_eq!(obstacle.size, 0.1);
    }

    #[test]
    fn observation_length() {
        let world = world();
        let scenario = TeamPush::default();
        for i in 0..world.agents.len() {
            // 4 own + 6 landmarks + 2 others + 2 velocities, 2 coordinates each
            assert_eq!(scenario.observation(i, &world).len(), 24);
        }
    }

    #[test]
    fn reward_is_negative_goal_distance() {
        let mut world = world();
        world.landmarks[0].state.position = Vector([0.0, 0.0]);
        world.landmarks[1].state.position = Vector([0.3, 0.4]);
        let scenario = TeamPush::default();
        for i in 0..world.agents.len() {
            assert!((scenario.reward(i, &world) + 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn reward_uses_nearest_goal() {
        let scenario = TeamPush {
            num_goals: 2,
            ..TeamPush::default()
        };
        let mut rng = Prng::seed_from_u64(1);
        let mut world = scenario.make_world(&mut rng).unwrap();
        world.landmarks[0].state.position = Vector([-0.5, 0.0]);
        world.landmarks[1].state.position = Vector([0.5, 0.0]);
        world.landmarks[2].state.position = Vector([0.4, 0.0]);
        assert_eq!(world.landmarks[2].kind, LandmarkKind::Move);
        assert!((scenario.reward(0, &world) + 0.1).abs() < 1e-12);
    }

    #[test]
    fn no_movable_landmarks_zero_reward() {
        let scenario = TeamPush {
            num_movable: 0,
            ..TeamPush::default()
        };
        let mut rng = Prng::seed_from_u64(0);
        let world = scenario.make_world(&mut rng).unwrap();
        assert_eq!(scenario.reward(0, &world), 0.0);
    }

    #[test]
    fn movable_without_goal_rejected() {
        let scenario = TeamPush {
            num_goals: 0,
            ..TeamPush::default()
        };
        let mut rng = Prng::seed_from_u64(0);
        assert_eq!(
            scenario.make_world(&mut rng),
            Err(BuildEnvError::NoGoalLandmarks { num_movable: 1 })
        );
    }

    #[test]
    fn adversaries_get_pursuit_reward() {
        let scenario = TeamPush {
            agents: AgentCounts {
                trapped: 1,
                rescue: 2,
                adversaries: 1,
            },
            ..TeamPush::default()
        };
        let mut rng = Prng::seed_from_u64(0);
        let world = scenario.make_world(&mut rng).unwrap();
        let adversary = &world.agents[3];
        assert!(adversary.role.is_adversary());
        assert_eq!(
            scenario.reward(3, &world),
            scenario.adversary_reward(adversary, &world)
        );
    }

    #[test]
    fn no_benchmark_without_adversaries() {
        let world = world();
        let scenario = TeamPush::default();
        assert!((0..3).all(|i| scenario.benchmark_data(i, &world) == 0));
    }
}
