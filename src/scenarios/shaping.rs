//! Reset, observation and reward terms shared by the scenarios.
use crate::utils::vector::{Vec2, Vector};
use crate::world::{Agent, AgentRole, Entity, World};
use crate::Prng;
use num_traits::Zero;
use rand::distributions::{Distribution, Uniform};

/// Half-width of the box that agents are placed in on reset.
pub const AGENT_SPAWN_EXTENT: f64 = 1.0;
/// Half-width of the box that landmarks are placed in on reset.
pub const LANDMARK_SPAWN_EXTENT: f64 = 0.9;

/// Penalty for each collision between a non-adversary and an adversary.
pub const CAUGHT_PENALTY: f64 = 10.0;
/// Bonus for each collision between a trapped agent and an adversary.
pub const CATCH_BONUS: f64 = 10.0;
/// Weight of the distance shaping terms.
pub const DISTANCE_WEIGHT: f64 = 0.1;

/// Whether two entities overlap: center distance strictly below the sum of radii.
pub fn is_collision<A, B>(a: &A, b: &B) -> bool
where
    A: Entity + ?Sized,
    B: Entity + ?Sized,
{
    a.position().distance(&b.position()) < a.size() + b.size()
}

/// Soft containment penalty for a coordinate magnitude `x = |coord|`.
///
/// Zero inside `0.9`, linear up to `1.0` then exponential, capped at `10`.
pub fn boundary_penalty(x: f64) -> f64 {
    if x < 0.9 {
        0.0
    } else if x < 1.0 {
        (x - 0.9) * 10.0
    } else {
        (2.0 * x - 2.0).exp().min(10.0)
    }
}

/// Sum of the boundary penalties over each coordinate of a position.
pub fn out_of_bounds_penalty(position: Vec2) -> f64 {
    position.0.iter().map(|x| boundary_penalty(x.abs())).sum()
}

fn uniform_position(dist: &Uniform<f64>, rng: &mut Prng) -> Vec2 {
    Vector(array_init::array_init(|_| dist.sample(rng)))
}

/// Randomize the world for a new episode.
///
/// Agents are placed uniformly in `[-1, 1)²` and non-boundary landmarks in `[-0.9, 0.9)²`.
/// Velocities and communication are zeroed.
pub fn reset_uniform(world: &mut World, rng: &mut Prng) {
    let agent_dist = Uniform::new(-AGENT_SPAWN_EXTENT, AGENT_SPAWN_EXTENT);
    let dim_c = world.dim_c;
    for agent in &mut world.agents {
        agent.state.physical.position = uniform_position(&agent_dist, rng);
        agent.state.physical.velocity = Vec2::zero();
        agent.state.communication = vec![0.0; dim_c];
        agent.action_force = Vec2::zero();
    }

    let landmark_dist = Uniform::new(-LANDMARK_SPAWN_EXTENT, LANDMARK_SPAWN_EXTENT);
    for landmark in world.landmarks.iter_mut().filter(|l| !l.boundary) {
        landmark.state.position = uniform_position(&landmark_dist, rng);
        landmark.state.velocity = Vec2::zero();
    }
}

/// Egocentric observation of an agent.
///
/// Concatenates the agent's velocity and position, the relative positions of the
/// non-boundary landmarks and of the other agents, then the velocities of the other
/// non-adversary agents. Communication is not observed.
///
/// # Panics
/// If `agent` is not a valid agent index.
pub fn relative_observation(agent: usize, world: &World) -> Vec<f64> {
    let me = &world.agents[agent];
    let origin = me.state.physical.position;
    let mut obs = Vec::with_capacity(observation_len(agent, world));
    obs.extend_from_slice(me.state.physical.velocity.as_slice());
    obs.extend_from_slice(origin.as_slice());
    for landmark in world.landmarks.iter().filter(|l| !l.boundary) {
        obs.extend_from_slice((landmark.state.position - origin).as_slice());
    }
    let others = || {
        world
            .agents
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != agent)
            .map(|(_, other)| other)
    };
    for other in others() {
        obs.extend_from_slice((other.state.physical.position - origin).as_slice());
    }
    for other in others().filter(|o| !o.role.is_adversary()) {
        obs.extend_from_slice(other.state.physical.velocity.as_slice());
    }
    obs
}

/// Length of [`relative_observation`] for an agent.
pub fn observation_len(agent: usize, world: &World) -> usize {
    let dim = crate::world::DIM_P;
    let num_landmarks = world.landmarks.iter().filter(|l| !l.boundary).count();
    let num_others = world.agents.len().saturating_sub(1);
    let num_observed_velocities = world
        .agents
        .iter()
        .enumerate()
        .filter(|(i, a)| *i != agent && !a.role.is_adversary())
        .count();
    dim * (2 + num_landmarks + num_others + num_observed_velocities)
}

/// Reward for an adversary: pursue the trapped agents and catch them.
///
/// Every adversary contributes `-0.1 * distance` to its nearest trapped agent
/// (skipped if there are no trapped agents) and, if `agent` collides,
/// each colliding (trapped, adversary) pair adds `10`.
pub fn adversary_reward(agent: &Agent, world: &World) -> f64 {
    let mut reward = 0.0;
    for adversary in world.agents_with_role(AgentRole::Adversary) {
        let nearest = world
            .agents_with_role(AgentRole::Trapped)
            .map(|t| t.position().distance(&adversary.position()))
            .reduce(f64::min);
        if let Some(distance) = nearest {
            reward -= DISTANCE_WEIGHT * distance;
        }
    }
    if agent.collide {
        for trapped in world.agents_with_role(AgentRole::Trapped) {
            for adversary in world.agents_with_role(AgentRole::Adversary) {
                if is_collision(trapped, adversary) {
                    reward += CATCH_BONUS;
                }
            }
        }
    }
    reward
}

/// Number of non-adversary agents currently colliding with an adversary.
///
/// Zero for non-adversary agents.
pub fn adversary_collisions(agent: &Agent, world: &World) -> u64 {
    if !agent.role.is_adversary() {
        return 0;
    }
    world
        .agents
        .iter()
        .filter(|other| !other.role.is_adversary() && is_collision(*other, agent))
        .count() as u64
}
