//! Particle world physics.
//!
//! Each step gathers the agents' movement forces and soft contact forces between
//! overlapping entities, then integrates velocities and positions with a damped
//! semi-implicit Euler step.
use super::{Entity, World};
use crate::utils::vector::Vec2;
use crate::Prng;
use num_traits::Zero;
use rand::distributions::Distribution;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// Physics parameters of a [`World`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Simulation time step
    pub dt: f64,
    /// Fraction of velocity lost each step
    pub damping: f64,
    /// Stiffness of the contact response
    pub contact_force: f64,
    /// Softness of the contact response: distance over which it ramps up
    pub contact_margin: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            dt: 0.1,
            damping: 0.25,
            contact_force: 1e2,
            contact_margin: 1e-3,
        }
    }
}

impl PhysicsConfig {
    /// Contact force exerted on entity `a` by entity `b`.
    ///
    /// The reaction on `b` is the negation.
    /// Returns zero when the centers coincide since the direction is undefined.
    ///
    /// # Args
    /// * `delta` - `position_a - position_b`
    /// * `dist_min` - Sum of the two entity radii.
    pub fn contact_force(&self, delta: Vec2, dist_min: f64) -> Vec2 {
        let dist = delta.norm();
        if dist == 0.0 {
            return Vec2::zero();
        }
        let k = self.contact_margin;
        let penetration = softplus(-(dist - dist_min) / k) * k;
        delta / dist * (self.contact_force * penetration)
    }
}

/// `ln(1 + exp(x))` without overflow for large `x`.
fn softplus(x: f64) -> f64 {
    if x > 0.0 {
        x + (-x).exp().ln_1p()
    } else {
        x.exp().ln_1p()
    }
}

/// Physical attributes of an entity relevant to contact forces.
#[derive(Debug, Copy, Clone)]
struct Body {
    position: Vec2,
    size: f64,
    collide: bool,
    movable: bool,
}

impl Body {
    fn of<E: Entity + ?Sized>(entity: &E) -> Self {
        Self {
            position: entity.position(),
            size: entity.size(),
            collide: entity.collide(),
            movable: entity.movable(),
        }
    }
}

impl World {
    /// Advance the world by one physics step.
    ///
    /// Agents' movement forces must be set beforehand (see [`super::Agent::action_force`]).
    pub fn step(&mut self, rng: &mut Prng) {
        let mut forces = self.movement_forces(rng);
        self.add_contact_forces(&mut forces);
        self.integrate(&forces);

        let dim_c = self.dim_c;
        for agent in self.agents.iter_mut().filter(|a| a.silent) {
            agent.state.communication.clear();
            agent.state.communication.resize(dim_c, 0.0);
        }
    }

    /// Movement force on each entity (agents then landmarks).
    fn movement_forces(&self, rng: &mut Prng) -> Vec<Vec2> {
        let mut forces = Vec::with_capacity(self.agents.len() + self.landmarks.len());
        for agent in &self.agents {
            let mut force = Vec2::zero();
            if agent.movable {
                force = agent.action_force;
                if let Some(noise) = agent.u_noise {
                    for x in &mut force.0 {
                        let z: f64 = StandardNormal.sample(rng);
                        *x += z * noise;
                    }
                }
            }
            forces.push(force);
        }
        forces.resize(self.agents.len() + self.landmarks.len(), Vec2::zero());
        forces
    }

    fn add_contact_forces(&self, forces: &mut [Vec2]) {
        let bodies: Vec<Body> = self.entities().map(Body::of).collect();
        for (i, a) in bodies.iter().enumerate() {
            if !a.collide {
                continue;
            }
            for (j, b) in bodies.iter().enumerate().skip(i + 1) {
                if !b.collide {
                    continue;
                }
                let force = self
                    .physics
                    .contact_force(a.position - b.position, a.size + b.size);
                if a.movable {
                    forces[i] += force;
                }
                if b.movable {
                    forces[j] -= force;
                }
            }
        }
    }

    fn integrate(&mut self, forces: &[Vec2]) {
        let physics = self.physics;
        let (agent_forces, landmark_forces) = forces.split_at(self.agents.len());
        for (agent, force) in self.agents.iter_mut().zip(agent_forces) {
            if agent.movable {
                integrate_state(
                    &mut agent.state.physical,
                    *force,
                    agent.mass,
                    agent.max_speed,
                    &physics,
                );
            }
        }
        for (landmark, force) in self.landmarks.iter_mut().zip(landmark_forces) {
            if landmark.movable {
                integrate_state(&mut landmark.state, *force, landmark.mass, None, &physics);
            }
        }
    }
}

/// Damped semi-implicit Euler update of a single entity.
fn integrate_state(
    state: &mut super::EntityState,
    force: Vec2,
    mass: f64,
    max_speed: Option<f64>,
    physics: &PhysicsConfig,
) {
    let mut velocity = state.velocity * (1.0 - physics.damping) + force / mass * physics.dt;
    if let Some(max_speed) = max_speed {
        let speed = velocity.norm();
        if speed > max_speed {
            velocity = velocity / speed * max_speed;
        }
    }
    state.velocity = velocity;
    state.position += velocity * physics.dt;
}

#[cfg(test)]
mod tests {
    use super::super::{Agent, AgentRole, Landmark, LandmarkKind, Move};
    use super::*;
    use crate::utils::vector::Vector;
    use rand::SeedableRng;

    fn agent_at(name: &str, x: f64, y: f64) -> Agent {
        let mut agent = Agent::new(name, AgentRole::Rescue);
        agent.state.physical.position = Vector([x, y]);
        agent
    }

    #[test]
    fn softplus_matches_naive() {
        for x in [-30.0, -1.0, 0.0, 0.5, 3.0] {
            let naive = (1.0 + f64::exp(x)).ln();
            assert!((softplus(x) - naive).abs() < 1e-12);
        }
        assert!(softplus(1000.0).is_finite());
    }

    #[test]
    fn contact_force_pushes_apart() {
        let physics = PhysicsConfig::default();
        let f = physics.contact_force(Vector([0.05, 0.0]), 0.1);
        assert!(f[0] > 0.0);
        assert_eq!(f[1], 0.0);
    }

    #[test]
    fn contact_force_negligible_when_far() {
        let physics = PhysicsConfig::default();
        let f = physics.contact_force(Vector([1.0, 0.0]), 0.1);
        assert!(f.norm() < 1e-100);
    }

    #[test]
    fn contact_force_coincident_is_zero() {
        let physics = PhysicsConfig::default();
        assert_eq!(
            physics.contact_force(Vec2::zero(), 0.1),
            Vec2::zero()
        );
    }

    #[test]
    fn move_accelerates_agent() {
        let mut world = World::new(2);
        let mut agent = agent_at("a", 0.0, 0.0);
        agent.accel = Some(4.0);
        agent.action_force = Move::Right.force(agent.accel);
        world.agents.push(agent);

        let mut rng = Prng::seed_from_u64(0);
        world.step(&mut rng);
        let state = world.agents[0].state.physical;
        // v = 4.0 / 1.0 * 0.1, p = v * 0.1
        assert!((state.velocity[0] - 0.4).abs() < 1e-12);
        assert!((state.position[0] - 0.04).abs() < 1e-12);
        assert_eq!(state.position[1], 0.0);
    }

    #[test]
    fn speed_is_clamped() {
        let mut world = World::new(2);
        let mut agent = agent_at("a", 0.0, 0.0);
        agent.max_speed = Some(0.1);
        agent.action_force = Move::Up.force(Some(100.0));
        world.agents.push(agent);

        let mut rng = Prng::seed_from_u64(0);
        for _ in 0..5 {
            world.step(&mut rng);
            assert!(world.agents[0].state.physical.velocity.norm() <= 0.1 + 1e-12);
        }
    }

    #[test]
    fn velocity_damped_without_force() {
        let mut world = World::new(0);
        let mut agent = agent_at("a", 0.0, 0.0);
        agent.state.physical.velocity = Vector([1.0, 0.0]);
        world.agents.push(agent);

        let mut rng = Prng::seed_from_u64(0);
        world.step(&mut rng);
        assert!((world.agents[0].state.physical.velocity[0] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn immovable_landmark_stays_put() {
        let mut world = World::new(0);
        world.agents.push(agent_at("a", 0.0, 0.0));
        let mut landmark = Landmark::new("l", LandmarkKind::Static);
        landmark.size = 0.2;
        landmark.state.position = Vector([0.1, 0.0]);
        world.landmarks.push(landmark);

        let mut rng = Prng::seed_from_u64(0);
        for _ in 0..10 {
            world.step(&mut rng);
        }
        assert_eq!(world.landmarks[0].state.position, Vector([0.1, 0.0]));
        // The agent was pushed away to the left
        assert!(world.agents[0].state.physical.position[0] < 0.0);
    }

    #[test]
    fn movable_landmark_is_pushed() {
        let mut world = World::new(0);
        world.agents.push(agent_at("a", 0.0, 0.0));
        let mut landmark = Landmark::new("l", LandmarkKind::Move);
        landmark.movable = true;
        landmark.state.position = Vector([0.05, 0.0]);
        world.landmarks.push(landmark);

        let mut rng = Prng::seed_from_u64(0);
        world.step(&mut rng);
        assert!(world.landmarks[0].state.position[0] > 0.05);
    }

    #[test]
    fn non_colliding_entities_pass_through() {
        let mut world = World::new(0);
        let mut a = agent_at("a", 0.0, 0.0);
        a.collide = false;
        world.agents.push(a);
        world.agents.push(agent_at("b", 0.01, 0.0));

        let mut rng = Prng::seed_from_u64(0);
        world.step(&mut rng);
        assert_eq!(world.agents[0].state.physical.position, Vector([0.0, 0.0]));
        assert_eq!(world.agents[1].state.physical.position, Vector([0.01, 0.0]));
    }

    #[test]
    fn silent_agents_communication_zeroed() {
        let mut world = World::new(2);
        let mut agent = agent_at("a", 0.0, 0.0);
        agent.silent = true;
        agent.state.communication = vec![1.0];
        world.agents.push(agent);

        let mut rng = Prng::seed_from_u64(0);
        world.step(&mut rng);
        assert_eq!(world.agents[0].state.communication, vec![0.0, 0.0]);
    }

    #[test]
    fn noise_perturbs_force() {
        let mut world = World::new(0);
        let mut agent = agent_at("a", 0.0, 0.0);
        agent.u_noise = Some(1.0);
        world.agents.push(agent);

        let mut rng = Prng::seed_from_u64(0);
        world.step(&mut rng);
        assert!(!world.agents[0].state.physical.velocity.is_zero());
    }
}
