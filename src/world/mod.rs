//! Two-dimensional multi-agent particle world.
mod action;
mod entity;
mod physics;

pub use action::{Move, DEFAULT_SENSITIVITY};
pub use entity::{Agent, AgentRole, AgentState, Color, Entity, EntityState, Landmark, LandmarkKind};
pub use physics::PhysicsConfig;

use serde::{Deserialize, Serialize};

/// Dimensionality of positions and velocities.
pub const DIM_P: usize = 2;

/// A particle world: agents, landmarks and the physics that moves them.
///
/// A world is created once by a scenario and mutated in place by resets and physics steps.
/// The set of entities and their role/kind tags do not change after construction.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Agents in a fixed order.
    pub agents: Vec<Agent>,
    /// Landmarks in a fixed order.
    pub landmarks: Vec<Landmark>,
    /// Dimensionality of the communication channel.
    pub dim_c: usize,
    /// Physics parameters.
    pub physics: PhysicsConfig,
}

impl World {
    /// Create an empty world with the given communication dimension.
    pub fn new(dim_c: usize) -> Self {
        Self {
            agents: Vec::new(),
            landmarks: Vec::new(),
            dim_c,
            physics: PhysicsConfig::default(),
        }
    }

    /// Number of agents.
    pub fn num_agents(&self) -> usize {
        self.agents.len()
    }

    /// Agents with the given role, in world order.
    pub fn agents_with_role(&self, role: AgentRole) -> impl Iterator<Item = &Agent> + '_ {
        self.agents.iter().filter(move |a| a.role == role)
    }

    /// Landmarks of the given kind, in world order.
    pub fn landmarks_of_kind(&self, kind: LandmarkKind) -> impl Iterator<Item = &Landmark> + '_ {
        self.landmarks.iter().filter(move |l| l.kind == kind)
    }

    /// All entities: agents first then landmarks.
    pub fn entities(&self) -> impl Iterator<Item = &dyn Entity> + '_ {
        self.agents
            .iter()
            .map(|a| a as &dyn Entity)
            .chain(self.landmarks.iter().map(|l| l as &dyn Entity))
    }
}
