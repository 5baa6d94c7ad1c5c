//! Particle world entities.
use crate::utils::vector::Vec2;
use enum_map::Enum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// RGB color with components in `[0, 1]`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color(pub [f64; 3]);

impl Color {
    pub const GREY: Self = Self([0.25, 0.25, 0.25]);
}

/// Physical state shared by all entities.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    /// Position
    pub position: Vec2,
    /// Velocity
    pub velocity: Vec2,
}

/// Agent state: physical state plus the communication utterance.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub physical: EntityState,
    /// Communication vector of length `World::dim_c`.
    pub communication: Vec<f64>,
}

/// Behavioral role of an agent.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum AgentRole {
    Trapped,
    Rescue,
    Adversary,
}

impl AgentRole {
    pub const ALL: [Self; 3] = [Self::Trapped, Self::Rescue, Self::Adversary];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Trapped => "trapped",
            Self::Rescue => "rescue",
            Self::Adversary => "adversary",
        }
    }

    pub const fn is_adversary(self) -> bool {
        matches!(self, Self::Adversary)
    }

    /// Parse a role from its [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.name() == name)
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Landmark type tag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum LandmarkKind {
    /// Target area that movable landmarks should be pushed onto.
    Goal,
    /// Landmark that agents can push around.
    Move,
    /// Fixed obstacle with a type tag.
    Static,
    /// Untagged obstacle.
    Obstacle,
}

/// Common view of agents and landmarks used by physics and reward shaping.
pub trait Entity {
    fn name(&self) -> &str;
    fn state(&self) -> &EntityState;
    fn size(&self) -> f64;
    fn collide(&self) -> bool;
    fn movable(&self) -> bool;
    fn mass(&self) -> f64;
    fn max_speed(&self) -> Option<f64>;

    fn position(&self) -> Vec2 {
        self.state().position
    }
}

/// A mobile entity with a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    pub role: AgentRole,
    /// Whether the agent takes part in contact physics.
    pub collide: bool,
    /// Silent agents never communicate.
    pub silent: bool,
    pub movable: bool,
    /// Radius
    pub size: f64,
    /// Scale of the movement force.
    pub accel: Option<f64>,
    pub max_speed: Option<f64>,
    pub mass: f64,
    /// Standard deviation of the movement force noise.
    pub u_noise: Option<f64>,
    pub color: Color,
    pub state: AgentState,
    /// Movement force for the next physics step.
    pub action_force: Vec2,
}

impl Agent {
    pub fn new<T: Into<String>>(name: T, role: AgentRole) -> Self {
        Self {
            name: name.into(),
            role,
            collide: true,
            silent: false,
            movable: true,
            size: 0.05,
            accel: None,
            max_speed: None,
            mass: 1.0,
            u_noise: None,
            color: Color::GREY,
            state: AgentState::default(),
            action_force: Vec2::default(),
        }
    }
}

impl Entity for Agent {
    fn name(&self) -> &str {
        &self.name
    }
    fn state(&self) -> &EntityState {
        &self.state.physical
    }
    fn size(&self) -> f64 {
        self.size
    }
    fn collide(&self) -> bool {
        self.collide
    }
    fn movable(&self) -> bool {
        self.movable
    }
    fn mass(&self) -> f64 {
        self.mass
    }
    fn max_speed(&self) -> Option<f64> {
        self.max_speed
    }
}

/// A static or semi-static entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub name: String,
    pub kind: LandmarkKind,
    pub collide: bool,
    pub movable: bool,
    /// Boundary landmarks are neither reset nor observed.
    pub boundary: bool,
    pub size: f64,
    pub mass: f64,
    pub color: Color,
    pub state: EntityState,
}

impl Landmark {
    pub fn new<T: Into<String>>(name: T, kind: LandmarkKind) -> Self {
        Self {
            name: name.into(),
            kind,
            collide: true,
            movable: false,
            boundary: false,
            size: 0.05,
            mass: 1.0,
            color: Color::GREY,
            state: EntityState::default(),
        }
    }
}

impl Entity for Landmark {
    fn name(&self) -> &str {
        &self.name
    }
    fn state(&self) -> &EntityState {
        &self.state
    }
    fn size(&self) -> f64 {
        self.size
    }
    fn collide(&self) -> bool {
        self.collide
    }
    fn movable(&self) -> bool {
        self.movable
    }
    fn mass(&self) -> f64 {
        self.mass
    }
    fn max_speed(&self) -> Option<f64> {
        None
    }
}
