use crate::utils::vector::{Vec2, Vector};
use enum_map::Enum;
use serde::{Deserialize, Serialize};

/// Default movement sensitivity for agents without an `accel` limit.
pub const DEFAULT_SENSITIVITY: f64 = 5.0;

/// Discrete movement action.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum Move {
    NoOp,
    Right,
    Left,
    Up,
    Down,
}

impl Default for Move {
    fn default() -> Self {
        Self::NoOp
    }
}

impl Move {
    /// Unit direction of the move (zero for [`Move::NoOp`]).
    pub const fn direction(self) -> Vec2 {
        match self {
            Self::NoOp => Vector([0.0, 0.0]),
            Self::Right => Vector([1.0, 0.0]),
            Self::Left => Vector([-1.0, 0.0]),
            Self::Up => Vector([0.0, 1.0]),
            Self::Down => Vector([0.0, -1.0]),
        }
    }

    /// Force applied by an agent taking this move.
    ///
    /// # Args
    /// * `accel` - The agent's acceleration limit, if any.
    pub fn force(self, accel: Option<f64>) -> Vec2 {
        self.direction() * accel.unwrap_or(DEFAULT_SENSITIVITY)
    }
}
