//! Agent populations shared by the scenarios.
use crate::envs::BuildEnvError;
use crate::world::{Agent, AgentRole, Color, World};
use serde::{Deserialize, Serialize};

pub const TRAPPED_COLOR: Color = Color([0.35, 0.85, 0.35]);
pub const ADVERSARY_COLOR: Color = Color([0.85, 0.35, 0.35]);

/// Number of agents of each role.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentCounts {
    pub trapped: usize,
    pub rescue: usize,
    pub adversaries: usize,
}

impl AgentCounts {
    pub const fn total(&self) -> usize {
        self.trapped + self.rescue + self.adversaries
    }

    /// Check that the counts describe a usable population.
    pub fn validate(&self) -> Result<(), BuildEnvError> {
        if self.total() == 0 {
            return Err(BuildEnvError::NoAgents);
        }
        if self.adversaries > 0 && self.trapped == 0 {
            return Err(BuildEnvError::NoTrappedAgents {
                num_adversaries: self.adversaries,
            });
        }
        Ok(())
    }

    /// Add silent agents to the world: trapped, then rescue, then adversaries.
    pub fn populate(&self, world: &mut World, rescue_color: Color) {
        world.agents.reserve(self.total());
        for i in 0..self.trapped {
            world.agents.push(trapped_agent(i));
        }
        for i in 0..self.rescue {
            world.agents.push(rescue_agent(i, rescue_color));
        }
        for i in 0..self.adversaries {
            world.agents.push(adversary_agent(i));
        }
    }
}

fn silent_agent(name: String, role: AgentRole) -> Agent {
    let mut agent = Agent::new(name, role);
    agent.collide = true;
    agent.silent = true;
    agent
}

pub fn trapped_agent(index: usize) -> Agent {
    let mut agent = silent_agent(format!("trapped_agent_{}", index), AgentRole::Trapped);
    agent.size = 0.05;
    agent.accel = Some(4.0);
    agent.max_speed = Some(1.3);
    agent.color = TRAPPED_COLOR;
    agent
}

pub fn rescue_agent(index: usize, color: Color) -> Agent {
    let mut agent = silent_agent(format!("rescue_agent_{}", index), AgentRole::Rescue);
    agent.size = 0.05;
    agent.accel = Some(4.0);
    agent.max_speed = Some(1.3);
    agent.color = color;
    agent
}

pub fn adversary_agent(index: usize) -> Agent {
    let mut agent = silent_agent(format!("adversary_agent_{}", index), AgentRole::Adversary);
    agent.size = 0.075;
    agent.accel = Some(3.0);
    agent.max_speed = Some(1.0);
    agent.color = ADVERSARY_COLOR;
    agent
}
