use crate::utils::fmt::MeanStd;
use crate::utils::stats::OnlineMeanVariance;
use crate::world::AgentRole;
use enum_map::EnumMap;
use std::fmt;

/// Summary statistics of a multi-agent rollout.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RolloutSummary {
    pub num_steps: u64,
    pub num_episodes: u64,
    /// Undiscounted episode return statistics of the agents in each role.
    pub episode_returns: EnumMap<AgentRole, OnlineMeanVariance<f64>>,
    /// Sum of the per-agent benchmark values over all steps.
    pub total_benchmark: u64,
}

impl fmt::Display for RolloutSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "num_steps: {}", self.num_steps)?;
        writeln!(f, "num_episodes: {}", self.num_episodes)?;
        for (role, stats) in &self.episode_returns {
            if stats.count() > 0 {
                let label = format!("{}:", role);
                writeln!(f, "ep_return_{:<10} {}", label, MeanStd(stats))?;
            }
        }
        writeln!(f, "benchmark_total: {}", self.total_benchmark)?;
        Ok(())
    }
}
