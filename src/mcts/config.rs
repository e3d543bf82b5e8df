//! Search tuning.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tuning for one MCTS search.
///
/// Read from the `mcts` section of a match file; absent keys keep the
/// defaults from `Default`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MCTSConfig {
    /// Weight `c` on the UCB1 exploration term.
    pub exploration_constant: f64,

    /// Tree depth at which selection stops and scores a draw. Rollouts are
    /// cut after the same number of plies. 0 means no cap.
    pub max_depth: u32,

    /// Node budget per tree. A search that spends it stops early.
    pub max_nodes: usize,

    pub seed: u64,

    /// Root move sampling temperature. 0 plays the most visited move.
    pub temperature: f64,

    /// Root-parallel trees per decision.
    pub workers: usize,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            max_depth: 0,
            max_nodes: 100_000,
            seed: 42,
            temperature: 0.0,
            workers: 1,
        }
    }
}

impl MCTSConfig {
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = nodes;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Clamped to at least one worker.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Reject settings a search cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::Config("mcts.workers must be at least 1".to_string()));
        }
        if self.max_nodes == 0 {
            return Err(Error::Config("mcts.max_nodes must be at least 1".to_string()));
        }
        if self.exploration_constant.is_nan() || self.exploration_constant < 0.0 {
            return Err(Error::Config(format!(
                "mcts.exploration_constant must be non-negative, got {}",
                self.exploration_constant
            )));
        }
        if self.temperature.is_nan() || self.temperature < 0.0 {
            return Err(Error::Config(format!(
                "mcts.temperature must be non-negative, got {}",
                self.temperature
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = MCTSConfig::default();
        assert_eq!(config.exploration_constant, std::f64::consts::SQRT_2);
        assert_eq!(config.workers, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_workers_clamped() {
        assert_eq!(MCTSConfig::default().with_workers(0).workers, 1);
        assert_eq!(MCTSConfig::default().with_workers(6).workers, 6);
    }

    #[test]
    fn test_validate_rejects() {
        let bad = [
            MCTSConfig { workers: 0, ..Default::default() },
            MCTSConfig { max_nodes: 0, ..Default::default() },
            MCTSConfig::default().with_exploration(-0.5),
            MCTSConfig::default().with_exploration(f64::NAN),
            MCTSConfig::default().with_temperature(-1.0),
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(Error::Config(_))), "{:?}", config);
        }
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: MCTSConfig = serde_json::from_str(r#"{"seed":9,"workers":3}"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.workers, 3);
        assert_eq!(config.max_nodes, 100_000);
    }
}
