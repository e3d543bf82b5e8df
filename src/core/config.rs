//! Configuration types.
//!
//! - `AgentConfig`: the per-decision time budget handed to agents
//! - `MatchConfig`: everything needed to set up a game, loadable from YAML
//!
//! Durations are (de)serialized as whole milliseconds.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::mcts::MCTSConfig;
use crate::play::GameLoopConfig;

/// Agent configuration.
///
/// `duration` is the only option: how long an agent may compute per decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(rename = "duration_ms", with = "duration_ms")]
    pub duration: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(30),
        }
    }
}

impl AgentConfig {
    /// Create a config with the given decision budget.
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Create a config with a budget in milliseconds.
    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }
}

/// Full match setup.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub agent: AgentConfig,
    pub mcts: MCTSConfig,
    pub game_loop: GameLoopConfig,
}

impl MatchConfig {
    /// Parse a YAML document. Missing sections take their defaults.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: MatchConfig = serde_yaml_ng::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to deserialize config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check every section. `from_yaml` and `GameLoop::from_match_config`
    /// both call this.
    pub fn validate(&self) -> Result<()> {
        if self.agent.duration.is_zero() {
            return Err(Error::Config("agent duration must be positive".to_string()));
        }
        self.mcts.validate()?;
        self.game_loop.validate()
    }
}

pub(crate) mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
