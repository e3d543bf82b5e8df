//! Turn-by-turn driver.

use std::sync::Arc;
use std::time::Instant;

use crate::agent::{DecisionAgent, MctsAgent};
use crate::core::{AgentConfig, MatchConfig, PlayerMap};
use crate::error::{Error, Result};
use crate::log;
use crate::rules::RulesEngine;

use super::config::{GameLoopConfig, TimeoutRecovery};
use super::record::{GameRecord, MoveRecord};

/// Plays a game by asking the seated agent for each move.
///
/// The loop owns the only copy of the current state. Agents see it by
/// reference and the loop replaces it only after `apply_action` succeeds,
/// so a failed turn leaves the last consistent position in place.
pub struct GameLoop<E: RulesEngine> {
    engine: E,
    state: E::State,
    agents: PlayerMap<Arc<dyn DecisionAgent<E>>>,
    agent_config: AgentConfig,
    config: GameLoopConfig,
    history: Vec<MoveRecord<E::Action>>,
}

impl<E: RulesEngine> GameLoop<E> {
    /// Seat the same agent on both sides.
    pub fn new(engine: E, agent: Arc<dyn DecisionAgent<E>>, agent_config: AgentConfig) -> Self {
        Self::with_agents(engine, PlayerMap::from_pair(Arc::clone(&agent), agent), agent_config)
    }

    /// Seat one agent per player.
    pub fn with_agents(
        engine: E,
        agents: PlayerMap<Arc<dyn DecisionAgent<E>>>,
        agent_config: AgentConfig,
    ) -> Self {
        let state = engine.initial_state();
        Self {
            engine,
            state,
            agents,
            agent_config,
            config: GameLoopConfig::default(),
            history: Vec::new(),
        }
    }

    /// Seat an `MctsAgent` tuned by `config.mcts` on both sides.
    ///
    /// Fails with `Error::Config` if any section of `config` is invalid.
    pub fn from_match_config(engine: E, config: &MatchConfig) -> Result<Self> {
        config.validate()?;
        let agent: Arc<dyn DecisionAgent<E>> = Arc::new(MctsAgent::new(config.mcts.clone()));
        Ok(Self::new(engine, agent, config.agent).with_config(config.game_loop.clone()))
    }

    pub fn with_config(mut self, config: GameLoopConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from `state` instead of the initial position.
    pub fn with_state(mut self, state: E::State) -> Self {
        self.state = state;
        self
    }

    /// Play one turn.
    ///
    /// Returns `Ok(None)` once the game is over.
    pub async fn step(&mut self) -> Result<Option<MoveRecord<E::Action>>> {
        if self.engine.is_terminal(&self.state) {
            return Ok(None);
        }

        if self.history.len() >= self.config.max_moves {
            return Err(Error::MoveLimitExceeded {
                limit: self.config.max_moves,
            });
        }

        let player = self.engine.to_move(&self.state);
        let agent = Arc::clone(&self.agents[player]);
        let budget = self.agent_config.duration + self.config.timeout_grace;

        let started = Instant::now();
        let decision = tokio::time::timeout(
            budget,
            agent.decide(&self.engine, &self.state, &self.agent_config),
        )
        .await;
        let elapsed = started.elapsed();

        let (action, timed_out) = match decision {
            Ok(result) => (result?, false),
            Err(_) => match self.config.on_timeout {
                TimeoutRecovery::Abort => {
                    log!("[game] {} timed out after {:?}, aborting", player, elapsed);
                    return Err(Error::AgentTimeout { player, budget });
                }
                TimeoutRecovery::FirstLegalAction => {
                    let action = self
                        .engine
                        .generate_actions(&self.state)
                        .into_iter()
                        .next()
                        .ok_or(Error::NoLegalActions)?;
                    log!("[game] {} timed out after {:?}, playing {}", player, elapsed, action);
                    (action, true)
                }
            },
        };

        self.state = self.engine.apply_action(&self.state, &action)?;

        log!("[game] move {}: {} plays {}", self.history.len() + 1, player, action);

        let record = MoveRecord {
            player,
            action,
            elapsed,
            timed_out,
        };
        self.history.push(record.clone());
        Ok(Some(record))
    }

    /// Play until the game ends.
    pub async fn run(&mut self) -> Result<GameRecord<E::State, E::Action>> {
        while self.step().await?.is_some() {}

        let result = self
            .engine
            .result(&self.state)?
            .ok_or_else(|| Error::InvalidState("game stopped before a terminal state".to_string()))?;

        log!("[game] finished after {} moves: {:?}", self.history.len(), result);

        Ok(GameRecord {
            moves: self.history.clone(),
            final_state: self.state.clone(),
            result,
        })
    }

    pub fn state(&self) -> &E::State {
        &self.state
    }

    pub fn history(&self) -> &[MoveRecord<E::Action>] {
        &self.history
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &GameLoopConfig {
        &self.config
    }
}
