use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::rng::derive_seed;
use crate::core::AgentConfig;
use crate::error::Error;
use crate::log;
use crate::mcts::{parallel_search, MCTSConfig, SearchLimit};
use crate::rules::RulesEngine;

use super::{AgentFuture, DecisionAgent};

/// MCTS-backed agent.
///
/// Each decision runs on tokio's blocking pool with `config.workers`
/// root-parallel trees. Decision `n` searches with `derive_seed(seed, n)`,
/// so consecutive decisions explore differently but a fresh agent replays
/// the same sequence.
#[derive(Debug)]
pub struct MctsAgent {
    config: MCTSConfig,
    iterations: Option<u32>,
    decisions: AtomicU64,
}

impl MctsAgent {
    pub fn new(config: MCTSConfig) -> Self {
        Self {
            config,
            iterations: None,
            decisions: AtomicU64::new(0),
        }
    }

    /// Cap each search at a fixed iteration count. The agent's time budget
    /// still applies, so the search stops at whichever is hit first.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = Some(iterations);
        self
    }

    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Number of decisions made so far.
    pub fn decisions(&self) -> u64 {
        self.decisions.load(Ordering::Relaxed)
    }
}

impl Default for MctsAgent {
    fn default() -> Self {
        Self::new(MCTSConfig::default())
    }
}

impl<E: RulesEngine> DecisionAgent<E> for MctsAgent {
    fn decide<'a>(
        &'a self,
        engine: &'a E,
        state: &'a E::State,
        config: &'a AgentConfig,
    ) -> AgentFuture<'a, E::Action> {
        Box::pin(async move {
            let decision = self.decisions.fetch_add(1, Ordering::Relaxed);
            let search_config = self
                .config
                .clone()
                .with_seed(derive_seed(self.config.seed, decision));
            let limit = match self.iterations {
                Some(n) => SearchLimit::Bounded {
                    iterations: n,
                    time: config.duration,
                },
                None => SearchLimit::Time(config.duration),
            };

            let player = engine.to_move(state);
            let engine = engine.clone();
            let state = state.clone();

            let outcome = tokio::task::spawn_blocking(move || {
                parallel_search(&engine, &state, &search_config, limit)
            })
            .await
            .map_err(|e| Error::Agent(format!("search task failed: {}", e)))??;

            log!("[mcts] {} picks {} after {}", player, outcome.action, outcome.stats);

            Ok(outcome.action)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Player;
    use crate::games::tictactoe::{Action, GameState, TicTacToe};
    use std::time::{Duration, Instant};

    fn generous() -> AgentConfig {
        AgentConfig::from_millis(5000)
    }

    #[tokio::test]
    async fn test_mcts_agent_returns_legal_action() {
        let game = TicTacToe::new();
        let state = GameState::new(Player::One);
        let agent = MctsAgent::default().with_iterations(200);

        let action = agent.decide(&game, &state, &generous()).await.unwrap();
        assert!(game.is_legal(&state, &action));
        assert_eq!(agent.decisions(), 1);
    }

    #[tokio::test]
    async fn test_mcts_agent_time_budget() {
        let game = TicTacToe::new();
        let state = GameState::new(Player::One);
        let agent = MctsAgent::default();

        let action = agent
            .decide(&game, &state, &AgentConfig::from_millis(10))
            .await
            .unwrap();
        assert!(game.is_legal(&state, &action));
    }

    #[tokio::test]
    async fn test_mcts_agent_takes_win() {
        let game = TicTacToe::new();
        // X to move, (0, 2) completes the top row.
        let state = GameState::from_board([[1, 1, 0], [-1, -1, 0], [0, 0, 0]], Player::One).unwrap();
        let agent = MctsAgent::new(MCTSConfig::default().with_workers(2)).with_iterations(2000);

        let action = agent.decide(&game, &state, &generous()).await.unwrap();
        assert_eq!(action, Action::new(0, 2));
    }

    #[tokio::test]
    async fn test_mcts_agent_terminal_state() {
        let game = TicTacToe::new();
        let state = GameState::from_board([[1, 1, 1], [-1, -1, 0], [0, 0, 0]], Player::Two).unwrap();
        let agent = MctsAgent::default().with_iterations(10);

        let err = agent.decide(&game, &state, &AgentConfig::default()).await.unwrap_err();
        assert_eq!(err, Error::NoLegalActions);
    }

    #[tokio::test]
    async fn test_mcts_agent_fresh_agents_agree() {
        let game = TicTacToe::new();
        let state = GameState::new(Player::One);

        let a = MctsAgent::default().with_iterations(300);
        let b = MctsAgent::default().with_iterations(300);

        for _ in 0..2 {
            let x = a.decide(&game, &state, &generous()).await.unwrap();
            let y = b.decide(&game, &state, &generous()).await.unwrap();
            assert_eq!(x, y);
        }
    }

    #[tokio::test]
    async fn test_mcts_agent_iteration_cap_respects_duration() {
        let game = TicTacToe::new();
        let state = GameState::new(Player::One);
        let agent = MctsAgent::default().with_iterations(u32::MAX);

        let start = Instant::now();
        let action = agent
            .decide(&game, &state, &AgentConfig::from_millis(20))
            .await
            .unwrap();

        assert!(game.is_legal(&state, &action));
        assert!(start.elapsed() < Duration::from_secs(2));
    }
}
