use tokio::sync::Mutex;

use crate::core::{AgentConfig, GameRng};
use crate::error::Error;
use crate::rules::RulesEngine;

use super::{AgentFuture, DecisionAgent};

/// Plays a uniformly random legal action.
#[derive(Debug)]
pub struct RandomAgent {
    rng: Mutex<GameRng>,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(GameRng::new(seed)),
        }
    }
}

impl<E: RulesEngine> DecisionAgent<E> for RandomAgent {
    fn decide<'a>(
        &'a self,
        engine: &'a E,
        state: &'a E::State,
        _config: &'a AgentConfig,
    ) -> AgentFuture<'a, E::Action> {
        Box::pin(async move {
            let actions = engine.generate_actions(state);
            let mut rng = self.rng.lock().await;
            rng.choose(&actions).cloned().ok_or(Error::NoLegalActions)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Player;
    use crate::games::tictactoe::{GameState, TicTacToe};

    #[tokio::test]
    async fn test_random_agent_legal() {
        let game = TicTacToe::new();
        let state = GameState::from_board([[1, 0, -1], [0, 1, 0], [-1, 0, 0]], Player::One).unwrap();
        let agent = RandomAgent::new(3);

        for _ in 0..20 {
            let action = agent.decide(&game, &state, &AgentConfig::default()).await.unwrap();
            assert!(game.is_legal(&state, &action));
        }
    }

    #[tokio::test]
    async fn test_random_agent_seeded() {
        let game = TicTacToe::new();
        let state = GameState::new(Player::One);
        let a = RandomAgent::new(11);
        let b = RandomAgent::new(11);

        for _ in 0..5 {
            let x = a.decide(&game, &state, &AgentConfig::default()).await.unwrap();
            let y = b.decide(&game, &state, &AgentConfig::default()).await.unwrap();
            assert_eq!(x, y);
        }
    }

    #[tokio::test]
    async fn test_random_agent_no_moves() {
        let game = TicTacToe::new();
        let full = GameState::from_board([[1, -1, 1], [1, -1, -1], [-1, 1, 1]], Player::Two).unwrap();
        let agent = RandomAgent::new(0);

        let err = agent.decide(&game, &full, &AgentConfig::default()).await.unwrap_err();
        assert_eq!(err, Error::NoLegalActions);
    }
}
