//! Pluggable pieces of an iteration.
//!
//! `SelectionPolicy` picks which tried edge to descend; `SimulationPolicy`
//! scores a freshly expanded position. `MCTSSearch` defaults to `UCB1` and
//! `RandomSimulation`.

use crate::core::{GameRng, Player, PlayerMap};
use crate::error::Result;
use crate::rules::RulesEngine;

use super::config::MCTSConfig;
use super::node::MCTSNode;

/// Chooses an edge of a fully expanded node.
pub trait SelectionPolicy<A>: Send + Sync {
    /// Index into `node.edges`, judged from `player`'s rewards.
    fn select(&self, node: &MCTSNode<A>, player: Player, config: &MCTSConfig) -> usize;
}

/// Upper confidence bound: `mean + c * sqrt(ln N / n)`.
///
/// Unvisited edges score infinity. Ties go to the earlier edge.
#[derive(Clone, Copy, Debug, Default)]
pub struct UCB1;

impl<A> SelectionPolicy<A> for UCB1 {
    fn select(&self, node: &MCTSNode<A>, player: Player, config: &MCTSConfig) -> usize {
        let log_n = f64::from(node.visits.max(1)).ln();
        let score = |visits: u32, mean: f64| match visits {
            0 => f64::INFINITY,
            n => mean + config.exploration_constant * (log_n / f64::from(n)).sqrt(),
        };

        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (i, edge) in node.edges.iter().enumerate() {
            let s = score(edge.visits, edge.mean_reward(player));
            if s > best_score {
                best = i;
                best_score = s;
            }
        }
        best
    }
}

/// Estimates the value of a position for both seats.
pub trait SimulationPolicy<E: RulesEngine>: Send + Sync {
    /// Rewards per seat for a playout from `state`.
    ///
    /// `max_depth` caps the playout length in plies, 0 for no cap. `state`
    /// itself is left alone.
    fn simulate(
        &self,
        engine: &E,
        state: &E::State,
        rng: &mut GameRng,
        max_depth: u32,
    ) -> Result<PlayerMap<f64>>;
}

/// Uniformly random playout to the end of the game.
///
/// A playout cut off by `max_depth`, or stuck without moves short of a
/// terminal state, scores as a draw.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomSimulation;

impl<E: RulesEngine> SimulationPolicy<E> for RandomSimulation {
    fn simulate(
        &self,
        engine: &E,
        state: &E::State,
        rng: &mut GameRng,
        max_depth: u32,
    ) -> Result<PlayerMap<f64>> {
        let draw = PlayerMap::with_value(0.0);
        let mut current = state.clone();
        let mut plies = 0u32;

        while !engine.is_terminal(&current) {
            if max_depth > 0 && plies >= max_depth {
                return Ok(draw);
            }
            let moves = engine.generate_actions(&current);
            let Some(action) = rng.choose(&moves) else {
                return Ok(draw);
            };
            current = engine.apply_action(&current, action)?;
            plies += 1;
        }

        terminal_rewards(engine, &current)
    }
}

/// Both seats' rewards for a finished game, as `-1.0`, `0.0` or `1.0`.
pub fn terminal_rewards<E: RulesEngine>(engine: &E, state: &E::State) -> Result<PlayerMap<f64>> {
    Ok(PlayerMap::from_pair(
        engine.calculate_reward(state, Player::One)?.as_f64(),
        engine.calculate_reward(state, Player::Two)?.as_f64(),
    ))
}
