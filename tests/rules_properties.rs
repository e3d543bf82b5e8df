//! Property-based tests for the tic-tac-toe rules.
//!
//! Positions are generated by playing random legal moves from the empty
//! board, so every state checked here is reachable.

use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use rust_gamesearch::core::Player;
use rust_gamesearch::games::tictactoe::{Action, GameState, TicTacToe, LINES};
use rust_gamesearch::rules::{Reward, RulesEngine};

// =============================================================================
// Strategies
// =============================================================================

/// A reachable position after up to `0..=9` random moves.
fn arb_position() -> impl Strategy<Value = GameState> {
    (0usize..=9, any::<u64>()).prop_map(|(num_moves, seed)| {
        let game = TicTacToe::new();
        let mut state = game.initial_state();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        for _ in 0..num_moves {
            if game.is_terminal(&state) {
                break;
            }
            let actions = game.generate_actions(&state);
            let idx = rng.gen_range(0..actions.len());
            state = game.apply_action(&state, &actions[idx]).unwrap();
        }

        state
    })
}

fn has_line(state: &GameState) -> bool {
    LINES.iter().any(|line| {
        let sum: i8 = line.iter().map(|&(r, c)| state.board()[r][c]).sum();
        sum.abs() == 3
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_actions_are_empty_cells_in_row_major_order(state in arb_position()) {
        let game = TicTacToe::new();
        let actions = game.generate_actions(&state);

        let mut expected = Vec::new();
        for r in 0..3u8 {
            for c in 0..3u8 {
                if state.board()[r as usize][c as usize] == 0 {
                    expected.push(Action::new(r, c));
                }
            }
        }

        prop_assert_eq!(actions, expected);
    }

    #[test]
    fn prop_apply_is_pure_and_flips_player(state in arb_position()) {
        let game = TicTacToe::new();
        let before = state;

        for action in game.generate_actions(&state) {
            let next = game.apply_action(&state, &action).unwrap();

            prop_assert_eq!(state, before);
            prop_assert_eq!(next.player(), state.player().opponent());
            prop_assert_eq!(
                next.cell(action.row as usize, action.column as usize),
                Some(state.player().sign())
            );
            prop_assert_eq!(next.occupied_count(), state.occupied_count() + 1);
        }
    }

    #[test]
    fn prop_illegal_actions_rejected(state in arb_position(), row in 0u8..5, column in 0u8..5) {
        let game = TicTacToe::new();
        let action = Action::new(row, column);

        let legal = game.generate_actions(&state).contains(&action);
        prop_assert_eq!(game.apply_action(&state, &action).is_ok(), legal);
    }

    #[test]
    fn prop_terminal_iff_line_or_full(state in arb_position()) {
        let game = TicTacToe::new();
        let expected = has_line(&state) || game.generate_actions(&state).is_empty();

        prop_assert_eq!(game.is_terminal(&state), expected);
    }

    #[test]
    fn prop_rewards_are_zero_sum(state in arb_position()) {
        let game = TicTacToe::new();

        if game.is_terminal(&state) {
            let one = game.calculate_reward(&state, Player::One).unwrap();
            let two = game.calculate_reward(&state, Player::Two).unwrap();
            prop_assert_eq!(one.flipped(), two);
            prop_assert_eq!(one == Reward::Draw, !has_line(&state));
        } else {
            prop_assert!(game.calculate_reward(&state, Player::One).is_err());
        }
    }

    #[test]
    fn prop_reachable_wins_belong_to_last_mover(state in arb_position()) {
        let game = TicTacToe::new();

        if has_line(&state) {
            // The winner moved last, so the opponent is to move.
            let last_mover = state.player().opponent();
            prop_assert_eq!(game.calculate_reward(&state, last_mover).unwrap(), Reward::Win);
        }
    }
}
