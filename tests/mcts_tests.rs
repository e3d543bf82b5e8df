//! MCTS integration tests using tic-tac-toe.

use rust_gamesearch::core::Player;
use rust_gamesearch::games::tictactoe::{Action, Board, GameState, TicTacToe};
use rust_gamesearch::mcts::{parallel_search, MCTSConfig, MCTSSearch, MCTSTree, SearchLimit};
use rust_gamesearch::rules::RulesEngine;

fn state(board: Board, player: Player) -> GameState {
    GameState::from_board(board, player).unwrap()
}

// =============================================================================
// Basic Search Tests
// =============================================================================

#[test]
fn test_mcts_returns_legal_action() {
    let game = TicTacToe::new();
    let start = game.initial_state();

    let mut search = MCTSSearch::new(game, MCTSConfig::default());
    let action = search.search(&start, SearchLimit::Iterations(100)).unwrap();

    assert!(game.is_legal(&start, &action));
}

#[test]
fn test_mcts_with_low_iterations() {
    let game = TicTacToe::new();
    let start = game.initial_state();

    let mut search = MCTSSearch::new(game, MCTSConfig::default());

    // Even with few iterations, should return something
    let action = search.search(&start, SearchLimit::Iterations(3)).unwrap();
    assert!(game.is_legal(&start, &action));
}

#[test]
fn test_mcts_zero_time_still_answers() {
    let game = TicTacToe::new();
    let start = game.initial_state();

    let mut search = MCTSSearch::new(game, MCTSConfig::default());
    let action = search
        .search(&start, SearchLimit::Time(std::time::Duration::ZERO))
        .unwrap();

    assert!(game.is_legal(&start, &action));
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[test]
fn test_mcts_deterministic_with_seed() {
    let game = TicTacToe::new();
    let s = state([[1, 0, 0], [0, 0, 0], [0, 0, -1]], Player::One);
    let config = MCTSConfig::default().with_seed(12345);

    let mut search1 = MCTSSearch::new(game, config.clone());
    let mut search2 = MCTSSearch::new(game, config);

    let action1 = search1.search(&s, SearchLimit::Iterations(500)).unwrap();
    let action2 = search2.search(&s, SearchLimit::Iterations(500)).unwrap();

    assert_eq!(action1, action2, "Same seed should produce same action");
    assert_eq!(search1.action_visits(), search2.action_visits());
}

#[test]
fn test_mcts_repeat_search_resets_tree() {
    let game = TicTacToe::new();
    let start = game.initial_state();

    let mut search = MCTSSearch::new(game, MCTSConfig::default());
    search.search(&start, SearchLimit::Iterations(200)).unwrap();
    let first = search.stats().iterations;
    search.search(&start, SearchLimit::Iterations(50)).unwrap();

    assert_eq!(first, 200);
    assert_eq!(search.stats().iterations, 50);
    let root_visits: u32 = search.action_visits().iter().map(|(_, v)| v).sum();
    assert_eq!(root_visits, 50);
}

// =============================================================================
// Tactical Tests
// =============================================================================

#[test]
fn test_mcts_takes_immediate_win() {
    let game = TicTacToe::new();
    // X: (0,0) (1,1). O: (0,1) (0,2). X completes the diagonal at (2,2).
    let s = state([[1, -1, -1], [0, 1, 0], [0, 0, 0]], Player::One);

    let mut search = MCTSSearch::new(game, MCTSConfig::default());
    let action = search.search(&s, SearchLimit::Iterations(3000)).unwrap();

    assert_eq!(action, Action::new(2, 2));
}

#[test]
fn test_mcts_blocks_opponent_win() {
    let game = TicTacToe::new();
    // O threatens the middle row at (1, 2); X has no win of its own.
    let s = state([[1, 0, 0], [-1, -1, 0], [0, 0, 1]], Player::One);

    let mut search = MCTSSearch::new(game, MCTSConfig::default());
    let action = search.search(&s, SearchLimit::Iterations(5000)).unwrap();

    assert_eq!(action, Action::new(1, 2));
}

#[test]
fn test_mcts_second_player_takes_win() {
    let game = TicTacToe::new();
    // O to move, (2, 0) completes the left column.
    let s = state([[-1, 1, 1], [-1, 1, 0], [0, 0, 0]], Player::Two);

    let mut search = MCTSSearch::new(game, MCTSConfig::default());
    let action = search.search(&s, SearchLimit::Iterations(3000)).unwrap();

    assert_eq!(action, Action::new(2, 0));
}

#[test]
fn test_parallel_search_takes_win() {
    let game = TicTacToe::new();
    let s = state([[1, -1, -1], [0, 1, 0], [0, 0, 0]], Player::One);
    let config = MCTSConfig::default().with_workers(4);

    let outcome = parallel_search(&game, &s, &config, SearchLimit::Iterations(1000)).unwrap();

    assert_eq!(outcome.action, Action::new(2, 2));
    assert_eq!(outcome.stats.iterations, 4000);
}

// =============================================================================
// Tree Tests
// =============================================================================

#[test]
fn test_mcts_tree_grows() {
    let game = TicTacToe::new();
    let start = game.initial_state();

    let mut search = MCTSSearch::new(game, MCTSConfig::default());
    search.search(&start, SearchLimit::Iterations(500)).unwrap();

    let stats = search.tree().stats();
    assert!(stats.node_count > 100);
    assert!(stats.max_depth >= 2);
    assert!(stats.expansion_ratio() > 0.0);
}

#[test]
fn test_mcts_max_depth_caps_tree() {
    let game = TicTacToe::new();
    let start = game.initial_state();

    let config = MCTSConfig::default().with_max_depth(2);
    let mut search = MCTSSearch::new(game, config);
    search.search(&start, SearchLimit::Iterations(500)).unwrap();

    assert!(search.tree().stats().max_depth <= 2);
}

#[test]
fn test_mcts_tree_serialization() {
    let game = TicTacToe::new();
    let start = game.initial_state();

    let mut search = MCTSSearch::new(game, MCTSConfig::default());
    search.search(&start, SearchLimit::Iterations(50)).unwrap();

    let json = serde_json::to_string(search.tree()).unwrap();
    let restored: MCTSTree<Action> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.len(), search.tree().len());
    assert_eq!(restored.root_node().visits, search.tree().root_node().visits);
}

#[test]
fn test_mcts_temperature_sampling_is_legal() {
    let game = TicTacToe::new();
    let start = game.initial_state();

    let config = MCTSConfig::default().with_temperature(1.0);
    let mut search = MCTSSearch::new(game, config);

    for _ in 0..5 {
        let action = search.search(&start, SearchLimit::Iterations(100)).unwrap();
        assert!(game.is_legal(&start, &action));
    }
}
