//! Core MCTS search algorithm.
//!
//! Plain UCT for perfect-information two-player games: every node is
//! expanded, and each node selects on behalf of the player to move there.

use std::time::{Duration, Instant};

use crate::core::{GameRng, PlayerMap};
use crate::error::{Error, Result};
use crate::rules::RulesEngine;

use super::config::MCTSConfig;
use super::node::{Edge, MCTSNode, NodeId};
use super::policy::{terminal_rewards, RandomSimulation, SelectionPolicy, SimulationPolicy, UCB1};
use super::stats::SearchStats;
use super::tree::MCTSTree;

/// When a search stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchLimit {
    /// Run exactly this many iterations (node limit permitting).
    Iterations(u32),
    /// Run until this much wall time has passed.
    Time(Duration),
    /// Stop at whichever of the two comes first.
    Bounded { iterations: u32, time: Duration },
}

impl SearchLimit {
    fn reached(self, iterations: u32, start: Instant) -> bool {
        match self {
            SearchLimit::Iterations(n) => iterations >= n,
            SearchLimit::Time(budget) => start.elapsed() >= budget,
            SearchLimit::Bounded { iterations: n, time } => iterations >= n || start.elapsed() >= time,
        }
    }
}

/// Main MCTS search context.
///
/// Generic over the rules engine type. Owns the search tree and
/// configuration, and provides methods to run searches.
pub struct MCTSSearch<E: RulesEngine> {
    /// The game rules engine.
    engine: E,

    /// Search configuration.
    config: MCTSConfig,

    /// The search tree.
    tree: MCTSTree<E::Action>,

    /// RNG for expansion order and rollouts.
    rng: GameRng,

    /// Selection policy.
    selection: Box<dyn SelectionPolicy<E::Action>>,

    /// Simulation policy.
    simulation: Box<dyn SimulationPolicy<E>>,

    /// Search statistics.
    stats: SearchStats,
}

impl<E: RulesEngine> MCTSSearch<E> {
    /// Create a new MCTS search context.
    pub fn new(engine: E, config: MCTSConfig) -> Self {
        let rng = GameRng::new(config.seed);
        let capacity = config.max_nodes.min(1 << 16);

        Self {
            engine,
            tree: MCTSTree::with_capacity(crate::core::Player::One, capacity),
            config,
            rng,
            selection: Box::new(UCB1),
            simulation: Box::new(RandomSimulation),
            stats: SearchStats::default(),
        }
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy<E::Action> + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<S: SimulationPolicy<E> + 'static>(mut self, simulation: S) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Run MCTS from `state` until `limit` is reached.
    ///
    /// Returns the chosen action for the player to move. The search never
    /// touches `state`; every iteration branches from a copy.
    ///
    /// Fails with `Error::NoLegalActions` when the root is terminal or has
    /// no moves. Rule errors hit while exploring abort the search.
    pub fn search(&mut self, state: &E::State, limit: SearchLimit) -> Result<E::Action> {
        let start = Instant::now();
        self.stats.reset();

        self.tree.reset(self.engine.to_move(state));
        let root = self.tree.root();
        self.expand_node(root, state)?;

        let root_node = self.tree.get(root);
        if root_node.is_terminal || root_node.edges.is_empty() {
            return Err(Error::NoLegalActions);
        }

        // No choice to make
        if root_node.edges.len() == 1 {
            let action = root_node.edges[0].action.clone();
            self.stats.time_us = elapsed_us(start);
            return Ok(action);
        }

        while !limit.reached(self.stats.iterations, start) {
            self.iteration(state)?;
            self.stats.iterations += 1;

            if self.tree.len() >= self.config.max_nodes {
                break;
            }
        }

        self.stats.time_us = elapsed_us(start);

        self.best_action()
    }

    /// Single MCTS iteration: select, expand, simulate, backpropagate.
    fn iteration(&mut self, root_state: &E::State) -> Result<()> {
        let mut path: Vec<(NodeId, usize)> = Vec::new();
        let mut current = self.tree.root();
        let mut state = root_state.clone();

        loop {
            let node = self.tree.get(current);

            if node.is_terminal {
                let rewards = node
                    .terminal_reward
                    .clone()
                    .unwrap_or_else(|| PlayerMap::with_value(0.0));
                self.backpropagate(&path, &rewards);
                return Ok(());
            }

            // Depth limit or a dead end: score as a draw
            let depth_capped = self.config.max_depth > 0 && node.depth >= self.config.max_depth;
            if depth_capped || node.edges.is_empty() {
                self.backpropagate(&path, &PlayerMap::with_value(0.0));
                return Ok(());
            }

            let to_move = node.to_move;

            if node.has_unexpanded() {
                let edge_idx = self.select_unexpanded(current);
                path.push((current, edge_idx));

                let action = self.tree.get(current).edges[edge_idx].action.clone();
                state = self.engine.apply_action(&state, &action)?;
                self.expand_child(current, edge_idx, &state)?;

                let rewards = self.simulate(&state)?;
                self.stats.simulations += 1;
                self.backpropagate(&path, &rewards);
                return Ok(());
            }

            // All edges expanded - select best for the mover
            let edge_idx = self.selection.select(node, to_move, &self.config);
            path.push((current, edge_idx));

            let edge = &self.tree.get(current).edges[edge_idx];
            let child = edge.child;
            let action = edge.action.clone();
            state = self.engine.apply_action(&state, &action)?;

            current = child;
        }
    }

    /// Expand a node with all legal actions, or mark it terminal.
    fn expand_node(&mut self, node_id: NodeId, state: &E::State) -> Result<()> {
        if self.engine.is_terminal(state) {
            let rewards = terminal_rewards(&self.engine, state)?;
            let node = self.tree.get_mut(node_id);
            node.is_terminal = true;
            node.terminal_reward = Some(rewards);
            return Ok(());
        }

        let actions = self.engine.generate_actions(state);
        let node = self.tree.get_mut(node_id);
        node.edges.extend(actions.into_iter().map(Edge::new));

        self.stats.nodes_expanded += 1;
        Ok(())
    }

    /// Select an unexpanded edge randomly.
    fn select_unexpanded(&mut self, node_id: NodeId) -> usize {
        let unexpanded: Vec<usize> = self.tree.get(node_id).unexpanded_edges().collect();
        self.rng.choose(&unexpanded).copied().unwrap_or(0)
    }

    /// Create the child node for an edge and expand it.
    fn expand_child(&mut self, parent_id: NodeId, edge_idx: usize, state: &E::State) -> Result<NodeId> {
        let depth = self.tree.get(parent_id).depth.saturating_add(1);
        let to_move = self.engine.to_move(state);
        let parent_edge_idx = u32::try_from(edge_idx)
            .map_err(|_| Error::InvalidState(format!("edge index {} does not fit a node", edge_idx)))?;

        self.stats.max_depth = self.stats.max_depth.max(depth);

        let child_id = self.tree.alloc(MCTSNode::new(parent_id, parent_edge_idx, to_move, depth));
        self.tree.get_mut(parent_id).edges[edge_idx].child = child_id;

        self.expand_node(child_id, state)?;
        Ok(child_id)
    }

    /// Run a rollout from `state` with a forked RNG.
    fn simulate(&mut self, state: &E::State) -> Result<PlayerMap<f64>> {
        let mut sim_rng = self.rng.fork();
        self.simulation
            .simulate(&self.engine, state, &mut sim_rng, self.config.max_depth)
    }

    /// Backpropagate rewards through the path.
    fn backpropagate(&mut self, path: &[(NodeId, usize)], rewards: &PlayerMap<f64>) {
        for &(node_id, edge_idx) in path.iter().rev() {
            let node = self.tree.get_mut(node_id);
            node.visits += 1;

            let edge = &mut node.edges[edge_idx];
            edge.visits += 1;
            for (player, reward) in rewards.iter() {
                edge.total_reward[player] += *reward;
            }
        }
    }

    /// Select the action to play from the root.
    fn best_action(&mut self) -> Result<E::Action> {
        let visits: Vec<u32> = self.tree.root_node().edges.iter().map(|e| e.visits).collect();
        let idx = choose_by_visits(&visits, self.config.temperature, &mut self.rng)
            .ok_or(Error::NoLegalActions)?;
        Ok(self.tree.root_node().edges[idx].action.clone())
    }

    /// Get search statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the search tree.
    #[must_use]
    pub fn tree(&self) -> &MCTSTree<E::Action> {
        &self.tree
    }

    /// Get action visit counts from root.
    ///
    /// Returns (action, visit_count) pairs in `generate_actions` order.
    pub fn action_visits(&self) -> Vec<(E::Action, u32)> {
        self.tree
            .root_node()
            .edges
            .iter()
            .map(|e| (e.action.clone(), e.visits))
            .collect()
    }

    /// Get action probabilities from root.
    ///
    /// Returns (action, probability) pairs where probabilities sum to ~1.0.
    pub fn action_probabilities(&self) -> Vec<(E::Action, f64)> {
        let root = self.tree.root_node();
        let total: u32 = root.edges.iter().map(|e| e.visits).sum();

        if total == 0 {
            let uniform = 1.0 / root.edges.len().max(1) as f64;
            return root.edges.iter().map(|e| (e.action.clone(), uniform)).collect();
        }

        root.edges
            .iter()
            .map(|e| (e.action.clone(), e.visits as f64 / total as f64))
            .collect()
    }

    /// Get the engine reference.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Get the configuration.
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }
}

fn elapsed_us(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX)
}

/// Pick an index from root visit counts.
///
/// Temperature 0 takes the most visited entry, earliest on ties. Otherwise
/// samples proportionally to `visits^(1 / temperature)`, falling back to the
/// most visited entry when nothing has been visited.
pub fn choose_by_visits(visits: &[u32], temperature: f64, rng: &mut GameRng) -> Option<usize> {
    let mut best = 0;
    for (i, &v) in visits.iter().enumerate().skip(1) {
        if v > visits[best] {
            best = i;
        }
    }
    let most = *visits.get(best)?;

    if temperature <= 0.0 || most == 0 {
        return Some(best);
    }

    // Scaled by the maximum so low temperatures cannot overflow to infinity.
    let weights: Vec<f64> = visits
        .iter()
        .map(|&v| (f64::from(v) / f64::from(most)).powf(1.0 / temperature))
        .collect();
    rng.choose_weighted(&weights).or(Some(best))
}
