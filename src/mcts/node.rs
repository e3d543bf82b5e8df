//! Tree nodes and the edges between them.
//!
//! Nodes point at each other through `NodeId` indices into the owning
//! `MCTSTree`, so a tree serializes as plain data.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Player, PlayerMap};

/// Slot of a node in its tree's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Parent of the root, and child of an edge nobody has tried yet.
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// One legal move out of a node and what the search has learned about it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Edge<A> {
    pub action: A,

    /// `NodeId::NONE` until the move is first tried.
    pub child: NodeId,

    pub visits: u32,

    /// Summed rollout rewards, kept separately for each seat.
    pub total_reward: PlayerMap<f64>,
}

impl<A> Edge<A> {
    pub fn new(action: A) -> Self {
        Self {
            action,
            child: NodeId::NONE,
            visits: 0,
            total_reward: PlayerMap::with_value(0.0),
        }
    }

    /// Average reward `player` collected through this edge, 0 before the
    /// first visit.
    #[must_use]
    pub fn mean_reward(&self, player: Player) -> f64 {
        match self.visits {
            0 => 0.0,
            n => self.total_reward[player] / f64::from(n),
        }
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        !self.child.is_none()
    }
}

/// A searched position.
///
/// Nodes do not hold game state. The search rebuilds it by replaying edge
/// actions from the root.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSNode<A> {
    pub parent: NodeId,

    /// Which of the parent's edges leads here.
    pub parent_edge_idx: u32,

    /// Seat whose reward selection maximizes at this node.
    pub to_move: Player,

    /// Plies below the root.
    pub depth: u32,

    pub visits: u32,

    pub is_terminal: bool,

    /// Filled in once, when a terminal node is created.
    pub terminal_reward: Option<PlayerMap<f64>>,

    /// Nine covers every tic-tac-toe position without spilling to the heap.
    pub edges: SmallVec<[Edge<A>; 9]>,
}

impl<A> MCTSNode<A> {
    pub fn new(parent: NodeId, parent_edge_idx: u32, to_move: Player, depth: u32) -> Self {
        Self {
            parent,
            parent_edge_idx,
            to_move,
            depth,
            visits: 0,
            is_terminal: false,
            terminal_reward: None,
            edges: SmallVec::new(),
        }
    }

    pub fn root(to_move: Player) -> Self {
        Self::new(NodeId::NONE, 0, to_move, 0)
    }

    #[must_use]
    pub fn has_unexpanded(&self) -> bool {
        self.unexpanded_edges().next().is_some()
    }

    /// Indices of edges whose child has not been created.
    pub fn unexpanded_edges(&self) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, e)| (!e.is_expanded()).then_some(i))
    }
}
