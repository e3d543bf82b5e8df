//! Node arena for one search.

use serde::{Deserialize, Serialize};

use super::node::{MCTSNode, NodeId};
use crate::core::Player;

/// Every node of a search, stored flat.
///
/// The root always sits in slot 0 and nodes are never removed
/// individually; `reset` starts over with a fresh root.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSTree<A> {
    nodes: Vec<MCTSNode<A>>,
}

impl<A> MCTSTree<A> {
    /// Tree holding only a root, with room reserved for `capacity` nodes.
    pub fn with_capacity(root_player: Player, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(MCTSNode::root(root_player));
        Self { nodes }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// # Panics
    ///
    /// If `id` was not handed out by this tree since the last `reset`.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MCTSNode<A> {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode<A> {
        &mut self.nodes[id.index()]
    }

    pub fn alloc(&mut self, node: MCTSNode<A>) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a tree keeps its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn root_node(&self) -> &MCTSNode<A> {
        &self.nodes[0]
    }

    /// Drop every node and plant a new root, keeping the allocation.
    pub fn reset(&mut self, root_player: Player) {
        self.nodes.clear();
        self.nodes.push(MCTSNode::root(root_player));
    }

    /// Walk the arena once and summarize its shape.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            node_count: self.nodes.len(),
            ..TreeStats::default()
        };
        for node in &self.nodes {
            stats.max_depth = stats.max_depth.max(node.depth);
            stats.terminal_count += usize::from(node.is_terminal);
            stats.total_edges += node.edges.len();
            stats.expanded_edges += node.edges.iter().filter(|e| e.is_expanded()).count();
        }
        stats
    }
}

/// Shape of a tree, for diagnostics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeStats {
    pub node_count: usize,
    pub max_depth: u32,
    pub terminal_count: usize,
    /// Edges listed across all nodes, tried or not.
    pub total_edges: usize,
    /// Edges that have a child node.
    pub expanded_edges: usize,
}

impl TreeStats {
    /// Share of listed edges that have been tried, 0 for an edgeless tree.
    #[must_use]
    pub fn expansion_ratio(&self) -> f64 {
        match self.total_edges {
            0 => 0.0,
            total => self.expanded_edges as f64 / total as f64,
        }
    }
}
