//! Counters a search keeps about itself.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What one search (or a merged set of parallel searches) did.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    pub iterations: u32,

    /// Nodes whose edges were generated.
    pub nodes_expanded: u32,

    pub simulations: u32,

    /// Deepest node created, in plies below the root.
    pub max_depth: u32,

    /// Wall time from the start of `search` to its answer, in microseconds.
    pub time_us: u64,
}

impl SearchStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fold in a search that ran alongside this one.
    ///
    /// Work counters add up. Depth and wall time take the larger value.
    pub fn merge(&mut self, other: &SearchStats) {
        self.iterations = self.iterations.saturating_add(other.iterations);
        self.nodes_expanded = self.nodes_expanded.saturating_add(other.nodes_expanded);
        self.simulations = self.simulations.saturating_add(other.simulations);
        self.max_depth = self.max_depth.max(other.max_depth);
        self.time_us = self.time_us.max(other.time_us);
    }

    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        match self.time_us {
            0 => 0.0,
            us => f64::from(self.iterations) * 1e6 / us as f64,
        }
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} iterations, {} nodes, depth {}, {:.0} it/s",
            self.iterations,
            self.nodes_expanded,
            self.max_depth,
            self.iterations_per_second()
        )
    }
}
