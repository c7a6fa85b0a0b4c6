//! Summary figures of a finished search, for whoever reports on it.

use std::time::Duration;

use crate::astar::{AstarSearch, Status};

/// Outcome of one search run.
///
/// Wall-clock time is measured by the caller, since the search itself has
/// no notion of time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchMetrics {
    pub success: bool,
    /// Cells on the path, both ends included.
    pub path_length: usize,
    /// Moves along the path (`path_length - 1` on a unit-cost grid).
    pub path_cost: usize,
    pub nodes_explored: usize,
    pub elapsed: Duration,
}

impl SearchMetrics {
    /// Collect metrics from a search, typically once it is terminal.
    pub fn from_search(search: &AstarSearch<'_>, elapsed: Duration) -> Self {
        let success = search.status() == Status::GoalFound;
        let path_length = search.path().len();
        Self {
            success,
            path_length,
            path_cost: path_length.saturating_sub(1),
            nodes_explored: search.explored().len(),
            elapsed,
        }
    }

    /// Explored cells per path cell; `0.0` when there is no path.
    pub fn branching_factor(&self) -> f64 {
        if self.path_length == 0 {
            return 0.0;
        }
        self.nodes_explored as f64 / self.path_length as f64
    }

    /// Path cells as a percentage of explored cells; `0.0` when nothing was
    /// explored.
    pub fn efficiency(&self) -> f64 {
        if self.nodes_explored == 0 {
            return 0.0;
        }
        self.path_length as f64 / self.nodes_explored as f64 * 100.0
    }
}
