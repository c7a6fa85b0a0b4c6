//! Pathfinding over labyrinth grids.
//!
//! - **Incremental A\*** that advances one expansion per call ([`AstarSearch`])
//! - **BFS** distances from one cell ([`DistanceMap`], [`shortest_distance`])
//! - **Perfect-maze check** by counting regions and passages ([`MazeShape`])
//! - **Metrics** for a finished search ([`SearchMetrics`])
//! - **Turn** classification along a path ([`turns`])
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS, region counting |
//! | [`WeightedPather`] : [`Pather`] | edge costs |
//! | [`AstarPather`] : [`WeightedPather`] | A* |
//!
//! [`Grid`](labyrinth_core::Grid) implements all three as a 4-connected
//! unit-cost graph with the Manhattan heuristic.

mod astar;
mod distance;
mod metrics;
mod reach;
mod traits;
mod turns;

pub use astar::{AstarSearch, Status};
pub use distance::manhattan;
pub use metrics::SearchMetrics;
pub use reach::{DistanceMap, MazeShape, shortest_distance};
pub use traits::{AstarPather, Pather, WeightedPather};
pub use turns::{Turn, turn, turns};
