use labyrinth_core::{Grid, Point};

use crate::distance::manhattan;

/// Minimal pathfinding interface — provides neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Point, to: Point) -> i32;
}

// A maze grid is a 4-connected unit-cost graph over its open tiles. Walls
// have no edges at all, so they never join a region.
impl Pather for Grid {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        if self.is_path(p) {
            buf.extend(Grid::neighbors(self, p));
        }
    }
}

impl WeightedPather for Grid {
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

impl AstarPather for Grid {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}
