//! Whole-maze checks that do not go through A*.
//!
//! [`DistanceMap`] floods a maze breadth-first from one open cell, giving the
//! exact unweighted distance to every cell it reaches. [`MazeShape`] counts
//! open cells, passages and disconnected regions, which is enough to tell
//! whether the open tiles form a perfect maze (a spanning tree).

use std::collections::VecDeque;

use labyrinth_core::{Grid, Point, flat_index};

use crate::traits::Pather;

/// Breadth-first distances from a single open cell.
#[derive(Debug, Clone)]
pub struct DistanceMap {
    source: Point,
    width: i32,
    dist: Vec<Option<i32>>,
    reached: Vec<Point>,
}

impl DistanceMap {
    /// Flood `grid` from `source`. A wall or out-of-bounds source reaches
    /// nothing.
    pub fn new(grid: &Grid, source: Point) -> Self {
        let width = grid.width();
        let mut dist = vec![None; grid.bounds().len()];
        let mut reached = Vec::new();

        if grid.is_path(source) {
            dist[flat_index(source, width)] = Some(0);
            let mut queue = VecDeque::from([(source, 0)]);
            let mut nbuf = Vec::with_capacity(4);
            while let Some((cp, d)) = queue.pop_front() {
                reached.push(cp);
                nbuf.clear();
                Pather::neighbors(grid, cp, &mut nbuf);
                for &np in &nbuf {
                    let slot = &mut dist[flat_index(np, width)];
                    if slot.is_none() {
                        *slot = Some(d + 1);
                        queue.push_back((np, d + 1));
                    }
                }
            }
        }

        log::trace!("flooded {} cells from {}", reached.len(), source);
        Self {
            source,
            width,
            dist,
            reached,
        }
    }

    #[inline]
    pub fn source(&self) -> Point {
        self.source
    }

    /// Steps from the source to `p`, or `None` when `p` was not reached.
    pub fn at(&self, p: Point) -> Option<i32> {
        if p.x < 0 || p.y < 0 || p.x >= self.width {
            return None;
        }
        self.dist.get(flat_index(p, self.width)).copied().flatten()
    }

    /// Every reached cell in breadth-first order, the source first.
    #[inline]
    pub fn reached(&self) -> &[Point] {
        &self.reached
    }
}

/// Unweighted shortest distance between two cells of `grid`, or `None` when
/// no route joins them.
pub fn shortest_distance(grid: &Grid, from: Point, to: Point) -> Option<i32> {
    DistanceMap::new(grid, from).at(to)
}

/// Connectivity summary of a grid's open tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeShape {
    /// Open tiles.
    pub open_cells: usize,
    /// Pairs of orthogonally adjacent open tiles.
    pub passages: usize,
    /// Maximal groups of mutually reachable open tiles.
    pub regions: usize,
}

impl MazeShape {
    pub fn of(grid: &Grid) -> Self {
        let width = grid.width();
        let mut seen = vec![false; grid.bounds().len()];
        let mut stack = Vec::new();
        let mut nbuf = Vec::with_capacity(4);
        let mut shape = MazeShape {
            open_cells: 0,
            passages: 0,
            regions: 0,
        };

        for p in grid.path_cells() {
            shape.open_cells += 1;
            // Count each passage once, from its left or upper end.
            shape.passages +=
                usize::from(grid.is_path(p.shift(1, 0))) + usize::from(grid.is_path(p.shift(0, 1)));

            if seen[flat_index(p, width)] {
                continue;
            }
            shape.regions += 1;
            seen[flat_index(p, width)] = true;
            stack.push(p);
            while let Some(cp) = stack.pop() {
                nbuf.clear();
                Pather::neighbors(grid, cp, &mut nbuf);
                for &np in &nbuf {
                    let i = flat_index(np, width);
                    if !seen[i] {
                        seen[i] = true;
                        stack.push(np);
                    }
                }
            }
        }
        shape
    }

    /// One region with exactly `open_cells - 1` passages: every two open
    /// tiles are joined by exactly one simple path.
    pub fn is_perfect(&self) -> bool {
        self.regions == 1 && self.passages + 1 == self.open_cells
    }
}
