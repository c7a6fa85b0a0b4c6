//! Step-driven A* search.
//!
//! [`AstarSearch`] advances one frontier expansion per [`step`] call instead
//! of running to completion, so a caller can pace the search (one expansion
//! per animation frame, say) and inspect the explored set and final path
//! between calls. All search state persists inside the value between steps.
//!
//! Exploration order is deterministic: the open set pops the lowest `f`
//! first and breaks ties by cell in row-then-column order, and neighbours
//! are relaxed in [`CARDINALS`](labyrinth_core::CARDINALS) order.
//!
//! [`step`]: AstarSearch::step

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use labyrinth_core::{Grid, MazeError, Point, PositionFault, flat_index};

use crate::traits::{AstarPather, Pather, WeightedPather};

/// Progress of an [`AstarSearch`].
///
/// `Searching` is the initial state. `GoalFound` and `NoPath` are terminal
/// and mutually exclusive; a search in a terminal state never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Searching,
    GoalFound,
    NoPath,
}

impl Status {
    /// Whether the search has finished, successfully or not.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Searching)
    }
}

/// Cost of a cell no path has reached yet.
const UNREACHABLE: i32 = i32::MAX;

/// Per-cell search record.
#[derive(Clone)]
struct Node {
    g: i32,
    f: i32,
    parent: usize,
    closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            f: UNREACHABLE,
            parent: usize::MAX,
            closed: false,
        }
    }
}

/// Open-set entry. A cell may have several entries; only the one whose `f`
/// matches the cell's current best is live.
#[derive(Clone, Copy, Eq, PartialEq)]
struct OpenEntry {
    f: i32,
    pos: Point,
    idx: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest (f, pos) first.
        other.f.cmp(&self.f).then_with(|| other.pos.cmp(&self.pos))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Resumable A* search between two open cells of a [`Grid`].
///
/// The grid is borrowed read-only, so it can be shared with a renderer while
/// the search is driven. The search state itself is owned exclusively by
/// this value and only changes through [`step`](Self::step) and
/// [`reset`](Self::reset).
pub struct AstarSearch<'a> {
    grid: &'a Grid,
    start: Point,
    goal: Point,
    goal_idx: usize,
    nodes: Vec<Node>,
    open: BinaryHeap<OpenEntry>,
    explored: Vec<Point>,
    path: Vec<Point>,
    status: Status,
    nbuf: Vec<Point>,
}

impl<'a> AstarSearch<'a> {
    /// Prepare a search from `start` to `goal`.
    ///
    /// Fails with [`MazeError::InvalidPosition`] when either endpoint is out
    /// of bounds or on a wall, or when `start == goal`.
    pub fn new(grid: &'a Grid, start: Point, goal: Point) -> Result<Self, MazeError> {
        check_endpoint(grid, start)?;
        check_endpoint(grid, goal)?;
        if start == goal {
            return Err(MazeError::InvalidPosition {
                pos: start,
                reason: PositionFault::StartIsGoal,
            });
        }

        let mut search = Self {
            grid,
            start,
            goal,
            goal_idx: index(grid, goal),
            nodes: vec![Node::default(); grid.bounds().len()],
            open: BinaryHeap::new(),
            explored: Vec::new(),
            path: Vec::new(),
            status: Status::Searching,
            nbuf: Vec::with_capacity(4),
        };
        search.seed();
        Ok(search)
    }

    fn seed(&mut self) {
        let si = index(self.grid, self.start);
        let f = self.grid.estimate(self.start, self.goal);
        let node = &mut self.nodes[si];
        node.g = 0;
        node.f = f;
        self.open.push(OpenEntry {
            f,
            pos: self.start,
            idx: si,
        });
    }

    /// Expand one frontier cell and report the resulting status.
    ///
    /// Once the status is terminal this returns it again without touching
    /// any state.
    pub fn step(&mut self) -> Status {
        if self.status.is_terminal() {
            return self.status;
        }

        // Pop until a live entry turns up; stale duplicates are dropped.
        let current = loop {
            let Some(entry) = self.open.pop() else {
                self.status = Status::NoPath;
                log::debug!(
                    "no path {} -> {} after exploring {} cells",
                    self.start,
                    self.goal,
                    self.explored.len()
                );
                return self.status;
            };
            let node = &self.nodes[entry.idx];
            // A closed cell's cost is final, so any later entry for it is stale.
            if node.closed || node.f != entry.f {
                continue;
            }
            break entry;
        };

        let ci = current.idx;
        let cp = current.pos;
        self.nodes[ci].closed = true;
        self.explored.push(cp);

        if ci == self.goal_idx {
            self.reconstruct();
            self.status = Status::GoalFound;
            log::debug!(
                "path {} -> {} found: {} cells, {} explored",
                self.start,
                self.goal,
                self.path.len(),
                self.explored.len()
            );
            return self.status;
        }

        let current_g = self.nodes[ci].g;
        log::trace!("expand {} g={} f={}", cp, current_g, current.f);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        Pather::neighbors(self.grid, cp, &mut nbuf);

        for &np in nbuf.iter() {
            let tentative_g = current_g + self.grid.cost(cp, np);
            let ni = index(self.grid, np);
            let n = &mut self.nodes[ni];
            if tentative_g >= n.g {
                continue;
            }
            n.g = tentative_g;
            n.f = tentative_g + self.grid.estimate(np, self.goal);
            n.parent = ci;
            self.open.push(OpenEntry {
                f: n.f,
                pos: np,
                idx: ni,
            });
        }

        self.nbuf = nbuf;
        self.status
    }

    /// Drive [`step`](Self::step) until the search is terminal.
    pub fn run(&mut self) -> Status {
        while !self.step().is_terminal() {}
        self.status
    }

    /// Restart the same search from scratch, reusing allocations.
    pub fn reset(&mut self) {
        self.nodes.fill(Node::default());
        self.open.clear();
        self.explored.clear();
        self.path.clear();
        self.status = Status::Searching;
        self.seed();
    }

    /// Give up on this search, releasing the open set, cost map and
    /// backpointers.
    pub fn abandon(self) {
        if !self.status.is_terminal() {
            log::debug!(
                "search {} -> {} abandoned with {} explored, {} open",
                self.start,
                self.goal,
                self.explored.len(),
                self.open.len()
            );
        }
    }

    fn reconstruct(&mut self) {
        self.path.clear();
        let mut ci = self.goal_idx;
        while ci != usize::MAX {
            self.path.push(point(self.grid, ci));
            ci = self.nodes[ci].parent;
        }
        self.path.reverse();
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Finalized cells, in the order they were closed. Each cell appears at
    /// most once and the list only ever grows between resets.
    #[inline]
    pub fn explored(&self) -> &[Point] {
        &self.explored
    }

    /// Whether `p` has been closed.
    pub fn is_explored(&self, p: Point) -> bool {
        self.grid.contains(p) && self.nodes[index(self.grid, p)].closed
    }

    /// Start-to-goal path, both ends included. Empty unless the status is
    /// [`Status::GoalFound`].
    #[inline]
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Best known cost from start to `p`, if `p` has been reached.
    pub fn g_score(&self, p: Point) -> Option<i32> {
        if !self.grid.contains(p) {
            return None;
        }
        match self.nodes[index(self.grid, p)].g {
            UNREACHABLE => None,
            g => Some(g),
        }
    }

    /// Backpointer of `p` in the search tree. `None` for the start and for
    /// unreached cells.
    pub fn came_from(&self, p: Point) -> Option<Point> {
        if !self.grid.contains(p) {
            return None;
        }
        match self.nodes[index(self.grid, p)].parent {
            usize::MAX => None,
            pi => Some(point(self.grid, pi)),
        }
    }

    /// Number of open-set entries, stale duplicates included.
    #[inline]
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    #[inline]
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }
}

fn check_endpoint(grid: &Grid, pos: Point) -> Result<(), MazeError> {
    let reason = if !grid.contains(pos) {
        PositionFault::OutOfBounds
    } else if !grid.is_path(pos) {
        PositionFault::OnWall
    } else {
        return Ok(());
    };
    Err(MazeError::InvalidPosition { pos, reason })
}

#[inline]
fn index(grid: &Grid, p: Point) -> usize {
    flat_index(p, grid.width())
}

#[inline]
fn point(grid: &Grid, idx: usize) -> Point {
    let w = grid.width() as usize;
    Point::new((idx % w) as i32, (idx / w) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPEN_ROOM: &str = "
        #####
        #...#
        #...#
        #...#
        #####";

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn rejects_bad_endpoints() {
        let g = Grid::from_ascii(OPEN_ROOM).unwrap();
        let err = |s, t| AstarSearch::new(&g, s, t).err();
        assert_eq!(
            err(p(1, 1), p(1, 1)),
            Some(MazeError::InvalidPosition {
                pos: p(1, 1),
                reason: PositionFault::StartIsGoal
            })
        );
        assert_eq!(
            err(p(0, 0), p(3, 3)),
            Some(MazeError::InvalidPosition {
                pos: p(0, 0),
                reason: PositionFault::OnWall
            })
        );
        assert_eq!(
            err(p(1, 1), p(9, 3)),
            Some(MazeError::InvalidPosition {
                pos: p(9, 3),
                reason: PositionFault::OutOfBounds
            })
        );
        assert_eq!(
            err(p(-1, 1), p(3, 3)),
            Some(MazeError::InvalidPosition {
                pos: p(-1, 1),
                reason: PositionFault::OutOfBounds
            })
        );
        assert!(err(p(1, 1), p(3, 3)).is_none());
    }

    #[test]
    fn initial_state() {
        let g = Grid::from_ascii(OPEN_ROOM).unwrap();
        let s = AstarSearch::new(&g, p(1, 1), p(3, 3)).unwrap();
        assert_eq!(s.status(), Status::Searching);
        assert!(s.explored().is_empty());
        assert!(s.path().is_empty());
        assert_eq!(s.open_len(), 1);
        assert_eq!(s.g_score(p(1, 1)), Some(0));
        assert_eq!(s.g_score(p(2, 1)), None);
        assert_eq!(s.came_from(p(1, 1)), None);
    }

    #[test]
    fn golden_exploration_order() {
        let g = Grid::from_ascii(OPEN_ROOM).unwrap();
        let mut s = AstarSearch::new(&g, p(1, 1), p(3, 3)).unwrap();
        for _ in 0..8 {
            assert_eq!(s.step(), Status::Searching);
        }
        assert_eq!(s.step(), Status::GoalFound);
        // Every cell has f = 4; ties resolve row-major.
        assert_eq!(
            s.explored(),
            &[
                p(1, 1),
                p(2, 1),
                p(3, 1),
                p(1, 2),
                p(2, 2),
                p(3, 2),
                p(1, 3),
                p(2, 3),
                p(3, 3),
            ]
        );
        // Rightward moves are relaxed first, so the path hugs the top row.
        assert_eq!(s.path(), &[p(1, 1), p(2, 1), p(3, 1), p(3, 2), p(3, 3)]);
        assert_eq!(s.came_from(p(3, 3)), Some(p(3, 2)));
        assert_eq!(s.g_score(p(3, 3)), Some(4));
    }

    #[test]
    fn terminal_step_is_idempotent() {
        let g = Grid::from_ascii(OPEN_ROOM).unwrap();
        let mut s = AstarSearch::new(&g, p(1, 1), p(3, 1)).unwrap();
        assert_eq!(s.run(), Status::GoalFound);
        let explored = s.explored().to_vec();
        let path = s.path().to_vec();
        let open = s.open_len();
        for _ in 0..3 {
            assert_eq!(s.step(), Status::GoalFound);
        }
        assert_eq!(s.explored(), explored.as_slice());
        assert_eq!(s.path(), path.as_slice());
        assert_eq!(s.open_len(), open);
    }

    #[test]
    fn sealed_goal_ends_in_no_path() {
        let g = Grid::from_ascii(
            "
            #######
            #...#.#
            #...###
            #######",
        )
        .unwrap();
        let mut s = AstarSearch::new(&g, p(1, 1), p(5, 1)).unwrap();
        let mut steps = 0;
        while s.step() == Status::Searching {
            steps += 1;
        }
        assert_eq!(s.status(), Status::NoPath);
        // All six reachable cells are closed before the open set runs dry.
        assert_eq!(steps, 6);
        assert_eq!(s.explored().len(), 6);
        assert!(s.path().is_empty());
        assert!(!s.is_explored(p(5, 1)));
        assert_eq!(s.step(), Status::NoPath);
    }

    #[test]
    fn stale_entries_are_skipped() {
        let g = Grid::from_ascii(OPEN_ROOM).unwrap();
        let mut s = AstarSearch::new(&g, p(1, 1), p(3, 3)).unwrap();
        // A duplicate for (3,3) with an outdated f sorts ahead of the start.
        let stale = OpenEntry {
            f: 0,
            pos: p(3, 3),
            idx: index(&g, p(3, 3)),
        };
        s.open.push(stale);
        assert_eq!(s.step(), Status::Searching);
        assert_eq!(s.explored(), &[p(1, 1)]);
        assert!(!s.is_explored(p(3, 3)));
        assert_eq!(s.run(), Status::GoalFound);
        assert_eq!(s.path().len(), 5);
    }

    #[test]
    fn only_stale_entries_left_means_no_path() {
        let g = Grid::from_ascii("#####\n#.#.#\n#####").unwrap();
        let mut s = AstarSearch::new(&g, p(1, 1), p(3, 1)).unwrap();
        assert_eq!(s.step(), Status::Searching);
        s.open.push(OpenEntry {
            f: 7,
            pos: p(1, 1),
            idx: index(&g, p(1, 1)),
        });
        assert_eq!(s.step(), Status::NoPath);
        assert_eq!(s.open_len(), 0);
    }

    #[test]
    fn closed_cell_entry_with_current_f_is_skipped() {
        let g = Grid::from_ascii("#####\n#.#.#\n#####").unwrap();
        let mut s = AstarSearch::new(&g, p(1, 1), p(3, 1)).unwrap();
        assert_eq!(s.step(), Status::Searching);
        let start = index(&g, p(1, 1));
        assert!(s.nodes[start].closed);
        // Same f as the closed node, so only the closed flag marks it stale.
        s.open.push(OpenEntry {
            f: s.nodes[start].f,
            pos: p(1, 1),
            idx: start,
        });
        assert_eq!(s.step(), Status::NoPath);
        assert_eq!(s.explored(), &[p(1, 1)]);
    }

    #[test]
    fn reset_replays_identically() {
        let g = Grid::from_ascii(OPEN_ROOM).unwrap();
        let mut s = AstarSearch::new(&g, p(3, 1), p(1, 3)).unwrap();
        s.run();
        let first = (s.explored().to_vec(), s.path().to_vec());
        s.reset();
        assert_eq!(s.status(), Status::Searching);
        assert!(s.explored().is_empty());
        assert_eq!(s.open_len(), 1);
        s.run();
        assert_eq!((s.explored().to_vec(), s.path().to_vec()), first);
    }

    #[test]
    fn abandon_mid_search() {
        let g = Grid::from_ascii(OPEN_ROOM).unwrap();
        let mut s = AstarSearch::new(&g, p(1, 1), p(3, 3)).unwrap();
        s.step();
        s.step();
        s.abandon();
        // The grid is still usable once the search is gone.
        assert!(g.is_path(p(2, 2)));
    }

    #[test]
    fn status_terminality() {
        assert!(!Status::Searching.is_terminal());
        assert!(Status::GoalFound.is_terminal());
        assert!(Status::NoPath.is_terminal());
    }
}
