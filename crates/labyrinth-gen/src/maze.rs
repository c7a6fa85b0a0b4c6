//! Perfect-maze generation.
//!
//! [`MazeGen`] carves a maze with randomized recursive backtracking over the
//! logical (un-doubled) room grid. The result is a spanning tree: every pair
//! of open tiles is joined by exactly one simple path.
//!
//! The backtracking uses an explicit stack of frames instead of call-stack
//! recursion, so depth is bounded only by memory.

use labyrinth_core::{Grid, MazeError, Point, Tile, flat_index};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Carving directions before shuffling: up, down, right, left.
const CARVE_DIRS: [Point; 4] = [
    Point::new(0, -1),
    Point::new(0, 1),
    Point::new(1, 0),
    Point::new(-1, 0),
];

/// One room on the backtracking stack.
struct Frame {
    room: Point,
    dirs: [Point; 4],
    next: usize,
}

/// Matrix coordinate of logical room `r`.
#[inline]
fn room_to_matrix(r: Point) -> Point {
    Point::new(r.x * 2 + 1, r.y * 2 + 1)
}

/// Matrix size `(columns, rows)` for a `width × height` room maze.
///
/// Fails with [`MazeError::InvalidDimensions`] unless both sides are positive
/// and the `(2·width+1) × (2·height+1)` matrix holds at most `i32::MAX`
/// tiles, so every coordinate and tile count stays representable.
pub fn matrix_size(width: i32, height: i32) -> Result<Point, MazeError> {
    let invalid = MazeError::InvalidDimensions { width, height };
    if width <= 0 || height <= 0 {
        return Err(invalid);
    }
    let side = |n: i32| n.checked_mul(2).and_then(|v| v.checked_add(1));
    match (side(width), side(height)) {
        (Some(mw), Some(mh)) if mw.checked_mul(mh).is_some() => Ok(Point::new(mw, mh)),
        _ => Err(invalid),
    }
}

/// Maze generator owning its random source.
///
/// Each generator draws only from its own `rng`, so two generators seeded
/// alike produce the same mazes regardless of what else runs in the process.
pub struct MazeGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MazeGen<R> {
    /// Create a generator drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Carve a `width × height` room maze.
    ///
    /// Returns a `(2·height+1) × (2·width+1)` [`Grid`]. Fails with
    /// [`MazeError::InvalidDimensions`] when [`matrix_size`] does.
    pub fn carve(&mut self, width: i32, height: i32) -> Result<Grid, MazeError> {
        let Point { x: mw, y: mh } = matrix_size(width, height)?;
        let mut tiles = vec![Tile::Wall; (mw as usize) * (mh as usize)];
        let mut visited = vec![false; (width as usize) * (height as usize)];
        let open = |tiles: &mut Vec<Tile>, p: Point| {
            tiles[flat_index(p, mw)] = Tile::Path;
        };

        // u32 draws keep the stream identical on 32- and 64-bit targets.
        let start = Point::new(
            self.rng.random_range(0..width as u32) as i32,
            self.rng.random_range(0..height as u32) as i32,
        );

        let mut stack: Vec<Frame> = Vec::new();
        visited[flat_index(start, width)] = true;
        open(&mut tiles, room_to_matrix(start));
        stack.push(Frame {
            room: start,
            dirs: self.shuffled_dirs(),
            next: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let Some(&d) = frame.dirs.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;
            let room = frame.room;

            let n = room + d;
            if n.x < 0 || n.x >= width || n.y < 0 || n.y >= height {
                continue;
            }
            let ni = flat_index(n, width);
            if visited[ni] {
                continue;
            }

            // Knock down the wall between the two rooms, then descend.
            open(&mut tiles, room_to_matrix(room) + d);
            visited[ni] = true;
            open(&mut tiles, room_to_matrix(n));
            stack.push(Frame {
                room: n,
                dirs: self.shuffled_dirs(),
                next: 0,
            });
        }

        let grid = Grid::from_tiles(mw, mh, tiles)?;
        log::debug!(
            "carved {}x{} maze from room {}: {} open tiles",
            width,
            height,
            start,
            grid.count(Tile::Path)
        );
        Ok(grid)
    }

    /// Fisher–Yates over [`CARVE_DIRS`], drawing `u32` indices.
    ///
    /// Written out rather than using `SliceRandom::shuffle` so that the
    /// permutation for a given stream does not depend on the `rand` release.
    fn shuffled_dirs(&mut self) -> [Point; 4] {
        let mut dirs = CARVE_DIRS;
        for i in (1..dirs.len()).rev() {
            let j = self.rng.random_range(0..=i as u32) as usize;
            dirs.swap(i, j);
        }
        dirs
    }
}

/// Generate a maze from a seed.
///
/// A pure function of its inputs: the same `(width, height, seed)` always
/// yields an identical [`Grid`], on every platform.
pub fn generate(width: i32, height: i32, seed: u64) -> Result<Grid, MazeError> {
    let mut mg = MazeGen::new(ChaCha8Rng::seed_from_u64(seed));
    let grid = mg.carve(width, height)?;
    log::debug!("maze {}x{} generated with seed {}", width, height, seed);
    Ok(grid)
}
