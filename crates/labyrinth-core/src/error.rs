//! Error type shared by the labyrinth crates.

use thiserror::Error;

use crate::geom::Point;

/// Why a start or goal position was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionFault {
    /// The position lies outside the grid.
    OutOfBounds,
    /// The position is a wall tile.
    OnWall,
    /// Start and goal are the same cell.
    StartIsGoal,
}

impl std::fmt::Display for PositionFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds => f.write_str("out of bounds"),
            Self::OnWall => f.write_str("on a wall"),
            Self::StartIsGoal => f.write_str("start equals goal"),
        }
    }
}

/// Errors raised at the API boundary when building grids or searches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Logical maze width or height was not strictly positive, or the
    /// doubled matrix would not fit in `i32` coordinates.
    #[error("invalid maze dimensions {width}x{height}: both must be > 0 and the matrix at most {max} tiles", max = i32::MAX)]
    InvalidDimensions { width: i32, height: i32 },

    /// A search endpoint cannot be used.
    #[error("invalid position {pos}: {reason}")]
    InvalidPosition { pos: Point, reason: PositionFault },

    /// A raw matrix value other than `0` (path) or `1` (wall).
    #[error("invalid tile value {0}: expected 0 (path) or 1 (wall)")]
    InvalidTile(u8),

    /// A text glyph other than `.` (path) or `#` (wall).
    #[error("invalid glyph {0:?}: expected '.' (path) or '#' (wall)")]
    InvalidGlyph(char),

    /// Raw matrix rows of unequal length.
    #[error("ragged matrix: row {row} has {found} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Flat tile buffer whose length is not `width * height`.
    #[error("expected {expected} tiles, found {found}")]
    TileCount { expected: usize, found: usize },

    /// Raw matrix with no rows or no columns.
    #[error("empty matrix")]
    EmptyMatrix,
}
