//! Maze configuration.

use labyrinth_core::{Grid, MazeError, Point};

use crate::maze::{generate, matrix_size};

/// Size and seed of a maze, plus the conventional search endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MazeConfig {
    /// Logical width in rooms.
    pub width: i32,
    /// Logical height in rooms.
    pub height: i32,
    pub seed: u64,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            seed: 0,
        }
    }
}

impl MazeConfig {
    pub fn new(width: i32, height: i32, seed: u64) -> Self {
        Self {
            width,
            height,
            seed,
        }
    }

    /// Check the dimensions without generating anything.
    pub fn validate(&self) -> Result<(), MazeError> {
        self.matrix_size().map(|_| ())
    }

    /// Matrix size as a `Point` (columns, rows).
    pub fn matrix_size(&self) -> Result<Point, MazeError> {
        matrix_size(self.width, self.height)
    }

    /// Top-left room.
    pub fn start(&self) -> Point {
        Point::new(1, 1)
    }

    /// Bottom-right room. Only meaningful once [`validate`](Self::validate)
    /// passes.
    pub fn goal(&self) -> Point {
        Point::new(
            self.width.saturating_mul(2).saturating_sub(1),
            self.height.saturating_mul(2).saturating_sub(1),
        )
    }

    /// Generate the configured maze.
    pub fn generate(&self) -> Result<Grid, MazeError> {
        self.validate()?;
        generate(self.width, self.height, self.seed)
    }
}
