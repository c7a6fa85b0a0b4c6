//! **labyrinth-core** — core types for grid mazes.
//!
//! This crate provides the foundational types used across the *labyrinth*
//! crates: geometry primitives, the wall/path [`Tile`] encoding, the
//! immutable maze [`Grid`], and the shared [`MazeError`].

pub mod error;
pub mod geom;
pub mod grid;

pub use error::{MazeError, PositionFault};
pub use geom::{Point, Range};
pub use grid::{CARDINALS, Grid, Tile, flat_index};
