//! Perfect-maze generation for labyrinth grids.
//!
//! - **Recursive backtracking** carver ([`MazeGen`], [`generate`])
//! - **Configuration** with conventional start/goal rooms ([`MazeConfig`])

pub mod config;
pub mod maze;

pub use config::MazeConfig;
pub use maze::{MazeGen, generate, matrix_size};
