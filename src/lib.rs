//! Perfect maze generation and solving.
//!
//! Mazes are spanning trees over a rectangular grid of cells. They are produced by one of the
//! [`generators`] (binary tree, recursive backtracker, or recursive Voronoi partition) and
//! solved with a breadth-first search from [`solvers`].

pub mod error;
pub mod generators;
pub mod logging;
pub mod maze;
pub mod metric;
pub mod render;
pub mod solvers;

pub use error::{MazeError, Result};
pub use maze::{Cell, Direction, Maze};
