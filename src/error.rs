//! Error types for maze construction and generation.

use thiserror::Error;

use crate::maze::{Cell, Direction};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("Maze dimensions must be at least 1x1, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("Cannot erase the {direction} border wall of cell {cell:?}")]
    BorderWall { cell: Cell, direction: Direction },

    /// A stage cell was not assigned to any region while looking for region borders.
    #[error("Cell {0:?} does not belong to any region")]
    UnassignedCell(Cell),

    #[error("Regions at depth {depth} could not be joined: {missing} connection(s) missing")]
    DisconnectedRegions { depth: usize, missing: usize },
}

pub type Result<T> = std::result::Result<T, MazeError>;
