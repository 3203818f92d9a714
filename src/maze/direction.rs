use std::fmt;

use super::Cell;

/// One of the four sides of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Returns the cell one step away in this direction.
    ///
    /// No bounds checking is done. Stepping north from row 0 or west from column 0
    /// wraps to `usize::MAX`, which every in-bounds check rejects.
    pub fn step(self, (row, column): Cell) -> Cell {
        match self {
            Direction::North => (row.wrapping_sub(1), column),
            Direction::East => (row, column.wrapping_add(1)),
            Direction::South => (row.wrapping_add(1), column),
            Direction::West => (row, column.wrapping_sub(1)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::North => write!(f, "north"),
            Direction::East => write!(f, "east"),
            Direction::South => write!(f, "south"),
            Direction::West => write!(f, "west"),
        }
    }
}
