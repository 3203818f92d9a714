mod direction;
mod grid;

pub use direction::Direction;
pub use grid::Grid;

use crate::error::{MazeError, Result};

/// A cell coordinate as `(row, column)`, 0-indexed from the top-left corner.
pub type Cell = (usize, usize);

/// Wall state of a rectangular maze.
///
/// Only the east and south wall of every cell is stored. The north wall of a cell is the
/// south wall of the cell above it, and the west wall is the east wall of the cell to its
/// left. Walls on the outer border are permanent.
#[derive(Debug, Clone, PartialEq)]
pub struct Maze {
    east_walls: Grid<bool>,
    south_walls: Grid<bool>,
    rows: usize,
    columns: usize,
}

impl Maze {
    /// Creates a new maze with the given number of rows and columns, with every wall present.
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(MazeError::InvalidDimensions { rows, columns });
        }
        Ok(Maze {
            east_walls: Grid::new(rows, columns, true),
            south_walls: Grid::new(rows, columns, true),
            rows,
            columns,
        })
    }

    /// Returns the number of rows of cells.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns of cells.
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Checks if the given coordinate is within the bounds of the maze.
    pub fn is_in_bounds(&self, (row, column): Cell) -> bool {
        row < self.rows && column < self.columns
    }

    /// Checks if the wall on the `direction` side of `cell` is part of the outer border.
    pub fn is_border(&self, (row, column): Cell, direction: Direction) -> bool {
        match direction {
            Direction::North => row == 0,
            Direction::East => column + 1 == self.columns,
            Direction::South => row + 1 == self.rows,
            Direction::West => column == 0,
        }
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |column| (row, column)))
    }

    /// Pure coordinate arithmetic, see [`Direction::step`]. The result may lie outside the maze.
    pub fn neighbour(cell: Cell, direction: Direction) -> Cell {
        direction.step(cell)
    }

    /// Checks if there is a wall on the `direction` side of `cell`.
    ///
    /// # Panics
    /// * If `cell` is out of bounds
    pub fn has_wall(&self, cell: Cell, direction: Direction) -> bool {
        let (row, column) = cell;
        match direction {
            Direction::North => row == 0 || self.south_walls[(row - 1, column)],
            Direction::East => self.east_walls[cell],
            Direction::South => self.south_walls[cell],
            Direction::West => column == 0 || self.east_walls[(row, column - 1)],
        }
    }

    /// Sets the wall on the `direction` side of `cell`.
    ///
    /// Setting the north wall of `(r, c)` writes the south wall of `(r - 1, c)`, and setting
    /// the west wall of `(r, c)` writes the east wall of `(r, c - 1)`.
    ///
    /// # Errors
    /// Returns [`MazeError::BorderWall`] if `present` is `false` and the wall is on the border.
    /// The maze is left unchanged.
    ///
    /// # Panics
    /// * If `cell` is out of bounds
    pub fn set_wall(&mut self, cell: Cell, direction: Direction, present: bool) -> Result<()> {
        assert!(
            self.is_in_bounds(cell),
            "cell {cell:?} is outside a {}x{} maze",
            self.rows,
            self.columns
        );
        if self.is_border(cell, direction) {
            if present {
                // Border walls are implicit on the north and west sides, and always set elsewhere.
                return Ok(());
            }
            return Err(MazeError::BorderWall { cell, direction });
        }

        let (row, column) = cell;
        match direction {
            Direction::North => self.south_walls[(row - 1, column)] = present,
            Direction::East => self.east_walls[cell] = present,
            Direction::South => self.south_walls[cell] = present,
            Direction::West => self.east_walls[(row, column - 1)] = present,
        }
        Ok(())
    }

    /// Removes the wall on the `direction` side of `cell`.
    pub fn carve_wall(&mut self, cell: Cell, direction: Direction) -> Result<()> {
        self.set_wall(cell, direction, false)
    }

    /// Puts back the wall on the `direction` side of `cell`.
    pub fn fill_wall(&mut self, cell: Cell, direction: Direction) -> Result<()> {
        self.set_wall(cell, direction, true)
    }

    /// Number of internal walls that have been carved.
    pub fn carved_wall_count(&self) -> usize {
        self.east_walls.iter().filter(|&&wall| !wall).count()
            + self.south_walls.iter().filter(|&&wall| !wall).count()
    }
}

/// Get neighbours of a cell together with the direction leading to them.
/// A neighbour is a cell one step away in a cardinal direction that lies inside the maze.
pub fn get_neighbors(cell: Cell, maze: &Maze) -> impl Iterator<Item = (Direction, Cell)> + '_ {
    Direction::ALL
        .into_iter()
        .map(move |dir| (dir, dir.step(cell)))
        .filter(move |&(_, c)| maze.is_in_bounds(c))
}

/// Get the neighbours of a cell that can be reached without crossing a wall.
pub fn open_neighbors(cell: Cell, maze: &Maze) -> impl Iterator<Item = Cell> + '_ {
    Direction::ALL
        .into_iter()
        .filter(move |&dir| !maze.has_wall(cell, dir))
        .map(move |dir| dir.step(cell))
}
