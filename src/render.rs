//! Terminal rendering of a maze and its solution.
//!
//! The maze is rasterised into a `(2 * rows + 1) x (2 * columns + 1)` character grid: cells sit
//! at odd coordinates, walls and passages between them at the even ones.

use std::fmt;
use std::io::Write;

use crossterm::{
    queue,
    style::{Color, Print, Stylize},
};

use crate::maze::{Cell, Direction, Grid, Maze};

/// One character cell of the rendered maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    Wall,
    Empty,
    /// Part of the solution route.
    Route,
    Start,
    Goal,
}

impl GridCell {
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: usize = 2;
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            GridCell::Wall => "██".with(Color::White),
            GridCell::Empty => "  ".with(Color::Reset),
            GridCell::Route => "░░".with(Color::Yellow),
            GridCell::Start => "SS".with(Color::Green),
            GridCell::Goal => "GG".with(Color::Red),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                GridCell::CELL_WIDTH,
                "Each cell must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

fn raster_position((row, column): Cell) -> Cell {
    (row * 2 + 1, column * 2 + 1)
}

/// Rasterises `maze`, overlaying `path` if it is not empty.
pub fn rasterize(maze: &Maze, path: &[Cell]) -> Grid<GridCell> {
    let mut raster = Grid::new(maze.rows() * 2 + 1, maze.columns() * 2 + 1, GridCell::Wall);

    for cell in maze.cells() {
        let (row, column) = raster_position(cell);
        raster[(row, column)] = GridCell::Empty;
        if !maze.has_wall(cell, Direction::East) {
            raster[(row, column + 1)] = GridCell::Empty;
        }
        if !maze.has_wall(cell, Direction::South) {
            raster[(row + 1, column)] = GridCell::Empty;
        }
    }

    for pair in path.windows(2) {
        let (a, b) = (raster_position(pair[0]), raster_position(pair[1]));
        raster[a] = GridCell::Route;
        raster[((a.0 + b.0) / 2, (a.1 + b.1) / 2)] = GridCell::Route;
        raster[b] = GridCell::Route;
    }
    if let (Some(&start), Some(&goal)) = (path.first(), path.last()) {
        raster[raster_position(start)] = GridCell::Start;
        raster[raster_position(goal)] = GridCell::Goal;
    }
    raster
}

/// Writes the rasterised maze to `out`, one line per raster row.
pub fn render<W: Write>(out: &mut W, maze: &Maze, path: &[Cell]) -> std::io::Result<()> {
    let raster = rasterize(maze, path);
    for row in 0..raster.rows() {
        for column in 0..raster.columns() {
            queue!(out, Print(raster[(row, column)]))?;
        }
        queue!(out, Print("\r\n"))?;
    }
    out.flush()
}
