mod bfs;

pub use bfs::solve_bfs;

use crate::maze::{Cell, Maze};

/// Cells from start to end inclusive. Empty when there is no path.
pub type Path = Vec<Cell>;

/// Shortest path between two cells. See [`solve_bfs`].
pub fn solve(maze: &Maze, start: Cell, goal: Cell) -> Path {
    solve_bfs(maze, start, goal)
}

/// Shortest path from the top-left to the bottom-right corner.
pub fn solve_maze(maze: &Maze) -> Path {
    let start = (0, 0);
    let goal = (maze.rows() - 1, maze.columns() - 1);
    solve(maze, start, goal)
}
