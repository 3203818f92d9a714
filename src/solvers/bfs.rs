use std::collections::VecDeque;

use super::Path;
use crate::maze::{Cell, Grid, Maze, open_neighbors};

/// Breadth-first search from `start` to `goal` through carved walls.
///
/// Returns the cells of the shortest path, both ends included, or an empty path if `goal`
/// cannot be reached or either end lies outside the maze. In a perfect maze the path is unique.
pub fn solve_bfs(maze: &Maze, start: Cell, goal: Cell) -> Path {
    if !maze.is_in_bounds(start) || !maze.is_in_bounds(goal) {
        tracing::warn!("[bfs] {start:?} -> {goal:?} is outside the maze");
        return Path::new();
    }

    let mut visited = Grid::new(maze.rows(), maze.columns(), false);
    let mut parents: Grid<Option<Cell>> = Grid::new(maze.rows(), maze.columns(), None);
    let mut queue = VecDeque::from([start]);
    visited[start] = true;

    while let Some(current) = queue.pop_front() {
        if current == goal {
            break;
        }
        for neighbor in open_neighbors(current, maze) {
            if !visited[neighbor] {
                visited[neighbor] = true;
                parents[neighbor] = Some(current);
                queue.push_back(neighbor);
            }
        }
    }

    if !visited[goal] {
        tracing::debug!("[bfs] no path from {start:?} to {goal:?}");
        return Path::new();
    }

    // Backtrack from the goal to the start
    let mut path = vec![goal];
    let mut child = goal;
    while let Some(parent) = parents[child] {
        path.push(parent);
        child = parent;
    }
    path.reverse();
    tracing::debug!("[bfs] path of {} cells from {start:?} to {goal:?}", path.len());
    path
}
