use rand::Rng;

use crate::{
    error::Result,
    generators::MazeGenerator,
    maze::{Direction, Maze},
};

/// Carves east or south out of every cell with a coin flip.
///
/// Single pass, no extra memory. Every cell except the bottom-right corner links to a cell
/// further east or south, which leaves a diagonal bias towards the top-left.
#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryTree;

impl MazeGenerator for BinaryTree {
    fn generate<R: Rng + ?Sized>(&self, rows: usize, columns: usize, rng: &mut R) -> Result<Maze> {
        let mut maze = Maze::new(rows, columns)?;

        for row in 0..rows {
            let can_carve_south = row + 1 < rows;
            for column in 0..columns {
                let can_carve_east = column + 1 < columns;
                let direction = match (can_carve_east, can_carve_south) {
                    (true, true) => {
                        if rng.random_bool(0.5) {
                            Direction::East
                        } else {
                            Direction::South
                        }
                    }
                    (true, false) => Direction::East,
                    (false, true) => Direction::South,
                    // Bottom-right corner
                    (false, false) => continue,
                };
                maze.carve_wall((row, column), direction)?;
            }
        }

        tracing::debug!(
            "[binary tree] carved {} walls in a {}x{} maze",
            maze.carved_wall_count(),
            rows,
            columns
        );
        Ok(maze)
    }
}
