use std::collections::{BTreeSet, HashSet};

use rand::Rng;

use crate::{
    error::Result,
    generators::{MazeGenerator, RegionGenerator},
    maze::{Cell, Direction, Maze},
};

/// Iterative randomized depth-first carving.
///
/// As a [`MazeGenerator`] it covers the whole maze starting from the top-left corner. As a
/// [`RegionGenerator`] it covers an arbitrary connected set of cells starting from its first
/// cell in row-major order, carving only walls between cells of the set.
#[derive(Debug, Default, Clone, Copy)]
pub struct Backtracker;

impl MazeGenerator for Backtracker {
    fn generate<R: Rng + ?Sized>(&self, rows: usize, columns: usize, rng: &mut R) -> Result<Maze> {
        let mut maze = Maze::new(rows, columns)?;
        let cells = maze.cells().collect::<BTreeSet<_>>();
        self.carve(&mut maze, &cells, rng)?;
        Ok(maze)
    }
}

impl RegionGenerator for Backtracker {
    fn carve<R: Rng + ?Sized>(
        &self,
        maze: &mut Maze,
        cells: &BTreeSet<Cell>,
        rng: &mut R,
    ) -> Result<()> {
        if cells.len() <= 1 {
            return Ok(());
        }
        let Some(&start) = cells.first() else {
            return Ok(());
        };

        let mut visited: HashSet<Cell> = HashSet::with_capacity(cells.len());
        visited.insert(start);

        // The stack will keep only visited cells
        let mut stack = vec![start];

        while let Some(cell) = stack.pop() {
            let neighbors = Direction::ALL
                .into_iter()
                .map(|dir| (dir, dir.step(cell)))
                .filter(|(_, c)| cells.contains(c) && !visited.contains(c))
                .collect::<Vec<_>>();

            if !neighbors.is_empty() {
                let (dir, neighbor) = neighbors[rng.random_range(0..neighbors.len())];
                maze.carve_wall(cell, dir)?;
                visited.insert(neighbor);
                // Put the cell back first so we can look at another neighbor of this cell later
                stack.push(cell);
                // Put the neighbor to carve the maze in that neighbor's direction
                stack.push(neighbor);
            }
        }

        if visited.len() < cells.len() {
            tracing::warn!(
                "[backtracker] region of {} cells is not connected, reached {}",
                cells.len(),
                visited.len()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{
        get_rng,
        test_utils::{assert_perfect, carved_walls_inside},
    };

    #[test]
    fn test_backtracker_is_perfect() {
        let mut rng = get_rng(Some(7));
        for (rows, columns) in [(1, 1), (1, 9), (9, 1), (3, 3), (20, 17)] {
            let maze = Backtracker.generate(rows, columns, &mut rng).unwrap();
            assert_perfect(&maze);
        }
    }

    #[test]
    fn test_backtracker_irregular_region() {
        // A plus sign in the middle of a 5x5 maze
        let region = [(0, 2), (1, 2), (2, 0), (2, 1), (2, 2), (2, 3), (2, 4), (3, 2), (4, 2)]
            .into_iter()
            .collect::<BTreeSet<_>>();
        let mut maze = Maze::new(5, 5).unwrap();
        let mut rng = get_rng(Some(2));
        Backtracker.carve(&mut maze, &region, &mut rng).unwrap();

        // A plus sign has no cycles, so every wall between its cells is carved.
        assert_eq!(carved_walls_inside(&maze, &region), region.len() - 1);
        assert_eq!(maze.carved_wall_count(), region.len() - 1);
    }

    #[test]
    fn test_backtracker_region_spans_block() {
        let region = (1..4)
            .flat_map(|r| (1..5).map(move |c| (r, c)))
            .collect::<BTreeSet<_>>();
        let mut maze = Maze::new(6, 6).unwrap();
        let mut rng = get_rng(Some(13));
        Backtracker.carve(&mut maze, &region, &mut rng).unwrap();
        assert_eq!(carved_walls_inside(&maze, &region), region.len() - 1);
        assert_eq!(maze.carved_wall_count(), region.len() - 1);
    }

    #[test]
    fn test_backtracker_trivial_regions() {
        let mut maze = Maze::new(3, 3).unwrap();
        let mut rng = get_rng(Some(0));
        Backtracker
            .carve(&mut maze, &BTreeSet::new(), &mut rng)
            .unwrap();
        Backtracker
            .carve(&mut maze, &BTreeSet::from([(1, 1)]), &mut rng)
            .unwrap();
        assert_eq!(maze.carved_wall_count(), 0);
    }
}
