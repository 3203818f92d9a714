use std::collections::BTreeSet;

use rand::{Rng, SeedableRng, rngs::StdRng};

mod backtracker;
mod binary_tree;
mod union_find;
pub mod voronoi;

pub use backtracker::Backtracker;
pub use binary_tree::BinaryTree;
pub use voronoi::{
    CentroidSeedStrategy, RandomSeedStrategy, SeedCount, SeedStrategy, Stage, VoronoiGenerator,
};

use crate::{
    error::Result,
    maze::{Cell, Direction, Maze},
    metric::Manhattan,
};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Produces a fully carved maze of the given size.
pub trait MazeGenerator {
    fn generate<R: Rng + ?Sized>(&self, rows: usize, columns: usize, rng: &mut R) -> Result<Maze>;

    /// Lift this generator into a [`RegionGenerator`] working on a bounding box of the region.
    fn adapt(self) -> Adapted<Self>
    where
        Self: Sized,
    {
        Adapted(self)
    }
}

/// Carves a maze over exactly the given cells of an existing maze.
pub trait RegionGenerator {
    fn carve<R: Rng + ?Sized>(
        &self,
        maze: &mut Maze,
        cells: &BTreeSet<Cell>,
        rng: &mut R,
    ) -> Result<()>;
}

/// A [`MazeGenerator`] running on the bounding box of a region.
///
/// The wrapped generator builds a maze the size of the region's bounding box, whose walls
/// between cells of the region are then copied onto the real maze. The result is a spanning
/// tree of the region only when the region fills its bounding box.
#[derive(Debug, Clone)]
pub struct Adapted<G>(pub G);

impl<G: MazeGenerator> RegionGenerator for Adapted<G> {
    fn carve<R: Rng + ?Sized>(
        &self,
        maze: &mut Maze,
        cells: &BTreeSet<Cell>,
        rng: &mut R,
    ) -> Result<()> {
        if cells.is_empty() {
            return Ok(());
        }
        let (mut min_row, mut max_row) = (usize::MAX, 0);
        let (mut min_column, mut max_column) = (usize::MAX, 0);
        for &(row, column) in cells {
            min_row = min_row.min(row);
            max_row = max_row.max(row);
            min_column = min_column.min(column);
            max_column = max_column.max(column);
        }

        let submaze = self.0.generate(
            max_row - min_row + 1,
            max_column - min_column + 1,
            rng,
        )?;

        // Walls towards cells outside the region are left as they are, so passages already
        // carved into the region from its neighbours survive.
        for &cell in cells {
            let sub_cell = (cell.0 - min_row, cell.1 - min_column);
            for dir in Direction::ALL {
                if !cells.contains(&dir.step(cell)) {
                    continue;
                }
                let present = submaze.has_wall(sub_cell, dir);
                maze.set_wall(cell, dir, present)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    BinaryTree,
    Backtracker,
    VoronoiRandom,
    VoronoiCentroid,
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::BinaryTree => write!(f, "Binary Tree"),
            Generator::Backtracker => write!(f, "Recursive Backtracker"),
            Generator::VoronoiRandom => write!(f, "Voronoi (random seeds)"),
            Generator::VoronoiCentroid => write!(f, "Voronoi (centroid seeds)"),
        }
    }
}

/// Cells per region the Voronoi presets aim for at every level of the recursion.
const VORONOI_CELLS_PER_SEED: usize = 40;
const VORONOI_MAX_CENTROID_SEEDS: usize = 8;

/// Generate a maze with one of the built-in generators and default settings.
pub fn generate_maze(
    generator: Generator,
    rows: usize,
    columns: usize,
    seed: Option<u64>,
) -> Result<Maze> {
    let mut rng = get_rng(seed);
    match generator {
        Generator::BinaryTree => BinaryTree.generate(rows, columns, &mut rng),
        Generator::Backtracker => Backtracker.generate(rows, columns, &mut rng),
        Generator::VoronoiRandom => VoronoiGenerator::new(
            RandomSeedStrategy::per_stage(|stage: &Stage| stage.len() / VORONOI_CELLS_PER_SEED),
            Manhattan,
        )
        .generate(rows, columns, &mut rng),
        Generator::VoronoiCentroid => VoronoiGenerator::new(
            CentroidSeedStrategy::per_stage(|stage: &Stage| {
                (stage.len() / VORONOI_CELLS_PER_SEED).min(VORONOI_MAX_CENTROID_SEEDS)
            }),
            Manhattan,
        )
        .generate(rows, columns, &mut rng),
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use std::collections::HashSet;

    use crate::maze::{Cell, Direction, Maze, get_neighbors};

    /// Asserts that the carved passages of `maze` form a spanning tree over all cells and
    /// that every border wall is intact.
    pub fn assert_perfect(maze: &Maze) {
        for cell in maze.cells() {
            for dir in Direction::ALL {
                if maze.is_border(cell, dir) {
                    assert!(maze.has_wall(cell, dir), "border {dir} of {cell:?} is open");
                }
            }
        }

        assert_eq!(
            maze.carved_wall_count(),
            maze.cell_count() - 1,
            "a spanning tree carves exactly cells - 1 walls"
        );

        // DFS recording the parent of every cell: an open wall to an already visited cell
        // other than the parent is a cycle.
        let mut visited: HashSet<Cell> = HashSet::new();
        let mut stack: Vec<(Cell, Option<Cell>)> = vec![((0, 0), None)];
        while let Some((cell, parent)) = stack.pop() {
            if !visited.insert(cell) {
                panic!("cycle through {cell:?}");
            }
            for (dir, next) in get_neighbors(cell, maze) {
                if maze.has_wall(cell, dir) || Some(next) == parent {
                    continue;
                }
                stack.push((next, Some(cell)));
            }
        }
        assert_eq!(visited.len(), maze.cell_count(), "maze is not connected");
    }

    /// Counts the walls carved between cells of `cells`, asserting that none was opened
    /// towards a cell outside of it.
    pub fn carved_walls_inside(maze: &Maze, cells: &std::collections::BTreeSet<Cell>) -> usize {
        let mut count = 0;
        for &cell in cells {
            for dir in [Direction::East, Direction::South] {
                if !maze.has_wall(cell, dir) {
                    assert!(
                        cells.contains(&dir.step(cell)),
                        "wall {dir} of {cell:?} opened out of the region"
                    );
                    count += 1;
                }
            }
        }
        count
    }
}
