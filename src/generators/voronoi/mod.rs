//! Recursive Voronoi partition generator.
//!
//! Every stage is split into regions around a set of seeds, the regions are joined by a random
//! spanning tree of border walls, and each region is then split again. Stages that the seed
//! strategy declines are finished by a fallback [`RegionGenerator`].

mod seeds;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use rand::{Rng, seq::SliceRandom};

pub use seeds::{CentroidSeedStrategy, RandomSeedStrategy, SeedCount, SeedStrategy, Stage};

use crate::{
    error::{MazeError, Result},
    generators::{Backtracker, MazeGenerator, RegionGenerator, union_find::UnionFind},
    maze::{Cell, Direction, Maze},
    metric::Metric,
};

pub struct VoronoiGenerator<S, M, F = Backtracker> {
    seeds: S,
    metric: M,
    fallback: F,
}

/// A wall between two regions. Carving `direction` of `cell` joins region `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RegionEdge {
    from: usize,
    to: usize,
    cell: Cell,
    direction: Direction,
}

impl<S, M> VoronoiGenerator<S, M> {
    /// Creates a generator finishing undivided stages with a [`Backtracker`].
    pub fn new(seeds: S, metric: M) -> Self {
        VoronoiGenerator {
            seeds,
            metric,
            fallback: Backtracker,
        }
    }
}

impl<S, M, F> VoronoiGenerator<S, M, F> {
    pub fn with_fallback<G: RegionGenerator>(self, fallback: G) -> VoronoiGenerator<S, M, G> {
        VoronoiGenerator {
            seeds: self.seeds,
            metric: self.metric,
            fallback,
        }
    }
}

impl<S, M, F> MazeGenerator for VoronoiGenerator<S, M, F>
where
    S: SeedStrategy,
    M: Metric,
    F: RegionGenerator,
{
    fn generate<R: Rng + ?Sized>(&self, rows: usize, columns: usize, rng: &mut R) -> Result<Maze> {
        let mut maze = Maze::new(rows, columns)?;
        let cells = maze.cells().collect::<BTreeSet<_>>();
        self.subdivide(&mut maze, Stage::new(0, cells), rng)?;
        Ok(maze)
    }
}

impl<S, M, F> VoronoiGenerator<S, M, F>
where
    S: SeedStrategy,
    M: Metric,
    F: RegionGenerator,
{
    fn subdivide<R: Rng + ?Sized>(&self, maze: &mut Maze, stage: Stage, rng: &mut R) -> Result<()> {
        let Some(seeds) = self.seeds.seeds_for(&stage, rng) else {
            tracing::trace!(
                "[voronoi] depth {}: {} cells handed to the fallback",
                stage.depth(),
                stage.len()
            );
            return self.fallback.carve(maze, stage.cells(), rng);
        };

        let owners = self.assign_to_seeds(&stage, &seeds);
        let (region_of, regions) = split_into_regions(&stage, &owners);
        if regions.len() < 2 {
            tracing::warn!(
                "[voronoi] depth {}: {} seed(s) did not split {} cells, using the fallback",
                stage.depth(),
                seeds.len(),
                stage.len()
            );
            return self.fallback.carve(maze, stage.cells(), rng);
        }

        let edges = find_region_edges(&stage, &region_of)?;
        tracing::debug!(
            "[voronoi] depth {}: {} cells, {} seeds, {} regions, {} borders",
            stage.depth(),
            stage.len(),
            seeds.len(),
            regions.len(),
            edges.len()
        );
        connect_regions(maze, regions.len(), edges, stage.depth(), rng)?;

        let depth = stage.depth() + 1;
        for region in regions {
            self.subdivide(maze, Stage::new(depth, region), rng)?;
        }
        Ok(())
    }

    /// Maps every cell of the stage to the index of its nearest seed. Ties go to the earlier seed.
    fn assign_to_seeds(&self, stage: &Stage, seeds: &[Cell]) -> HashMap<Cell, usize> {
        stage
            .cells()
            .iter()
            .filter_map(|&cell| {
                seeds
                    .iter()
                    .enumerate()
                    .min_by_key(|&(_, &seed)| self.metric.distance(seed, cell))
                    .map(|(i, _)| (cell, i))
            })
            .collect()
    }
}

/// Splits the cells owned by each seed into connected regions.
///
/// A seed's cells are usually connected already, but nothing guarantees it inside an irregular
/// stage or under an arbitrary metric. Each connected piece becomes a region of its own.
fn split_into_regions(
    stage: &Stage,
    owners: &HashMap<Cell, usize>,
) -> (HashMap<Cell, usize>, Vec<BTreeSet<Cell>>) {
    let mut region_of: HashMap<Cell, usize> = HashMap::with_capacity(stage.len());
    let mut regions: Vec<BTreeSet<Cell>> = Vec::new();

    for &start in stage.cells() {
        if region_of.contains_key(&start) {
            continue;
        }
        let owner = owners.get(&start);
        let id = regions.len();
        let mut region = BTreeSet::from([start]);
        region_of.insert(start, id);

        let mut stack = vec![start];
        while let Some(cell) = stack.pop() {
            for dir in Direction::ALL {
                let next = dir.step(cell);
                if stage.cells().contains(&next)
                    && !region_of.contains_key(&next)
                    && owners.get(&next) == owner
                {
                    region_of.insert(next, id);
                    region.insert(next);
                    stack.push(next);
                }
            }
        }
        regions.push(region);
    }
    (region_of, regions)
}

/// Collects one border wall per pair of touching regions, the first found in row-major order.
///
/// Looking east and south of every cell visits each internal wall of the stage exactly once.
fn find_region_edges(stage: &Stage, region_of: &HashMap<Cell, usize>) -> Result<Vec<RegionEdge>> {
    let mut edges: BTreeMap<(usize, usize), RegionEdge> = BTreeMap::new();
    for &cell in stage.cells() {
        let from = *region_of.get(&cell).ok_or(MazeError::UnassignedCell(cell))?;
        for direction in [Direction::East, Direction::South] {
            let next = direction.step(cell);
            if !stage.cells().contains(&next) {
                continue;
            }
            let to = *region_of.get(&next).ok_or(MazeError::UnassignedCell(next))?;
            if from != to {
                edges.entry((from.min(to), from.max(to))).or_insert(RegionEdge {
                    from,
                    to,
                    cell,
                    direction,
                });
            }
        }
    }
    Ok(edges.into_values().collect())
}

/// Carves a random spanning tree of `edges` over `region_count` regions (randomized Kruskal).
fn connect_regions<R: Rng + ?Sized>(
    maze: &mut Maze,
    region_count: usize,
    mut edges: Vec<RegionEdge>,
    depth: usize,
    rng: &mut R,
) -> Result<()> {
    edges.shuffle(rng);

    let mut uf = UnionFind::new(region_count);
    // A spanning tree over n regions needs n - 1 connections
    let mut needed = region_count.saturating_sub(1);
    for edge in edges {
        if needed == 0 {
            break;
        }
        if uf.unite(edge.from, edge.to) {
            maze.carve_wall(edge.cell, edge.direction)?;
            needed -= 1;
        }
    }

    if needed > 0 {
        return Err(MazeError::DisconnectedRegions {
            depth,
            missing: needed,
        });
    }
    Ok(())
}
