use std::collections::BTreeSet;
use std::fmt;

use rand::{Rng, seq::index};

use crate::maze::Cell;

/// A step of the recursive Voronoi subdivision: the cells to partition and how deep the
/// recursion is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    depth: usize,
    cells: BTreeSet<Cell>,
}

impl Stage {
    pub fn new(depth: usize, cells: BTreeSet<Cell>) -> Self {
        Stage { depth, cells }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn into_cells(self) -> BTreeSet<Cell> {
        self.cells
    }
}

/// How many seeds a strategy asks for at a given stage.
pub enum SeedCount {
    Fixed(usize),
    /// A function of the recursion depth.
    PerDepth(Box<dyn Fn(usize) -> usize>),
    /// A function of the whole stage, e.g. its size.
    PerStage(Box<dyn Fn(&Stage) -> usize>),
}

impl SeedCount {
    pub fn for_stage(&self, stage: &Stage) -> usize {
        match self {
            SeedCount::Fixed(k) => *k,
            SeedCount::PerDepth(f) => f(stage.depth()),
            SeedCount::PerStage(f) => f(stage),
        }
    }
}

impl fmt::Debug for SeedCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedCount::Fixed(k) => write!(f, "Fixed({k})"),
            SeedCount::PerDepth(_) => write!(f, "PerDepth(..)"),
            SeedCount::PerStage(_) => write!(f, "PerStage(..)"),
        }
    }
}

/// Chooses the seeds a stage is partitioned around.
pub trait SeedStrategy {
    /// Returns distinct seeds, all members of the stage, in priority order: when a cell is
    /// equally close to several seeds, the earliest one wins.
    ///
    /// `None` means the stage should not be partitioned further and is handed to the
    /// fallback generator instead.
    fn seeds_for<R: Rng + ?Sized>(&self, stage: &Stage, rng: &mut R) -> Option<Vec<Cell>>;
}

/// Picks seeds uniformly at random without replacement.
#[derive(Debug)]
pub struct RandomSeedStrategy {
    count: SeedCount,
}

impl RandomSeedStrategy {
    /// Asks for the same number of seeds at every stage.
    pub fn new(k: usize) -> Self {
        Self::with_count(SeedCount::Fixed(k))
    }

    pub fn with_count(count: SeedCount) -> Self {
        RandomSeedStrategy { count }
    }

    pub fn per_depth(f: impl Fn(usize) -> usize + 'static) -> Self {
        Self::with_count(SeedCount::PerDepth(Box::new(f)))
    }

    pub fn per_stage(f: impl Fn(&Stage) -> usize + 'static) -> Self {
        Self::with_count(SeedCount::PerStage(Box::new(f)))
    }
}

impl SeedStrategy for RandomSeedStrategy {
    fn seeds_for<R: Rng + ?Sized>(&self, stage: &Stage, rng: &mut R) -> Option<Vec<Cell>> {
        let k = self.count.for_stage(stage);
        if k == 0 || stage.len() < k.max(2) {
            return None;
        }

        let available = stage.cells().iter().copied().collect::<Vec<_>>();
        let seeds = index::sample(rng, available.len(), k)
            .into_iter()
            .map(|i| available[i])
            .collect();
        Some(seeds)
    }
}

/// Splits the stage into contiguous buckets along its longer axis and seeds each bucket
/// at its centroid.
#[derive(Debug)]
pub struct CentroidSeedStrategy {
    count: SeedCount,
}

impl CentroidSeedStrategy {
    /// Asks for the same number of seeds at every stage.
    pub fn new(k: usize) -> Self {
        Self::with_count(SeedCount::Fixed(k))
    }

    pub fn with_count(count: SeedCount) -> Self {
        CentroidSeedStrategy { count }
    }

    pub fn per_depth(f: impl Fn(usize) -> usize + 'static) -> Self {
        Self::with_count(SeedCount::PerDepth(Box::new(f)))
    }

    pub fn per_stage(f: impl Fn(&Stage) -> usize + 'static) -> Self {
        Self::with_count(SeedCount::PerStage(Box::new(f)))
    }
}

impl SeedStrategy for CentroidSeedStrategy {
    fn seeds_for<R: Rng + ?Sized>(&self, stage: &Stage, _rng: &mut R) -> Option<Vec<Cell>> {
        let k = self.count.for_stage(stage);
        if k < 2 || stage.len() < k {
            return None;
        }

        let (mut min_row, mut max_row) = (usize::MAX, 0);
        let (mut min_column, mut max_column) = (usize::MAX, 0);
        for &(row, column) in stage.cells() {
            min_row = min_row.min(row);
            max_row = max_row.max(row);
            min_column = min_column.min(column);
            max_column = max_column.max(column);
        }
        let split_by_row = max_row - min_row >= max_column - min_column;

        // Stable sort over row-major order, so ties along the axis stay deterministic.
        let mut sorted = stage.cells().iter().copied().collect::<Vec<_>>();
        if split_by_row {
            sorted.sort_by_key(|&(row, _)| row);
        } else {
            sorted.sort_by_key(|&(_, column)| column);
        }

        // With n >= k, every bucket holds at least one cell and buckets are disjoint, so the
        // seeds are distinct.
        let n = sorted.len();
        let seeds = (0..k)
            .map(|i| {
                let bucket = &sorted[i * n / k..(i + 1) * n / k];
                let len = bucket.len() as f64;
                let avg_row = bucket.iter().map(|&(r, _)| r as f64).sum::<f64>() / len;
                let avg_column = bucket.iter().map(|&(_, c)| c as f64).sum::<f64>() / len;
                let centroid = (avg_row.round() as usize, avg_column.round() as usize);
                if bucket.contains(&centroid) {
                    centroid
                } else {
                    bucket[bucket.len() / 2]
                }
            })
            .collect::<Vec<_>>();

        tracing::trace!(
            "[centroid seeds] depth {} split by {}: {:?}",
            stage.depth(),
            if split_by_row { "row" } else { "column" },
            seeds
        );
        Some(seeds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;
    use proptest::prelude::*;

    fn block(rows: usize, columns: usize) -> BTreeSet<Cell> {
        (0..rows)
            .flat_map(|r| (0..columns).map(move |c| (r, c)))
            .collect()
    }

    fn assert_valid_seeds(stage: &Stage, seeds: &[Cell], k: usize) {
        assert_eq!(seeds.len(), k);
        let distinct = seeds.iter().collect::<BTreeSet<_>>();
        assert_eq!(distinct.len(), k, "duplicate seeds in {seeds:?}");
        assert!(seeds.iter().all(|s| stage.cells().contains(s)));
    }

    #[test]
    fn test_seed_count_variants() {
        let stage = Stage::new(3, block(4, 5));
        assert_eq!(SeedCount::Fixed(4).for_stage(&stage), 4);
        assert_eq!(
            SeedCount::PerDepth(Box::new(|d: usize| d * 2)).for_stage(&stage),
            6
        );
        assert_eq!(
            SeedCount::PerStage(Box::new(|s: &Stage| s.len() / 10)).for_stage(&stage),
            2
        );
    }

    #[test]
    fn test_random_declines() {
        let mut rng = get_rng(Some(0));
        let stage = Stage::new(0, block(2, 2));
        assert_eq!(RandomSeedStrategy::new(0).seeds_for(&stage, &mut rng), None);
        assert_eq!(RandomSeedStrategy::new(5).seeds_for(&stage, &mut rng), None);
        let single = Stage::new(0, block(1, 1));
        assert_eq!(RandomSeedStrategy::new(1).seeds_for(&single, &mut rng), None);
        assert_eq!(RandomSeedStrategy::new(2).seeds_for(&single, &mut rng), None);
    }

    #[test]
    fn test_random_picks_whole_stage() {
        let mut rng = get_rng(Some(9));
        let stage = Stage::new(0, block(2, 2));
        let seeds = RandomSeedStrategy::new(4)
            .seeds_for(&stage, &mut rng)
            .unwrap();
        assert_valid_seeds(&stage, &seeds, 4);
    }

    #[test]
    fn test_random_per_depth() {
        let mut rng = get_rng(Some(9));
        let strategy = RandomSeedStrategy::per_depth(|depth| if depth == 0 { 3 } else { 0 });
        let cells = block(5, 5);
        let seeds = strategy
            .seeds_for(&Stage::new(0, cells.clone()), &mut rng)
            .unwrap();
        assert_eq!(seeds.len(), 3);
        assert_eq!(strategy.seeds_for(&Stage::new(1, cells), &mut rng), None);
    }

    #[test]
    fn test_centroid_declines() {
        let mut rng = get_rng(Some(0));
        let stage = Stage::new(0, block(2, 2));
        assert_eq!(CentroidSeedStrategy::new(1).seeds_for(&stage, &mut rng), None);
        assert_eq!(CentroidSeedStrategy::new(5).seeds_for(&stage, &mut rng), None);
        assert!(CentroidSeedStrategy::new(4).seeds_for(&stage, &mut rng).is_some());
    }

    #[test]
    fn test_centroid_square_splits_rows() {
        let mut rng = get_rng(Some(0));
        let stage = Stage::new(0, block(4, 4));
        let seeds = CentroidSeedStrategy::new(2)
            .seeds_for(&stage, &mut rng)
            .unwrap();
        // Rows 0-1 average to (0.5, 1.5), rows 2-3 to (2.5, 1.5); both round away from zero.
        assert_eq!(seeds, vec![(1, 2), (3, 2)]);
    }

    #[test]
    fn test_centroid_wide_splits_columns() {
        let mut rng = get_rng(Some(0));
        let stage = Stage::new(0, block(3, 9));
        let seeds = CentroidSeedStrategy::new(3)
            .seeds_for(&stage, &mut rng)
            .unwrap();
        assert_eq!(seeds, vec![(1, 1), (1, 4), (1, 7)]);
    }

    #[test]
    fn test_centroid_snaps_to_bucket_median() {
        let mut rng = get_rng(Some(0));
        // A ring around (1, 1): the centroid of the whole ring is the missing middle cell.
        let mut ring = block(3, 3);
        ring.remove(&(1, 1));
        let stage = Stage::new(0, ring);
        let seeds = CentroidSeedStrategy::new(2)
            .seeds_for(&stage, &mut rng)
            .unwrap();
        assert_valid_seeds(&stage, &seeds, 2);
        // Rows are sorted [(0,0) (0,1) (0,2) (1,0) | (1,2) (2,0) (2,1) (2,2)].
        // First bucket averages to (0.25, 0.75) -> (0, 1), which is present.
        // Second bucket averages to (1.75, 1.25) -> (2, 1), which is present.
        assert_eq!(seeds, vec![(0, 1), (2, 1)]);

        let column = Stage::new(0, BTreeSet::from([(0, 0), (1, 1), (2, 0), (3, 1)]));
        let seeds = CentroidSeedStrategy::new(2)
            .seeds_for(&column, &mut rng)
            .unwrap();
        // Bucket [(0,0), (1,1)] rounds to (1, 1), present.
        // Bucket [(2,0), (3,1)] rounds to (3, 1), present.
        assert_eq!(seeds, vec![(1, 1), (3, 1)]);

        let diagonal = Stage::new(0, BTreeSet::from([(0, 0), (1, 2), (4, 0), (5, 2)]));
        let seeds = CentroidSeedStrategy::new(2)
            .seeds_for(&diagonal, &mut rng)
            .unwrap();
        // Bucket [(0,0), (1,2)] rounds to (1, 1), absent -> median (1, 2).
        // Bucket [(4,0), (5,2)] rounds to (5, 1), absent -> median (5, 2).
        assert_eq!(seeds, vec![(1, 2), (5, 2)]);
    }

    proptest! {
        #[test]
        fn prop_random_seeds_are_distinct_members(
            rows in 1usize..8,
            columns in 1usize..8,
            k in 0usize..12,
            seed in any::<u64>(),
        ) {
            let mut rng = get_rng(Some(seed));
            let stage = Stage::new(0, block(rows, columns));
            match RandomSeedStrategy::new(k).seeds_for(&stage, &mut rng) {
                Some(seeds) => assert_valid_seeds(&stage, &seeds, k),
                None => {
                    prop_assert!(k == 0 || stage.len() < k.max(2));
                }
            }
        }

        #[test]
        fn prop_centroid_seeds_are_distinct_members(
            cells in proptest::collection::btree_set((0usize..10, 0usize..10), 1..40),
            k in 0usize..12,
        ) {
            let mut rng = get_rng(Some(0));
            let stage = Stage::new(0, cells);
            match CentroidSeedStrategy::new(k).seeds_for(&stage, &mut rng) {
                Some(seeds) => assert_valid_seeds(&stage, &seeds, k),
                None => {
                    prop_assert!(k < 2 || stage.len() < k);
                }
            }
        }
    }
}
