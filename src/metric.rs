//! Distance functions between grid cells, used to assign cells to their nearest seed.

use crate::maze::Cell;

/// A distance between two cells.
///
/// Implementations must be symmetric and return zero exactly when both cells are equal.
/// Only the ordering of distances matters, so they need not satisfy the triangle inequality.
pub trait Metric {
    fn distance(&self, a: Cell, b: Cell) -> u64;
}

/// `|Δrow| + |Δcolumn|`
#[derive(Debug, Default, Clone, Copy)]
pub struct Manhattan;

/// `Δrow² + Δcolumn²`, left unsquare-rooted since only the ordering is used.
#[derive(Debug, Default, Clone, Copy)]
pub struct SquaredEuclidean;

/// `max(|Δrow|, |Δcolumn|)`
#[derive(Debug, Default, Clone, Copy)]
pub struct Chebyshev;

fn deltas((r1, c1): Cell, (r2, c2): Cell) -> (u64, u64) {
    (r1.abs_diff(r2) as u64, c1.abs_diff(c2) as u64)
}

impl Metric for Manhattan {
    fn distance(&self, a: Cell, b: Cell) -> u64 {
        let (dr, dc) = deltas(a, b);
        dr + dc
    }
}

impl Metric for SquaredEuclidean {
    fn distance(&self, a: Cell, b: Cell) -> u64 {
        let (dr, dc) = deltas(a, b);
        dr * dr + dc * dc
    }
}

impl Metric for Chebyshev {
    fn distance(&self, a: Cell, b: Cell) -> u64 {
        let (dr, dc) = deltas(a, b);
        dr.max(dc)
    }
}

impl<F> Metric for F
where
    F: Fn(Cell, Cell) -> u64,
{
    fn distance(&self, a: Cell, b: Cell) -> u64 {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_distances() {
        let (a, b) = ((1, 2), (4, 6));
        assert_eq!(Manhattan.distance(a, b), 7);
        assert_eq!(SquaredEuclidean.distance(a, b), 25);
        assert_eq!(Chebyshev.distance(a, b), 4);
    }

    #[test]
    fn test_closure_metric() {
        let rows_only = |(r1, _): Cell, (r2, _): Cell| r1.abs_diff(r2) as u64;
        assert_eq!(rows_only.distance((0, 0), (3, 9)), 3);
    }

    fn cell() -> impl Strategy<Value = Cell> {
        (0usize..500, 0usize..500)
    }

    fn assert_metric_laws(metric: &dyn Metric, a: Cell, b: Cell) {
        assert_eq!(metric.distance(a, b), metric.distance(b, a));
        assert_eq!(metric.distance(a, a), 0);
        assert_eq!(metric.distance(a, b) == 0, a == b);
    }

    proptest! {
        #[test]
        fn prop_metrics_symmetric_and_zero_only_on_equal(a in cell(), b in cell()) {
            assert_metric_laws(&Manhattan, a, b);
            assert_metric_laws(&SquaredEuclidean, a, b);
            assert_metric_laws(&Chebyshev, a, b);
        }
    }
}
