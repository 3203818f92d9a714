use super::Cell;

/// Row-major storage of one value per maze cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    data: Box<[T]>,
    rows: usize,
    columns: usize,
}

impl<T: Clone> Grid<T> {
    pub fn new(rows: usize, columns: usize, value: T) -> Self {
        let data = vec![value; rows * columns].into_boxed_slice();
        Grid {
            data,
            rows,
            columns,
        }
    }
}

impl<T> Grid<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    fn ravel_index(&self, (row, column): Cell) -> usize {
        assert!(
            row < self.rows && column < self.columns,
            "cell ({row}, {column}) is outside a {}x{} grid",
            self.rows,
            self.columns
        );
        row * self.columns + column
    }
}

impl<T> std::ops::Index<Cell> for Grid<T> {
    type Output = T;

    fn index(&self, index: Cell) -> &Self::Output {
        &self.data[self.ravel_index(index)]
    }
}

impl<T> std::ops::IndexMut<Cell> for Grid<T> {
    fn index_mut(&mut self, index: Cell) -> &mut Self::Output {
        let idx = self.ravel_index(index);
        &mut self.data[idx]
    }
}
