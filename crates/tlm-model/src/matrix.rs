//! Dense row-major matrix of `f64` values.

/// Rectangular `rows x cols` grid stored row-major.
///
/// The value at logical position `[i][j]` lives at flat index `i * cols + j`,
/// which is also the order handed to the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl Matrix {
    /// Creates a zero-filled matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![0.0; rows * cols],
        }
    }

    /// Builds a matrix from equal-length rows.
    ///
    /// Returns `None` when the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != cols) {
            return None;
        }
        let row_count = rows.len();
        Some(Self {
            rows: row_count,
            cols,
            values: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True when either dimension is zero. Such matrices are never persisted.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.values[row * self.cols + col])
        } else {
            None
        }
    }

    /// Sets a cell. Out-of-range positions are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        if row < self.rows && col < self.cols {
            self.values[row * self.cols + col] = value;
        }
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.values[start..start + self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows).map(move |row| self.row(row))
    }

    /// Reverses the row order in place (last row becomes first).
    pub fn reverse_rows(&mut self) {
        if self.cols == 0 {
            return;
        }
        let rows = self.rows;
        for i in 0..rows / 2 {
            let (head, tail) = self.values.split_at_mut((rows - 1 - i) * self.cols);
            head[i * self.cols..(i + 1) * self.cols].swap_with_slice(&mut tail[..self.cols]);
        }
    }

    /// Divides every value of one column by `divisor`.
    pub fn scale_column(&mut self, col: usize, divisor: f64) {
        if col >= self.cols {
            return;
        }
        for row in 0..self.rows {
            self.values[row * self.cols + col] /= divisor;
        }
    }

    /// Copies the leading `width` columns into a new matrix, zero-padding
    /// columns this matrix does not have.
    pub fn project_columns(&self, width: usize) -> Self {
        let mut out = Self::zeros(self.rows, width);
        for row in 0..self.rows {
            for col in 0..width.min(self.cols) {
                out.values[row * width + col] = self.values[row * self.cols + col];
            }
        }
        out
    }

    /// Flat row-major view of the data.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Consumes the matrix and returns the flat row-major buffer.
    pub fn into_flat(self) -> Vec<f64> {
        self.values
    }

    /// Nested copy of the rows, mostly for assertions.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(<[f64]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_rows_even_and_odd() {
        let mut even = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        even.reverse_rows();
        assert_eq!(even.to_rows(), vec![vec![3.0, 4.0], vec![1.0, 2.0]]);

        let mut odd = Matrix::from_rows(vec![vec![1.0], vec![2.0], vec![3.0]]).unwrap();
        odd.reverse_rows();
        assert_eq!(odd.to_rows(), vec![vec![3.0], vec![2.0], vec![1.0]]);
    }

    #[test]
    fn flat_index_is_row_major() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m.get(1, 2), Some(6.0));
        assert_eq!(m.get(2, 0), None);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(Matrix::from_rows(vec![vec![1.0], vec![1.0, 2.0]]).is_none());
    }

    #[test]
    fn project_pads_and_truncates() {
        let narrow = Matrix::from_rows(vec![vec![1.0], vec![2.0]]).unwrap();
        assert_eq!(
            narrow.project_columns(2).to_rows(),
            vec![vec![1.0, 0.0], vec![2.0, 0.0]]
        );
        let wide = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(wide.project_columns(2).to_rows(), vec![vec![1.0, 2.0]]);
    }

    #[test]
    fn zero_columns_is_empty() {
        let m = Matrix::zeros(3, 0);
        assert!(m.is_empty());
        assert_eq!(m.rows(), 3);
    }
}
