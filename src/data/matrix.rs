//! Named numeric matrix.

use crate::error::{PlotError, Result};
use ndarray::{Array2, ArrayView1, Axis as NdAxis};

/// A 2D `f64` matrix with row and column names.
///
/// NaN marks a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    values: Array2<f64>,
    row_names: Vec<String>,
    col_names: Vec<String>,
}

impl Matrix {
    /// Wrap an array, checking that the names match its shape.
    pub fn new(values: Array2<f64>, row_names: Vec<String>, col_names: Vec<String>) -> Result<Self> {
        let (rows, cols) = values.dim();

        if row_names.len() != rows {
            return Err(PlotError::shape_mismatch("row names", rows, row_names.len()));
        }
        if col_names.len() != cols {
            return Err(PlotError::shape_mismatch("column names", cols, col_names.len()));
        }

        Ok(Self {
            values,
            row_names,
            col_names,
        })
    }

    /// Build from row vectors, naming rows and columns by position.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let n = rows.len();

        let mut flat = Vec::with_capacity(n * cols);
        for row in rows {
            if row.len() != cols {
                return Err(PlotError::shape_mismatch("matrix row", cols, row.len()));
            }
            flat.extend(row);
        }

        let values = Array2::from_shape_vec((n, cols), flat)
            .map_err(|_| PlotError::shape_mismatch("matrix", n * cols, 0))?;

        Self::new(
            values,
            (0..n).map(|i| format!("row {}", i + 1)).collect(),
            (0..cols).map(|i| format!("col {}", i + 1)).collect(),
        )
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.values.ncols()
    }

    /// Cell value, NaN when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values.get((row, col)).copied().unwrap_or(f64::NAN)
    }

    /// The underlying array.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// One row as a view.
    pub fn row(&self, row: usize) -> ArrayView1<'_, f64> {
        self.values.row(row)
    }

    /// Row names.
    pub fn row_names(&self) -> &[String] {
        &self.row_names
    }

    /// Column names.
    pub fn col_names(&self) -> &[String] {
        &self.col_names
    }

    /// Minimum and maximum over finite cells.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Number of finite cells.
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_finite()).count()
    }

    /// Matrix with rows and columns picked (and reordered) by index.
    pub fn select(&self, rows: &[usize], cols: &[usize]) -> Result<Self> {
        for &r in rows {
            if r >= self.rows() {
                return Err(PlotError::index_out_of_range("matrix rows", r, self.rows()));
            }
        }
        for &c in cols {
            if c >= self.cols() {
                return Err(PlotError::index_out_of_range("matrix columns", c, self.cols()));
            }
        }

        let values = self
            .values
            .select(NdAxis(0), rows)
            .select(NdAxis(1), cols);

        Self::new(
            values,
            rows.iter().map(|&r| self.row_names[r].clone()).collect(),
            cols.iter().map(|&c| self.col_names[c].clone()).collect(),
        )
    }

    /// Rows become columns.
    pub fn transpose(&self) -> Self {
        Self {
            values: self.values.t().to_owned(),
            row_names: self.col_names.clone(),
            col_names: self.row_names.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix {
        Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, f64::NAN, 6.0]]).unwrap()
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, PlotError::ShapeMismatch { .. }));
    }

    #[test]
    fn names_must_match_shape() {
        let err = Matrix::new(
            Array2::zeros((2, 2)),
            vec!["a".into()],
            vec!["x".into(), "y".into()],
        )
        .unwrap_err();
        assert!(matches!(err, PlotError::ShapeMismatch { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn min_max_skips_nan() {
        let m = sample();
        assert_eq!(m.min_max(), Some((1.0, 6.0)));
        assert_eq!(m.valid_count(), 5);
        assert!(m.get(1, 1).is_nan());
        assert!(m.get(9, 9).is_nan());
    }

    #[test]
    fn select_reorders_values_and_names() {
        let m = sample().select(&[1, 0], &[2, 0]).unwrap();
        assert_eq!(m.get(0, 0), 6.0);
        assert_eq!(m.get(1, 1), 1.0);
        assert_eq!(m.row_names(), ["row 2", "row 1"]);
        assert_eq!(m.col_names(), ["col 3", "col 1"]);

        assert!(sample().select(&[2], &[0]).is_err());
    }

    #[test]
    fn transpose_swaps_names() {
        let t = sample().transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.get(2, 1), 6.0);
        assert_eq!(t.row_names()[0], "col 1");
    }
}
