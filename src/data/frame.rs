//! Matrix plus optional clustering, as consumed by grid charts.

use super::{ClusterTree, Matrix};
use crate::error::{PlotError, Result};

/// A main matrix with an optional parallel percent matrix and optional
/// row and column dendrograms.
///
/// Every attachment is validated against the main matrix when it is added,
/// so a frame that exists is consistent: tree leaf counts match the matrix
/// dimension and the percent matrix has the same shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterFrame {
    main: Matrix,
    percent: Option<Matrix>,
    row_tree: Option<ClusterTree>,
    col_tree: Option<ClusterTree>,
}

impl ClusterFrame {
    /// Frame without percent matrix or trees.
    pub fn new(main: Matrix) -> Self {
        Self {
            main,
            percent: None,
            row_tree: None,
            col_tree: None,
        }
    }

    /// Attach a percent matrix of the same shape with cells in `[0, 1]` or NaN.
    pub fn with_percent(mut self, percent: Matrix) -> Result<Self> {
        let (rows, cols) = self.main.shape();
        if percent.rows() != rows {
            return Err(PlotError::shape_mismatch("percent rows", rows, percent.rows()));
        }
        if percent.cols() != cols {
            return Err(PlotError::shape_mismatch("percent columns", cols, percent.cols()));
        }

        if let Some(((row, col), &value)) = percent
            .values()
            .indexed_iter()
            .find(|(_, v)| !v.is_nan() && !(0.0..=1.0).contains(*v))
        {
            return Err(PlotError::InvalidPercent { row, col, value });
        }

        self.percent = Some(percent);
        Ok(self)
    }

    /// Attach a row dendrogram with one leaf per row.
    pub fn with_row_tree(mut self, tree: ClusterTree) -> Result<Self> {
        if tree.len() != self.main.rows() {
            return Err(PlotError::shape_mismatch("row tree leaves", self.main.rows(), tree.len()));
        }
        self.row_tree = Some(tree);
        Ok(self)
    }

    /// Attach a column dendrogram with one leaf per column.
    pub fn with_col_tree(mut self, tree: ClusterTree) -> Result<Self> {
        if tree.len() != self.main.cols() {
            return Err(PlotError::shape_mismatch(
                "column tree leaves",
                self.main.cols(),
                tree.len(),
            ));
        }
        self.col_tree = Some(tree);
        Ok(self)
    }

    /// Main matrix in data order.
    pub fn main(&self) -> &Matrix {
        &self.main
    }

    /// Percent matrix, if any.
    pub fn percent(&self) -> Option<&Matrix> {
        self.percent.as_ref()
    }

    /// Row dendrogram, if any.
    pub fn row_tree(&self) -> Option<&ClusterTree> {
        self.row_tree.as_ref()
    }

    /// Column dendrogram, if any.
    pub fn col_tree(&self) -> Option<&ClusterTree> {
        self.col_tree.as_ref()
    }

    /// Data row index drawn at each row slot.
    pub fn row_order(&self) -> Vec<usize> {
        match &self.row_tree {
            Some(tree) => tree.leaves().to_vec(),
            None => (0..self.main.rows()).collect(),
        }
    }

    /// Data column index drawn at each column slot.
    pub fn col_order(&self) -> Vec<usize> {
        match &self.col_tree {
            Some(tree) => tree.leaves().to_vec(),
            None => (0..self.main.cols()).collect(),
        }
    }

    /// Main matrix reordered into drawn order, names permuted with it.
    pub fn ordered_main(&self) -> Result<Matrix> {
        self.main.select(&self.row_order(), &self.col_order())
    }
}
