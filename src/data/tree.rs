//! Dendrogram in normalized coordinates.

use crate::error::{PlotError, Result};

/// One drawn branch: a polyline of `(position, height)` points, both in `[0, 1]`.
///
/// A rectangular link between two subtrees is four points: up from the first
/// child, across at the merge height, and down to the second child.
pub type Branch = Vec<(f64, f64)>;

/// Output of hierarchical clustering over one matrix dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterTree {
    leaves: Vec<usize>,
    coords: Vec<Branch>,
}

impl ClusterTree {
    /// Build a tree, checking that `leaves` is a permutation of `0..leaves.len()`
    /// and every coordinate is a finite fraction.
    pub fn new(leaves: Vec<usize>, coords: Vec<Branch>) -> Result<Self> {
        let n = leaves.len();
        let mut seen = vec![false; n];

        for &leaf in &leaves {
            if leaf >= n {
                return Err(PlotError::index_out_of_range("tree leaves", leaf, n));
            }
            if seen[leaf] {
                return Err(PlotError::InvalidTree(format!("leaf {} listed twice", leaf)));
            }
            seen[leaf] = true;
        }

        for (i, branch) in coords.iter().enumerate() {
            if branch.len() < 2 {
                return Err(PlotError::InvalidTree(format!(
                    "branch {} has {} point(s), need at least 2",
                    i,
                    branch.len()
                )));
            }
            let valid = branch
                .iter()
                .all(|&(p, h)| (0.0..=1.0).contains(&p) && (0.0..=1.0).contains(&h));
            if !valid {
                return Err(PlotError::InvalidTree(format!(
                    "branch {} has coordinates outside [0, 1]",
                    i
                )));
            }
        }

        Ok(Self { leaves, coords })
    }

    /// Drawn order: `leaves[slot]` is the data index shown at `slot`.
    pub fn leaves(&self) -> &[usize] {
        &self.leaves
    }

    /// Branch polylines.
    pub fn coords(&self) -> &[Branch] {
        &self.coords
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Whether the tree has no leaves.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Drawn slot of data index `index`.
    pub fn leaf_slot(&self, index: usize) -> Option<usize> {
        self.leaves.iter().position(|&l| l == index)
    }

    /// Normalized position of a slot's center, `(slot + 0.5) / n`.
    pub fn slot_position(&self, slot: usize) -> f64 {
        (slot as f64 + 0.5) / self.leaves.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_must_be_a_permutation() {
        assert!(ClusterTree::new(vec![2, 0, 1], vec![]).is_ok());
        assert!(matches!(
            ClusterTree::new(vec![0, 0, 1], vec![]),
            Err(PlotError::InvalidTree(_))
        ));
        assert!(matches!(
            ClusterTree::new(vec![0, 3, 1], vec![]),
            Err(PlotError::IndexOutOfRange { index: 3, .. })
        ));
    }

    #[test]
    fn coords_are_fractions() {
        let bad = ClusterTree::new(vec![0, 1], vec![vec![(0.25, 0.0), (0.25, 1.2)]]);
        assert!(matches!(bad, Err(PlotError::InvalidTree(_))));

        let short = ClusterTree::new(vec![0, 1], vec![vec![(0.25, 0.0)]]);
        assert!(short.is_err());
    }

    #[test]
    fn slots_follow_leaf_order() {
        let tree = ClusterTree::new(vec![2, 0, 1, 3], vec![]).unwrap();
        assert_eq!(tree.leaf_slot(2), Some(0));
        assert_eq!(tree.leaf_slot(3), Some(3));
        assert_eq!(tree.leaf_slot(7), None);
        assert_eq!(tree.slot_position(0), 0.125);
        assert_eq!(tree.slot_position(3), 0.875);
    }
}
