//! Agglomerative hierarchical clustering of matrix rows.
//!
//! Produces the [`ClusterTree`] the grid charts draw dendrograms from.
//! Cluster columns by running on [`Matrix::transpose`].

use super::{ClusterTree, Matrix};
use crate::error::Result;
use ndarray::ArrayView1;
use tracing::debug;

/// How the distance between two clusters is derived from point distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Linkage {
    /// Closest pair.
    Single,
    /// Farthest pair.
    Complete,
    /// Mean over all pairs.
    #[default]
    Average,
}

/// Distance between two rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Distance {
    /// `1 - r`, Pearson correlation.
    #[default]
    Pearson,
    /// Straight-line distance.
    Euclidean,
    /// Sum of absolute differences.
    Manhattan,
}

impl Distance {
    /// Distance over the columns where both rows are finite.
    pub fn between(self, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
        let pairs: Vec<(f64, f64)> = a
            .iter()
            .zip(b.iter())
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(&x, &y)| (x, y))
            .collect();

        match self {
            Distance::Pearson => {
                let r = pearson(&pairs);
                // constant rows have no defined correlation
                if r.is_finite() {
                    1.0 - r
                } else {
                    1.0
                }
            }
            Distance::Euclidean => pairs.iter().map(|(x, y)| (x - y) * (x - y)).sum::<f64>().sqrt(),
            Distance::Manhattan => pairs.iter().map(|(x, y)| (x - y).abs()).sum(),
        }
    }
}

fn pearson(pairs: &[(f64, f64)]) -> f64 {
    let n = pairs.len() as f64;
    let ma = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mb = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut va = 0.0;
    let mut vb = 0.0;
    for &(x, y) in pairs {
        cov += (x - ma) * (y - mb);
        va += (x - ma) * (x - ma);
        vb += (y - mb) * (y - mb);
    }

    cov / (va.sqrt() * vb.sqrt())
}

impl Linkage {
    /// Lance-Williams update: distance from cluster `k` to the union of `a`
    /// and `b`, given `d(a, k)`, `d(b, k)` and the sizes of `a` and `b`.
    fn merged(self, dak: f64, dbk: f64, na: f64, nb: f64) -> f64 {
        match self {
            Linkage::Single => dak.min(dbk),
            Linkage::Complete => dak.max(dbk),
            Linkage::Average => (na * dak + nb * dbk) / (na + nb),
        }
    }
}

#[derive(Debug)]
struct Node {
    height: f64,
    children: Option<(usize, usize)>,
}

/// Hierarchical clustering configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HCluster {
    /// Cluster distance rule.
    pub linkage: Linkage,
    /// Point distance.
    pub distance: Distance,
}

impl HCluster {
    /// Create a clusterer.
    pub fn new(linkage: Linkage, distance: Distance) -> Self {
        Self { linkage, distance }
    }

    /// Cluster the rows of `matrix`.
    ///
    /// Cluster distances are updated in place after each merge and every
    /// live slot caches its nearest later slot, so a merge only rescans the
    /// rows whose neighbour it touched. The closest pair merges first; ties
    /// go to the lowest slots.
    pub fn run(&self, matrix: &Matrix) -> Result<ClusterTree> {
        let n = matrix.rows();

        let mut dist = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = self.distance.between(matrix.row(i), matrix.row(j));
                dist[i][j] = d;
                dist[j][i] = d;
            }
        }

        let mut nodes: Vec<Node> = (0..n)
            .map(|_| Node {
                height: 0.0,
                children: None,
            })
            .collect();

        // slot i holds node `slot_node[i]`; a merge reuses the lower slot
        let mut slot_node: Vec<usize> = (0..n).collect();
        let mut sizes = vec![1.0; n];
        let mut live = vec![true; n];
        let mut nearest: Vec<Option<(usize, f64)>> =
            (0..n).map(|i| nearest_after(i, &dist, &live)).collect();

        for _ in 1..n {
            let Some((a, b, height)) = closest_pair(&nearest, &live) else {
                break;
            };

            nodes.push(Node {
                height: if height.is_finite() { height } else { 0.0 },
                children: Some((slot_node[a], slot_node[b])),
            });
            slot_node[a] = nodes.len() - 1;
            live[b] = false;
            nearest[b] = None;

            for k in (0..n).filter(|&k| live[k] && k != a) {
                let d = self.linkage.merged(dist[a][k], dist[b][k], sizes[a], sizes[b]);
                dist[a][k] = d;
                dist[k][a] = d;
            }
            sizes[a] += sizes[b];

            for i in (0..n).filter(|&i| live[i]) {
                match nearest[i] {
                    Some((j, _)) if i == a || j == a || j == b => {
                        nearest[i] = nearest_after(i, &dist, &live);
                    }
                    None if i == a => nearest[i] = nearest_after(i, &dist, &live),
                    current if i < a => {
                        let d = dist[i][a];
                        let closer = match current {
                            Some((j, dj)) => d < dj || (d == dj && a < j),
                            None => d < f64::INFINITY,
                        };
                        if closer {
                            nearest[i] = Some((a, d));
                        }
                    }
                    _ => {}
                }
            }
        }

        let Some(root) = nodes.len().checked_sub(1) else {
            return ClusterTree::new(Vec::new(), Vec::new());
        };

        let leaves = leaf_order(&nodes, root);
        let coords = branch_coords(&nodes, root, &leaves);

        debug!("Clustered {} rows into {} branches", n, coords.len());

        ClusterTree::new(leaves, coords)
    }
}

/// Closest live slot after `i`, ties to the lowest slot. Non-finite
/// distances never qualify.
fn nearest_after(i: usize, dist: &[Vec<f64>], live: &[bool]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for j in (i + 1)..dist.len() {
        let d = dist[i][j];
        if live[j] && d < best.map_or(f64::INFINITY, |b| b.1) {
            best = Some((j, d));
        }
    }
    best
}

/// Pair to merge next. Slots with no finite distance left are joined at the
/// end, lowest first.
fn closest_pair(
    nearest: &[Option<(usize, f64)>],
    live: &[bool],
) -> Option<(usize, usize, f64)> {
    let mut best: Option<(usize, usize, f64)> = None;
    for (i, n) in nearest.iter().enumerate() {
        if let (true, Some((j, d))) = (live[i], *n) {
            if best.map_or(true, |b| d < b.2) {
                best = Some((i, j, d));
            }
        }
    }

    best.or_else(|| {
        let mut slots = (0..live.len()).filter(|&i| live[i]);
        Some((slots.next()?, slots.next()?, f64::INFINITY))
    })
}

/// Leaves left to right, depth first.
fn leaf_order(nodes: &[Node], root: usize) -> Vec<usize> {
    let mut leaves = Vec::new();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        match nodes[id].children {
            Some((l, r)) => {
                stack.push(r);
                stack.push(l);
            }
            None => leaves.push(id),
        }
    }

    leaves
}

fn branch_coords(nodes: &[Node], root: usize, leaves: &[usize]) -> Vec<Vec<(f64, f64)>> {
    let n = leaves.len() as f64;
    let max_h = if nodes[root].height > 0.0 {
        nodes[root].height
    } else {
        1.0
    };

    // node position along the leaf axis, children before parents
    let mut pos = vec![0.0; nodes.len()];
    for (slot, &leaf) in leaves.iter().enumerate() {
        pos[leaf] = (slot as f64 + 0.5) / n;
    }
    for id in 0..nodes.len() {
        if let Some((l, r)) = nodes[id].children {
            pos[id] = (pos[l] + pos[r]) / 2.0;
        }
    }

    let h = |id: usize| (nodes[id].height / max_h).clamp(0.0, 1.0);

    let mut coords = Vec::new();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        if let Some((l, r)) = nodes[id].children {
            coords.push(vec![
                (pos[l], h(l)),
                (pos[l], h(id)),
                (pos[r], h(id)),
                (pos[r], h(r)),
            ]);
            stack.push(r);
            stack.push(l);
        }
    }

    coords
}
