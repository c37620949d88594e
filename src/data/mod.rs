//! Chart inputs.
//!
//! Matrices, dendrograms and column groups consumed by the renderers, plus
//! the tab-separated reader and clustering the command-line host uses to
//! produce them.

mod cluster;
mod frame;
mod group;
mod matrix;
pub mod reader;
mod tree;

pub use cluster::{Distance, HCluster, Linkage};
pub use frame::ClusterFrame;
pub use group::{column_colors, Group};
pub use matrix::Matrix;
pub use reader::{read_table, Table};
pub use tree::{Branch, ClusterTree};
