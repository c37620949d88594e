//! Plotgeom - coordinate, layout and color engine for bioinformatics charts.
//!
//! Plotgeom turns matrices, dendrograms and point tables into flat lists of
//! draw primitives, and inverts pointer positions back into data for
//! tooltips. Hosts only have to paint rectangles, circles, lines and text.
//!
//! # Features
//!
//! - Axes with nice tick intervals and outward snapping
//! - Interpolating color maps and named palettes
//! - Panel layout around a data area (labels, trees, color bars, legends)
//! - Clustered heatmaps and dot plots with dendrograms and column groups
//! - Scatter, volcano and horizontal bar charts
//! - SVG export and a terminal preview
//!
//! # Example
//!
//! ```ignore
//! use plotgeom::data::{ClusterFrame, Matrix};
//! use plotgeom::props::HeatmapProps;
//! use plotgeom::render::render_heatmap;
//!
//! let main = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?;
//! let chart = render_heatmap(&ClusterFrame::new(main), &[], &HeatmapProps::default())?;
//! println!("{}", plotgeom::export::to_svg(&chart));
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod axis;
pub mod color;
pub mod data;
pub mod dendrogram;
pub mod error;
pub mod export;
pub mod format;
pub mod geom;
pub mod layout;
pub mod pointer;
pub mod primitive;
pub mod props;
pub mod render;
pub mod ui;

pub use error::{PlotError, Result};
