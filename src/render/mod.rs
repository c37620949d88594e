//! Chart renderers.
//!
//! Each renderer is a pure function from data and props to a
//! [`RenderedChart`](crate::primitive::RenderedChart): draw primitives in
//! paint order plus the hit tester the host registers for tooltips.

pub mod axis;
mod bar;
pub mod colorbar;
mod heatmap;
pub mod legend;
mod scatter;
mod volcano;

pub use bar::{render_bar, BarData};
pub use heatmap::{render_dot_plot, render_heatmap};
pub use scatter::{render_scatter, ScatterData};
pub use volcano::{classify, render_volcano, Regulation};

/// Font size for tick and legend labels.
pub(crate) const SMALL_FONT: f64 = 10.0;
