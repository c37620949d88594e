//! Writing rendered charts to files.

pub mod svg;

pub use svg::to_svg;

use crate::error::{PlotError, Result};
use crate::primitive::RenderedChart;
use std::path::Path;
use tracing::info;

/// Write `chart` as an SVG document to `path`.
pub fn write_svg(chart: &RenderedChart, path: &Path) -> Result<()> {
    std::fs::write(path, to_svg(chart)).map_err(|e| PlotError::file_open(path.to_path_buf(), e))?;
    info!(
        "Wrote {} primitives to {}",
        chart.primitives.len(),
        path.display()
    );
    Ok(())
}
