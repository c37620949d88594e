//! Preview state: the chart, its raster and the hover tooltip.

use super::raster::Raster;
use super::source::ChartSource;
use super::theme::Theme;
use crate::color::Palette;
use crate::error::Result;
use crate::geom::Point;
use crate::pointer::HitTester;
use crate::primitive::{Primitive, RenderedChart};
use ratatui::layout::Rect;
use tracing::debug;

/// A raster of the chart for one terminal area, with the hit tester moved
/// into that area's coordinates.
#[derive(Debug)]
struct Placed {
    area: Rect,
    // chart alone; `raster` adds the highlight on top
    base: Raster,
    raster: Raster,
    hit_tester: HitTester,
}

/// Interactive preview state.
#[derive(Debug)]
pub struct Viewer {
    source: ChartSource,
    chart: RenderedChart,
    palette: Palette,
    /// Current theme.
    pub theme: Theme,
    /// Status message.
    pub status: String,
    tooltip: Option<String>,
    highlight: Option<Primitive>,
    placed: Option<Placed>,
}

impl Viewer {
    /// Render `source` and wrap it for display.
    pub fn new(source: ChartSource, palette: Palette) -> Result<Self> {
        let chart = source.render()?;
        let status = format!(
            "{}: {} primitives, {}x{} px",
            source.title(),
            chart.primitives.len(),
            chart.size.w,
            chart.size.h
        );

        Ok(Self {
            source,
            chart,
            palette,
            theme: Theme::default(),
            status,
            tooltip: None,
            highlight: None,
            placed: None,
        })
    }

    /// Chart kind shown in the frame title.
    pub fn title(&self) -> String {
        format!("{} [{}]", self.source.title(), self.palette.name())
    }

    /// The rendered chart.
    pub fn chart(&self) -> &RenderedChart {
        &self.chart
    }

    /// Tooltip for the last hover, if the pointer is over something.
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Outline of the hovered cell, if any.
    pub fn highlight(&self) -> Option<&Primitive> {
        self.highlight.as_ref()
    }

    /// Switch to the next palette and render again.
    pub fn cycle_palette(&mut self) -> Result<()> {
        self.palette = self.palette.next();
        self.source.set_palette(self.palette);
        self.chart = self.source.render()?;
        self.placed = None;
        self.highlight = None;
        self.status = format!("Palette: {}", self.palette.name());
        Ok(())
    }

    /// Cycle through themes.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status = format!("Theme: {}", self.theme.name());
    }

    /// Raster of the chart for `area`, rebuilt when the area changes.
    pub fn raster(&mut self, area: Rect) -> &Raster {
        let placed = match self.placed.take() {
            Some(p) if p.area == area => p,
            _ => self.place(area),
        };
        &self.placed.insert(placed).raster
    }

    fn place(&self, area: Rect) -> Placed {
        let mut base = Raster::new(area.width, area.height, self.chart.size);
        base.paint(&self.chart.primitives);
        let hit_tester = self
            .chart
            .hit_tester
            .clone()
            .with_viewport(base.viewport(area.x, area.y));
        let raster = highlighted(&base, self.highlight.as_ref());
        debug!(
            "Rasterised chart into {}x{} cells at scale {:.3}",
            area.width,
            area.height,
            base.scale()
        );

        Placed {
            area,
            base,
            raster,
            hit_tester,
        }
    }

    /// Resolve the pointer at a terminal cell, updating the tooltip and
    /// outlining the cell under it.
    pub fn hover(&mut self, col: u16, row: u16) {
        let Some(placed) = self.placed.as_mut() else {
            self.tooltip = None;
            self.highlight = None;
            return;
        };

        let area = placed.area;
        let inside = col >= area.x
            && col < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        // center of the cell, two raster pixels per row
        let at = Point::new(f64::from(col) + 0.5, f64::from(row) * 2.0 + 1.0);
        let hit = if inside { placed.hit_tester.hit(at) } else { None };

        self.tooltip = hit.map(|h| self.source.describe(&h));
        let highlight = hit.and_then(|h| self.chart.highlight(&h));
        if highlight != self.highlight {
            placed.raster = highlighted(&placed.base, highlight.as_ref());
            self.highlight = highlight;
        }
    }
}

fn highlighted(base: &Raster, outline: Option<&Primitive>) -> Raster {
    let mut raster = base.clone();
    if let Some(outline) = outline {
        raster.paint(std::slice::from_ref(outline));
    }
    raster
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::data::{ClusterFrame, Matrix};
    use crate::props::HeatmapProps;

    fn viewer() -> Viewer {
        let main = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let source = ChartSource::Heatmap {
            frame: ClusterFrame::new(main),
            groups: Vec::new(),
            props: HeatmapProps::default(),
        };
        Viewer::new(source, Palette::default()).unwrap()
    }

    #[test]
    fn hover_resolves_cells_through_the_raster() {
        let mut v = viewer();
        let size = v.chart().size;
        // one raster pixel per chart pixel
        let area = Rect::new(2, 1, size.w as u16, (size.h / 2.0).ceil() as u16);
        v.raster(area);

        let tester = &v.chart().hit_tester;
        let grid = match tester {
            HitTester::Grid(g) => tester.viewport().to_chart(g.cell_center(1, 0)),
            _ => unreachable!(),
        };
        let col = 2 + grid.x as u16;
        let row = 1 + (grid.y / 2.0) as u16;
        v.hover(col, row);
        assert_eq!(v.tooltip(), Some("row 2 | col 1: 3.0000"));

        v.hover(0, 0);
        assert_eq!(v.tooltip(), None);
    }

    #[test]
    fn hover_outlines_the_cell_under_the_pointer() {
        let mut v = viewer();
        let size = v.chart().size;
        let area = Rect::new(0, 0, size.w as u16, (size.h / 2.0).ceil() as u16);
        let plain = v.raster(area).clone();

        let HitTester::Grid(grid) = &v.chart().hit_tester else {
            unreachable!()
        };
        let cell = grid.cell_bounds(0, 1);
        let center = grid.cell_center(0, 1);
        v.hover(center.x as u16, (center.y / 2.0) as u16);

        let Some(Primitive::Rect { rect, .. }) = v.highlight().cloned() else {
            panic!("expected an outline");
        };
        assert!(rect.contains(center));
        assert_eq!(rect.x, cell.x - 1.0);

        let outlined = v.raster(area);
        assert_ne!(outlined, &plain);
        // top-left corner of the outline is drawn in black
        let corner = (rect.x.floor() as i64, rect.y.floor() as i64);
        assert_eq!(outlined.pixel(corner.0, corner.1), Some(Color::BLACK));

        v.hover(area.width + 5, 0);
        assert!(v.highlight().is_none());
        assert_eq!(v.raster(area), &plain);
    }

    #[test]
    fn palette_cycling_renders_again() {
        let mut v = viewer();
        v.raster(Rect::new(0, 0, 40, 20));
        v.cycle_palette().unwrap();
        assert!(v.title().contains("Blues"));
        assert!(v.placed.is_none());
    }
}
