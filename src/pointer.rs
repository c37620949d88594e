//! Pointer inversion for hover hit testing.
//!
//! Every chart registers a [`HitTester`] that turns a pointer position on the
//! host surface back into what is under it. Inversion is plain arithmetic so
//! it can run on every pointer move; a pointer outside the data resolves to
//! `None` rather than an error.

use crate::axis::Axis;
use crate::geom::{Point, Rect, Size};
use std::collections::HashMap;

/// Where a chart sits on the host surface and how much it is magnified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Surface position of the chart's top-left corner.
    pub origin: Point,
    /// Chart pixels to surface pixels.
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            origin: Point::default(),
            scale: 1.0,
        }
    }
}

impl Viewport {
    /// Create a viewport.
    pub fn new(origin: Point, scale: f64) -> Self {
        Self { origin, scale }
    }

    /// Surface position to chart pixels.
    pub fn to_chart(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.origin.x) / self.scale,
            (p.y - self.origin.y) / self.scale,
        )
    }

    /// Chart pixels to surface position.
    pub fn to_surface(&self, p: Point) -> Point {
        Point::new(
            self.origin.x + p.x * self.scale,
            self.origin.y + p.y * self.scale,
        )
    }
}

/// What the pointer resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    /// A matrix cell.
    Cell {
        /// Drawn row slot.
        row: usize,
        /// Drawn column slot.
        col: usize,
        /// Row index in the data, after leaf reordering.
        data_row: usize,
        /// Column index in the data, after leaf reordering.
        data_col: usize,
    },
    /// A position in data space.
    Point {
        /// Domain x.
        x: f64,
        /// Domain y.
        y: f64,
        /// Marker under the pointer, if any.
        index: Option<usize>,
    },
    /// A bar by category index.
    Bar {
        /// Category index.
        index: usize,
    },
}

/// Inverts a uniform grid of blocks (heatmaps and dot plots).
#[derive(Debug, Clone, PartialEq)]
pub struct GridInverter {
    margin_left: f64,
    margin_top: f64,
    block: Size,
    row_order: Vec<usize>,
    col_order: Vec<usize>,
    view: Viewport,
}

impl GridInverter {
    /// Grid whose first block starts at `(margin_left, margin_top)`.
    ///
    /// `row_order[slot]` and `col_order[slot]` give the data index drawn in
    /// each slot.
    pub fn new(
        margin_left: f64,
        margin_top: f64,
        block: Size,
        row_order: Vec<usize>,
        col_order: Vec<usize>,
    ) -> Self {
        Self {
            margin_left,
            margin_top,
            block,
            row_order,
            col_order,
            view: Viewport::default(),
        }
    }

    /// Number of drawn rows.
    pub fn rows(&self) -> usize {
        self.row_order.len()
    }

    /// Number of drawn columns.
    pub fn cols(&self) -> usize {
        self.col_order.len()
    }

    /// Surface position of a cell's center, the forward transform.
    pub fn cell_center(&self, row: usize, col: usize) -> Point {
        self.view.to_surface(Point::new(
            self.margin_left + (col as f64 + 0.5) * self.block.w,
            self.margin_top + (row as f64 + 0.5) * self.block.h,
        ))
    }

    /// Chart-pixel bounds of a cell, before any viewport.
    pub fn cell_bounds(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            self.margin_left + col as f64 * self.block.w,
            self.margin_top + row as f64 * self.block.h,
            self.block.w,
            self.block.h,
        )
    }

    /// Surface rectangle a cell covers, so a host can outline the hovered one.
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        let b = self.cell_bounds(row, col);
        let corner = self.view.to_surface(Point::new(b.x, b.y));
        Rect::new(corner.x, corner.y, b.w * self.view.scale, b.h * self.view.scale)
    }

    /// Cell under a surface position.
    pub fn invert(&self, p: Point) -> Option<Hit> {
        let scale = self.view.scale;
        let col = (p.x - self.margin_left * scale - self.view.origin.x) / (self.block.w * scale);
        let row = (p.y - self.margin_top * scale - self.view.origin.y) / (self.block.h * scale);

        let col = slot(col.floor(), self.cols())?;
        let row = slot(row.floor(), self.rows())?;

        Some(Hit::Cell {
            row,
            col,
            data_row: self.row_order[row],
            data_col: self.col_order[col],
        })
    }
}

fn slot(v: f64, len: usize) -> Option<usize> {
    if v.is_finite() && v >= 0.0 && v < len as f64 {
        Some(v as usize)
    } else {
        None
    }
}

/// Markers binned on a square grid so the one under the pointer is found
/// without scanning every point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointIndex {
    cell: f64,
    markers: Vec<(Point, f64)>,
    bins: HashMap<(i64, i64), Vec<usize>>,
}

impl PointIndex {
    /// Index markers given as chart-pixel centers and radii.
    ///
    /// Non-finite centers are left out.
    pub fn new(markers: Vec<(Point, f64)>) -> Self {
        let max_r = markers.iter().map(|m| m.1).fold(0.0, f64::max);
        // a marker covering p always lies in p's bin or a neighbour
        let cell = (2.0 * max_r + 2.0).max(8.0);

        let mut bins: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for (i, (c, _)) in markers.iter().enumerate() {
            if c.x.is_finite() && c.y.is_finite() {
                bins.entry(Self::bin(cell, *c)).or_default().push(i);
            }
        }

        Self {
            cell,
            markers,
            bins,
        }
    }

    fn bin(cell: f64, p: Point) -> (i64, i64) {
        ((p.x / cell).floor() as i64, (p.y / cell).floor() as i64)
    }

    /// Closest marker whose circle, plus one pixel, contains `p`.
    pub fn nearest(&self, p: Point) -> Option<usize> {
        if !p.x.is_finite() || !p.y.is_finite() {
            return None;
        }

        let (bx, by) = Self::bin(self.cell, p);
        let mut best: Option<(usize, f64)> = None;

        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(ids) = self.bins.get(&(bx + dx, by + dy)) else {
                    continue;
                };
                for &i in ids {
                    let (c, r) = self.markers[i];
                    let d = ((c.x - p.x).powi(2) + (c.y - p.y).powi(2)).sqrt();
                    if d <= r + 1.0 && best.map_or(true, |(_, bd)| d < bd) {
                        best = Some((i, d));
                    }
                }
            }
        }

        best.map(|(i, _)| i)
    }
}

/// Inverts a pair of continuous axes drawn inside a plot rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotInverter {
    inner: Rect,
    x: Axis,
    y: Axis,
    points: Option<PointIndex>,
    view: Viewport,
}

impl PlotInverter {
    /// Axes whose ranges are offsets from the inner rectangle's corner.
    pub fn new(inner: Rect, x: Axis, y: Axis) -> Self {
        Self {
            inner,
            x,
            y,
            points: None,
            view: Viewport::default(),
        }
    }

    /// Also report which marker is under the pointer.
    pub fn with_points(self, points: PointIndex) -> Self {
        Self {
            points: Some(points),
            ..self
        }
    }

    /// Domain position under a surface position, `None` outside the axes' ranges.
    pub fn invert(&self, p: Point) -> Option<Hit> {
        let c = self.view.to_chart(p);
        let px = c.x - self.inner.x;
        let py = c.y - self.inner.y;

        if !within(px, self.x.range()) || !within(py, self.y.range()) {
            return None;
        }

        Some(Hit::Point {
            x: self.x.range_to_domain(px),
            y: self.y.range_to_domain(py),
            index: self.points.as_ref().and_then(|idx| idx.nearest(c)),
        })
    }
}

fn within(v: f64, (a, b): (f64, f64)) -> bool {
    v.is_finite() && v >= a.min(b) && v <= a.max(b)
}

/// Inverts horizontal bars laid along a band axis, category `i` spanning
/// domain `[i, i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BandInverter {
    inner: Rect,
    band: Axis,
    count: usize,
    view: Viewport,
}

impl BandInverter {
    /// Band axis over the inner rectangle with `count` categories.
    pub fn new(inner: Rect, band: Axis, count: usize) -> Self {
        Self {
            inner,
            band,
            count,
            view: Viewport::default(),
        }
    }

    /// Category under a surface position.
    pub fn invert(&self, p: Point) -> Option<Hit> {
        let c = self.view.to_chart(p);
        if !self.inner.contains(c) {
            return None;
        }

        let d = self.band.range_to_domain(c.y - self.inner.y);
        let index = slot(d.floor(), self.count)?;

        Some(Hit::Bar { index })
    }
}

/// The inversion a rendered chart registers with its host.
#[derive(Debug, Clone, PartialEq)]
pub enum HitTester {
    /// Uniform grid.
    Grid(GridInverter),
    /// Continuous x and y axes.
    Plot(PlotInverter),
    /// Category bands.
    Band(BandInverter),
}

impl HitTester {
    /// Resolve a surface position.
    pub fn hit(&self, p: Point) -> Option<Hit> {
        match self {
            HitTester::Grid(g) => g.invert(p),
            HitTester::Plot(pl) => pl.invert(p),
            HitTester::Band(b) => b.invert(p),
        }
    }

    /// Same inversion for a chart placed at another origin or scale.
    pub fn with_viewport(mut self, view: Viewport) -> Self {
        match &mut self {
            HitTester::Grid(g) => g.view = view,
            HitTester::Plot(pl) => pl.view = view,
            HitTester::Band(b) => b.view = view,
        }
        self
    }

    /// The viewport in use.
    pub fn viewport(&self) -> Viewport {
        match self {
            HitTester::Grid(g) => g.view,
            HitTester::Plot(pl) => pl.view,
            HitTester::Band(b) => b.view,
        }
    }
}
