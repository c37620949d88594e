//! Maps normalized dendrogram coordinates into a panel rectangle.
//!
//! Along the leaf axis a position fraction spans the data edge the panel is
//! attached to, so leaf slots line up with the drawn rows or columns. Along
//! the height axis the root sits farthest from the data: trees on the top or
//! left are inverted, trees on the right or bottom are not.

use crate::data::ClusterTree;
use crate::geom::{Point, Rect};
use crate::layout::{PlacedPanel, Side};

/// A straight line between two pixel positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start.
    pub from: Point,
    /// End.
    pub to: Point,
}

/// Converts `(position, height)` fractions into panel pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DendrogramMapper {
    rect: Rect,
    side: Side,
}

impl DendrogramMapper {
    /// Mapper for a panel rectangle attached to `side`.
    pub fn new(rect: Rect, side: Side) -> Self {
        Self { rect, side }
    }

    /// Mapper for a placed layout panel.
    pub fn for_panel(panel: &PlacedPanel) -> Self {
        Self::new(panel.rect, panel.side)
    }

    /// Pixel position of one normalized coordinate.
    pub fn map(&self, position: f64, height: f64) -> Point {
        let r = &self.rect;
        match self.side {
            Side::Left => Point::new(r.x + r.w - height * r.w, r.y + position * r.h),
            Side::Right => Point::new(r.x + height * r.w, r.y + position * r.h),
            Side::Top => Point::new(r.x + position * r.w, r.y + r.h - height * r.h),
            Side::Bottom => Point::new(r.x + position * r.w, r.y + height * r.h),
        }
    }

    /// One segment per consecutive pair of points in every branch.
    pub fn segments(&self, tree: &ClusterTree) -> Vec<Segment> {
        tree.coords()
            .iter()
            .flat_map(|branch| {
                branch.windows(2).map(|w| Segment {
                    from: self.map(w[0].0, w[0].1),
                    to: self.map(w[1].0, w[1].1),
                })
            })
            .collect()
    }
}
