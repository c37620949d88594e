//! Draw primitives: the renderers' output.
//!
//! Coordinates are unscaled chart pixels; hosts apply the chart's scale
//! factor when they draw.

use crate::color::Color;
use crate::geom::{Point, Rect, Size};
use crate::pointer::{Hit, HitTester};

/// Outline color and width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Line color.
    pub color: Color,
    /// Line width in pixels.
    pub width: f64,
}

impl Stroke {
    /// Create a stroke.
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }

    /// One pixel wide.
    pub fn thin(color: Color) -> Self {
        Self::new(color, 1.0)
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// Text starts at the point.
    #[default]
    Start,
    /// Text is centered on the point.
    Middle,
    /// Text ends at the point.
    End,
}

/// Vertical text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Baseline {
    /// Alphabetic baseline at the point.
    #[default]
    Auto,
    /// Vertically centered.
    Middle,
    /// Top of the text at the point.
    Hanging,
}

/// Text appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Fill color.
    pub fill: Color,
    /// Font size in pixels.
    pub font_size: f64,
    /// Horizontal alignment.
    pub anchor: Anchor,
    /// Vertical alignment.
    pub baseline: Baseline,
    /// Rotation in degrees about the anchor point.
    pub rotation: Option<f64>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            fill: Color::BLACK,
            font_size: 12.0,
            anchor: Anchor::Start,
            baseline: Baseline::Auto,
            rotation: None,
        }
    }
}

impl TextStyle {
    /// Copy with another alignment.
    pub fn aligned(self, anchor: Anchor, baseline: Baseline) -> Self {
        Self {
            anchor,
            baseline,
            ..self
        }
    }

    /// Copy rotated by `degrees`.
    pub fn rotated(self, degrees: f64) -> Self {
        Self {
            rotation: Some(degrees),
            ..self
        }
    }

    /// Copy with another fill.
    pub fn filled(self, fill: Color) -> Self {
        Self { fill, ..self }
    }
}

/// One drawable shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Axis-aligned rectangle.
    Rect {
        /// Geometry.
        rect: Rect,
        /// Fill, `None` for hollow.
        fill: Option<Color>,
        /// Outline, `None` for none.
        stroke: Option<Stroke>,
    },
    /// Circle.
    Circle {
        /// Center.
        center: Point,
        /// Radius.
        r: f64,
        /// Fill.
        fill: Color,
        /// Fill opacity in `[0, 1]`.
        opacity: f64,
    },
    /// Straight line.
    Line {
        /// Start.
        from: Point,
        /// End.
        to: Point,
        /// Stroke.
        stroke: Stroke,
        /// Dash length, `None` for solid.
        dash: Option<f64>,
        /// Stroke opacity in `[0, 1]`.
        opacity: f64,
    },
    /// Text label.
    Text {
        /// Anchor point.
        at: Point,
        /// Text content.
        content: String,
        /// Appearance.
        style: TextStyle,
    },
}

impl Primitive {
    /// Filled rectangle without outline.
    pub fn filled_rect(rect: Rect, fill: Color) -> Self {
        Primitive::Rect {
            rect,
            fill: Some(fill),
            stroke: None,
        }
    }

    /// Hollow rectangle.
    pub fn outline(rect: Rect, stroke: Stroke) -> Self {
        Primitive::Rect {
            rect,
            fill: None,
            stroke: Some(stroke),
        }
    }

    /// Opaque circle.
    pub fn circle(center: Point, r: f64, fill: Color) -> Self {
        Primitive::Circle {
            center,
            r,
            fill,
            opacity: 1.0,
        }
    }

    /// Solid opaque line.
    pub fn line(from: Point, to: Point, stroke: Stroke) -> Self {
        Primitive::Line {
            from,
            to,
            stroke,
            dash: None,
            opacity: 1.0,
        }
    }

    /// Text at a point.
    pub fn text(at: Point, content: impl Into<String>, style: TextStyle) -> Self {
        Primitive::Text {
            at,
            content: content.into(),
            style,
        }
    }
}

/// A chart ready to hand to a host surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    /// Unscaled canvas size.
    pub size: Size,
    /// Display scale factor.
    pub scale: f64,
    /// Shapes in paint order.
    pub primitives: Vec<Primitive>,
    /// Pointer inversion for tooltips.
    pub hit_tester: HitTester,
}

impl RenderedChart {
    /// Canvas size the host should allocate.
    pub fn scaled_size(&self) -> Size {
        self.size.scaled(self.scale)
    }

    /// What lies under a surface position.
    pub fn hit(&self, p: Point) -> Option<Hit> {
        self.hit_tester.hit(p)
    }

    /// Outline drawn over the hovered cell, one pixel outside its block and
    /// at least one surface pixel wide. Only grid cells are outlined.
    pub fn highlight(&self, hit: &Hit) -> Option<Primitive> {
        let (HitTester::Grid(grid), Hit::Cell { row, col, .. }) = (&self.hit_tester, hit) else {
            return None;
        };
        let cell = grid.cell_bounds(*row, *col);
        let width = if self.scale > 0.0 {
            self.scale.max(1.0) / self.scale
        } else {
            1.0
        };

        Some(Primitive::outline(
            Rect::new(cell.x - 1.0, cell.y - 1.0, cell.w + 1.0, cell.h + 1.0),
            Stroke::new(Color::BLACK, width),
        ))
    }

    /// Number of primitives matching a predicate, handy for host statistics.
    pub fn count(&self, pred: impl Fn(&Primitive) -> bool) -> usize {
        self.primitives.iter().filter(|p| pred(p)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::GridInverter;

    fn grid_chart(scale: f64) -> RenderedChart {
        let grid = GridInverter::new(10.0, 20.0, Size::new(8.0, 6.0), vec![1, 0], vec![0, 1, 2]);
        RenderedChart {
            size: Size::new(50.0, 40.0),
            scale,
            primitives: Vec::new(),
            hit_tester: HitTester::Grid(grid),
        }
    }

    #[test]
    fn highlight_outlines_the_hovered_cell() {
        let chart = grid_chart(1.0);
        let hit = chart.hit(Point::new(27.0, 30.0)).unwrap();
        assert_eq!(
            chart.highlight(&hit),
            Some(Primitive::outline(
                Rect::new(25.0, 25.0, 9.0, 7.0),
                Stroke::new(Color::BLACK, 1.0)
            ))
        );
    }

    #[test]
    fn highlight_stroke_is_at_least_one_surface_pixel() {
        for (scale, width) in [(0.5, 2.0), (3.0, 1.0)] {
            let chart = grid_chart(scale);
            let hit = Hit::Cell {
                row: 0,
                col: 0,
                data_row: 1,
                data_col: 0,
            };
            let Some(Primitive::Rect { stroke: Some(s), .. }) = chart.highlight(&hit) else {
                panic!("expected an outline");
            };
            assert_eq!(s.width, width);
        }
    }

    #[test]
    fn only_cells_are_highlighted() {
        let chart = grid_chart(1.0);
        assert_eq!(chart.highlight(&Hit::Bar { index: 0 }), None);
    }
}
