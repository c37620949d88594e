//! Rasterises chart primitives into terminal cells.
//!
//! Every terminal cell holds two vertical pixels drawn with an upper half
//! block: the top pixel is the foreground, the bottom one the background.
//! The chart is scaled uniformly to fit the area.

use crate::color::Color;
use crate::geom::{Point, Size};
use crate::pointer::Viewport;
use crate::primitive::{Anchor, Primitive};
use unicode_width::UnicodeWidthStr;

/// A text label snapped to a terminal cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellText {
    /// Column offset within the area.
    pub col: u16,
    /// Row offset within the area.
    pub row: u16,
    /// Text.
    pub content: String,
    /// Foreground color.
    pub color: Color,
}

/// Pixel buffer at two pixels per terminal row.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    cols: u16,
    rows: u16,
    scale: f64,
    background: Color,
    pixels: Vec<Color>,
    texts: Vec<CellText>,
}

impl Raster {
    /// Empty raster of `cols x rows` cells sized to fit `chart`.
    pub fn new(cols: u16, rows: u16, chart: Size) -> Self {
        let w = f64::from(cols);
        let h = f64::from(rows) * 2.0;
        let scale = if chart.w > 0.0 && chart.h > 0.0 {
            (w / chart.w).min(h / chart.h)
        } else {
            0.0
        };

        Self {
            cols,
            rows,
            scale,
            background: Color::WHITE,
            pixels: vec![Color::WHITE; usize::from(cols) * usize::from(rows) * 2],
            texts: Vec::new(),
        }
    }

    /// Raster pixels per chart pixel.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Size in cells.
    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    fn width(&self) -> i64 {
        i64::from(self.cols)
    }

    fn height(&self) -> i64 {
        i64::from(self.rows) * 2
    }

    /// Color of a raster pixel, `None` outside.
    pub fn pixel(&self, x: i64, y: i64) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.pixels[(y * self.width() + x) as usize])
    }

    /// Upper and lower pixel of a cell.
    pub fn cell(&self, col: u16, row: u16) -> (Color, Color) {
        let x = i64::from(col);
        let y = i64::from(row) * 2;
        (
            self.pixel(x, y).unwrap_or(self.background),
            self.pixel(x, y + 1).unwrap_or(self.background),
        )
    }

    /// Labels placed so far.
    pub fn texts(&self) -> &[CellText] {
        &self.texts
    }

    /// Maps terminal cells back onto the chart for a raster drawn at
    /// `(left, top)`.
    ///
    /// Surface units are raster pixels, so a cell `(c, r)` is the point
    /// `(c + 0.5, 2r + 1)`.
    pub fn viewport(&self, left: u16, top: u16) -> Viewport {
        Viewport::new(Point::new(f64::from(left), f64::from(top) * 2.0), self.scale)
    }

    fn blend(&mut self, x: i64, y: i64, color: Color, opacity: f64) {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return;
        }
        let i = (y * self.width() + x) as usize;
        let alpha = (opacity * color.opacity()).clamp(0.0, 1.0);
        let under = self.pixels[i];
        self.pixels[i] = under.lerp(Color::rgb(color.r, color.g, color.b), alpha);
    }

    fn fill_span(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Color) {
        let s = self.scale;
        // at least one pixel, however thin
        let span = |a: f64, b: f64| {
            let lo = (a * s).floor() as i64;
            (lo, ((b * s).ceil() as i64).max(lo + 1))
        };
        let (xa, xb) = span(x0, x1);
        let (ya, yb) = span(y0, y1);

        for y in ya.max(0)..yb.min(self.height()) {
            for x in xa.max(0)..xb.min(self.width()) {
                self.blend(x, y, color, 1.0);
            }
        }
    }

    fn line(&mut self, from: Point, to: Point, color: Color, dash: Option<f64>, opacity: f64) {
        let s = self.scale;
        let (x0, y0) = (from.x * s, from.y * s);
        let (x1, y1) = (to.x * s, to.y * s);
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0);
        if !steps.is_finite() {
            return;
        }
        let length = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
        let dash = dash.map(|d| (d * s).max(1.0));

        for i in 0..=steps as i64 {
            let t = i as f64 / steps;
            if let Some(d) = dash {
                // alternate on and off runs of length `d`
                if ((t * length / d) as i64) % 2 == 1 {
                    continue;
                }
            }
            let x = (x0 + t * (x1 - x0)).floor() as i64;
            let y = (y0 + t * (y1 - y0)).floor() as i64;
            self.blend(x, y, color, opacity);
        }
    }

    fn circle(&mut self, center: Point, r: f64, color: Color, opacity: f64) {
        let s = self.scale;
        let (cx, cy, r) = (center.x * s, center.y * s, r * s);
        if r.is_nan() || r <= 0.0 || !cx.is_finite() || !cy.is_finite() {
            return;
        }
        // keep tiny markers visible
        let r = r.max(0.5);

        for y in (cy - r).floor() as i64..=(cy + r).ceil() as i64 {
            for x in (cx - r).floor() as i64..=(cx + r).ceil() as i64 {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.blend(x, y, color, opacity);
                }
            }
        }
    }

    fn text(&mut self, at: Point, content: &str, color: Color, anchor: Anchor) {
        let width = content.width() as i64;
        let col = (at.x * self.scale).floor() as i64;
        let col = match anchor {
            Anchor::Start => col,
            Anchor::Middle => col - width / 2,
            Anchor::End => col - width,
        };
        let row = ((at.y * self.scale) / 2.0).floor() as i64;

        if row < 0 || row >= i64::from(self.rows) || col >= self.width() || col + width <= 0 {
            return;
        }

        self.texts.push(CellText {
            col: col.max(0) as u16,
            row: row as u16,
            content: content.to_string(),
            color,
        });
    }

    /// Draw primitives in order.
    ///
    /// Rotated text does not fit a cell grid and is left out.
    pub fn paint(&mut self, primitives: &[Primitive]) {
        for p in primitives {
            match p {
                Primitive::Rect { rect, fill, stroke } => {
                    if let Some(fill) = fill {
                        self.fill_span(rect.x, rect.y, rect.right(), rect.bottom(), *fill);
                    }
                    if let Some(stroke) = stroke {
                        let corners = [
                            Point::new(rect.x, rect.y),
                            Point::new(rect.right(), rect.y),
                            Point::new(rect.right(), rect.bottom()),
                            Point::new(rect.x, rect.bottom()),
                        ];
                        for i in 0..4 {
                            self.line(corners[i], corners[(i + 1) % 4], stroke.color, None, 1.0);
                        }
                    }
                }
                Primitive::Circle {
                    center,
                    r,
                    fill,
                    opacity,
                } => self.circle(*center, *r, *fill, *opacity),
                Primitive::Line {
                    from,
                    to,
                    stroke,
                    dash,
                    opacity,
                } => self.line(*from, *to, stroke.color, *dash, *opacity),
                Primitive::Text { at, content, style } => {
                    if style.rotation.is_none() {
                        self.text(*at, content, style.fill, style.anchor);
                    }
                }
            }
        }
    }
}
