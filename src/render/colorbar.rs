//! Stepped color bars with min, mid and max ticks.

use crate::axis::{Axis, Lim};
use crate::color::{Color, ColorMap};
use crate::error::Result;
use crate::format::format_tick;
use crate::geom::{Point, Rect, Size};
use crate::primitive::{Anchor, Baseline, Primitive, Stroke, TextStyle};

use super::SMALL_FONT;

/// Number of gradient steps.
pub const STEPS: usize = 15;

const TICK: f64 = 5.0;

/// Pixel offsets along the bar for each step; each step overlaps the next
/// so no seams show between rectangles.
fn step_spans(domain: Lim, length: f64) -> Result<Vec<(f64, f64)>> {
    let scale = Axis::x().with_domain(domain, None)?.with_range((0.0, length));
    let inc = (domain.1 - domain.0) / STEPS as f64;

    Ok((0..STEPS)
        .map(|i| {
            let start = domain.0 + i as f64 * inc;
            let end = start + if i < STEPS - 1 { 2.0 * inc } else { inc };
            (scale.domain_to_range(start), scale.domain_to_range(end))
        })
        .collect())
}

fn mid_ticks(domain: Lim) -> Vec<f64> {
    vec![domain.0, 0.5 * (domain.0 + domain.1), domain.1]
}

/// Vertical bar at `at`: `size.w` long (downward), `size.h` thick, the
/// maximum at the top.
pub fn vertical(cmap: &ColorMap, domain: Lim, at: Point, size: Size) -> Result<Vec<Primitive>> {
    let color_step = 1.0 / (STEPS - 1) as f64;
    let mut out = Vec::with_capacity(STEPS + 7);

    for (i, (y1, y2)) in step_spans(domain, size.w)?.into_iter().enumerate() {
        out.push(Primitive::filled_rect(
            Rect::new(at.x, at.y + y1, size.h, y2 - y1),
            cmap.get(1.0 - i as f64 * color_step),
        ));
    }
    out.push(Primitive::outline(
        Rect::new(at.x, at.y, size.h, size.w),
        Stroke::thin(Color::BLACK),
    ));

    let axis = Axis::y()
        .with_domain(domain, None)?
        .with_range((0.0, size.w))
        .with_ticks(mid_ticks(domain));

    let label = TextStyle {
        font_size: SMALL_FONT,
        ..TextStyle::default()
    }
    .aligned(Anchor::Start, Baseline::Middle);

    for (tick, text) in axis.ticks().iter().zip(axis.tick_labels()) {
        let y = at.y + axis.domain_to_range(*tick);
        let x = at.x + size.h + 2.0;
        out.push(Primitive::line(
            Point::new(x, y),
            Point::new(x + TICK, y),
            Stroke::thin(Color::BLACK),
        ));
        out.push(Primitive::text(Point::new(x + 10.0, y), text.clone(), label));
    }

    Ok(out)
}

/// Horizontal bar at `at`: `size.w` long (rightward), `size.h` thick, the
/// minimum at the left.
pub fn horizontal(cmap: &ColorMap, domain: Lim, at: Point, size: Size) -> Result<Vec<Primitive>> {
    let color_step = 1.0 / (STEPS - 1) as f64;
    let mut out = Vec::with_capacity(STEPS + 7);

    for (i, (x1, x2)) in step_spans(domain, size.w)?.into_iter().enumerate() {
        out.push(Primitive::filled_rect(
            Rect::new(at.x + x1, at.y, x2 - x1, size.h),
            cmap.get(i as f64 * color_step),
        ));
    }
    out.push(Primitive::outline(
        Rect::new(at.x, at.y, size.w, size.h),
        Stroke::thin(Color::BLACK),
    ));

    let label = TextStyle {
        font_size: SMALL_FONT,
        ..TextStyle::default()
    }
    .aligned(Anchor::Middle, Baseline::Auto);

    for (frac, value) in [0.0, 0.5, 1.0].into_iter().zip(mid_ticks(domain)) {
        let x = at.x + frac * size.w;
        let y = at.y + size.h + 2.0;
        out.push(Primitive::line(
            Point::new(x, y),
            Point::new(x, y + TICK),
            Stroke::thin(Color::BLACK),
        ));
        out.push(Primitive::text(
            Point::new(x, at.y + size.h + 25.0),
            format_tick(value),
            label,
        ));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Palette;

    fn fills(prims: &[Primitive]) -> Vec<Color> {
        prims
            .iter()
            .filter_map(|p| match p {
                Primitive::Rect { fill: Some(c), .. } => Some(*c),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn vertical_bar_runs_max_to_min() {
        let cmap = Palette::Bwr.colormap();
        let prims = vertical(&cmap, (-3.0, 3.0), Point::new(0.0, 0.0), Size::new(160.0, 16.0)).unwrap();

        let colors = fills(&prims);
        assert_eq!(colors.len(), STEPS);
        assert_eq!(colors[0], cmap.get(1.0));
        assert_eq!(colors[STEPS - 1], cmap.get(0.0));

        let labels: Vec<String> = prims
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { content, at, .. } => Some(format!("{}@{}", content, at.y)),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["-3@160", "0@80", "3@0"]);
    }

    #[test]
    fn horizontal_steps_cover_the_bar() {
        let cmap = Palette::Blues.colormap();
        let prims =
            horizontal(&cmap, (0.0, 10.0), Point::new(5.0, 5.0), Size::new(150.0, 10.0)).unwrap();

        let rects: Vec<Rect> = prims
            .iter()
            .filter_map(|p| match p {
                Primitive::Rect {
                    rect, fill: Some(_), ..
                } => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(rects[0].x, 5.0);
        assert!((rects[STEPS - 1].right() - 155.0).abs() < 1e-9);
        // overlapping steps leave no gaps
        for w in rects.windows(2) {
            assert!(w[0].right() >= w[1].x);
        }
    }

    #[test]
    fn degenerate_domain_is_an_error() {
        let cmap = ColorMap::default();
        assert!(vertical(&cmap, (1.0, 1.0), Point::default(), Size::new(100.0, 10.0)).is_err());
    }
}
