//! Axis construction from props and axis line/tick/label primitives.

use crate::axis::{Axis, Lim, Orientation};
use crate::color::Color;
use crate::error::Result;
use crate::geom::Point;
use crate::primitive::{Anchor, Baseline, Primitive, Stroke, TextStyle};
use crate::props::AxisProps;

use super::SMALL_FONT;

/// Finite extent of `data`, padded by one on each side when it has no span.
///
/// Empty or all-NaN data gives `[0, 1]`.
pub fn fit_lim(data: &[f64]) -> Lim {
    let extent = data
        .iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<Lim>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        });

    match extent {
        None => (0.0, 1.0),
        Some((lo, hi)) if lo == hi => (lo - 1.0, hi + 1.0),
        Some(lim) => lim,
    }
}

/// Axis from props, falling back to the data extent when no domain is set.
///
/// With `snap` the domain is rounded outward to tick multiples.
pub fn build_axis(
    props: &AxisProps,
    orientation: Orientation,
    data: &[f64],
    snap: bool,
    title: &str,
) -> Result<Axis> {
    let lim = props.domain.unwrap_or_else(|| fit_lim(data));
    let base = Axis::new(orientation).with_range(props.range);

    let mut axis = if snap {
        base.auto_domain(lim, None)?
    } else {
        base.with_domain(lim, None)?
    };

    if let Some(ticks) = &props.ticks {
        axis = axis.with_ticks(ticks.clone());
    }
    if let Some(labels) = &props.tick_labels {
        axis = axis.with_tick_labels(labels.iter().cloned())?;
    }

    Ok(axis.with_title(props.title.as_deref().unwrap_or(title)))
}

/// Line, tick and label appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisStyle {
    /// Tick mark length.
    pub tick_size: f64,
    /// Axis line width.
    pub stroke_width: f64,
    /// Line and label color.
    pub color: Color,
}

impl From<&AxisProps> for AxisStyle {
    fn from(p: &AxisProps) -> Self {
        Self {
            tick_size: p.tick_size,
            stroke_width: p.stroke_width,
            color: p.color,
        }
    }
}

/// Vertical axis whose range starts at `at` and runs down.
pub fn left_axis(axis: &Axis, at: Point, style: AxisStyle) -> Vec<Primitive> {
    let ts = style.tick_size;
    let sw = style.stroke_width;
    let stroke = Stroke::new(style.color, sw);
    let (r0, r1) = axis.range();

    let mut out = vec![Primitive::line(
        Point::new(at.x, at.y - 0.5 * sw),
        Point::new(at.x, at.y + r1 + 0.5 * sw),
        stroke,
    )];

    if !axis.title().is_empty() {
        out.push(Primitive::text(
            Point::new(at.x - ts * 8.0, at.y + 0.5 * (r0 + r1)),
            axis.title(),
            TextStyle::default()
                .filled(style.color)
                .aligned(Anchor::Middle, Baseline::Auto)
                .rotated(270.0),
        ));
    }

    let label = TextStyle {
        font_size: SMALL_FONT,
        ..TextStyle::default()
    }
    .filled(style.color)
    .aligned(Anchor::End, Baseline::Middle);

    for (tick, text) in axis.ticks().iter().zip(axis.tick_labels()) {
        let y = at.y + axis.domain_to_range(*tick);
        out.push(Primitive::line(
            Point::new(at.x - ts, y),
            Point::new(at.x, y),
            stroke,
        ));
        out.push(Primitive::text(Point::new(at.x - ts * 2.0, y), text.clone(), label));
    }

    out
}

/// Horizontal axis whose range starts at `at` and runs right.
pub fn bottom_axis(axis: &Axis, at: Point, style: AxisStyle) -> Vec<Primitive> {
    let ts = style.tick_size;
    let sw = style.stroke_width;
    let stroke = Stroke::new(style.color, sw);
    let (r0, r1) = axis.range();

    let mut out = vec![Primitive::line(
        at,
        Point::new(at.x + r1 + 0.5 * sw, at.y),
        stroke,
    )];

    if !axis.title().is_empty() {
        out.push(Primitive::text(
            Point::new(at.x + 0.5 * (r0 + r1), at.y + ts * 10.0),
            axis.title(),
            TextStyle::default()
                .filled(style.color)
                .aligned(Anchor::Middle, Baseline::Auto),
        ));
    }

    let label = TextStyle {
        font_size: SMALL_FONT,
        ..TextStyle::default()
    }
    .filled(style.color)
    .aligned(Anchor::Middle, Baseline::Hanging);

    for (tick, text) in axis.ticks().iter().zip(axis.tick_labels()) {
        let x = at.x + axis.domain_to_range(*tick);
        out.push(Primitive::line(
            Point::new(x, at.y),
            Point::new(x, at.y + ts),
            stroke,
        ));
        out.push(Primitive::text(Point::new(x, at.y + ts * 2.0), text.clone(), label));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> AxisStyle {
        AxisStyle {
            tick_size: 5.0,
            stroke_width: 2.0,
            color: Color::BLACK,
        }
    }

    #[test]
    fn fit_lim_pads_flat_data_and_skips_nan() {
        assert_eq!(fit_lim(&[2.0, f64::NAN, -1.0]), (-1.0, 2.0));
        assert_eq!(fit_lim(&[3.0, 3.0]), (2.0, 4.0));
        assert_eq!(fit_lim(&[f64::NAN]), (0.0, 1.0));
    }

    #[test]
    fn build_axis_prefers_props_domain_and_title() {
        let props = AxisProps {
            domain: Some((0.0, 10.0)),
            range: (0.0, 400.0),
            ticks: None,
            tick_labels: None,
            tick_size: 4.0,
            stroke_width: 2.0,
            color: Color::BLACK,
            title: Some("Score".into()),
        };
        let axis = build_axis(&props, Orientation::Y, &[100.0], false, "col").unwrap();
        assert_eq!(axis.domain(), (0.0, 10.0));
        assert_eq!(axis.title(), "Score");
        assert_eq!(axis.domain_to_range(10.0), 0.0);
    }

    #[test]
    fn build_axis_snaps_data_extent() {
        let props = AxisProps {
            domain: None,
            range: (0.0, 500.0),
            ticks: None,
            tick_labels: None,
            tick_size: 4.0,
            stroke_width: 2.0,
            color: Color::BLACK,
            title: None,
        };
        let axis = build_axis(&props, Orientation::X, &[0.3, 4.2], true, "x").unwrap();
        assert_eq!(axis.domain(), (0.0, 4.5));
        assert_eq!(axis.title(), "x");
    }

    #[test]
    fn one_tick_mark_and_label_per_tick() {
        let axis = Axis::x().with_domain((0.0, 10.0), Some(5.0)).unwrap();
        let prims = bottom_axis(&axis, Point::new(100.0, 500.0), style());

        let labels: Vec<&str> = prims
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["0", "5", "10"]);
        // axis line plus three tick marks
        assert_eq!(prims.iter().filter(|p| matches!(p, Primitive::Line { .. })).count(), 4);
    }

    #[test]
    fn left_axis_labels_sit_left_of_the_ticks() {
        let axis = Axis::y()
            .with_domain((0.0, 10.0), Some(10.0))
            .unwrap()
            .with_range((0.0, 400.0))
            .with_title("logP");
        let prims = left_axis(&axis, Point::new(100.0, 100.0), style());

        let title = prims.iter().find_map(|p| match p {
            Primitive::Text { content, at, style } if content == "logP" => Some((*at, *style)),
            _ => None,
        });
        let (at, ts) = title.unwrap();
        assert_eq!(at, Point::new(60.0, 300.0));
        assert_eq!(ts.rotation, Some(270.0));

        let zero = prims.iter().find_map(|p| match p {
            Primitive::Text { content, at, .. } if content == "0" => Some(*at),
            _ => None,
        });
        assert_eq!(zero, Some(Point::new(90.0, 500.0)));
    }
}
