//! Scatter plots, and the point plotting shared with volcano plots.

use crate::axis::{Axis, Orientation};
use crate::color::Color;
use crate::error::{PlotError, Result};
use crate::geom::{Point, Size};
use crate::layout::{
    ChartLayout, LayoutCalculator, LayoutConfig, PanelKind, PanelPlacement, PanelSpec,
};
use crate::pointer::{HitTester, PlotInverter, PointIndex, Viewport};
use crate::primitive::{Anchor, Baseline, Primitive, RenderedChart, Stroke, TextStyle};
use crate::props::ScatterProps;
use tracing::debug;

use super::axis::{bottom_axis, build_axis, fit_lim, left_axis, AxisStyle};
use super::colorbar;

/// Parallel columns for a point plot, one entry per point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScatterData {
    names: Vec<String>,
    x: Vec<f64>,
    y: Vec<f64>,
    x_name: String,
    y_name: String,
    hue: Option<Vec<f64>>,
    size: Option<Vec<f64>>,
}

impl ScatterData {
    /// Points named by `names` at `(x[i], y[i])`; the column names become
    /// default axis titles.
    pub fn new(
        names: Vec<String>,
        x_name: impl Into<String>,
        x: Vec<f64>,
        y_name: impl Into<String>,
        y: Vec<f64>,
    ) -> Result<Self> {
        check_len("x values", names.len(), x.len())?;
        check_len("y values", names.len(), y.len())?;

        Ok(Self {
            names,
            x,
            y,
            x_name: x_name.into(),
            y_name: y_name.into(),
            hue: None,
            size: None,
        })
    }

    /// Color points by a value mapped through the color map.
    pub fn with_hue(mut self, hue: Vec<f64>) -> Result<Self> {
        check_len("hue values", self.len(), hue.len())?;
        self.hue = Some(hue);
        Ok(self)
    }

    /// Per-point marker radius.
    pub fn with_size(mut self, size: Vec<f64>) -> Result<Self> {
        check_len("size values", self.len(), size.len())?;
        self.size = Some(size);
        Ok(self)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether there are no points.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Point names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Horizontal values.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Vertical values.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Horizontal column name.
    pub fn x_name(&self) -> &str {
        &self.x_name
    }

    /// Vertical column name.
    pub fn y_name(&self) -> &str {
        &self.y_name
    }

    /// Hue values, if any.
    pub fn hue(&self) -> Option<&[f64]> {
        self.hue.as_deref()
    }
}

fn check_len(what: &str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(PlotError::shape_mismatch(what, expected, actual))
    }
}

/// Axes and layout of a point plot.
pub(super) struct PlotFrame {
    pub(super) layout: ChartLayout,
    pub(super) x: Axis,
    pub(super) y: Axis,
}

impl PlotFrame {
    /// Chart pixel position of a data point.
    pub(super) fn to_pixel(&self, x: f64, y: f64) -> Point {
        let inner = self.layout.inner;
        Point::new(
            inner.x + self.x.domain_to_range(x),
            inner.y + self.y.domain_to_range(y),
        )
    }
}

pub(super) fn plot_frame(data: &ScatterData, props: &ScatterProps, snap: bool) -> Result<PlotFrame> {
    let x = build_axis(&props.x_axis, Orientation::X, &data.x, snap, &data.x_name)?;
    let y = build_axis(&props.y_axis, Orientation::Y, &data.y, snap, &data.y_name)?;

    let colorbar = if data.hue.is_some() {
        props.colorbar.placement
    } else {
        PanelPlacement::Off
    };

    let calc = LayoutCalculator::new(LayoutConfig {
        base: props.margin,
        padding: props.padding,
        ..LayoutConfig::default()
    });
    let inner = Size::new(x.range_span().abs(), y.range_span().abs());
    let layout = calc.compute_for_inner(inner, &[PanelSpec::new(PanelKind::ColorBar, colorbar)])?;

    Ok(PlotFrame { layout, x, y })
}

/// Fill for each point from its hue, `None` when there is no hue column.
pub(super) fn hue_fills(data: &ScatterData, props: &ScatterProps) -> Result<Option<Vec<Color>>> {
    let Some(hue) = &data.hue else {
        return Ok(None);
    };

    let scale = Axis::x().with_domain(fit_lim(hue), None)?;
    Ok(Some(
        hue.iter()
            .map(|&h| {
                if h.is_finite() {
                    props.cmap.get(scale.norm(h))
                } else {
                    props.dots.color
                }
            })
            .collect(),
    ))
}

fn radius(data: &ScatterData, props: &ScatterProps, i: usize) -> f64 {
    match &data.size {
        Some(size) if size[i].is_finite() => size[i].max(0.0),
        _ => props.dots.size,
    }
}

/// Markers in data order plus their hit index.
pub(super) fn markers(
    data: &ScatterData,
    frame: &PlotFrame,
    props: &ScatterProps,
    fill: impl Fn(usize) -> Color,
) -> (Vec<Primitive>, PointIndex) {
    let mut out = Vec::with_capacity(data.len());
    let mut index = Vec::with_capacity(data.len());
    let mut skipped = 0usize;

    for i in 0..data.len() {
        let (x, y) = (data.x[i], data.y[i]);
        let r = radius(data, props, i);

        if !x.is_finite() || !y.is_finite() {
            skipped += 1;
            index.push((Point::new(f64::NAN, f64::NAN), r));
            continue;
        }

        let center = frame.to_pixel(x, y);
        out.push(Primitive::Circle {
            center,
            r,
            fill: fill(i),
            opacity: props.dots.opacity,
        });
        index.push((center, r));
    }

    if skipped > 0 {
        debug!("Skipped {} points with non-finite coordinates", skipped);
    }

    (out, PointIndex::new(index))
}

/// Leader line and name for every point listed in the label props.
///
/// Labels go right of points with non-negative x and left of the rest.
pub(super) fn point_labels(data: &ScatterData, frame: &PlotFrame, props: &ScatterProps) -> Vec<Primitive> {
    let labels = &props.labels;
    if labels.values.is_empty() {
        return Vec::new();
    }

    let wanted: Vec<String> = labels.values.iter().map(|v| v.to_lowercase()).collect();
    let off = labels.offset;
    let mut out = Vec::new();

    for (i, name) in data.names.iter().enumerate() {
        let (x, y) = (data.x[i], data.y[i]);
        if !x.is_finite() || !y.is_finite() || !wanted.contains(&name.to_lowercase()) {
            continue;
        }

        let p = frame.to_pixel(x, y);
        let r = radius(data, props, i);
        let (dir, anchor) = if x >= 0.0 {
            (1.0, Anchor::Start)
        } else {
            (-1.0, Anchor::End)
        };

        out.push(Primitive::Line {
            from: Point::new(p.x + dir * (r + 1.0), p.y - r - 1.0),
            to: Point::new(p.x + dir * (r + off - 1.0), p.y - r - off + 1.0),
            stroke: Stroke::thin(labels.line_color),
            dash: None,
            opacity: labels.line_opacity,
        });
        out.push(Primitive::text(
            Point::new(p.x + dir * (r + off), p.y - r - off),
            name.clone(),
            TextStyle::default()
                .filled(labels.color)
                .aligned(anchor, Baseline::Auto),
        ));
    }

    out
}

/// Left and bottom axes.
pub(super) fn axes(frame: &PlotFrame, props: &ScatterProps) -> Vec<Primitive> {
    let inner = frame.layout.inner;
    let mut out = left_axis(&frame.y, Point::new(inner.x, inner.y), AxisStyle::from(&props.y_axis));
    out.extend(bottom_axis(
        &frame.x,
        Point::new(inner.x, inner.bottom()),
        AxisStyle::from(&props.x_axis),
    ));
    out
}

/// Color bar for the hue column, when there is one.
pub(super) fn hue_colorbar(
    data: &ScatterData,
    frame: &PlotFrame,
    props: &ScatterProps,
) -> Result<Vec<Primitive>> {
    let (Some(hue), Some(panel)) = (&data.hue, frame.layout.panel(PanelKind::ColorBar)) else {
        return Ok(Vec::new());
    };

    let at = Point::new(panel.rect.x, panel.rect.y);
    if panel.side.is_vertical() {
        colorbar::vertical(&props.cmap, fit_lim(hue), at, props.colorbar.bar_size)
    } else {
        colorbar::horizontal(&props.cmap, fit_lim(hue), at, props.colorbar.bar_size)
    }
}

pub(super) fn finish(
    frame: PlotFrame,
    scale: f64,
    primitives: Vec<Primitive>,
    index: PointIndex,
) -> RenderedChart {
    let inverter = PlotInverter::new(frame.layout.inner, frame.x, frame.y).with_points(index);

    RenderedChart {
        size: frame.layout.canvas,
        scale,
        primitives,
        hit_tester: HitTester::Plot(inverter).with_viewport(Viewport::new(Point::default(), scale)),
    }
}

/// Render a scatter plot with optional hue, size and labels.
pub fn render_scatter(data: &ScatterData, props: &ScatterProps) -> Result<RenderedChart> {
    let frame = plot_frame(data, props, false)?;
    let fills = hue_fills(data, props)?;

    let (mut out, index) = markers(data, &frame, props, |i| {
        fills.as_ref().map_or(props.dots.color, |f| f[i])
    });
    out.extend(point_labels(data, &frame, props));
    out.extend(axes(&frame, props));
    out.extend(hue_colorbar(data, &frame, props)?);

    debug!("Rendered scatter of {} points into {} primitives", data.len(), out.len());

    Ok(finish(frame, props.scale, out, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::Hit;

    fn data() -> ScatterData {
        ScatterData::new(
            vec!["TP53".into(), "MYC".into(), "GAPDH".into()],
            "logFC",
            vec![-10.0, 10.0, f64::NAN],
            "score",
            vec![5.0, 2.5, 1.0],
        )
        .unwrap()
    }

    fn circles(chart: &RenderedChart) -> Vec<(Point, f64, Color)> {
        chart
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Circle { center, r, fill, .. } => Some((*center, *r, *fill)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn points_map_through_both_axes() {
        let props = ScatterProps::default();
        let chart = render_scatter(&data(), &props).unwrap();

        let pts = circles(&chart);
        // NaN x is skipped
        assert_eq!(pts.len(), 2);
        // x (-20, 20) onto 500px, y (0, 10) onto 400px flipped, margin 100
        assert_eq!(pts[0].0, Point::new(100.0 + 125.0, 100.0 + 200.0));
        assert_eq!(pts[1].0, Point::new(100.0 + 375.0, 100.0 + 300.0));
        assert_eq!(pts[0].1, 3.0);
        assert_eq!(pts[0].2, props.dots.color);
        assert_eq!(chart.size, Size::new(700.0, 600.0));
    }

    #[test]
    fn mismatched_columns_are_rejected() {
        let err = ScatterData::new(vec!["a".into()], "x", vec![1.0, 2.0], "y", vec![1.0]);
        assert!(matches!(err, Err(PlotError::ShapeMismatch { .. })));
        assert!(data().with_hue(vec![1.0]).is_err());
    }

    #[test]
    fn hue_colors_points_and_reserves_a_colorbar() {
        let props = ScatterProps::default();
        let data = data().with_hue(vec![0.0, 1.0, 0.5]).unwrap();
        let chart = render_scatter(&data, &props).unwrap();

        let pts = circles(&chart);
        assert_eq!(pts[0].2, props.cmap.get(0.0));
        assert_eq!(pts[1].2, props.cmap.get(1.0));
        // right margin grows by the colorbar panel
        assert_eq!(chart.size.w, 700.0 + 60.0 + 10.0);
    }

    #[test]
    fn labels_match_names_ignoring_case() {
        let props = ScatterProps {
            labels: crate::props::LabelProps {
                values: vec!["tp53".into(), "myc".into()],
                ..ScatterProps::default().labels
            },
            ..ScatterProps::default()
        };
        let chart = render_scatter(&data(), &props).unwrap();

        let labels: Vec<(String, Point, Anchor)> = chart
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { content, at, style } if content != "0" => {
                    Some((content.clone(), *at, style.anchor))
                }
                _ => None,
            })
            .filter(|(c, _, _)| c == "TP53" || c == "MYC")
            .collect();

        assert_eq!(labels.len(), 2);
        // negative x: label to the left, r = 3, offset = 15
        assert_eq!(labels[0].1, Point::new(225.0 - 18.0, 300.0 - 18.0));
        assert_eq!(labels[0].2, Anchor::End);
        assert_eq!(labels[1].2, Anchor::Start);
    }

    #[test]
    fn hit_reports_the_marker_under_the_pointer() {
        let chart = render_scatter(&data(), &ScatterProps::default()).unwrap();
        match chart.hit(Point::new(476.0, 400.0)) {
            Some(Hit::Point { index, x, .. }) => {
                assert_eq!(index, Some(1));
                assert!((x - 10.08).abs() < 1e-9);
            }
            other => panic!("expected point hit, got {:?}", other),
        }
    }
}
