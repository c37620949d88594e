//! Horizontal bar charts: one bar per category along a band axis.

use crate::axis::{Axis, Orientation};
use crate::error::{PlotError, Result};
use crate::geom::{Point, Rect, Size};
use crate::layout::{LayoutCalculator, LayoutConfig, PanelKind, PanelPlacement, PanelSpec};
use crate::pointer::{BandInverter, HitTester, Viewport};
use crate::primitive::{Primitive, RenderedChart};
use crate::props::{AxisProps, BarProps};
use tracing::debug;

use super::axis::{bottom_axis, build_axis, fit_lim, left_axis, AxisStyle};
use super::colorbar;

/// Category names with one value each.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarData {
    categories: Vec<String>,
    values: Vec<f64>,
    value_name: String,
    hue: Option<Vec<f64>>,
}

impl BarData {
    /// Bars for `categories`, `value_name` titling the value axis.
    pub fn new(
        categories: Vec<String>,
        value_name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self> {
        if values.len() != categories.len() {
            return Err(PlotError::shape_mismatch(
                "bar values",
                categories.len(),
                values.len(),
            ));
        }

        Ok(Self {
            categories,
            values,
            value_name: value_name.into(),
            hue: None,
        })
    }

    /// Shade bars by a value mapped through the color map.
    pub fn with_hue(mut self, hue: Vec<f64>) -> Result<Self> {
        if hue.len() != self.categories.len() {
            return Err(PlotError::shape_mismatch(
                "hue values",
                self.categories.len(),
                hue.len(),
            ));
        }
        self.hue = Some(hue);
        Ok(self)
    }

    /// Category names.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Bar values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

fn value_axis(data: &BarData, props: &BarProps) -> Result<Axis> {
    // bars grow from zero, so the fitted domain always contains it
    let (lo, hi) = fit_lim(&data.values);
    let axis_props = AxisProps {
        domain: Some(props.x_axis.domain.unwrap_or((lo.min(0.0), hi.max(0.0)))),
        ..props.x_axis.clone()
    };

    build_axis(
        &axis_props,
        Orientation::X,
        &data.values,
        props.x_axis.domain.is_none(),
        &data.value_name,
    )
}

fn band_axis(data: &BarData, props: &BarProps) -> Result<Axis> {
    let n = data.categories.len();

    Axis::y()
        .with_domain((0.0, n as f64), None)?
        .with_range(props.y_range)
        .with_ticks((0..n).map(|i| i as f64 + 0.5).collect())
        .with_tick_labels(data.categories.iter().cloned())
}

/// Render a bar chart. Category 0 sits at the bottom.
pub fn render_bar(data: &BarData, props: &BarProps) -> Result<RenderedChart> {
    let x = value_axis(data, props)?;
    let y = band_axis(data, props)?;

    let colorbar = if data.hue.is_some() {
        props.colorbar.placement
    } else {
        PanelPlacement::Off
    };
    let layout = LayoutCalculator::new(LayoutConfig {
        base: props.margin,
        padding: props.padding,
        ..LayoutConfig::default()
    })
    .compute_for_inner(
        Size::new(x.range_span().abs(), y.range_span().abs()),
        &[PanelSpec::new(PanelKind::ColorBar, colorbar)],
    )?;
    let inner = layout.inner;

    let hue = match &data.hue {
        Some(h) => Some((h, Axis::x().with_domain(fit_lim(h), None)?)),
        None => None,
    };

    let x0 = inner.x + x.domain_to_range(0.0);
    let mut out = Vec::with_capacity(data.values.len() + 32);

    for (i, &v) in data.values.iter().enumerate() {
        if !v.is_finite() {
            continue;
        }

        let x1 = inner.x + x.domain_to_range(v);
        let y1 = inner.y + y.domain_to_range(i as f64 + 0.5);
        let fill = match &hue {
            Some((h, scale)) if h[i].is_finite() => props.cmap.get(scale.norm(h[i])),
            _ => props.fill,
        };

        out.push(Primitive::filled_rect(
            Rect::new(
                x0.min(x1),
                y1 - 0.5 * props.bar_width,
                (x1 - x0).abs(),
                props.bar_width,
            ),
            fill,
        ));
    }

    let y_style = AxisStyle {
        tick_size: props.tick_size,
        ..AxisStyle::from(&props.x_axis)
    };
    out.extend(left_axis(&y, Point::new(inner.x, inner.y), y_style));
    out.extend(bottom_axis(
        &x,
        Point::new(inner.x, inner.bottom()),
        AxisStyle::from(&props.x_axis),
    ));

    if let (Some((h, _)), Some(panel)) = (&hue, layout.panel(PanelKind::ColorBar)) {
        out.extend(colorbar::vertical(
            &props.cmap,
            fit_lim(h),
            Point::new(panel.rect.x, panel.rect.y),
            props.colorbar.bar_size,
        )?);
    }

    debug!(
        "Rendered {} bars into {} primitives",
        data.values.len(),
        out.len()
    );

    let inverter = BandInverter::new(inner, y, data.categories.len());
    Ok(RenderedChart {
        size: layout.canvas,
        scale: props.scale,
        primitives: out,
        hit_tester: HitTester::Band(inverter)
            .with_viewport(Viewport::new(Point::default(), props.scale)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::pointer::Hit;

    fn data() -> BarData {
        BarData::new(
            vec!["alpha".into(), "beta".into(), "gamma".into(), "delta".into()],
            "count",
            vec![5.0, -5.0, f64::NAN, 10.0],
        )
        .unwrap()
    }

    fn bars(chart: &RenderedChart) -> Vec<(Rect, Color)> {
        chart
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Rect {
                    rect,
                    fill: Some(c),
                    ..
                } => Some((*rect, *c)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn bars_grow_from_zero() {
        let props = BarProps::default();
        let chart = render_bar(&data(), &props).unwrap();
        let rects = bars(&chart);

        // NaN skipped
        assert_eq!(rects.len(), 3);
        // (-5, 10) snaps to (-6, 10) with a tick every 2
        let zero = 200.0 + 500.0 * 6.0 / 16.0;
        assert!((rects[0].0.x - zero).abs() < 1e-9);
        assert!((rects[1].0.right() - zero).abs() < 1e-9);
        assert!((rects[2].0.right() - 700.0).abs() < 1e-9);
        assert_eq!(rects[0].0.h, 2.0);
        assert_eq!(rects[0].1, Color::CORNFLOWER_BLUE);
    }

    #[test]
    fn categories_label_the_band_axis_bottom_up() {
        let chart = render_bar(&data(), &BarProps::default()).unwrap();
        let alpha = chart.primitives.iter().find_map(|p| match p {
            Primitive::Text { content, at, .. } if content == "alpha" => Some(*at),
            _ => None,
        });
        // 4 bands over 500px; category 0 centered in the bottom band
        assert_eq!(alpha.map(|p| p.y), Some(100.0 + 437.5));
    }

    #[test]
    fn hit_resolves_bands_at_display_scale() {
        let props = BarProps::default();
        let chart = render_bar(&data(), &props).unwrap();

        let hit = chart.hit(Point::new(300.0 * props.scale, (100.0 + 10.0) * props.scale));
        assert_eq!(hit, Some(Hit::Bar { index: 3 }));
        assert_eq!(chart.hit(Point::new(10.0, 10.0)), None);
    }

    #[test]
    fn hue_shades_bars_and_adds_a_colorbar() {
        let props = BarProps::default();
        let data = data().with_hue(vec![0.0, 1.0, 0.5, 1.0]).unwrap();
        let chart = render_bar(&data, &props).unwrap();

        let rects = bars(&chart);
        assert_eq!(rects[0].1, props.cmap.get(0.0));
        assert_eq!(rects[1].1, props.cmap.get(1.0));
        assert!(rects.len() > 3 + 10);
        assert_eq!(chart.size.w, 200.0 + 500.0 + 100.0 + 60.0 + 10.0);
    }

    #[test]
    fn no_categories_is_a_degenerate_domain() {
        let empty = BarData::new(Vec::new(), "v", Vec::new()).unwrap();
        assert!(matches!(
            render_bar(&empty, &BarProps::default()),
            Err(PlotError::DegenerateDomain { .. })
        ));
    }
}
