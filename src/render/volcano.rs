//! Volcano plots: fold change against significance, colored by threshold.

use crate::color::Color;
use crate::error::Result;
use crate::primitive::{Primitive, RenderedChart, Stroke};
use crate::props::VolcanoProps;
use tracing::debug;

use super::scatter::{axes, finish, hue_colorbar, hue_fills, markers, plot_frame, point_labels};
use super::ScatterData;

/// Threshold classification of one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regulation {
    /// Passes the enabled thresholds with positive fold change.
    Up,
    /// Passes the enabled thresholds with negative fold change.
    Down,
    /// Fails a threshold, or none are enabled.
    Neutral,
}

/// Classify a point by `log_fc` (x) and `log_p` (y).
///
/// With both thresholds enabled a point must pass both; with one enabled
/// that one decides. Comparisons are strict.
pub fn classify(log_fc: f64, log_p: f64, props: &VolcanoProps) -> Regulation {
    let p_pass = log_p > props.log_p.threshold;
    let fc_pass = log_fc.abs() > props.log_fc.threshold;

    let pass = match (props.log_p.show, props.log_fc.show) {
        (true, true) => p_pass && fc_pass,
        (true, false) => p_pass,
        (false, true) => fc_pass,
        (false, false) => false,
    };

    match pass {
        false => Regulation::Neutral,
        true if log_fc < 0.0 => Regulation::Down,
        true => Regulation::Up,
    }
}

fn regulation_color(reg: Regulation, props: &VolcanoProps) -> Color {
    match reg {
        Regulation::Up => props.log_fc.pos,
        Regulation::Down => props.log_fc.neg,
        Regulation::Neutral => props.scatter.dots.color,
    }
}

/// Render a volcano plot. Axes snap outward to round tick multiples.
///
/// A hue column, when present, overrides threshold coloring.
pub fn render_volcano(data: &ScatterData, props: &VolcanoProps) -> Result<RenderedChart> {
    let sp = &props.scatter;
    let frame = plot_frame(data, sp, true)?;
    let fills = hue_fills(data, sp)?;

    let (mut out, index) = markers(data, &frame, sp, |i| match &fills {
        Some(f) => f[i],
        None => regulation_color(classify(data.x()[i], data.y()[i], props), props),
    });
    out.extend(point_labels(data, &frame, sp));

    if props.log_p.show && props.log_p_line.show {
        let (d0, d1) = frame.x.domain();
        let t = props.log_p.threshold;
        out.push(Primitive::Line {
            from: frame.to_pixel(d0, t),
            to: frame.to_pixel(d1, t),
            stroke: Stroke::thin(props.log_p_line.color),
            dash: Some(props.log_p_line.dash),
            opacity: 1.0,
        });
    }

    if props.border.show {
        out.push(Primitive::outline(
            frame.layout.inner,
            Stroke::new(props.border.color, props.border.width),
        ));
    }

    out.extend(axes(&frame, sp));
    out.extend(hue_colorbar(data, &frame, sp)?);

    debug!("Rendered volcano of {} points into {} primitives", data.len(), out.len());

    Ok(finish(frame, sp.scale, out, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;
    use crate::props::{FoldChangeProps, ThresholdProps};

    fn props() -> VolcanoProps {
        let base = VolcanoProps::default();
        VolcanoProps {
            log_p: ThresholdProps {
                threshold: 1.3,
                ..base.log_p
            },
            ..base
        }
    }

    #[test]
    fn both_thresholds_must_pass() {
        let p = props();
        assert_eq!(classify(2.0, 2.0, &p), Regulation::Up);
        assert_eq!(classify(2.0, 0.5, &p), Regulation::Neutral);
        assert_eq!(classify(-2.0, 2.0, &p), Regulation::Down);
        assert_eq!(classify(0.5, 5.0, &p), Regulation::Neutral);

        assert_eq!(regulation_color(Regulation::Up, &p), p.log_fc.pos);
        assert_eq!(regulation_color(Regulation::Neutral, &p).to_hex(), "#d9d9d9");
        assert_eq!(regulation_color(Regulation::Down, &p), p.log_fc.neg);
    }

    #[test]
    fn a_single_enabled_threshold_decides_alone() {
        let base = props();
        let fc_only = VolcanoProps {
            log_p: ThresholdProps {
                show: false,
                ..base.log_p
            },
            ..base.clone()
        };
        assert_eq!(classify(2.0, 0.1, &fc_only), Regulation::Up);
        assert_eq!(classify(0.5, 9.0, &fc_only), Regulation::Neutral);

        let p_only = VolcanoProps {
            log_fc: FoldChangeProps {
                show: false,
                ..base.log_fc
            },
            ..base
        };
        assert_eq!(classify(-0.1, 2.0, &p_only), Regulation::Down);
        assert_eq!(classify(5.0, 1.3, &p_only), Regulation::Neutral);
    }

    #[test]
    fn significance_line_spans_the_x_domain() {
        let data = ScatterData::new(
            vec!["a".into(), "b".into()],
            "log2FC",
            vec![-3.0, 4.0],
            "-log10p",
            vec![0.5, 6.0],
        )
        .unwrap();
        let chart = render_volcano(&data, &props()).unwrap();

        let dashed: Vec<(Point, Point)> = chart
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Line {
                    from,
                    to,
                    dash: Some(_),
                    ..
                } => Some((*from, *to)),
                _ => None,
            })
            .collect();
        assert_eq!(dashed.len(), 1);
        // default x axis: 100px margin and a 500px range
        assert_eq!(dashed[0].0.x, 100.0);
        assert_eq!(dashed[0].1.x, 600.0);
        assert_eq!(dashed[0].0.y, dashed[0].1.y);

        let fills: Vec<Color> = chart
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Circle { fill, .. } => Some(*fill),
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec![props().scatter.dots.color, props().log_fc.pos]);
    }

    fn circle_fills(chart: &RenderedChart) -> Vec<Color> {
        chart
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Circle { fill, .. } => Some(*fill),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn fold_change_sign_picks_the_fold_change_colors() {
        let base = props();
        let red = Color::rgb(255, 0, 0);
        let green = Color::rgb(0, 128, 0);
        let custom = VolcanoProps {
            log_fc: FoldChangeProps {
                pos: red,
                neg: green,
                ..base.log_fc
            },
            ..base
        };
        let data = ScatterData::new(
            vec!["up".into(), "down".into()],
            "log2FC",
            vec![2.0, -2.0],
            "-log10p",
            vec![2.0, 2.0],
        )
        .unwrap();

        let chart = render_volcano(&data, &custom).unwrap();
        assert_eq!(circle_fills(&chart), vec![red, green]);

        // still the fold change colors when only significance classifies
        let p_only = VolcanoProps {
            log_fc: FoldChangeProps {
                show: false,
                ..custom.log_fc
            },
            ..custom
        };
        let chart = render_volcano(&data, &p_only).unwrap();
        assert_eq!(circle_fills(&chart), vec![red, green]);
    }
}
