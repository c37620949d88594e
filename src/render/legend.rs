//! Group swatches and dot-size legends.

use crate::color::Color;
use crate::data::Group;
use crate::error::{PlotError, Result};
use crate::format::format_tick;
use crate::geom::{Point, Rect};
use crate::primitive::{Anchor, Baseline, Primitive, Stroke, TextStyle};
use crate::props::DotLegendProps;

use super::SMALL_FONT;

fn entry_label(at: Point, block: f64, padding: f64, text: String) -> Primitive {
    let style = TextStyle {
        font_size: SMALL_FONT,
        ..TextStyle::default()
    }
    .aligned(Anchor::Start, Baseline::Middle);

    Primitive::text(Point::new(at.x + block + padding, at.y + 0.5 * block), text, style)
}

/// Vertical height taken by `n` legend entries.
pub fn entries_height(n: usize, block: f64, padding: f64) -> f64 {
    (block + padding) * n as f64
}

/// One outlined swatch plus name per group, stacked down from `at`.
pub fn group_legend(groups: &[Group], at: Point, block: f64, padding: f64) -> Vec<Primitive> {
    let mut out = Vec::with_capacity(groups.len() * 2);

    for (gi, group) in groups.iter().enumerate() {
        let y = at.y + entries_height(gi, block, padding);
        out.push(Primitive::Rect {
            rect: Rect::new(at.x, y, block, block),
            fill: Some(group.color),
            stroke: Some(Stroke::thin(Color::BLACK)),
        });
        out.push(entry_label(Point::new(at.x, y), block, padding, group.name.clone()));
    }

    out
}

/// Gray circles sized like the dots they explain.
///
/// A size at `lim.1` gets radius `max_radius`; sizes scale linearly from
/// `lim.0`.
pub fn dot_legend(
    props: &DotLegendProps,
    at: Point,
    block: f64,
    padding: f64,
    max_radius: f64,
) -> Result<Vec<Primitive>> {
    let (lo, hi) = props.lim;
    let span = hi - lo;
    if !span.is_finite() || span == 0.0 {
        return Err(PlotError::DegenerateDomain { min: lo, max: hi });
    }

    let mut out = Vec::with_capacity(props.sizes.len() * 2);
    for (i, &ds) in props.sizes.iter().enumerate() {
        let y = at.y + entries_height(i, block, padding);
        let r = (max_radius * (ds - lo) / span).max(0.0);
        out.push(Primitive::circle(
            Point::new(at.x + 0.5 * block, y + 0.5 * block),
            r,
            Color::GRAY,
        ));
        out.push(entry_label(
            Point::new(at.x, y),
            block,
            padding,
            format!("{} {}", format_tick(ds), props.unit),
        ));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_stack_with_padding() {
        let groups = vec![
            Group::new("ctrl", Color::rgb(255, 0, 0), vec![0]),
            Group::new("treated", Color::rgb(0, 0, 255), vec![1]),
        ];
        let prims = group_legend(&groups, Point::new(400.0, 20.0), 30.0, 10.0);
        assert_eq!(prims.len(), 4);

        match &prims[2] {
            Primitive::Rect { rect, stroke, .. } => {
                assert_eq!(*rect, Rect::new(400.0, 60.0, 30.0, 30.0));
                assert!(stroke.is_some());
            }
            other => panic!("expected swatch, got {:?}", other),
        }
        match &prims[3] {
            Primitive::Text { at, content, .. } => {
                assert_eq!(*at, Point::new(440.0, 75.0));
                assert_eq!(content, "treated");
            }
            other => panic!("expected label, got {:?}", other),
        }
    }

    #[test]
    fn dot_radii_scale_with_size() {
        let props = DotLegendProps {
            sizes: vec![25.0, 100.0],
            lim: (0.0, 100.0),
            unit: "%".into(),
        };
        let prims = dot_legend(&props, Point::default(), 30.0, 10.0, 15.0).unwrap();

        let radii: Vec<f64> = prims
            .iter()
            .filter_map(|p| match p {
                Primitive::Circle { r, .. } => Some(*r),
                _ => None,
            })
            .collect();
        assert_eq!(radii, vec![3.75, 15.0]);
        assert!(matches!(&prims[1], Primitive::Text { content, .. } if content == "25 %"));
    }

    #[test]
    fn flat_dot_limits_are_rejected() {
        let props = DotLegendProps {
            sizes: vec![1.0],
            lim: (5.0, 5.0),
            unit: String::new(),
        };
        assert!(dot_legend(&props, Point::default(), 30.0, 10.0, 15.0).is_err());
    }
}
