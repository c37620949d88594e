//! SVG serialisation.
//!
//! The document's `viewBox` is the unscaled canvas and its `width`/`height`
//! are scaled, so the display scale never touches primitive coordinates.

use crate::color::Color;
use crate::format::format_coord as n;
use crate::primitive::{Anchor, Baseline, Primitive, RenderedChart, TextStyle};
use std::fmt::Write;

const FONT: &str = "Arial, Helvetica, sans-serif";

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn paint(attr: &str, color: Color) -> String {
    let mut s = format!(
        " {}=\"#{:02x}{:02x}{:02x}\"",
        attr, color.r, color.g, color.b
    );
    if color.a < 255 {
        let _ = write!(s, r#" {}-opacity="{}""#, attr, n(color.opacity()));
    }
    s
}

fn text_attrs(style: &TextStyle) -> String {
    let anchor = match style.anchor {
        Anchor::Start => "start",
        Anchor::Middle => "middle",
        Anchor::End => "end",
    };
    let mut s = format!(
        r#"{} font-size="{}" text-anchor="{}""#,
        paint("fill", style.fill),
        n(style.font_size),
        anchor
    );
    match style.baseline {
        Baseline::Auto => {}
        Baseline::Middle => s.push_str(r#" dominant-baseline="central""#),
        Baseline::Hanging => s.push_str(r#" dominant-baseline="hanging""#),
    }
    s
}

fn write_primitive(out: &mut String, p: &Primitive) {
    // writing into a String cannot fail
    let _ = match p {
        Primitive::Rect { rect, fill, stroke } => {
            let fill = fill.map_or_else(|| r#" fill="none""#.to_string(), |c| paint("fill", c));
            let stroke = stroke.map_or_else(String::new, |s| {
                format!(r#"{} stroke-width="{}""#, paint("stroke", s.color), n(s.width))
            });
            writeln!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}"{}{} shape-rendering="crispEdges"/>"#,
                n(rect.x),
                n(rect.y),
                n(rect.w),
                n(rect.h),
                fill,
                stroke
            )
        }
        Primitive::Circle {
            center,
            r,
            fill,
            opacity,
        } => writeln!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}"{} opacity="{}"/>"#,
            n(center.x),
            n(center.y),
            n(*r),
            paint("fill", *fill),
            n(*opacity)
        ),
        Primitive::Line {
            from,
            to,
            stroke,
            dash,
            opacity,
        } => {
            let dash = dash.map_or_else(String::new, |d| {
                format!(r#" stroke-dasharray="{}""#, n(d))
            });
            writeln!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{} stroke-width="{}" opacity="{}"{}/>"#,
                n(from.x),
                n(from.y),
                n(to.x),
                n(to.y),
                paint("stroke", stroke.color),
                n(stroke.width),
                n(*opacity),
                dash
            )
        }
        Primitive::Text { at, content, style } => {
            let rotate = style.rotation.map_or_else(String::new, |deg| {
                format!(
                    r#" transform="rotate({} {} {})""#,
                    n(deg),
                    n(at.x),
                    n(at.y)
                )
            });
            writeln!(
                out,
                r#"<text x="{}" y="{}"{}{}>{}</text>"#,
                n(at.x),
                n(at.y),
                text_attrs(style),
                rotate,
                escape(content)
            )
        }
    };
}

/// Serialise a chart to a standalone SVG document.
pub fn to_svg(chart: &RenderedChart) -> String {
    let scaled = chart.scaled_size();
    let mut out = String::new();

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}" font-family="{}">"#,
        n(scaled.w),
        n(scaled.h),
        n(chart.size.w),
        n(chart.size.h),
        FONT
    );
    for p in &chart.primitives {
        write_primitive(&mut out, p);
    }
    out.push_str("</svg>\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Point, Rect, Size};
    use crate::pointer::{GridInverter, HitTester};
    use crate::primitive::Stroke;

    fn chart(primitives: Vec<Primitive>) -> RenderedChart {
        RenderedChart {
            size: Size::new(200.0, 100.0),
            scale: 2.0,
            primitives,
            hit_tester: HitTester::Grid(GridInverter::new(
                0.0,
                0.0,
                Size::new(10.0, 10.0),
                Vec::new(),
                Vec::new(),
            )),
        }
    }

    #[test]
    fn header_scales_size_but_not_view_box() {
        let svg = to_svg(&chart(Vec::new()));
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="400" height="200" viewBox="0 0 200 100""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn primitives_serialise_with_their_styles() {
        let svg = to_svg(&chart(vec![
            Primitive::outline(Rect::new(1.0, 2.0, 3.0, 4.5), Stroke::thin(Color::BLACK)),
            Primitive::Line {
                from: Point::new(0.0, 0.0),
                to: Point::new(10.0, 0.0),
                stroke: Stroke::thin(Color::GRAY),
                dash: Some(4.0),
                opacity: 0.25,
            },
            Primitive::text(
                Point::new(5.0, 6.0),
                "a<b & c",
                TextStyle::default().aligned(Anchor::End, Baseline::Middle).rotated(270.0),
            ),
        ]));

        assert!(svg.contains(
            r##"<rect x="1" y="2" width="3" height="4.5" fill="none" stroke="#000000""##
        ));
        assert!(svg.contains(r#"stroke-dasharray="4""#));
        assert!(svg.contains(r#"opacity="0.25""#));
        assert!(svg.contains(r#"text-anchor="end" dominant-baseline="central""#));
        assert!(svg.contains(r#"transform="rotate(270 5 6)""#));
        assert!(svg.contains("a&lt;b &amp; c"));
    }

    #[test]
    fn translucent_colors_get_an_opacity_attribute() {
        let svg = to_svg(&chart(vec![Primitive::circle(
            Point::new(1.0, 1.0),
            2.0,
            Color::rgba(255, 0, 0, 51),
        )]));
        assert!(svg.contains(r##"fill="#ff0000" fill-opacity="0.2""##));
    }
}
