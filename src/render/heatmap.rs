//! Heatmaps and dot plots: a matrix drawn as a grid of blocks in leaf order.

use crate::axis::Axis;
use crate::color::Color;
use crate::data::{column_colors, ClusterFrame, ClusterTree, Group};
use crate::dendrogram::DendrogramMapper;
use crate::error::{PlotError, Result};
use crate::geom::{Point, Rect};
use crate::layout::{
    ChartLayout, LayoutCalculator, PanelKind, PanelPlacement, PanelSpec, PlacedPanel, Side,
};
use crate::pointer::{GridInverter, HitTester, Viewport};
use crate::primitive::{Anchor, Baseline, Primitive, RenderedChart, Stroke, TextStyle};
use crate::props::HeatmapProps;
use tracing::debug;

use super::{colorbar, legend};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellStyle {
    Square,
    Dot,
}

/// Render a clustered heatmap: one filled block per cell.
pub fn render_heatmap(
    frame: &ClusterFrame,
    groups: &[Group],
    props: &HeatmapProps,
) -> Result<RenderedChart> {
    render_grid(frame, groups, props, CellStyle::Square)
}

/// Render a dot plot: one circle per cell, radius scaled by the frame's
/// percent matrix.
pub fn render_dot_plot(
    frame: &ClusterFrame,
    groups: &[Group],
    props: &HeatmapProps,
) -> Result<RenderedChart> {
    if frame.percent().is_none() {
        return Err(PlotError::MissingPercent);
    }
    render_grid(frame, groups, props, CellStyle::Dot)
}

fn tree_placement(tree: Option<&ClusterTree>, placement: PanelPlacement) -> PanelPlacement {
    match tree {
        Some(_) => placement,
        None => PanelPlacement::Off,
    }
}

fn panel_specs(
    frame: &ClusterFrame,
    show_groups: bool,
    style: CellStyle,
    props: &HeatmapProps,
) -> Vec<PanelSpec> {
    let band = if show_groups {
        PanelPlacement::Side(Side::Top, props.groups.height)
    } else {
        PanelPlacement::Off
    };
    // squares without groups have no legend entries to draw
    let legend = if show_groups || style == CellStyle::Dot {
        props.legend
    } else {
        PanelPlacement::Off
    };

    vec![
        PanelSpec::new(
            PanelKind::RowTree,
            tree_placement(frame.row_tree(), props.row_tree),
        ),
        PanelSpec::new(PanelKind::RowLabels, props.row_labels.placement),
        PanelSpec::new(
            PanelKind::ColTree,
            tree_placement(frame.col_tree(), props.col_tree),
        ),
        PanelSpec::new(PanelKind::ColLabels, props.col_labels.placement),
        PanelSpec::new(PanelKind::GroupBand, band),
        PanelSpec::new(PanelKind::ColorBar, props.colorbar.placement),
        PanelSpec::new(PanelKind::Legend, legend),
    ]
}

fn render_grid(
    frame: &ClusterFrame,
    groups: &[Group],
    props: &HeatmapProps,
    style: CellStyle,
) -> Result<RenderedChart> {
    let main = frame.main();
    let (rows, cols) = main.shape();
    let row_order = frame.row_order();
    let col_order = frame.col_order();

    // fails fast on group indices outside the matrix
    let group_colors = column_colors(groups, cols)?;
    let show_groups = props.groups.show && !groups.is_empty();

    let layout = LayoutCalculator::new(props.layout_config()).compute(
        rows,
        cols,
        &panel_specs(frame, show_groups, style, props),
    )?;
    let inner = layout.inner;
    let bw = props.block.w;
    let bh = props.block.h;

    let scale = Axis::x().with_domain(props.range, None)?.with_clip(true);

    let mut out = Vec::new();

    if let (Some(tree), Some(panel)) = (frame.col_tree(), layout.panel(PanelKind::ColTree)) {
        out.extend(tree_lines(tree, panel));
    }

    if show_groups {
        if let Some(band) = layout.panel(PanelKind::GroupBand) {
            for (ci, &c) in col_order.iter().enumerate() {
                if let Some(color) = group_colors[c] {
                    out.push(Primitive::filled_rect(
                        Rect::new(inner.x + ci as f64 * bw, band.rect.y, bw, band.rect.h),
                        color,
                    ));
                }
            }
        }
    }

    if let (Some(tree), Some(panel)) = (frame.row_tree(), layout.panel(PanelKind::RowTree)) {
        out.extend(tree_lines(tree, panel));
    }

    if let Some(panel) = layout.panel(PanelKind::RowLabels) {
        let (x, anchor) = match panel.side {
            Side::Left => (panel.rect.right(), Anchor::End),
            _ => (panel.rect.x, Anchor::Start),
        };
        let text = TextStyle::default().aligned(anchor, Baseline::Middle);
        for (ri, &r) in row_order.iter().enumerate() {
            out.push(Primitive::text(
                Point::new(x, inner.y + ri as f64 * bh + 0.5 * bh),
                main.row_names()[r].clone(),
                text,
            ));
        }
    }

    for (ri, &r) in row_order.iter().enumerate() {
        for (ci, &c) in col_order.iter().enumerate() {
            let v = main.get(r, c);
            let fill = if v.is_nan() {
                props.no_data
            } else {
                props.cmap.get(scale.norm(v))
            };
            let cell = Rect::new(inner.x + ci as f64 * bw, inner.y + ri as f64 * bh, bw, bh);

            match style {
                CellStyle::Square => out.push(Primitive::filled_rect(cell, fill)),
                CellStyle::Dot => {
                    let pct = frame.percent().map_or(f64::NAN, |p| p.get(r, c));
                    let radius = if pct.is_nan() { 0.0 } else { 0.5 * bw * pct };
                    out.push(Primitive::circle(
                        Point::new(cell.x + 0.5 * bw, cell.y + 0.5 * bh),
                        radius,
                        fill,
                    ));
                }
            }
        }
    }

    if props.grid.show {
        let stroke = Stroke::thin(props.grid.color);
        for k in 1..rows {
            let y = inner.y + k as f64 * bh;
            out.push(Primitive::line(
                Point::new(inner.x, y),
                Point::new(inner.right(), y),
                stroke,
            ));
        }
        for k in 1..cols {
            let x = inner.x + k as f64 * bw;
            out.push(Primitive::line(
                Point::new(x, inner.y),
                Point::new(x, inner.bottom()),
                stroke,
            ));
        }
    }

    if props.border.show {
        out.push(Primitive::outline(
            inner,
            Stroke::new(props.border.color, props.border.width),
        ));
    }

    if let Some(panel) = layout.panel(PanelKind::ColLabels) {
        // rotated text reads upward, so labels below the data end at the panel top
        let (y, anchor) = match panel.side {
            Side::Bottom => (panel.rect.y, Anchor::End),
            _ => (panel.rect.bottom(), Anchor::Start),
        };
        for (ci, &c) in col_order.iter().enumerate() {
            let fill = match group_colors[c] {
                Some(color) if props.col_labels.colored => color,
                _ => Color::BLACK,
            };
            out.push(Primitive::text(
                Point::new(inner.x + ci as f64 * bw + 0.5 * bw, y),
                main.col_names()[c].clone(),
                TextStyle::default()
                    .filled(fill)
                    .aligned(anchor, Baseline::Middle)
                    .rotated(270.0),
            ));
        }
    }

    if let Some(panel) = layout.panel(PanelKind::ColorBar) {
        let at = Point::new(panel.rect.x, panel.rect.y);
        let bar = if panel.side.is_vertical() {
            colorbar::vertical(&props.cmap, props.range, at, props.colorbar.bar_size)?
        } else {
            colorbar::horizontal(&props.cmap, props.range, at, props.colorbar.bar_size)?
        };
        out.extend(bar);
    }

    if let Some(panel) = layout.panel(PanelKind::Legend) {
        out.extend(legends(groups, show_groups, style, props, panel)?);
    }

    debug!(
        "Rendered {}x{} grid ({:?}) into {} primitives",
        rows,
        cols,
        style,
        out.len()
    );

    Ok(finish(layout, props, out, row_order, col_order))
}

fn tree_lines(tree: &ClusterTree, panel: &PlacedPanel) -> Vec<Primitive> {
    DendrogramMapper::for_panel(panel)
        .segments(tree)
        .into_iter()
        .map(|s| Primitive::line(s.from, s.to, Stroke::thin(Color::BLACK)))
        .collect()
}

fn legends(
    groups: &[Group],
    show_groups: bool,
    style: CellStyle,
    props: &HeatmapProps,
    panel: &PlacedPanel,
) -> Result<Vec<Primitive>> {
    let block = props.block.w.min(props.block.h);
    let at = Point::new(panel.rect.x, panel.rect.y);
    let mut out = Vec::new();

    if show_groups {
        out.extend(legend::group_legend(groups, at, block, props.padding));
    }

    if style == CellStyle::Dot {
        let offset = if show_groups {
            legend::entries_height(groups.len() + 1, block, props.padding)
        } else {
            0.0
        };
        out.extend(legend::dot_legend(
            &props.dot_legend,
            Point::new(at.x, at.y + offset),
            block,
            props.padding,
            0.5 * props.block.w,
        )?);
    }

    Ok(out)
}

fn finish(
    layout: ChartLayout,
    props: &HeatmapProps,
    primitives: Vec<Primitive>,
    row_order: Vec<usize>,
    col_order: Vec<usize>,
) -> RenderedChart {
    let inverter = GridInverter::new(
        layout.margins.left,
        layout.margins.top,
        props.block,
        row_order,
        col_order,
    );

    RenderedChart {
        size: layout.canvas,
        scale: props.scale,
        primitives,
        hit_tester: HitTester::Grid(inverter)
            .with_viewport(Viewport::new(Point::default(), props.scale)),
    }
}
