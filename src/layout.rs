//! Margin and panel layout shared by every chart.
//!
//! A chart is an inner plotting rectangle surrounded by optional auxiliary
//! panels (dendrograms, labels, color bars, legends, group bands). Each side's
//! margin is its base margin plus `size + padding` for every enabled panel on
//! that side. Panels stack outward from the data edge in a fixed rank:
//!
//! ```text
//! GroupBand < RowLabels/ColLabels < RowTree/ColTree < ColorBar < Legend
//! ```
//!
//! Two panels with the same rank on the same side keep their declaration
//! order, so the result never depends on iteration accidents.

use crate::error::{PlotError, Result};
use crate::geom::{Rect, Size};
use std::fmt;
use tracing::{debug, warn};

/// Edge of the inner plotting rectangle a panel attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Above the data.
    Top,
    /// Right of the data.
    Right,
    /// Below the data.
    Bottom,
    /// Left of the data.
    Left,
}

impl Side {
    /// All sides, in margin order.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Whether panels on this side run along the rows (left or right edge).
    pub fn is_vertical(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        };
        f.write_str(name)
    }
}

/// The kinds of auxiliary panel a chart can reserve space for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    /// Dendrogram over the rows.
    RowTree,
    /// Row name labels.
    RowLabels,
    /// Dendrogram over the columns.
    ColTree,
    /// Column name labels.
    ColLabels,
    /// Group color band along the columns.
    GroupBand,
    /// Color scale bar.
    ColorBar,
    /// Group and dot-size legends.
    Legend,
}

impl PanelKind {
    /// Stacking rank, lower sits closer to the data.
    pub fn rank(self) -> u8 {
        match self {
            PanelKind::GroupBand => 0,
            PanelKind::RowLabels | PanelKind::ColLabels => 1,
            PanelKind::RowTree | PanelKind::ColTree => 2,
            PanelKind::ColorBar => 3,
            PanelKind::Legend => 4,
        }
    }

    /// Whether this panel can attach to `side`.
    ///
    /// Row panels follow the rows and so sit left or right; column panels
    /// sit above or below.
    pub fn allows(self, side: Side) -> bool {
        match self {
            PanelKind::RowTree | PanelKind::RowLabels => side.is_vertical(),
            PanelKind::ColTree | PanelKind::ColLabels | PanelKind::GroupBand => {
                !side.is_vertical()
            }
            PanelKind::ColorBar | PanelKind::Legend => true,
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PanelKind::RowTree => "row tree",
            PanelKind::RowLabels => "row labels",
            PanelKind::ColTree => "column tree",
            PanelKind::ColLabels => "column labels",
            PanelKind::GroupBand => "group band",
            PanelKind::ColorBar => "color bar",
            PanelKind::Legend => "legend",
        };
        f.write_str(name)
    }
}

/// Whether a panel is shown, and where.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanelPlacement {
    /// Not drawn, reserves nothing.
    #[default]
    Off,
    /// Attached to a side with the given thickness in pixels.
    Side(Side, f64),
}

impl PanelPlacement {
    /// The side, if enabled.
    pub fn side(&self) -> Option<Side> {
        match self {
            PanelPlacement::Off => None,
            PanelPlacement::Side(side, _) => Some(*side),
        }
    }

    /// Whether the panel is enabled.
    pub fn is_on(&self) -> bool {
        !matches!(self, PanelPlacement::Off)
    }
}

/// One panel request handed to the calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelSpec {
    /// Panel kind.
    pub kind: PanelKind,
    /// Placement.
    pub placement: PanelPlacement,
}

impl PanelSpec {
    /// Create a panel request.
    pub fn new(kind: PanelKind, placement: PanelPlacement) -> Self {
        Self { kind, placement }
    }
}

/// Four margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
}

impl Margins {
    /// Same margin on every side.
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    /// Margin on `side`.
    pub fn get(&self, side: Side) -> f64 {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    fn get_mut(&mut self, side: Side) -> &mut f64 {
        match side {
            Side::Top => &mut self.top,
            Side::Right => &mut self.right,
            Side::Bottom => &mut self.bottom,
            Side::Left => &mut self.left,
        }
    }
}

/// Constants the calculator works from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Margins before any panel is added.
    pub base: Margins,
    /// Gap between the data and the first panel and between panels.
    pub padding: f64,
    /// Pixel size of one matrix cell for grid charts.
    pub block: Size,
    /// Floor on the canvas height reserved for the data area.
    pub min_inner_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base: Margins::uniform(20.0),
            padding: 10.0,
            block: Size::new(30.0, 30.0),
            min_inner_height: 0.0,
        }
    }
}

/// A panel with its resolved rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedPanel {
    /// Panel kind.
    pub kind: PanelKind,
    /// Side it is attached to.
    pub side: Side,
    /// Pixel rectangle, spanning the data edge it is attached to.
    pub rect: Rect,
}

/// Output of [`LayoutCalculator`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    /// Resolved margins.
    pub margins: Margins,
    /// Inner plotting rectangle in canvas pixels.
    pub inner: Rect,
    /// Unscaled canvas size.
    pub canvas: Size,
    /// Enabled panels in placement order.
    pub panels: Vec<PlacedPanel>,
}

impl ChartLayout {
    /// First placed panel of `kind`.
    pub fn panel(&self, kind: PanelKind) -> Option<&PlacedPanel> {
        self.panels.iter().find(|p| p.kind == kind)
    }

    /// Canvas size multiplied by the display scale.
    pub fn scaled_canvas(&self, scale: f64) -> Size {
        self.canvas.scaled(scale)
    }
}

/// Computes margins, inner rectangle and panel rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutCalculator {
    config: LayoutConfig,
}

impl LayoutCalculator {
    /// Create a calculator.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Layout for a `rows x cols` grid of blocks.
    pub fn compute(&self, rows: usize, cols: usize, panels: &[PanelSpec]) -> Result<ChartLayout> {
        let inner = Size::new(
            cols as f64 * self.config.block.w,
            rows as f64 * self.config.block.h,
        );
        self.compute_for_inner(inner, panels)
    }

    /// Layout around an inner area of known size.
    pub fn compute_for_inner(&self, inner: Size, panels: &[PanelSpec]) -> Result<ChartLayout> {
        let padding = self.config.padding;

        let mut enabled = Vec::new();
        for (order, spec) in panels.iter().enumerate() {
            if let PanelPlacement::Side(side, size) = spec.placement {
                if !spec.kind.allows(side) {
                    return Err(PlotError::InvalidPanelSide {
                        kind: spec.kind,
                        side,
                    });
                }
                if !size.is_finite() || size < 0.0 {
                    return Err(PlotError::InvalidPanelSize {
                        kind: spec.kind,
                        size,
                    });
                }
                enabled.push((order, spec.kind, side, size));
            }
        }

        // stable: equal keys keep declaration order
        enabled.sort_by_key(|&(order, kind, side, _)| (side as u8, kind.rank(), order));

        for pair in enabled.windows(2) {
            let (_, a, side_a, _) = pair[0];
            let (_, b, side_b, _) = pair[1];
            if side_a == side_b && a.rank() == b.rank() {
                warn!(
                    "Panels {} and {} share the {} side at the same rank, using declaration order",
                    a, b, side_a
                );
            }
        }

        let mut margins = self.config.base;
        let mut offsets = Margins::default();
        let mut placed_sizes = Vec::with_capacity(enabled.len());

        for &(_, kind, side, size) in &enabled {
            let offset = offsets.get_mut(side);
            let gap = padding + *offset;
            *offset += size + padding;
            *margins.get_mut(side) += size + padding;
            placed_sizes.push((kind, side, size, gap));
        }

        let inner_rect = Rect::new(margins.left, margins.top, inner.w, inner.h);

        let panels = placed_sizes
            .into_iter()
            .map(|(kind, side, size, gap)| {
                let rect = match side {
                    Side::Right => Rect::new(inner_rect.right() + gap, inner_rect.y, size, inner.h),
                    Side::Left => Rect::new(inner_rect.x - gap - size, inner_rect.y, size, inner.h),
                    Side::Top => Rect::new(inner_rect.x, inner_rect.y - gap - size, inner.w, size),
                    Side::Bottom => {
                        Rect::new(inner_rect.x, inner_rect.bottom() + gap, inner.w, size)
                    }
                };
                PlacedPanel { kind, side, rect }
            })
            .collect();

        let canvas = Size::new(
            margins.left + inner.w + margins.right,
            margins.top + inner.h.max(self.config.min_inner_height) + margins.bottom,
        );

        debug!(
            "Layout margins t={} r={} b={} l={}, inner {}x{}, canvas {}x{}",
            margins.top, margins.right, margins.bottom, margins.left, inner.w, inner.h, canvas.w,
            canvas.h
        );

        Ok(ChartLayout {
            margins,
            inner: inner_rect,
            canvas,
            panels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator(base: Margins) -> LayoutCalculator {
        LayoutCalculator::new(LayoutConfig {
            base,
            padding: 10.0,
            block: Size::new(30.0, 30.0),
            min_inner_height: 0.0,
        })
    }

    fn on(kind: PanelKind, side: Side, size: f64) -> PanelSpec {
        PanelSpec::new(kind, PanelPlacement::Side(side, size))
    }

    #[test]
    fn left_tree_and_right_labels_scenario() {
        let base = Margins {
            top: 0.0,
            right: 0.0,
            bottom: 0.0,
            left: 10.0,
        };
        let layout = calculator(base)
            .compute(
                4,
                3,
                &[
                    on(PanelKind::RowTree, Side::Left, 100.0),
                    on(PanelKind::RowLabels, Side::Right, 80.0),
                ],
            )
            .unwrap();

        assert_eq!(layout.margins.left, 120.0);
        assert_eq!(layout.margins.right, 90.0);
        assert_eq!(layout.inner.w, 90.0);
        assert_eq!(layout.inner.h, 120.0);
        assert_eq!(layout.canvas.w, 300.0);

        let tree = layout.panel(PanelKind::RowTree).unwrap();
        assert_eq!(tree.rect, Rect::new(10.0, 0.0, 100.0, 120.0));
        let labels = layout.panel(PanelKind::RowLabels).unwrap();
        assert_eq!(labels.rect.x, 120.0 + 90.0 + 10.0);
    }

    #[test]
    fn extra_right_panel_only_grows_the_right_margin() {
        let calc = calculator(Margins::uniform(20.0));
        let base = [
            on(PanelKind::RowTree, Side::Left, 100.0),
            on(PanelKind::ColLabels, Side::Top, 200.0),
        ];
        let before = calc.compute(5, 7, &base).unwrap();

        let mut more = base.to_vec();
        more.push(on(PanelKind::ColorBar, Side::Right, 64.0));
        let after = calc.compute(5, 7, &more).unwrap();

        assert_eq!(after.margins.right, before.margins.right + 64.0 + 10.0);
        assert_eq!(after.margins.left, before.margins.left);
        assert_eq!(after.margins.top, before.margins.top);
        assert_eq!(after.margins.bottom, before.margins.bottom);
    }

    #[test]
    fn off_panels_reserve_nothing() {
        let calc = calculator(Margins::uniform(20.0));
        let layout = calc
            .compute(
                2,
                2,
                &[PanelSpec::new(PanelKind::Legend, PanelPlacement::Off)],
            )
            .unwrap();

        assert_eq!(layout.margins, Margins::uniform(20.0));
        assert!(layout.panels.is_empty());
    }

    #[test]
    fn panels_stack_outward_by_rank_not_declaration() {
        let calc = calculator(Margins::uniform(0.0));
        let layout = calc
            .compute(
                2,
                2,
                &[
                    on(PanelKind::Legend, Side::Right, 50.0),
                    on(PanelKind::RowLabels, Side::Right, 80.0),
                    on(PanelKind::ColorBar, Side::Right, 30.0),
                ],
            )
            .unwrap();

        let x = |k| layout.panel(k).unwrap().rect.x;
        // inner right edge is 60
        assert_eq!(x(PanelKind::RowLabels), 70.0);
        assert_eq!(x(PanelKind::ColorBar), 70.0 + 80.0 + 10.0);
        assert_eq!(x(PanelKind::Legend), 160.0 + 30.0 + 10.0);
    }

    #[test]
    fn same_rank_falls_back_to_declaration_order() {
        let calc = calculator(Margins::uniform(0.0));
        let panels = [
            on(PanelKind::Legend, Side::Bottom, 40.0),
            on(PanelKind::Legend, Side::Bottom, 25.0),
        ];

        let first = calc.compute(3, 3, &panels).unwrap();
        let again = calc.compute(3, 3, &panels).unwrap();
        assert_eq!(first, again);

        let ys: Vec<f64> = first.panels.iter().map(|p| p.rect.y).collect();
        assert_eq!(ys, vec![90.0 + 10.0, 90.0 + 10.0 + 40.0 + 10.0]);
        assert_eq!(first.panels[0].rect.h, 40.0);
    }

    #[test]
    fn top_and_left_panels_sit_before_the_inner_rect() {
        let calc = calculator(Margins::uniform(20.0));
        let layout = calc
            .compute(
                3,
                4,
                &[
                    on(PanelKind::ColTree, Side::Top, 100.0),
                    on(PanelKind::GroupBand, Side::Top, 15.0),
                ],
            )
            .unwrap();

        assert_eq!(layout.margins.top, 20.0 + 115.0 + 20.0);
        let band = layout.panel(PanelKind::GroupBand).unwrap().rect;
        let tree = layout.panel(PanelKind::ColTree).unwrap().rect;
        assert_eq!(band.bottom(), layout.inner.y - 10.0);
        assert_eq!(tree.bottom(), band.y - 10.0);
        assert_eq!(tree.y, 20.0);
    }

    #[test]
    fn row_panels_cannot_go_on_top() {
        let err = calculator(Margins::default())
            .compute(1, 1, &[on(PanelKind::RowTree, Side::Top, 100.0)])
            .unwrap_err();
        assert!(matches!(
            err,
            PlotError::InvalidPanelSide {
                kind: PanelKind::RowTree,
                side: Side::Top
            }
        ));
    }

    #[test]
    fn negative_size_is_rejected() {
        let err = calculator(Margins::default())
            .compute(1, 1, &[on(PanelKind::Legend, Side::Right, -1.0)])
            .unwrap_err();
        assert!(matches!(err, PlotError::InvalidPanelSize { .. }));
    }

    #[test]
    fn minimum_height_floors_the_canvas_only() {
        let calc = LayoutCalculator::new(LayoutConfig {
            min_inner_height: 200.0,
            ..LayoutConfig::default()
        });
        let layout = calc.compute(1, 2, &[]).unwrap();

        assert_eq!(layout.inner.h, 30.0);
        assert_eq!(layout.canvas.h, 20.0 + 200.0 + 20.0);
        assert_eq!(layout.scaled_canvas(2.0).w, 2.0 * (20.0 + 60.0 + 20.0));
    }
}
