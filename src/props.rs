//! Display configuration for each chart type.
//!
//! Plain data with documented defaults. Renderers read these by reference
//! and never modify them; override fields with struct update syntax:
//!
//! ```
//! use plotgeom::props::HeatmapProps;
//!
//! let props = HeatmapProps {
//!     range: (-2.0, 2.0),
//!     ..HeatmapProps::default()
//! };
//! assert_eq!(props.padding, 10.0);
//! ```

use crate::axis::Lim;
use crate::color::{Color, ColorMap, Palette};
use crate::geom::Size;
use crate::layout::{LayoutConfig, Margins, PanelPlacement, Side};

/// Grid lines between cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    /// Draw the grid.
    pub show: bool,
    /// Line color.
    pub color: Color,
}

/// Outline around the data area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderStyle {
    /// Draw the border.
    pub show: bool,
    /// Line color.
    pub color: Color,
    /// Line width.
    pub width: f64,
}

/// Row or column name labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPanel {
    /// Side and reserved thickness.
    pub placement: PanelPlacement,
    /// Color column labels by their group.
    pub colored: bool,
}

/// Color scale bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBarProps {
    /// Side and reserved thickness.
    pub placement: PanelPlacement,
    /// Length (`w`) and thickness (`h`) of the gradient bar itself.
    pub bar_size: Size,
}

/// Dot-size legend for dot plots.
#[derive(Debug, Clone, PartialEq)]
pub struct DotLegendProps {
    /// Example sizes, in legend units.
    pub sizes: Vec<f64>,
    /// Legend units mapped onto zero and a full half-block radius.
    pub lim: Lim,
    /// Unit suffix shown after each size.
    pub unit: String,
}

/// Group color band above the columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupBandProps {
    /// Draw the band (and group legend) when groups are given.
    pub show: bool,
    /// Band height.
    pub height: f64,
}

/// Heatmap and dot-plot configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapProps {
    /// Margins before panels.
    pub margin: Margins,
    /// Pixel size of one cell.
    pub block: Size,
    /// Gap between the data and panels and between panels.
    pub padding: f64,
    /// Canvas height floor for the data area, keeps short charts legible.
    pub min_inner_height: f64,
    /// Cell grid.
    pub grid: GridStyle,
    /// Data area outline.
    pub border: BorderStyle,
    /// Values mapped onto the ends of the color map; values outside are clamped.
    pub range: Lim,
    /// Cell shading.
    pub cmap: ColorMap,
    /// Fill for NaN cells.
    pub no_data: Color,
    /// Row names.
    pub row_labels: LabelPanel,
    /// Column names.
    pub col_labels: LabelPanel,
    /// Color bar.
    pub colorbar: ColorBarProps,
    /// Row dendrogram, drawn only when the frame has a row tree.
    pub row_tree: PanelPlacement,
    /// Column dendrogram, drawn only when the frame has a column tree.
    pub col_tree: PanelPlacement,
    /// Group and dot-size legend; left out when a heatmap has no groups.
    pub legend: PanelPlacement,
    /// Dot-size legend entries.
    pub dot_legend: DotLegendProps,
    /// Group band.
    pub groups: GroupBandProps,
    /// Display scale.
    pub scale: f64,
}

impl Default for HeatmapProps {
    fn default() -> Self {
        let block = Size::new(30.0, 30.0);

        Self {
            margin: Margins::uniform(20.0),
            block,
            padding: 10.0,
            min_inner_height: 200.0,
            grid: GridStyle {
                show: true,
                color: Color::GRID,
            },
            border: BorderStyle {
                show: true,
                color: Color::BLACK,
                width: 1.0,
            },
            range: (-3.0, 3.0),
            cmap: Palette::Bwr.colormap(),
            no_data: Color::WHITE,
            row_labels: LabelPanel {
                placement: PanelPlacement::Side(Side::Right, 100.0),
                colored: false,
            },
            col_labels: LabelPanel {
                placement: PanelPlacement::Side(Side::Top, 200.0),
                colored: true,
            },
            colorbar: ColorBarProps {
                placement: PanelPlacement::Side(Side::Right, 100.0),
                bar_size: Size::new(160.0, 16.0),
            },
            row_tree: PanelPlacement::Side(Side::Left, 100.0),
            col_tree: PanelPlacement::Side(Side::Top, 100.0),
            legend: PanelPlacement::Side(Side::Right, 200.0),
            dot_legend: DotLegendProps {
                sizes: vec![25.0, 50.0, 75.0, 100.0],
                lim: (0.0, 100.0),
                unit: "%".to_string(),
            },
            groups: GroupBandProps {
                show: true,
                height: 0.5 * block.h,
            },
            scale: 1.0,
        }
    }
}

impl HeatmapProps {
    /// Layout constants derived from these props.
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            base: self.margin,
            padding: self.padding,
            block: self.block,
            min_inner_height: self.min_inner_height,
        }
    }
}

/// One continuous axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisProps {
    /// Data limits, `None` to fit the data.
    pub domain: Option<Lim>,
    /// Pixel range.
    pub range: Lim,
    /// Explicit ticks replacing the generated ones.
    pub ticks: Option<Vec<f64>>,
    /// Explicit labels, one per tick.
    pub tick_labels: Option<Vec<String>>,
    /// Tick mark length.
    pub tick_size: f64,
    /// Axis line width.
    pub stroke_width: f64,
    /// Line and label color.
    pub color: Color,
    /// Title, `None` to use the column name.
    pub title: Option<String>,
}

impl AxisProps {
    fn with(domain: Option<Lim>, range: Lim) -> Self {
        Self {
            domain,
            range,
            ticks: None,
            tick_labels: None,
            tick_size: 4.0,
            stroke_width: 2.0,
            color: Color::BLACK,
            title: None,
        }
    }
}

/// Scatter markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotProps {
    /// Radius.
    pub size: f64,
    /// Fill when no hue or classification applies.
    pub color: Color,
    /// Fill opacity.
    pub opacity: f64,
}

/// Named point labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelProps {
    /// Text color.
    pub color: Color,
    /// Distance from the marker edge to the text.
    pub offset: f64,
    /// Leader line color.
    pub line_color: Color,
    /// Leader line opacity.
    pub line_opacity: f64,
    /// Row names to label, matched ignoring case.
    pub values: Vec<String>,
}

/// Scatter plot configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterProps {
    /// Margins before panels.
    pub margin: Margins,
    /// Gap between the data and panels.
    pub padding: f64,
    /// Horizontal axis.
    pub x_axis: AxisProps,
    /// Vertical axis.
    pub y_axis: AxisProps,
    /// Markers.
    pub dots: DotProps,
    /// Point labels.
    pub labels: LabelProps,
    /// Hue shading.
    pub cmap: ColorMap,
    /// Color bar shown when a hue column is used.
    pub colorbar: ColorBarProps,
    /// Display scale.
    pub scale: f64,
}

impl Default for ScatterProps {
    fn default() -> Self {
        Self {
            margin: Margins::uniform(100.0),
            padding: 10.0,
            x_axis: AxisProps::with(Some((-20.0, 20.0)), (0.0, 500.0)),
            y_axis: AxisProps::with(Some((0.0, 10.0)), (0.0, 400.0)),
            dots: DotProps {
                size: 3.0,
                color: Color::rgb(0xd9, 0xd9, 0xd9),
                opacity: 0.75,
            },
            labels: LabelProps {
                color: Color::BLACK,
                offset: 15.0,
                line_color: Color::BLACK,
                line_opacity: 0.25,
                values: Vec::new(),
            },
            cmap: Palette::Bwr.colormap(),
            colorbar: ColorBarProps {
                placement: PanelPlacement::Side(Side::Right, 60.0),
                bar_size: Size::new(160.0, 16.0),
            },
            scale: 1.0,
        }
    }
}

/// Significance threshold of a volcano plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdProps {
    /// Whether this threshold takes part in classification.
    pub show: bool,
    /// Values strictly above pass.
    pub threshold: f64,
}

/// Fold change threshold of a volcano plot, which also owns the colors of
/// passing points: the sign of the fold change picks `neg` or `pos`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldChangeProps {
    /// Whether this threshold takes part in classification.
    pub show: bool,
    /// `|logFc|` strictly above passes.
    pub threshold: f64,
    /// Color for passing points with negative fold change.
    pub neg: Color,
    /// Color for passing points with non-negative fold change.
    pub pos: Color,
}

/// Dashed line drawn at the significance threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdLine {
    /// Draw the line.
    pub show: bool,
    /// Line color.
    pub color: Color,
    /// Dash length.
    pub dash: f64,
}

/// Volcano plot configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct VolcanoProps {
    /// Axes, markers and labels.
    pub scatter: ScatterProps,
    /// Data area outline.
    pub border: BorderStyle,
    /// Significance (`-log10 p`) threshold.
    pub log_p: ThresholdProps,
    /// Line at the significance threshold.
    pub log_p_line: ThresholdLine,
    /// Fold change threshold, compared against `|logFc|`.
    pub log_fc: FoldChangeProps,
}

impl Default for VolcanoProps {
    fn default() -> Self {
        Self {
            scatter: ScatterProps {
                cmap: ColorMap::volcano(),
                ..ScatterProps::default()
            },
            border: BorderStyle {
                show: false,
                color: Color::BLACK,
                width: 2.0,
            },
            log_p: ThresholdProps {
                show: true,
                // -log10(0.05)
                threshold: 1.301_029_995_663_98,
            },
            log_p_line: ThresholdLine {
                show: true,
                color: Color::BLACK,
                dash: 4.0,
            },
            log_fc: FoldChangeProps {
                show: true,
                threshold: 1.0,
                neg: Color::rgb(0x33, 0x66, 0xcc),
                pos: Color::rgb(0xe6, 0x2e, 0x00),
            },
        }
    }
}

/// Horizontal bar chart configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BarProps {
    /// Margins before panels; the left margin holds category names.
    pub margin: Margins,
    /// Gap between the data and panels.
    pub padding: f64,
    /// Value axis.
    pub x_axis: AxisProps,
    /// Pixel range of the category axis.
    pub y_range: Lim,
    /// Bar thickness.
    pub bar_width: f64,
    /// Tick mark length on both axes.
    pub tick_size: f64,
    /// Hue shading.
    pub cmap: ColorMap,
    /// Bar fill without hue.
    pub fill: Color,
    /// Color bar shown when a hue column is used.
    pub colorbar: ColorBarProps,
    /// Display scale.
    pub scale: f64,
}

impl Default for BarProps {
    fn default() -> Self {
        Self {
            margin: Margins {
                top: 100.0,
                right: 100.0,
                bottom: 100.0,
                left: 200.0,
            },
            padding: 10.0,
            x_axis: AxisProps {
                tick_size: 5.0,
                ..AxisProps::with(None, (0.0, 500.0))
            },
            y_range: (0.0, 500.0),
            bar_width: 2.0,
            tick_size: 5.0,
            cmap: Palette::Blues.colormap(),
            fill: Color::CORNFLOWER_BLUE,
            colorbar: ColorBarProps {
                placement: PanelPlacement::Side(Side::Right, 60.0),
                bar_size: Size::new(160.0, 16.0),
            },
            scale: 5.0,
        }
    }
}
