//! The data and props behind the previewed chart.

use crate::color::Palette;
use crate::data::{ClusterFrame, Group};
use crate::error::Result;
use crate::format::format_value;
use crate::pointer::Hit;
use crate::primitive::RenderedChart;
use crate::props::{BarProps, HeatmapProps, ScatterProps, VolcanoProps};
use crate::render::{
    render_bar, render_dot_plot, render_heatmap, render_scatter, render_volcano, BarData,
    ScatterData,
};

/// A chart kind together with everything needed to render it again.
#[derive(Debug, Clone)]
pub enum ChartSource {
    /// Clustered heatmap.
    Heatmap {
        /// Matrix and trees.
        frame: ClusterFrame,
        /// Column groups.
        groups: Vec<Group>,
        /// Display props.
        props: HeatmapProps,
    },
    /// Dot plot; the frame carries a percent matrix.
    DotPlot {
        /// Matrix, percent matrix and trees.
        frame: ClusterFrame,
        /// Column groups.
        groups: Vec<Group>,
        /// Display props.
        props: HeatmapProps,
    },
    /// Scatter plot.
    Scatter {
        /// Points.
        data: ScatterData,
        /// Display props.
        props: ScatterProps,
    },
    /// Volcano plot.
    Volcano {
        /// Fold change on x, significance on y.
        data: ScatterData,
        /// Display props.
        props: VolcanoProps,
    },
    /// Horizontal bar chart.
    Bar {
        /// Categories and values.
        data: BarData,
        /// Display props.
        props: BarProps,
    },
}

impl ChartSource {
    /// Short chart kind name.
    pub fn title(&self) -> &'static str {
        match self {
            ChartSource::Heatmap { .. } => "Heatmap",
            ChartSource::DotPlot { .. } => "Dot plot",
            ChartSource::Scatter { .. } => "Scatter",
            ChartSource::Volcano { .. } => "Volcano",
            ChartSource::Bar { .. } => "Bar",
        }
    }

    /// Render from scratch with the current props.
    pub fn render(&self) -> Result<RenderedChart> {
        match self {
            ChartSource::Heatmap {
                frame,
                groups,
                props,
            } => render_heatmap(frame, groups, props),
            ChartSource::DotPlot {
                frame,
                groups,
                props,
            } => render_dot_plot(frame, groups, props),
            ChartSource::Scatter { data, props } => render_scatter(data, props),
            ChartSource::Volcano { data, props } => render_volcano(data, props),
            ChartSource::Bar { data, props } => render_bar(data, props),
        }
    }

    /// Swap the color map for a named palette.
    pub fn set_palette(&mut self, palette: Palette) {
        let cmap = palette.colormap();
        match self {
            ChartSource::Heatmap { props, .. } | ChartSource::DotPlot { props, .. } => {
                props.cmap = cmap
            }
            ChartSource::Scatter { props, .. } => props.cmap = cmap,
            ChartSource::Volcano { props, .. } => props.scatter.cmap = cmap,
            ChartSource::Bar { props, .. } => props.cmap = cmap,
        }
    }

    /// Tooltip text for a hit.
    pub fn describe(&self, hit: &Hit) -> String {
        match (self, hit) {
            (
                ChartSource::Heatmap { frame, .. } | ChartSource::DotPlot { frame, .. },
                Hit::Cell {
                    data_row, data_col, ..
                },
            ) => {
                let main = frame.main();
                if *data_row >= main.rows() || *data_col >= main.cols() {
                    return String::new();
                }
                let mut text = format!(
                    "{} | {}: {}",
                    main.row_names()[*data_row],
                    main.col_names()[*data_col],
                    format_value(main.get(*data_row, *data_col))
                );
                if let Some(pct) = frame.percent() {
                    let p = pct.get(*data_row, *data_col);
                    if p.is_finite() {
                        text.push_str(&format!(" ({:.1}%)", p * 100.0));
                    }
                }
                text
            }
            (
                ChartSource::Scatter { data, .. } | ChartSource::Volcano { data, .. },
                Hit::Point { x, y, index },
            ) => match index.filter(|&i| i < data.len()) {
                Some(i) => format!(
                    "{}  {}: {}  {}: {}",
                    data.names()[i],
                    data.x_name(),
                    format_value(data.x()[i]),
                    data.y_name(),
                    format_value(data.y()[i])
                ),
                None => format!(
                    "{}: {}  {}: {}",
                    data.x_name(),
                    format_value(*x),
                    data.y_name(),
                    format_value(*y)
                ),
            },
            (ChartSource::Bar { data, .. }, Hit::Bar { index }) => {
                match (data.categories().get(*index), data.values().get(*index)) {
                    (Some(name), Some(v)) => format!("{}: {}", name, format_value(*v)),
                    _ => String::new(),
                }
            }
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Matrix;

    fn heatmap() -> ChartSource {
        let main = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        ChartSource::Heatmap {
            frame: ClusterFrame::new(main),
            groups: Vec::new(),
            props: HeatmapProps::default(),
        }
    }

    #[test]
    fn cells_describe_names_and_value() {
        let hit = Hit::Cell {
            row: 0,
            col: 1,
            data_row: 1,
            data_col: 0,
        };
        assert_eq!(heatmap().describe(&hit), "row 2 | col 1: 3.0000");
    }

    #[test]
    fn points_fall_back_to_coordinates() {
        let data = ScatterData::new(vec!["g1".into()], "fc", vec![1.5], "p", vec![2.0]).unwrap();
        let source = ChartSource::Scatter {
            data,
            props: ScatterProps::default(),
        };

        let on = Hit::Point {
            x: 1.4,
            y: 2.1,
            index: Some(0),
        };
        assert_eq!(source.describe(&on), "g1  fc: 1.5000  p: 2.0000");

        let off = Hit::Point {
            x: 0.5,
            y: 0.25,
            index: None,
        };
        assert_eq!(source.describe(&off), "fc: 0.50000  p: 0.25000");
    }

    #[test]
    fn palettes_replace_the_color_map() {
        let mut source = heatmap();
        source.set_palette(Palette::Viridis);
        match &source {
            ChartSource::Heatmap { props, .. } => {
                assert_eq!(props.cmap, Palette::Viridis.colormap())
            }
            _ => unreachable!(),
        }
        assert!(source.render().is_ok());
    }
}
