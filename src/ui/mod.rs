//! Terminal preview of a rendered chart.
//!
//! The chart is rasterised into half-block cells inside a bordered frame,
//! with a status line for tooltips and a keymap bar underneath.

mod keymap_bar;
pub mod raster;
pub mod source;
mod status_bar;
mod theme;
pub mod viewer;

use crate::color::Color;
use keymap_bar::draw_keymap;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color as TermColor, Style},
    widgets::{Block, Borders},
    Frame,
};
use status_bar::draw_status;

pub use source::ChartSource;
pub use theme::{Theme, ThemeColors};
pub use viewer::Viewer;

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb(c.r, c.g, c.b)
}

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, viewer: &mut Viewer) {
    let colors = ThemeColors::from_theme(viewer.theme);

    // Main layout with status bar and key map bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
        .split(f.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(viewer.title())
        .title_style(Style::default().fg(colors.heading))
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg));
    let inner = block.inner(chunks[0]);
    f.render_widget(block, chunks[0]);

    let raster = viewer.raster(inner);
    let (cols, rows) = raster.size();
    for row in 0..rows {
        for col in 0..cols {
            let (top, bottom) = raster.cell(col, row);
            if let Some(cell) = f.buffer_mut().cell_mut((inner.x + col, inner.y + row)) {
                cell.set_char('▀')
                    .set_fg(term_color(top))
                    .set_bg(term_color(bottom));
            }
        }
    }
    for text in raster.texts() {
        let y = inner.y + text.row;
        for (i, ch) in text.content.chars().enumerate() {
            let col = text.col as usize + i;
            if col >= cols as usize {
                break;
            }
            let x = inner.x + col as u16;
            if let Some(cell) = f.buffer_mut().cell_mut((x, y)) {
                let (_, bottom) = raster.cell(col as u16, text.row);
                cell.set_char(ch)
                    .set_fg(term_color(text.color))
                    .set_bg(term_color(bottom));
            }
        }
    }

    draw_status(f, chunks[1], &viewer.status, viewer.tooltip(), &colors);
    draw_keymap(f, chunks[2], &colors);
}
