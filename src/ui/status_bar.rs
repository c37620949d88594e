//! Status bar UI component.

use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the status bar: the hover tooltip when there is one, else `status`.
pub(super) fn draw_status(
    f: &mut Frame<'_>,
    area: Rect,
    status: &str,
    tooltip: Option<&str>,
    colors: &ThemeColors,
) {
    let (text, fg) = match tooltip {
        Some(t) => (t, colors.highlight),
        None => (status, colors.status_fg),
    };

    let paragraph = Paragraph::new(text.to_string()).style(Style::default().fg(fg).bg(colors.status_bg));

    f.render_widget(paragraph, area);
}
