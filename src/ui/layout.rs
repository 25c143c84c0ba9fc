//! Layout utilities and common components

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Draw a full-screen fallback message (loading, signed out, load errors)
pub fn draw_placeholder(frame: &mut Frame, message: &str, theme: &Theme) {
    let area = frame.area();

    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);

    let box_area = centered_rect(60, 20, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let text_area =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1), Constraint::Fill(1)])
            .split(inner)[1];
    let placeholder = Paragraph::new(message)
        .style(Style::default().fg(theme.fg_muted))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(placeholder, text_area);
}

/// Create a centered rectangle with the given percentage of width and height
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Word-wrap `text` to `width` columns
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    textwrap::wrap(text, width).into_iter().map(|line| line.into_owned()).collect()
}

/// Scroll offset that keeps line `target` visible in a view `height` lines tall
pub fn scroll_to_show(target: usize, height: usize) -> u16 {
    let margin = 2;
    if height == 0 || target + margin < height {
        0
    } else {
        (target + margin + 1 - height).min(u16::MAX as usize) as u16
    }
}
