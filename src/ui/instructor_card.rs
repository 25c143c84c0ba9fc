//! Instructor card with avatar initial, title and bio

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::layout::wrap_text;
use crate::course::model::Course;
use crate::theme::Theme;

const DEFAULT_TITLE: &str = "Instructor";

/// Avatar badge: the instructor's initial in brackets
pub fn avatar(course: &Course, theme: &Theme) -> Span<'static> {
    Span::styled(
        format!(" {} ", course.teacher_initial()),
        Style::default()
            .fg(theme.bg_primary)
            .bg(theme.accent_secondary)
            .add_modifier(Modifier::BOLD),
    )
}

pub fn draw(frame: &mut Frame, area: Rect, course: &Course, theme: &Theme) {
    let block = Block::default()
        .title(" Instructor ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(vec![
            avatar(course, theme),
            Span::raw(" "),
            Span::styled(
                course.teacher_name.clone(),
                Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("    {}", course.teacher_title.as_deref().unwrap_or(DEFAULT_TITLE)),
            Style::default().fg(theme.fg_muted),
        )),
        Line::from(""),
    ];

    if let Some(bio) = &course.teacher_bio {
        for line in wrap_text(bio, inner.width as usize) {
            lines.push(Line::from(Span::styled(line, Style::default().fg(theme.fg_secondary))));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
