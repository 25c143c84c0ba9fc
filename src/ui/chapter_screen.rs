//! Chapter page: header, video, tabbed content and instructor card

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};

use super::{command_line, instructor_card, quiz_panel, resources_panel, video_panel};
use crate::app::state::{AppState, Tab};
use crate::course::data::CourseProgressData;
use crate::course::model::{Chapter, Course, Section};
use crate::theme::Theme;

/// Height of the breadcrumb header
const HEADER_HEIGHT: u16 = 3;

/// Width of the instructor card column
const INSTRUCTOR_WIDTH: u16 = 34;

/// Below this width the instructor card is hidden
const MIN_WIDTH_FOR_INSTRUCTOR: u16 = 90;

/// Draw the chapter page. Callers check that the provider has data first.
pub fn draw<D>(frame: &mut Frame, state: &AppState, data: &D, theme: &Theme)
where
    D: CourseProgressData + ?Sized,
{
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);

    let (Some(course), Some(section), Some(chapter)) =
        (data.course(), data.current_section(), data.current_chapter())
    else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(video_panel::VIDEO_HEIGHT),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(frame, rows[0], course, section, chapter, data, theme);
    video_panel::draw(
        frame,
        rows[1],
        chapter,
        state.playback.as_ref(),
        data.is_chapter_completed(),
        theme,
    );

    let body = create_body_layout(rows[2]);
    draw_tabs(frame, body[0], state, chapter, theme);
    if let Some(card_area) = body.get(1) {
        instructor_card::draw(frame, *card_area, course, theme);
    }

    command_line::draw(frame, rows[3], &state.command_line, theme);
}

/// Split the body into the tab region and, when wide enough, the instructor card
fn create_body_layout(area: Rect) -> Vec<Rect> {
    let constraints = if area.width >= MIN_WIDTH_FOR_INSTRUCTOR {
        vec![Constraint::Min(40), Constraint::Length(INSTRUCTOR_WIDTH)]
    } else {
        vec![Constraint::Min(1)]
    };
    Layout::default().direction(Direction::Horizontal).constraints(constraints).split(area).to_vec()
}

/// Breadcrumb, chapter title and instructor badge
fn draw_header<D>(
    frame: &mut Frame,
    area: Rect,
    course: &Course,
    section: &Section,
    chapter: &Chapter,
    data: &D,
    theme: &Theme,
) where
    D: CourseProgressData + ?Sized,
{
    let muted = Style::default().fg(theme.fg_muted);

    let breadcrumb = Line::from(vec![
        Span::styled(format!("{} / {} / ", course.title, section.section_title), muted),
        Span::styled(chapter.title.clone(), Style::default().fg(theme.accent_secondary)),
    ]);

    let title = Line::from(Span::styled(
        chapter.title.clone(),
        Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
    ));

    let mut instructor = vec![
        instructor_card::avatar(course, theme),
        Span::raw(" "),
        Span::styled(course.teacher_name.clone(), Style::default().fg(theme.fg_secondary)),
    ];
    if let Some(progress) = data.user_progress() {
        instructor.push(Span::styled(
            format!("   Course progress {:.0}%", progress.completion_percent()),
            muted,
        ));
    }

    frame.render_widget(Paragraph::new(vec![breadcrumb, title, Line::from(instructor)]), area);
}

/// Tab bar plus the active tab's body
fn draw_tabs(frame: &mut Frame, area: Rect, state: &AppState, chapter: &Chapter, theme: &Theme) {
    let title = match state.tab {
        Tab::Resources => " Resources Content ",
        Tab::Quiz => " Chapter Quiz ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).split(inner);

    let tabs = Tabs::new(Tab::ALL.iter().map(|t| format!("{} {}", t.index() + 1, t.title())))
        .select(state.tab.index())
        .style(Style::default().fg(theme.fg_muted))
        .highlight_style(
            Style::default()
                .fg(theme.accent_primary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("|");
    frame.render_widget(tabs, rows[0]);

    match state.tab {
        Tab::Resources => resources_panel::draw(frame, rows[1], chapter, theme),
        Tab::Quiz => quiz_panel::draw(frame, rows[1], state, theme),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_layout_includes_instructor_card() {
        let chunks = create_body_layout(Rect::new(0, 0, 120, 30));
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].width, INSTRUCTOR_WIDTH);
    }

    #[test]
    fn narrow_layout_hides_instructor_card() {
        let chunks = create_body_layout(Rect::new(0, 0, 80, 30));
        assert_eq!(chunks.len(), 1);
    }
}
