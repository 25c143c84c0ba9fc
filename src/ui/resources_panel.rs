//! Resources tab: chapter links and reading material

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::layout::wrap_text;
use crate::course::model::Chapter;
use crate::theme::Theme;

pub fn draw(frame: &mut Frame, area: Rect, chapter: &Chapter, theme: &Theme) {
    let lines = resource_lines(chapter, area.width as usize, theme);
    frame.render_widget(Paragraph::new(lines), area);
}

fn resource_lines(chapter: &Chapter, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let heading = Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from(Span::styled("Resources", heading))];

    if chapter.resources.is_empty() {
        lines.push(Line::from(Span::styled(
            "No resources for this chapter.",
            Style::default().fg(theme.fg_muted),
        )));
    }
    for resource in &chapter.resources {
        lines.push(Line::from(vec![
            Span::styled("\u{2022} ", Style::default().fg(theme.accent_secondary)),
            Span::styled(resource.title.clone(), Style::default().fg(theme.fg_secondary)),
            Span::styled(format!("  {}", resource.url), Style::default().fg(theme.info)),
        ]));
    }

    if !chapter.content.trim().is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Notes", heading)));
        for paragraph in chapter.content.split("\n\n") {
            for line in wrap_text(paragraph.trim(), width) {
                lines.push(Line::from(Span::styled(line, Style::default().fg(theme.fg_secondary))));
            }
            lines.push(Line::from(""));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::model::Resource;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn empty_chapter_has_placeholder() {
        let lines = resource_lines(&Chapter::new("c1", "Intro"), 40, &Theme::default());
        assert!(text(&lines).contains("No resources for this chapter."));
    }

    #[test]
    fn lists_resources_and_notes() {
        let mut chapter = Chapter::new("c1", "Intro");
        chapter.resources.push(Resource {
            title: "Style guide".into(),
            url: "https://example.com/guide".into(),
        });
        chapter.content = "First paragraph.\n\nSecond paragraph.".into();

        let rendered = text(&resource_lines(&chapter, 40, &Theme::default()));
        assert!(rendered.contains("Style guide  https://example.com/guide"));
        assert!(rendered.contains("Notes"));
        assert!(rendered.contains("Second paragraph."));
    }
}
