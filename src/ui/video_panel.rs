//! Video player region

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::course::model::Chapter;
use crate::course::playback::Playback;
use crate::course::tracker::COMPLETION_THRESHOLD;
use crate::theme::Theme;

/// Height of the video region including borders
pub const VIDEO_HEIGHT: u16 = 6;

/// Draw the player for `chapter`
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    chapter: &Chapter,
    playback: Option<&Playback>,
    completed: bool,
    theme: &Theme,
) {
    let block = Block::default()
        .title(" Video ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (Some(video), Some(playback)) = (&chapter.video, playback) else {
        let msg = Paragraph::new("No video available for this chapter.")
            .style(Style::default().fg(theme.fg_muted))
            .alignment(Alignment::Center);
        frame.render_widget(msg, inner);
        return;
    };

    let rows = Layout::vertical([Constraint::Length(1); 3]).split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(video.url.as_str(), Style::default().fg(theme.fg_muted))),
        rows[0],
    );

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.progress(completed)).bg(theme.bg_tertiary))
        .ratio(playback.played())
        .label(playback.time_label());
    frame.render_widget(gauge, rows[1]);

    frame.render_widget(Paragraph::new(status_line(playback, completed, theme)), rows[2]);
}

/// Play state and completion badge
fn status_line(playback: &Playback, completed: bool, theme: &Theme) -> Line<'static> {
    let (icon, label) = if playback.is_playing() {
        ("\u{25B6}", "Playing") // ▶
    } else if playback.is_finished() {
        ("\u{25A0}", "Ended") // ■
    } else {
        ("\u{275A}\u{275A}", "Paused") // ❚❚
    };

    let mut spans = vec![Span::styled(
        format!("{} {}", icon, label),
        Style::default().fg(theme.accent_primary),
    )];

    if completed {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            "\u{2713} Chapter completed",
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        ));
    } else {
        spans.push(Span::styled(
            format!("   Watch {:.0}% to complete", COMPLETION_THRESHOLD * 100.0),
            Style::default().fg(theme.fg_muted),
        ));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn status_shows_threshold_until_complete() {
        let theme = Theme::default();
        let playback = Playback::new(60, 1.0);
        assert!(line_text(&status_line(&playback, false, &theme)).contains("Watch 80%"));
        assert!(line_text(&status_line(&playback, true, &theme)).contains("Chapter completed"));
    }

    #[test]
    fn status_reflects_play_state() {
        let theme = Theme::default();
        let mut playback = Playback::new(60, 1.0);
        assert!(line_text(&status_line(&playback, false, &theme)).contains("Paused"));
        playback.toggle();
        assert!(line_text(&status_line(&playback, false, &theme)).contains("Playing"));
    }
}
