//! Quiz tab: answering and results review

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::layout::{scroll_to_show, wrap_text};
use crate::app::input::option_key;
use crate::app::state::{AppState, QuizCursor};
use crate::course::quiz::{PASS_THRESHOLD, Quiz, QuizResult};
use crate::theme::Theme;

const CHECK: &str = "\u{2713}"; // ✓
const CROSS: &str = "\u{2717}"; // ✗

/// Draw the quiz tab body
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let para = match state.quiz.result() {
        Some(result) => {
            Paragraph::new(results_lines(&state.quiz, result, theme)).wrap(Wrap { trim: false })
        }
        None => {
            let width = area.width as usize;
            let (lines, focus_line) = question_lines(&state.quiz, state.quiz_cursor, width, theme);
            let scroll = scroll_to_show(focus_line, area.height as usize);
            Paragraph::new(lines).scroll((scroll, 0))
        }
    };
    frame.render_widget(para, area);
}

/// Label shown before an option: its pick key, or its position past the last key
fn option_label(index: usize) -> String {
    option_key(index).map_or_else(|| (index + 1).to_string(), String::from)
}

/// Push `text` wrapped to `width` columns, each row prefixed with `indent`
fn push_wrapped(
    lines: &mut Vec<Line<'static>>,
    text: &str,
    indent: &str,
    width: usize,
    style: Style,
) {
    let rows = wrap_text(text, width.saturating_sub(indent.len()).max(1));
    for row in rows {
        lines.push(Line::from(Span::styled(format!("{indent}{row}"), style)));
    }
}

/// Lines for the answering phase, wrapped to `width`, plus the first row of the
/// highlighted option
fn question_lines(
    quiz: &Quiz,
    cursor: QuizCursor,
    width: usize,
    theme: &Theme,
) -> (Vec<Line<'static>>, usize) {
    let mut lines = Vec::new();
    push_wrapped(
        &mut lines,
        &format!(
            "Complete this quiz to test your understanding of this chapter. \
             You need {}% to pass.",
            PASS_THRESHOLD
        ),
        "",
        width,
        Style::default().fg(theme.fg_secondary),
    );
    lines.push(Line::from(""));
    let mut focus_line = 0;

    for (q_idx, question) in quiz.questions().iter().enumerate() {
        push_wrapped(
            &mut lines,
            &format!("{}. {}", q_idx + 1, question.question),
            "",
            width,
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        );

        let selected = quiz.answers().get(question.id);
        for (o_idx, option) in question.options.iter().enumerate() {
            let is_selected = selected == Some(option.id.as_str());
            let is_cursor = cursor.question == q_idx && cursor.option == o_idx;
            let marker = if is_selected { "\u{25CF}" } else { "\u{25CB}" }; // ● or ○

            let mut style = if is_selected {
                Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg_secondary)
            };
            if is_cursor {
                style = style.bg(theme.bg_tertiary);
                focus_line = lines.len();
            }

            let text = format!("{} {}) {}", marker, option_label(o_idx), option.text);
            push_wrapped(&mut lines, &text, "  ", width, style);
        }
        lines.push(Line::from(""));
    }

    if quiz.can_submit() {
        lines.push(Line::from(Span::styled(
            "[s] Submit Quiz",
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )));
    } else {
        let hint = Style::default().fg(theme.fg_muted);
        lines.push(Line::from(Span::styled("[s] Submit Quiz", hint)));
        lines.push(Line::from(Span::styled(
            "Please answer all questions before submitting",
            hint,
        )));
    }

    (lines, focus_line)
}

/// Lines for the submitted phase
fn results_lines(quiz: &Quiz, result: QuizResult, theme: &Theme) -> Vec<Line<'static>> {
    let (icon, title, verdict_style, message) = if result.passed {
        (
            CHECK,
            "Quiz Passed!",
            Style::default().fg(theme.verdict(true)).add_modifier(Modifier::BOLD),
            "Great job! You have demonstrated understanding of this chapter's material."
                .to_string(),
        )
    } else {
        (
            CROSS,
            "Quiz Failed",
            Style::default().fg(theme.verdict(false)).add_modifier(Modifier::BOLD),
            format!(
                "You need at least {}% to pass. Review the chapter content and try again.",
                PASS_THRESHOLD
            ),
        )
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{} ", icon), verdict_style),
            Span::styled(title, verdict_style),
        ]),
        Line::from(Span::styled(
            format!("You scored {}%. {}", result.score, message),
            Style::default().fg(theme.fg_primary),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Review Your Answers",
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for question in quiz.questions() {
        let is_correct = quiz.answers().is_correct(question);
        let mark = if is_correct { CHECK } else { CROSS };
        let mark_style = Style::default().fg(theme.verdict(is_correct));

        lines.push(Line::from(vec![
            Span::styled(format!("{} ", mark), mark_style),
            Span::styled(question.question.clone(), Style::default().fg(theme.fg_primary)),
        ]));

        let answer = quiz
            .answers()
            .get(question.id)
            .and_then(|id| question.option(id))
            .map_or("Not answered", |o| o.text.as_str());
        lines.push(Line::from(Span::styled(
            format!("  Your answer: {}", answer),
            Style::default().fg(theme.fg_secondary),
        )));

        if !is_correct {
            if let Some(correct) = question.correct_option() {
                lines.push(Line::from(Span::styled(
                    format!("  Correct answer: {}", correct.text),
                    Style::default().fg(theme.success),
                )));
            }
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "[r] Try Again",
        Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
    )));

    lines
}
