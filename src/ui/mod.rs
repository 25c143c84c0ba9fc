//! UI rendering components

pub mod chapter_screen;
pub mod command_line;
pub mod instructor_card;
pub mod layout;
pub mod quiz_panel;
pub mod resources_panel;
pub mod video_panel;

use ratatui::Frame;

use crate::app::state::{AppState, Screen};
use crate::course::data::CourseProgressData;
use crate::theme::Theme;

/// Main draw function
pub fn draw<D>(frame: &mut Frame, state: &AppState, data: &D, theme: &Theme)
where
    D: CourseProgressData + ?Sized,
{
    let screen = Screen::from_data(data);
    match screen.message() {
        Some(message) => layout::draw_placeholder(frame, message, theme),
        None => chapter_screen::draw(frame, state, data, theme),
    }
}
