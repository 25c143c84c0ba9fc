//! Colour themes

mod tokyo_night;

pub use tokyo_night::TOKYO_NIGHT;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// A color theme for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,

    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_tertiary: Color,

    // Foreground colors
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Semantic colors (quiz verdicts, completion badges, messages)
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
    pub gauge: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::tokyo_night()
    }
}

impl Theme {
    /// Built-in theme called `name`, ignoring case
    pub fn named(name: &str) -> Option<Self> {
        let theme = Self::tokyo_night();
        theme.name.eq_ignore_ascii_case(name.trim()).then_some(theme)
    }

    /// Colour for a right or wrong answer, and for a passed or failed quiz
    pub fn verdict(&self, correct: bool) -> Color {
        if correct { self.success } else { self.error }
    }

    /// Gauge fill; switches to the success colour once the chapter is complete
    pub fn progress(&self, completed: bool) -> Color {
        if completed { self.success } else { self.gauge }
    }
}
