//! Key bindings for the chapter view

use crossterm::event::{KeyCode, KeyModifiers};

/// Actions that can be taken in the chapter view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Quiz navigation
    Up,
    Down,
    Select,
    /// Pick option by position for the highlighted question
    ChooseOption(usize),

    // Tabs
    NextTab,
    ShowResources,
    ShowQuiz,

    // Player
    TogglePlay,
    SeekBack,
    SeekForward,

    // Quiz
    Submit,
    Retry,

    // Chapters
    NextChapter,
    PreviousChapter,

    // Modes
    CommandMode,
    Quit,
}

/// Keys that pick an option directly, in option order
pub const OPTION_KEYS: [char; 4] = ['a', 'b', 'c', 'd'];

/// Key that picks the option at `index`, if it has one
pub fn option_key(index: usize) -> Option<char> {
    OPTION_KEYS.get(index).copied()
}

/// Map a key press to an action
pub fn key_to_action(key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match key {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Enter => Some(Action::Select),
        KeyCode::Char(c @ 'a'..='d') => Some(Action::ChooseOption(c as usize - 'a' as usize)),
        KeyCode::Tab => Some(Action::NextTab),
        KeyCode::Char('1') => Some(Action::ShowResources),
        KeyCode::Char('2') => Some(Action::ShowQuiz),
        KeyCode::Char(' ') => Some(Action::TogglePlay),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::SeekBack),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::SeekForward),
        KeyCode::Char('s') => Some(Action::Submit),
        KeyCode::Char('r') => Some(Action::Retry),
        KeyCode::Char('n') => Some(Action::NextChapter),
        KeyCode::Char('p') => Some(Action::PreviousChapter),
        KeyCode::Char(':') => Some(Action::CommandMode),
        // 'q' is left unmapped; quit with :q
        _ => None,
    }
}
