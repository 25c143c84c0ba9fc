//! Application state definitions

use crate::course::data::CourseProgressData;
use crate::course::playback::Playback;
use crate::course::quiz::Quiz;

/// What the view can show given the state of the data provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    SignInRequired,
    LoadError,
    Chapter,
}

impl Screen {
    /// Pick the screen for the provider's current state
    pub fn from_data<D: CourseProgressData + ?Sized>(data: &D) -> Self {
        if data.is_loading() {
            Screen::Loading
        } else if data.user().is_none() {
            Screen::SignInRequired
        } else if data.course().is_none() || data.user_progress().is_none() {
            Screen::LoadError
        } else {
            Screen::Chapter
        }
    }

    /// Fallback message for screens without chapter content
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Screen::Loading => Some("Loading..."),
            Screen::SignInRequired => Some("Please sign in to view this course."),
            Screen::LoadError => Some("Error loading course"),
            Screen::Chapter => None,
        }
    }
}

/// Tabs in the chapter content region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Resources,
    Quiz,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Resources, Tab::Quiz];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Resources => "Resources",
            Tab::Quiz => "Quiz",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Resources => 0,
            Tab::Quiz => 1,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Resources => Tab::Quiz,
            Tab::Quiz => Tab::Resources,
        }
    }

    /// Parse a tab name as typed on the command line or stored in the session
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "resources" | "r" | "1" => Some(Tab::Resources),
            "quiz" | "q" | "2" => Some(Tab::Quiz),
            _ => None,
        }
    }
}

/// Highlighted question and option in the quiz tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizCursor {
    pub question: usize,
    pub option: usize,
}

impl QuizCursor {
    /// Move to the next option, continuing into the next question
    pub fn down(&mut self, quiz: &Quiz) {
        let questions = quiz.questions();
        let Some(current) = questions.get(self.question) else {
            return;
        };
        if self.option + 1 < current.options.len() {
            self.option += 1;
        } else if self.question + 1 < questions.len() {
            self.question += 1;
            self.option = 0;
        }
    }

    /// Move to the previous option, continuing into the previous question
    pub fn up(&mut self, quiz: &Quiz) {
        if self.option > 0 {
            self.option -= 1;
        } else if self.question > 0 {
            self.question -= 1;
            self.option = quiz
                .questions()
                .get(self.question)
                .map_or(0, |q| q.options.len().saturating_sub(1));
        }
    }

    /// Jump to the first option of the next question, if there is one
    pub fn next_question(&mut self, quiz: &Quiz) {
        if self.question + 1 < quiz.questions().len() {
            self.question += 1;
            self.option = 0;
        }
    }
}

/// Command line mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommandMode {
    /// Command line showing status
    #[default]
    Normal,
    /// Accepting : commands
    Command,
}

/// State for the command line input
#[derive(Debug, Clone, Default)]
pub struct CommandLineState {
    pub mode: CommandMode,
    pub input: String,
    /// Cursor position in input (character index)
    pub cursor: usize,
    /// Status/error message to display (when not in input mode)
    pub message: Option<String>,
    pub is_error: bool,
}

impl CommandLineState {
    pub fn enter_command_mode(&mut self) {
        self.mode = CommandMode::Command;
        self.input.clear();
        self.cursor = 0;
        self.message = None;
    }

    pub fn exit_input_mode(&mut self) {
        self.mode = CommandMode::Normal;
        self.input.clear();
        self.cursor = 0;
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.input.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(self.input.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.input.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.input.remove(byte_idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.input.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn is_input_mode(&self) -> bool {
        self.mode == CommandMode::Command
    }
}

/// Local state of the chapter view
#[derive(Debug, Default)]
pub struct AppState {
    /// Active content tab
    pub tab: Tab,

    /// Quiz for the current chapter
    pub quiz: Quiz,

    /// Highlighted quiz option
    pub quiz_cursor: QuizCursor,

    /// Player for the current chapter's video, if it has one
    pub playback: Option<Playback>,

    /// Command line state
    pub command_line: CommandLineState,
}

impl AppState {
    /// Reset per-chapter state for a newly shown chapter
    pub fn enter_chapter(&mut self, quiz: Quiz, playback: Option<Playback>) {
        self.quiz = quiz;
        self.quiz_cursor = QuizCursor::default();
        self.playback = playback;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::data::LocalCourseData;
    use crate::course::data::tests::loaded_data;
    use crate::course::model::{Chapter, User};
    use crate::course::quiz::{QuizSource, SampleQuizSource};

    fn sample_quiz() -> Quiz {
        Quiz::new(SampleQuizSource.questions_for(&Chapter::new("c1", "Intro")))
    }

    #[test]
    fn screen_follows_provider_state() {
        let loading = LocalCourseData::new(Some(User::from_name("Ada")), None);
        assert_eq!(Screen::from_data(&loading), Screen::Loading);

        let mut no_user = LocalCourseData::new(None, None);
        no_user.fail_loading();
        assert_eq!(Screen::from_data(&no_user), Screen::SignInRequired);

        let mut failed = LocalCourseData::new(Some(User::from_name("Ada")), None);
        failed.fail_loading();
        assert_eq!(Screen::from_data(&failed), Screen::LoadError);

        assert_eq!(Screen::from_data(&loaded_data(None)), Screen::Chapter);
    }

    #[test]
    fn fallback_messages() {
        assert_eq!(Screen::LoadError.message(), Some("Error loading course"));
        assert_eq!(Screen::Chapter.message(), None);
    }

    #[test]
    fn tab_parse_and_cycle() {
        assert_eq!(Tab::parse("Quiz"), Some(Tab::Quiz));
        assert_eq!(Tab::parse("1"), Some(Tab::Resources));
        assert_eq!(Tab::parse("notes"), None);
        assert_eq!(Tab::Resources.next(), Tab::Quiz);
        assert_eq!(Tab::Quiz.next(), Tab::Resources);
    }

    #[test]
    fn cursor_moves_across_questions() {
        let quiz = sample_quiz();
        let mut cursor = QuizCursor { question: 0, option: 3 };
        cursor.down(&quiz);
        assert_eq!(cursor, QuizCursor { question: 1, option: 0 });
        cursor.up(&quiz);
        assert_eq!(cursor, QuizCursor { question: 0, option: 3 });
    }

    #[test]
    fn cursor_stops_at_ends() {
        let quiz = sample_quiz();
        let mut cursor = QuizCursor::default();
        cursor.up(&quiz);
        assert_eq!(cursor, QuizCursor::default());

        let mut cursor = QuizCursor { question: 2, option: 3 };
        cursor.down(&quiz);
        assert_eq!(cursor, QuizCursor { question: 2, option: 3 });
        cursor.next_question(&quiz);
        assert_eq!(cursor.question, 2);
    }

    #[test]
    fn command_line_editing() {
        let mut line = CommandLineState::default();
        line.enter_command_mode();
        for c in "quiz".chars() {
            line.insert_char(c);
        }
        line.move_left();
        line.delete_char();
        assert_eq!(line.input, "quz");
        line.exit_input_mode();
        assert!(!line.is_input_mode());
        assert!(line.input.is_empty());
    }
}
