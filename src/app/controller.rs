//! Event handling for the chapter view, independent of the terminal

use std::time::Duration;

use crossterm::event::{KeyCode, KeyModifiers};

use super::command::{Command, ParseResult, parse_command};
use super::input::{Action, key_to_action};
use super::state::{AppState, Screen, Tab};
use crate::config::Config;
use crate::config::progress::ProgressStore;
use crate::config::session::CourseSession;
use crate::course::data::{CourseProgressData, LocalCourseData};
use crate::course::error::{CourseError, QuizError};
use crate::course::model::Course;
use crate::course::playback::Playback;
use crate::course::quiz::{ChapterQuizSource, Quiz, QuizSource};
use crate::course::tracker;

/// Owns the view state and the data provider and applies events to them
pub struct Controller {
    pub state: AppState,
    pub data: LocalCourseData,
    quiz_source: Box<dyn QuizSource + Send>,
    seek_step: i64,
    playback_rate: f32,
}

impl Controller {
    pub fn new(data: LocalCourseData, config: &Config) -> Self {
        Self {
            state: AppState::default(),
            data,
            quiz_source: Box::new(ChapterQuizSource),
            seek_step: i64::from(config.seek_step_seconds),
            playback_rate: config.playback_rate,
        }
    }

    /// Replace the question source
    pub fn with_quiz_source(mut self, source: impl QuizSource + Send + 'static) -> Self {
        self.quiz_source = Box::new(source);
        self
    }

    /// Which screen is showing
    pub fn screen(&self) -> Screen {
        Screen::from_data(&self.data)
    }

    /// Apply the outcome of loading a course.
    ///
    /// An unknown `chapter_id` falls back to the first chapter with a message.
    pub fn course_loaded(
        &mut self,
        result: Result<Course, CourseError>,
        store: &ProgressStore,
        chapter_id: Option<&str>,
        tab: Option<Tab>,
    ) {
        let course = match result {
            Ok(course) => course,
            Err(e) => {
                tracing::error!("Failed to load course: {}", e);
                self.data.fail_loading();
                return;
            }
        };

        let chapter_id = match chapter_id {
            Some(id) if course.find_chapter(id).is_none() => {
                tracing::warn!(chapter = id, "Unknown chapter, showing the first one");
                self.state.command_line.set_error(format!("Chapter '{}' not found", id));
                None
            }
            other => other,
        };

        let progress = self.data.user().map(|user| store.for_course(&user.user_id, &course));
        tracing::info!(
            course = %course.course_id,
            chapters = course.chapter_count(),
            "Course loaded"
        );

        match self.data.finish_loading(course, progress, chapter_id) {
            Ok(()) => {
                if let Some(tab) = tab {
                    self.state.tab = tab;
                }
                self.enter_chapter();
            }
            Err(e) => {
                tracing::error!("Failed to open chapter: {}", e);
                self.data.fail_loading();
            }
        }
    }

    /// Rebuild per-chapter state for the provider's current chapter
    fn enter_chapter(&mut self) {
        let Some(chapter) = self.data.current_chapter() else {
            return;
        };
        let quiz = Quiz::new(self.quiz_source.questions_for(chapter));
        let playback =
            chapter.video.as_ref().map(|v| Playback::new(v.duration_seconds, self.playback_rate));
        self.state.enter_chapter(quiz, playback);
    }

    /// Advance the player clock by `elapsed`
    pub fn tick(&mut self, elapsed: Duration) {
        let played = self.state.playback.as_mut().and_then(|p| p.advance(elapsed));
        if let Some(played) = played {
            self.on_progress(played);
        }
    }

    /// Feed a player progress event to the completion tracker
    pub fn on_progress(&mut self, played: f64) {
        if tracker::handle_progress(played, &mut self.data) {
            self.state.command_line.set_message("Chapter marked complete");
        }
    }

    /// Handle a key press, returns true if the application should exit
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if self.state.command_line.is_input_mode() {
            return self.handle_command_key(key);
        }
        match key_to_action(key, modifiers) {
            Some(action) => self.apply(action),
            None => false,
        }
    }

    fn handle_command_key(&mut self, key: KeyCode) -> bool {
        let line = &mut self.state.command_line;
        match key {
            KeyCode::Esc => line.exit_input_mode(),
            KeyCode::Enter => {
                let input = std::mem::take(&mut line.input);
                line.exit_input_mode();
                return self.run_command(&input);
            }
            KeyCode::Backspace => {
                if line.input.is_empty() {
                    line.exit_input_mode();
                } else {
                    line.delete_char();
                }
            }
            KeyCode::Left => line.move_left(),
            KeyCode::Right => line.move_right(),
            KeyCode::Char(c) => line.insert_char(c),
            _ => {}
        }
        false
    }

    /// Execute a command line entry, returns true if the application should exit
    pub fn run_command(&mut self, input: &str) -> bool {
        let command = match parse_command(input) {
            ParseResult::Ok(command) => command,
            ParseResult::UnknownCommand(cmd) => {
                self.state.command_line.set_error(format!("Unknown command: {}", cmd));
                return false;
            }
            ParseResult::MissingArgument(cmd) => {
                self.state.command_line.set_error(format!(":{} needs an argument", cmd));
                return false;
            }
            ParseResult::InvalidArgument { command, argument } => {
                self.state.command_line.set_error(format!("Invalid {}: {}", command, argument));
                return false;
            }
        };

        match command {
            Command::Quit => true,
            Command::Chapter(id) => {
                self.go_to_chapter(&id);
                false
            }
            Command::Tab(Tab::Resources) => self.apply(Action::ShowResources),
            Command::Tab(Tab::Quiz) => self.apply(Action::ShowQuiz),
            Command::Submit => self.apply(Action::Submit),
            Command::Retry => self.apply(Action::Retry),
            Command::Next => self.apply(Action::NextChapter),
            Command::Previous => self.apply(Action::PreviousChapter),
            Command::Play => self.apply(Action::TogglePlay),
            Command::Nop => {
                self.state.command_line.clear_message();
                false
            }
        }
    }

    /// Apply an action, returns true if the application should exit
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::CommandMode => {
                self.state.command_line.enter_command_mode();
                return false;
            }
            _ => {}
        }

        if self.screen() != Screen::Chapter {
            return false;
        }

        match action {
            Action::NextTab => self.state.tab = self.state.tab.next(),
            Action::ShowResources => self.state.tab = Tab::Resources,
            Action::ShowQuiz => self.state.tab = Tab::Quiz,
            Action::TogglePlay => self.toggle_play(),
            Action::SeekBack => self.seek(-self.seek_step),
            Action::SeekForward => self.seek(self.seek_step),
            Action::Up if self.state.tab == Tab::Quiz => {
                self.state.quiz_cursor.up(&self.state.quiz);
            }
            Action::Down if self.state.tab == Tab::Quiz => {
                self.state.quiz_cursor.down(&self.state.quiz);
            }
            Action::Select if self.state.tab == Tab::Quiz => {
                self.choose_option(self.state.quiz_cursor.option, false);
            }
            Action::ChooseOption(index) if self.state.tab == Tab::Quiz => {
                self.choose_option(index, true);
            }
            Action::Submit => self.submit_quiz(),
            Action::Retry => self.retry_quiz(),
            Action::NextChapter => self.step_chapter(true),
            Action::PreviousChapter => self.step_chapter(false),
            _ => {}
        }
        false
    }

    fn toggle_play(&mut self) {
        match self.state.playback.as_mut() {
            Some(playback) => playback.toggle(),
            None => self.state.command_line.set_error("No video available for this chapter."),
        }
    }

    fn seek(&mut self, seconds: i64) {
        let Some(playback) = self.state.playback.as_mut() else {
            return;
        };
        let played = playback.seek_by(seconds);
        self.on_progress(played);
    }

    /// Answer the highlighted question with the option at `index`
    fn choose_option(&mut self, index: usize, advance: bool) {
        let cursor = self.state.quiz_cursor;
        let Some(question) = self.state.quiz.questions().get(cursor.question) else {
            return;
        };
        let Some(option) = question.options.get(index) else {
            return;
        };
        let (question_id, option_id) = (question.id, option.id.clone());

        match self.state.quiz.select(question_id, &option_id) {
            Ok(()) => {
                self.state.quiz_cursor.option = index;
                if advance {
                    self.state.quiz_cursor.next_question(&self.state.quiz);
                }
            }
            Err(e) => self.state.command_line.set_error(e.to_string()),
        }
    }

    fn submit_quiz(&mut self) {
        match self.state.quiz.submit() {
            Ok(result) => {
                tracing::info!(score = result.score, passed = result.passed, "Quiz submitted");
                self.state.tab = Tab::Quiz;
                self.state.command_line.set_message(format!("You scored {}%", result.score));
            }
            Err(e @ QuizError::Incomplete { .. }) => {
                self.state.tab = Tab::Quiz;
                self.state.command_line.set_error(e.to_string());
            }
            Err(e) => self.state.command_line.set_error(e.to_string()),
        }
    }

    fn retry_quiz(&mut self) {
        if self.state.quiz.result().is_some() {
            self.state.quiz.reset();
            self.state.quiz_cursor = Default::default();
            self.state.command_line.clear_message();
        }
    }

    fn step_chapter(&mut self, forward: bool) {
        let target = match (self.data.course(), self.data.current_chapter()) {
            (Some(course), Some(current)) => {
                let step = if forward {
                    course.next_chapter(&current.chapter_id)
                } else {
                    course.previous_chapter(&current.chapter_id)
                };
                step.map(|(_, chapter)| chapter.chapter_id.clone())
            }
            _ => None,
        };

        match target {
            Some(id) => self.go_to_chapter(&id),
            None if forward => self.state.command_line.set_message("Last chapter of the course"),
            None => self.state.command_line.set_message("First chapter of the course"),
        }
    }

    /// Switch to a chapter, resetting quiz and playback
    pub fn go_to_chapter(&mut self, chapter_id: &str) {
        match self.data.select_chapter(chapter_id) {
            Ok(()) => {
                self.enter_chapter();
                self.state.command_line.clear_message();
            }
            Err(e) => self.state.command_line.set_error(e.to_string()),
        }
    }

    /// Where the learner is, for resuming later
    pub fn session_snapshot(&self) -> Option<(String, CourseSession)> {
        let course = self.data.course()?;
        let chapter = self.data.current_chapter()?;
        Some((
            course.course_id.clone(),
            CourseSession {
                chapter_id: Some(chapter.chapter_id.clone()),
                tab: Some(self.state.tab.title().to_lowercase()),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::data::tests::sample_course;
    use crate::course::model::{User, Video};
    use crate::course::quiz::QuizPhase;
    use tokio::sync::mpsc;

    fn loaded_controller() -> Controller {
        let data = LocalCourseData::new(Some(User::from_name("Ada")), None);
        let mut controller = Controller::new(data, &Config::default());
        let mut course = sample_course();
        course.sections[0].chapters[0].video =
            Some(Video { url: "intro.mp4".into(), duration_seconds: 100 });
        controller.course_loaded(Ok(course), &ProgressStore::default(), None, None);
        controller
    }

    #[test]
    fn load_error_shows_fallback() {
        let data = LocalCourseData::new(Some(User::from_name("Ada")), None);
        let mut controller = Controller::new(data, &Config::default());
        controller.course_loaded(
            Err(CourseError::Empty("x".into())),
            &ProgressStore::default(),
            None,
            None,
        );
        assert_eq!(controller.screen(), Screen::LoadError);
        // Only quitting does anything on fallback screens
        assert!(!controller.apply(Action::ShowQuiz));
        assert_eq!(controller.state.tab, Tab::Resources);
        assert!(controller.apply(Action::Quit));
    }

    #[test]
    fn unknown_chapter_falls_back_to_first() {
        let data = LocalCourseData::new(Some(User::from_name("Ada")), None);
        let mut controller = Controller::new(data, &Config::default());
        controller.course_loaded(
            Ok(sample_course()),
            &ProgressStore::default(),
            Some("missing"),
            Some(Tab::Quiz),
        );
        assert_eq!(controller.screen(), Screen::Chapter);
        assert_eq!(controller.data.current_chapter().unwrap().chapter_id, "c1");
        assert_eq!(controller.state.tab, Tab::Quiz);
        assert!(controller.state.command_line.is_error);
    }

    #[test]
    fn answering_with_letters_then_submitting() {
        let mut controller = loaded_controller();
        controller.apply(Action::ShowQuiz);
        controller.apply(Action::ChooseOption(1));
        controller.apply(Action::ChooseOption(2));
        assert_eq!(controller.state.quiz_cursor.question, 2);

        controller.apply(Action::Submit);
        assert_eq!(controller.state.quiz.phase(), QuizPhase::Answering);
        assert!(controller.state.command_line.is_error);

        controller.apply(Action::ChooseOption(3));
        controller.apply(Action::Submit);
        let result = controller.state.quiz.result().unwrap();
        assert_eq!(result.score, 67);
        assert!(!result.passed);

        controller.apply(Action::Retry);
        assert_eq!(controller.state.quiz.phase(), QuizPhase::Answering);
        assert!(controller.state.quiz.answers().is_empty());
    }

    #[test]
    fn select_uses_cursor_option() {
        let mut controller = loaded_controller();
        controller.apply(Action::ShowQuiz);
        controller.apply(Action::Down);
        controller.apply(Action::Select);
        assert_eq!(controller.state.quiz.answers().get(1), Some("b"));
    }

    #[test]
    fn quiz_keys_ignored_on_resources_tab() {
        let mut controller = loaded_controller();
        controller.apply(Action::ChooseOption(0));
        assert!(controller.state.quiz.answers().is_empty());
    }

    #[test]
    fn watching_past_threshold_completes_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let data = LocalCourseData::new(Some(User::from_name("Ada")), Some(tx));
        let mut controller = Controller::new(data, &Config::default());
        let mut course = sample_course();
        course.sections[0].chapters[0].video =
            Some(Video { url: "intro.mp4".into(), duration_seconds: 100 });
        controller.course_loaded(Ok(course), &ProgressStore::default(), None, None);

        controller.apply(Action::TogglePlay);
        controller.tick(Duration::from_secs(50));
        assert!(rx.try_recv().is_err());

        controller.tick(Duration::from_secs(35));
        controller.tick(Duration::from_secs(5));
        assert!(controller.data.is_chapter_completed());
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn seeking_past_threshold_completes() {
        let mut controller = loaded_controller();
        for _ in 0..9 {
            controller.apply(Action::SeekForward);
        }
        assert!(controller.data.is_chapter_completed());
    }

    #[test]
    fn chapter_without_video_reports_error_on_play() {
        let mut controller = loaded_controller();
        controller.apply(Action::NextChapter);
        assert_eq!(controller.data.current_chapter().unwrap().chapter_id, "c2");
        assert!(controller.state.playback.is_none());

        controller.apply(Action::TogglePlay);
        assert!(controller.state.command_line.is_error);
    }

    #[test]
    fn changing_chapter_resets_quiz() {
        let mut controller = loaded_controller();
        controller.apply(Action::ShowQuiz);
        controller.apply(Action::ChooseOption(0));
        controller.apply(Action::NextChapter);
        assert!(controller.state.quiz.answers().is_empty());
        assert!(controller.state.quiz.questions()[0].question.contains("Personas"));

        controller.apply(Action::PreviousChapter);
        assert_eq!(controller.data.current_chapter().unwrap().chapter_id, "c1");
    }

    #[test]
    fn command_line_flow() {
        let mut controller = loaded_controller();
        controller.handle_key(KeyCode::Char(':'), KeyModifiers::NONE);
        assert!(controller.state.command_line.is_input_mode());

        for c in "tab quiz".chars() {
            controller.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
        assert!(!controller.handle_key(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(controller.state.tab, Tab::Quiz);

        assert!(controller.run_command("q"));
    }

    #[test]
    fn goto_unknown_chapter_reports_error() {
        let mut controller = loaded_controller();
        controller.run_command("chapter nope");
        assert!(controller.state.command_line.is_error);
        assert_eq!(controller.data.current_chapter().unwrap().chapter_id, "c1");
    }

    #[test]
    fn session_snapshot_records_position() {
        let mut controller = loaded_controller();
        controller.apply(Action::NextChapter);
        controller.apply(Action::ShowQuiz);
        let (course_id, session) = controller.session_snapshot().unwrap();
        assert_eq!(course_id, "ux-101");
        assert_eq!(session.chapter_id.as_deref(), Some("c2"));
        assert_eq!(session.tab.as_deref(), Some("quiz"));
    }
}
