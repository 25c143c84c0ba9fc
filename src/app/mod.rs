//! Application state and event handling

pub mod command;
pub mod controller;
pub mod input;
pub mod state;

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::config::progress::{self, ProgressStore};
use crate::config::session::Session;
use crate::course::data::LocalCourseData;
use crate::course::error::CourseError;
use crate::course::model::Course;
use crate::course::storage;
use crate::ui;
pub use controller::Controller;
use state::Tab;

/// How long to wait for pending progress writes on exit
const FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    /// View state and data provider
    controller: Controller,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,

    /// Course file being loaded, until it completes
    load_task: Option<JoinHandle<Result<Course, CourseError>>>,

    /// Chapter requested on the command line
    requested_chapter: Option<String>,

    /// Stored progress, used to seed the learner's record on load
    store: ProgressStore,

    /// Background writer for completion updates
    persist_task: Option<JoinHandle<ProgressStore>>,

    /// Where the learner left each course
    session: Session,
}

impl App {
    /// Create a new application that opens `course_path`
    pub fn new(config: Config, course_path: PathBuf, chapter: Option<String>) -> Result<Self> {
        let store = ProgressStore::load()?;
        let session = Session::load()?;

        let (tx, rx) = mpsc::unbounded_channel();
        let persist_task =
            progress::spawn_persist_task(store.clone(), ProgressStore::progress_path()?, rx);

        let data = LocalCourseData::new(config.user.clone(), Some(tx));
        let controller = Controller::new(data, &config);
        let load_task = tokio::spawn(storage::load_course_async(course_path));

        let terminal = Self::setup_terminal()?;

        Ok(Self {
            config,
            controller,
            terminal,
            load_task: Some(load_task),
            requested_chapter: chapter,
            store,
            persist_task: Some(persist_task),
            session,
        })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        let theme = self.config.active_theme();
        let mut last_tick = Instant::now();

        loop {
            // Draw UI
            self.terminal.draw(|frame| {
                ui::draw(frame, &self.controller.state, &self.controller.data, &theme);
            })?;

            if self.load_task.as_ref().is_some_and(|task| task.is_finished()) {
                self.finish_loading().await;
            }

            // Handle events
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press
                        && self.controller.handle_key(key.code, key.modifiers)
                    {
                        break;
                    }
                }
            }

            // Advance the player
            let now = Instant::now();
            self.controller.tick(now - last_tick);
            last_tick = now;
        }

        self.shutdown().await;
        self.restore_terminal()?;
        Ok(())
    }

    /// Hand the loaded course to the controller
    async fn finish_loading(&mut self) {
        let Some(task) = self.load_task.take() else {
            return;
        };
        let result = task.await.unwrap_or_else(|e| Err(CourseError::Task(e.to_string())));

        let course = result.as_ref().ok();
        let resume = course.and_then(|course| self.session.course(&course.course_id));
        // A chapter removed from the course since the last visit is ignored
        let resumed_chapter = resume
            .and_then(|s| s.chapter_id.clone())
            .filter(|id| course.is_some_and(|c| c.find_chapter(id).is_some()));
        let chapter = self.requested_chapter.clone().or(resumed_chapter);
        let tab = resume.and_then(|s| s.tab.as_deref()).and_then(Tab::parse);

        self.controller.course_loaded(result, &self.store, chapter.as_deref(), tab);
    }

    /// Save the session and let pending progress writes finish
    async fn shutdown(&mut self) {
        if let Some((course_id, course_session)) = self.controller.session_snapshot() {
            *self.session.course_mut(&course_id) = course_session;
            if let Err(e) = self.session.save() {
                tracing::warn!("Failed to save session: {:#}", e);
            }
        }

        self.controller.data.close_updates();
        if let Some(task) = self.persist_task.take() {
            if tokio::time::timeout(FLUSH_TIMEOUT, task).await.is_err() {
                tracing::warn!("Timed out waiting for progress to be saved");
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}
