//! Session state persistence
//!
//! Remembers the last chapter and tab viewed per course so `open` can resume.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::Config;

/// Where the learner left a course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSession {
    /// Last chapter viewed
    pub chapter_id: Option<String>,
    /// Last tab shown ("resources" or "quiz")
    #[serde(default)]
    pub tab: Option<String>,
}

/// All session state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// Session state per course (key is course ID)
    pub courses: HashMap<String, CourseSession>,
}

impl Session {
    /// Load session from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::session_path()?)
    }

    /// Load session from `path`, or start empty if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read session from {:?}", path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse session.json")
        } else {
            Ok(Self::default())
        }
    }

    /// Save session to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::session_path()?)
    }

    /// Save session to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize session")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write session to {:?}", path))?;

        Ok(())
    }

    /// Get the path to the session file
    fn session_path() -> Result<PathBuf> {
        Ok(Config::data_dir()?.join("session.json"))
    }

    /// Get or create session for a course
    pub fn course_mut(&mut self, course_id: &str) -> &mut CourseSession {
        self.courses.entry(course_id.to_string()).or_default()
    }

    /// Get session for a course (if exists)
    pub fn course(&self, course_id: &str) -> Option<&CourseSession> {
        self.courses.get(course_id)
    }
}
