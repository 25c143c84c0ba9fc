//! Configuration management for courseview

pub mod progress;
pub mod session;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::course::model::User;
use crate::course::playback;
use crate::theme::Theme;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Selected theme name
    pub theme: String,

    /// Custom theme overrides (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_theme: Option<Theme>,

    /// Signed-in learner; `None` shows the sign-in message
    #[serde(default)]
    pub user: Option<User>,

    /// Seconds skipped by the seek keys
    #[serde(default = "default_seek_step")]
    pub seek_step_seconds: u32,

    /// Playback speed multiplier (1.0 = real time)
    #[serde(default = "default_playback_rate")]
    pub playback_rate: f32,
}

fn default_seek_step() -> u32 {
    10
}

fn default_playback_rate() -> f32 {
    1.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "Tokyo Night".to_string(),
            custom_theme: None,
            user: None,
            seek_step_seconds: default_seek_step(),
            playback_rate: default_playback_rate(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Self =
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")?;
        Ok(config.normalized())
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {:?}", path))
    }

    /// Replace hand-edited player settings the player cannot use
    fn normalized(mut self) -> Self {
        if self.seek_step_seconds == 0 {
            self.seek_step_seconds = default_seek_step();
        }
        self.playback_rate = playback::clamp_rate(self.playback_rate);
        self
    }

    /// Sign in as `name`, returning the learner now stored
    pub fn sign_in(&mut self, name: &str) -> &User {
        self.user.insert(User::from_name(name))
    }

    /// Forget the signed-in learner, returning who it was
    pub fn sign_out(&mut self) -> Option<User> {
        self.user.take()
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "courseview")
            .context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "courseview")
            .context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Get the log file path
    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("courseview.log"))
    }

    /// Custom overrides first, then the named built-in, then the default
    pub fn active_theme(&self) -> Theme {
        self.custom_theme
            .clone()
            .or_else(|| Theme::named(&self.theme))
            .unwrap_or_default()
    }
}
