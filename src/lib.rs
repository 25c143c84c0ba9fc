//! courseview - a terminal viewer for online course chapters
//!
//! Shows one chapter at a time: its video with completion tracking, a
//! resources tab, a graded quiz and the instructor's card.

pub mod app;
pub mod config;
pub mod course;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use theme::Theme;
