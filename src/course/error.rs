//! Error types for course loading and quizzes

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a course
#[derive(Debug, Error)]
pub enum CourseError {
    /// The course file could not be read
    #[error("Failed to read course file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The course file is not valid course JSON
    #[error("Failed to parse course file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The course has no chapters to show
    #[error("Course '{0}' has no chapters")]
    Empty(String),

    /// The requested chapter does not exist in the course
    #[error("Chapter '{chapter_id}' not found in course '{course_id}'")]
    ChapterNotFound { course_id: String, chapter_id: String },

    /// The loading task was cancelled or panicked
    #[error("Course loading task failed: {0}")]
    Task(String),
}

/// Errors produced by quiz state transitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// Submission attempted before every question was answered
    #[error("Please answer all questions before submitting ({unanswered} remaining)")]
    Incomplete { unanswered: usize },

    /// Answers can only change before submission
    #[error("Quiz already submitted. Press r to try again")]
    NotAnswering,

    #[error("No question with id {0}")]
    UnknownQuestion(u32),

    #[error("Question {question_id} has no option '{option_id}'")]
    UnknownOption { question_id: u32, option_id: String },
}
