//! Course content, quizzes and chapter progress

pub mod data;
pub mod error;
pub mod model;
pub mod playback;
pub mod quiz;
pub mod storage;
pub mod tracker;

pub use data::{CourseProgressData, LocalCourseData};
pub use error::{CourseError, QuizError};
pub use model::{Chapter, Course, Section, User, UserCourseProgress};
pub use quiz::{ChapterQuizSource, Quiz, QuizPhase, QuizResult, QuizSource};
