//! Course and progress data provider for the chapter view
//!
//! The view reads everything it shows through [`CourseProgressData`] and
//! writes back only chapter completion. [`LocalCourseData`] is the provider
//! backed by a course file and the local progress store.

use tokio::sync::mpsc::UnboundedSender;

use super::error::CourseError;
use super::model::{Chapter, Course, Section, User, UserCourseProgress};
use crate::config::progress::ProgressUpdate;

/// Data and mutations the chapter view depends on
pub trait CourseProgressData {
    /// Whether course data is still being fetched
    fn is_loading(&self) -> bool;

    /// The signed-in learner
    fn user(&self) -> Option<&User>;

    fn course(&self) -> Option<&Course>;

    /// Stored progress for the learner in this course
    fn user_progress(&self) -> Option<&UserCourseProgress>;

    fn current_section(&self) -> Option<&Section>;

    fn current_chapter(&self) -> Option<&Chapter>;

    /// Whether the current chapter is already recorded as completed
    fn is_chapter_completed(&self) -> bool;

    /// Record completion for a chapter. Fire-and-forget.
    fn update_chapter_progress(&mut self, section_id: &str, chapter_id: &str, completed: bool);

    /// One-shot flag for the current chapter view
    fn has_marked_complete(&self) -> bool;

    fn set_has_marked_complete(&mut self, marked: bool);
}

/// Provider backed by a loaded course file and the local progress store
#[derive(Debug)]
pub struct LocalCourseData {
    user: Option<User>,
    loading: bool,
    course: Option<Course>,
    progress: Option<UserCourseProgress>,
    current_chapter_id: Option<String>,
    has_marked_complete: bool,
    updates: Option<UnboundedSender<ProgressUpdate>>,
}

impl LocalCourseData {
    /// Start in the loading state
    pub fn new(user: Option<User>, updates: Option<UnboundedSender<ProgressUpdate>>) -> Self {
        Self {
            user,
            loading: true,
            course: None,
            progress: None,
            current_chapter_id: None,
            has_marked_complete: false,
            updates,
        }
    }

    /// Finish loading with a course and the learner's stored progress.
    ///
    /// `chapter_id` selects the chapter to show; `None` picks the first one.
    pub fn finish_loading(
        &mut self,
        course: Course,
        progress: Option<UserCourseProgress>,
        chapter_id: Option<&str>,
    ) -> Result<(), CourseError> {
        self.loading = false;

        let selected = match chapter_id {
            Some(id) => course.find_chapter(id).map(|(_, c)| c.chapter_id.clone()).ok_or_else(
                || CourseError::ChapterNotFound {
                    course_id: course.course_id.clone(),
                    chapter_id: id.to_string(),
                },
            ),
            None => course
                .first_chapter()
                .map(|(_, c)| c.chapter_id.clone())
                .ok_or_else(|| CourseError::Empty(course.course_id.clone())),
        };

        self.course = Some(course);
        self.progress = progress;
        self.current_chapter_id = Some(selected?);
        self.has_marked_complete = false;
        Ok(())
    }

    /// Finish loading without data; the view shows its error fallback
    pub fn fail_loading(&mut self) {
        self.loading = false;
        self.course = None;
        self.progress = None;
        self.current_chapter_id = None;
    }

    /// Switch to another chapter of the loaded course, resetting the one-shot flag
    pub fn select_chapter(&mut self, chapter_id: &str) -> Result<(), CourseError> {
        let course = self.course.as_ref().ok_or_else(|| CourseError::ChapterNotFound {
            course_id: String::new(),
            chapter_id: chapter_id.to_string(),
        })?;
        if course.find_chapter(chapter_id).is_none() {
            return Err(CourseError::ChapterNotFound {
                course_id: course.course_id.clone(),
                chapter_id: chapter_id.to_string(),
            });
        }
        self.current_chapter_id = Some(chapter_id.to_string());
        self.has_marked_complete = false;
        Ok(())
    }

    /// Drop the update sender so the writer task can drain and exit
    pub fn close_updates(&mut self) {
        self.updates = None;
    }

    fn current(&self) -> Option<(&Section, &Chapter)> {
        let course = self.course.as_ref()?;
        course.find_chapter(self.current_chapter_id.as_deref()?)
    }
}

impl CourseProgressData for LocalCourseData {
    fn is_loading(&self) -> bool {
        self.loading
    }

    fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    fn course(&self) -> Option<&Course> {
        self.course.as_ref()
    }

    fn user_progress(&self) -> Option<&UserCourseProgress> {
        self.progress.as_ref()
    }

    fn current_section(&self) -> Option<&Section> {
        self.current().map(|(section, _)| section)
    }

    fn current_chapter(&self) -> Option<&Chapter> {
        self.current().map(|(_, chapter)| chapter)
    }

    fn is_chapter_completed(&self) -> bool {
        match (self.current(), &self.progress) {
            (Some((section, chapter)), Some(progress)) => {
                progress.is_chapter_completed(&section.section_id, &chapter.chapter_id)
            }
            _ => false,
        }
    }

    fn update_chapter_progress(&mut self, section_id: &str, chapter_id: &str, completed: bool) {
        let Some(progress) = self.progress.as_mut() else {
            tracing::warn!(chapter = chapter_id, "No progress record to update");
            return;
        };
        progress.set_chapter_completed(section_id, chapter_id, completed);

        let update = ProgressUpdate {
            user_id: progress.user_id.clone(),
            course_id: progress.course_id.clone(),
            section_id: section_id.to_string(),
            chapter_id: chapter_id.to_string(),
            completed,
            overall_progress: progress.overall_progress,
        };
        if let Some(tx) = &self.updates {
            if tx.send(update).is_err() {
                tracing::warn!(chapter = chapter_id, "Progress writer has stopped");
            }
        }
    }

    fn has_marked_complete(&self) -> bool {
        self.has_marked_complete
    }

    fn set_has_marked_complete(&mut self, marked: bool) {
        self.has_marked_complete = marked;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tokio::sync::mpsc;

    pub(crate) fn sample_course() -> Course {
        Course {
            course_id: "ux-101".into(),
            title: "UX Fundamentals".into(),
            teacher_name: "Ada Park".into(),
            teacher_title: Some("Senior UX Designer".into()),
            teacher_bio: None,
            sections: vec![Section {
                section_id: "s1".into(),
                section_title: "Basics".into(),
                chapters: vec![Chapter::new("c1", "Intro"), Chapter::new("c2", "Personas")],
            }],
        }
    }

    pub(crate) fn loaded_data(
        updates: Option<UnboundedSender<ProgressUpdate>>,
    ) -> LocalCourseData {
        let course = sample_course();
        let progress = UserCourseProgress::for_course("ada", &course);
        let mut data = LocalCourseData::new(Some(User::from_name("Ada")), updates);
        data.finish_loading(course, Some(progress), None).unwrap();
        data
    }

    #[test]
    fn starts_loading() {
        let data = LocalCourseData::new(None, None);
        assert!(data.is_loading());
        assert!(data.course().is_none());
    }

    #[test]
    fn finish_loading_selects_first_chapter() {
        let data = loaded_data(None);
        assert!(!data.is_loading());
        assert_eq!(data.current_chapter().unwrap().chapter_id, "c1");
        assert_eq!(data.current_section().unwrap().section_id, "s1");
    }

    #[test]
    fn finish_loading_with_unknown_chapter_fails() {
        let mut data = LocalCourseData::new(None, None);
        let result = data.finish_loading(sample_course(), None, Some("nope"));
        assert!(matches!(result, Err(CourseError::ChapterNotFound { .. })));
        assert!(data.current_chapter().is_none());
    }

    #[test]
    fn update_marks_completed_and_sends() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut data = loaded_data(Some(tx));
        assert!(!data.is_chapter_completed());

        data.update_chapter_progress("s1", "c1", true);

        assert!(data.is_chapter_completed());
        let update = rx.try_recv().unwrap();
        assert_eq!(update.chapter_id, "c1");
        assert_eq!(update.user_id, "ada");
        assert!(update.completed);
        assert_eq!(update.overall_progress, 50.0);
    }

    #[test]
    fn select_chapter_resets_one_shot_flag() {
        let mut data = loaded_data(None);
        data.set_has_marked_complete(true);

        data.select_chapter("c2").unwrap();
        assert!(!data.has_marked_complete());
        assert_eq!(data.current_chapter().unwrap().chapter_id, "c2");

        assert!(data.select_chapter("missing").is_err());
        assert_eq!(data.current_chapter().unwrap().chapter_id, "c2");
    }

    #[test]
    fn fail_loading_clears_course() {
        let mut data = loaded_data(None);
        data.fail_loading();
        assert!(!data.is_loading());
        assert!(data.course().is_none());
        assert!(!data.is_chapter_completed());
    }
}
