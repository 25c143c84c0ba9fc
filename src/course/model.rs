//! Content model for courses
//!
//! A course is split into sections, and each section into chapters. Chapters
//! are the unit a learner views: they may carry a video, a list of resources
//! and an embedded quiz.

use serde::{Deserialize, Serialize};

use super::quiz::Question;

/// A complete course as loaded from disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier for the course
    pub course_id: String,
    /// Display title
    pub title: String,
    /// Instructor display name
    pub teacher_name: String,
    /// Instructor job title shown on the instructor card
    #[serde(default)]
    pub teacher_title: Option<String>,
    /// Instructor biography shown on the instructor card
    #[serde(default)]
    pub teacher_bio: Option<String>,
    /// Sections in order
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Course {
    /// Total chapter count across all sections
    pub fn chapter_count(&self) -> usize {
        self.sections.iter().map(|s| s.chapters.len()).sum()
    }

    /// Find a chapter and its owning section by chapter ID
    pub fn find_chapter(&self, chapter_id: &str) -> Option<(&Section, &Chapter)> {
        self.sections.iter().find_map(|section| {
            section.chapters.iter().find(|c| c.chapter_id == chapter_id).map(|c| (section, c))
        })
    }

    /// The first chapter of the course, if any
    pub fn first_chapter(&self) -> Option<(&Section, &Chapter)> {
        self.sections
            .iter()
            .find_map(|section| section.chapters.first().map(|chapter| (section, chapter)))
    }

    /// Iterate over every chapter together with its section, in course order
    pub fn chapters(&self) -> impl Iterator<Item = (&Section, &Chapter)> {
        self.sections.iter().flat_map(|s| s.chapters.iter().map(move |c| (s, c)))
    }

    /// The chapter after `chapter_id` in course order, crossing section boundaries
    pub fn next_chapter(&self, chapter_id: &str) -> Option<(&Section, &Chapter)> {
        let mut iter = self.chapters().skip_while(|(_, c)| c.chapter_id != chapter_id);
        iter.next()?;
        iter.next()
    }

    /// The chapter before `chapter_id` in course order, crossing section boundaries
    pub fn previous_chapter(&self, chapter_id: &str) -> Option<(&Section, &Chapter)> {
        let mut previous = None;
        for (section, chapter) in self.chapters() {
            if chapter.chapter_id == chapter_id {
                return previous;
            }
            previous = Some((section, chapter));
        }
        None
    }

    /// First letter of the instructor name, used as the avatar fallback
    pub fn teacher_initial(&self) -> char {
        self.teacher_name.chars().next().map(|c| c.to_ascii_uppercase()).unwrap_or('?')
    }
}

/// A section groups related chapters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub section_id: String,
    pub section_title: String,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

/// A chapter is the smallest unit of course content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub chapter_id: String,
    pub title: String,
    /// Text content (reading material)
    #[serde(default)]
    pub content: String,
    /// Video attached to the chapter
    #[serde(default)]
    pub video: Option<Video>,
    /// Supplementary links
    #[serde(default)]
    pub resources: Vec<Resource>,
    /// Quiz questions embedded in the course file
    #[serde(default)]
    pub quiz: Vec<Question>,
}

impl Chapter {
    /// Create a chapter with only an ID and title
    pub fn new(chapter_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            chapter_id: chapter_id.into(),
            title: title.into(),
            content: String::new(),
            video: None,
            resources: Vec::new(),
            quiz: Vec::new(),
        }
    }
}

/// Video metadata; playback itself is simulated by the player clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub url: String,
    pub duration_seconds: u32,
}

/// A link shown in the Resources tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
}

/// The signed-in learner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub name: String,
}

impl User {
    /// Create a user whose ID is derived from the display name
    pub fn from_name(name: &str) -> Self {
        let user_id = name
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        Self { user_id, name: name.trim().to_string() }
    }
}

/// Completion marker for one chapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterProgress {
    pub chapter_id: String,
    pub completed: bool,
}

/// Completion markers for one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionProgress {
    pub section_id: String,
    pub chapters: Vec<ChapterProgress>,
}

/// A learner's stored progress through a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCourseProgress {
    pub user_id: String,
    pub course_id: String,
    pub sections: Vec<SectionProgress>,
    /// Percentage of chapters completed (0-100)
    pub overall_progress: f32,
    /// Unix timestamp of the last update
    pub last_accessed: Option<i64>,
}

impl UserCourseProgress {
    /// Create an empty record with one entry per chapter of `course`
    pub fn for_course(user_id: &str, course: &Course) -> Self {
        let sections = course
            .sections
            .iter()
            .map(|section| SectionProgress {
                section_id: section.section_id.clone(),
                chapters: section
                    .chapters
                    .iter()
                    .map(|c| ChapterProgress { chapter_id: c.chapter_id.clone(), completed: false })
                    .collect(),
            })
            .collect();

        Self {
            user_id: user_id.to_string(),
            course_id: course.course_id.clone(),
            sections,
            overall_progress: 0.0,
            last_accessed: None,
        }
    }

    /// Whether the given chapter is marked completed
    pub fn is_chapter_completed(&self, section_id: &str, chapter_id: &str) -> bool {
        self.sections
            .iter()
            .find(|s| s.section_id == section_id)
            .and_then(|s| s.chapters.iter().find(|c| c.chapter_id == chapter_id))
            .is_some_and(|c| c.completed)
    }

    /// Set a chapter's completion, creating entries as needed
    pub fn set_chapter_completed(&mut self, section_id: &str, chapter_id: &str, completed: bool) {
        let section = match self.sections.iter_mut().position(|s| s.section_id == section_id) {
            Some(idx) => &mut self.sections[idx],
            None => {
                self.sections.push(SectionProgress {
                    section_id: section_id.to_string(),
                    chapters: Vec::new(),
                });
                let last = self.sections.len() - 1;
                &mut self.sections[last]
            }
        };

        match section.chapters.iter_mut().find(|c| c.chapter_id == chapter_id) {
            Some(chapter) => chapter.completed = completed,
            None => section
                .chapters
                .push(ChapterProgress { chapter_id: chapter_id.to_string(), completed }),
        }

        self.overall_progress = self.completion_percent();
    }

    /// Copy completion flags from a stored record onto this one.
    ///
    /// Only chapters this record already tracks are copied, so chapters dropped
    /// from the course no longer count towards `overall_progress`.
    pub fn restore_from(&mut self, stored: &UserCourseProgress) {
        for section in &mut self.sections {
            for chapter in &mut section.chapters {
                chapter.completed =
                    stored.is_chapter_completed(&section.section_id, &chapter.chapter_id);
            }
        }
        self.last_accessed = stored.last_accessed;
        self.overall_progress = self.completion_percent();
    }

    /// Percentage of tracked chapters that are completed
    pub fn completion_percent(&self) -> f32 {
        let (done, total) = self.sections.iter().flat_map(|s| s.chapters.iter()).fold(
            (0usize, 0usize),
            |(done, total), c| (done + usize::from(c.completed), total + 1),
        );
        if total == 0 { 0.0 } else { done as f32 * 100.0 / total as f32 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_course() -> Course {
        Course {
            course_id: "ux-101".into(),
            title: "UX Fundamentals".into(),
            teacher_name: "ada Park".into(),
            teacher_title: None,
            teacher_bio: None,
            sections: vec![
                Section {
                    section_id: "s1".into(),
                    section_title: "Basics".into(),
                    chapters: vec![Chapter::new("c1", "Intro"), Chapter::new("c2", "Personas")],
                },
                Section {
                    section_id: "s2".into(),
                    section_title: "Practice".into(),
                    chapters: vec![Chapter::new("c3", "Wireframes")],
                },
            ],
        }
    }

    #[test]
    fn find_chapter_returns_owning_section() {
        let course = sample_course();
        let (section, chapter) = course.find_chapter("c3").unwrap();
        assert_eq!(section.section_id, "s2");
        assert_eq!(chapter.title, "Wireframes");
        assert!(course.find_chapter("missing").is_none());
    }

    #[test]
    fn next_and_previous_cross_sections() {
        let course = sample_course();
        assert_eq!(course.next_chapter("c2").unwrap().1.chapter_id, "c3");
        assert_eq!(course.previous_chapter("c3").unwrap().1.chapter_id, "c2");
        assert!(course.next_chapter("c3").is_none());
        assert!(course.previous_chapter("c1").is_none());
    }

    #[test]
    fn teacher_initial_is_uppercased() {
        assert_eq!(sample_course().teacher_initial(), 'A');
    }

    #[test]
    fn progress_for_course_starts_incomplete() {
        let course = sample_course();
        let progress = UserCourseProgress::for_course("u1", &course);
        assert_eq!(progress.sections.len(), 2);
        assert!(!progress.is_chapter_completed("s1", "c1"));
        assert_eq!(progress.completion_percent(), 0.0);
    }

    #[test]
    fn set_chapter_completed_updates_overall() {
        let course = sample_course();
        let mut progress = UserCourseProgress::for_course("u1", &course);
        progress.set_chapter_completed("s1", "c1", true);
        assert!(progress.is_chapter_completed("s1", "c1"));
        assert!((progress.overall_progress - 100.0 / 3.0).abs() < 0.01);
    }

    #[test]
    fn set_chapter_completed_creates_missing_entries() {
        let mut progress = UserCourseProgress::for_course("u1", &sample_course());
        progress.set_chapter_completed("s9", "c9", true);
        assert!(progress.is_chapter_completed("s9", "c9"));
    }

    #[test]
    fn restore_from_counts_every_course_chapter() {
        let course = sample_course();
        let mut stored = UserCourseProgress {
            user_id: "u1".into(),
            course_id: "ux-101".into(),
            sections: Vec::new(),
            overall_progress: 100.0,
            last_accessed: Some(42),
        };
        stored.set_chapter_completed("s1", "c1", true);
        stored.set_chapter_completed("s1", "gone", true);

        let mut progress = UserCourseProgress::for_course("u1", &course);
        progress.restore_from(&stored);

        assert!(progress.is_chapter_completed("s1", "c1"));
        assert!(!progress.is_chapter_completed("s1", "gone"));
        assert!((progress.overall_progress - 100.0 / 3.0).abs() < 0.01);
        assert_eq!(progress.last_accessed, Some(42));
    }

    #[test]
    fn user_id_from_name() {
        assert_eq!(User::from_name(" Ada Park ").user_id, "ada-park");
    }

    #[test]
    fn course_deserializes_with_optional_fields() {
        let json = r#"{
            "course_id": "c",
            "title": "T",
            "teacher_name": "N",
            "sections": [{
                "section_id": "s",
                "section_title": "S",
                "chapters": [{"chapter_id": "x", "title": "X",
                              "video": {"url": "v.mp4", "duration_seconds": 60}}]
            }]
        }"#;
        let course: Course = serde_json::from_str(json).unwrap();
        let (_, chapter) = course.find_chapter("x").unwrap();
        assert_eq!(chapter.video.as_ref().unwrap().duration_seconds, 60);
        assert!(chapter.resources.is_empty());
        assert!(chapter.quiz.is_empty());
    }
}
