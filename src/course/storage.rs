//! Course file loading
//!
//! Courses are stored as a single JSON document. Loading runs on a blocking
//! task so the view can keep drawing its loading screen meanwhile.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::CourseError;
use super::model::Course;

/// Read and parse a course file
pub fn load_course(path: &Path) -> Result<Course, CourseError> {
    let contents = fs::read_to_string(path)
        .map_err(|source| CourseError::Io { path: path.to_path_buf(), source })?;
    parse_course(&contents)
}

/// Parse course JSON, rejecting courses without chapters
pub fn parse_course(contents: &str) -> Result<Course, CourseError> {
    let course: Course = serde_json::from_str(contents)?;
    if course.chapter_count() == 0 {
        return Err(CourseError::Empty(course.course_id));
    }
    Ok(course)
}

/// Load a course on the blocking pool
pub async fn load_course_async(path: PathBuf) -> Result<Course, CourseError> {
    tokio::task::spawn_blocking(move || load_course(&path))
        .await
        .map_err(|e| CourseError::Task(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const COURSE_JSON: &str = r#"{
        "course_id": "ux-101",
        "title": "UX Fundamentals",
        "teacher_name": "Ada Park",
        "sections": [{
            "section_id": "s1",
            "section_title": "Basics",
            "chapters": [{"chapter_id": "c1", "title": "Intro"}]
        }]
    }"#;

    #[test]
    fn parse_valid_course() {
        let course = parse_course(COURSE_JSON).unwrap();
        assert_eq!(course.course_id, "ux-101");
        assert_eq!(course.chapter_count(), 1);
    }

    #[test]
    fn parse_rejects_empty_course() {
        let json = r#"{"course_id": "empty", "title": "T", "teacher_name": "N", "sections": []}"#;
        assert!(matches!(parse_course(json), Err(CourseError::Empty(id)) if id == "empty"));
    }

    #[test]
    fn parse_rejects_invalid_json() {
        assert!(matches!(parse_course("{not json"), Err(CourseError::Parse(_))));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_course(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(CourseError::Io { .. })));
    }

    #[tokio::test]
    async fn load_async_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(COURSE_JSON.as_bytes()).unwrap();

        let course = load_course_async(file.path().to_path_buf()).await.unwrap();
        assert_eq!(course.title, "UX Fundamentals");
    }
}
