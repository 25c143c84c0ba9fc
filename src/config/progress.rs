//! Stored chapter completion per learner and course

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::Config;
use crate::course::model::{Course, UserCourseProgress};

/// A single completion change to persist
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub user_id: String,
    pub course_id: String,
    pub section_id: String,
    pub chapter_id: String,
    pub completed: bool,
    /// Course-wide percentage after the change, computed against every chapter
    pub overall_progress: f32,
}

/// All stored progress records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressStore {
    /// Progress per learner and course (key is "user_id/course_id")
    pub records: HashMap<String, UserCourseProgress>,
}

impl ProgressStore {
    /// Load progress from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::progress_path()?)
    }

    /// Load progress from `path`, or start empty if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read progress from {:?}", path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse progress.json")
        } else {
            Ok(Self::default())
        }
    }

    /// Save progress to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::progress_path()?)
    }

    /// Save progress to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize progress")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write progress to {:?}", path))?;

        Ok(())
    }

    /// Get progress path
    pub fn progress_path() -> Result<PathBuf> {
        Ok(Config::data_dir()?.join("progress.json"))
    }

    fn key(user_id: &str, course_id: &str) -> String {
        format!("{user_id}/{course_id}")
    }

    /// Get the stored record for a learner and course
    pub fn get(&self, user_id: &str, course_id: &str) -> Option<&UserCourseProgress> {
        self.records.get(&Self::key(user_id, course_id))
    }

    /// A record covering every chapter of `course`, with stored completions applied
    pub fn for_course(&self, user_id: &str, course: &Course) -> UserCourseProgress {
        let mut record = UserCourseProgress::for_course(user_id, course);
        if let Some(stored) = self.get(user_id, &course.course_id) {
            record.restore_from(stored);
        }
        record
    }

    /// Apply a completion change
    pub fn record_chapter(&mut self, update: &ProgressUpdate) {
        let record =
            self.records.entry(Self::key(&update.user_id, &update.course_id)).or_insert_with(|| {
                UserCourseProgress {
                    user_id: update.user_id.clone(),
                    course_id: update.course_id.clone(),
                    sections: Vec::new(),
                    overall_progress: 0.0,
                    last_accessed: None,
                }
            });
        record.set_chapter_completed(&update.section_id, &update.chapter_id, update.completed);
        // The stored record may not list every chapter yet
        record.overall_progress = update.overall_progress;
        record.last_accessed = Some(unix_now());
    }

    /// Remove every learner's progress for a course, returns how many records were removed
    pub fn remove_course(&mut self, course_id: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|_, record| record.course_id != course_id);
        before - self.records.len()
    }
}

fn unix_now() -> i64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs() as i64).unwrap_or(0)
}

/// Spawn a task that applies and saves updates as they arrive.
///
/// Failures are logged and never reported back to the sender.
pub fn spawn_persist_task(
    mut store: ProgressStore,
    path: PathBuf,
    mut updates: mpsc::UnboundedReceiver<ProgressUpdate>,
) -> JoinHandle<ProgressStore> {
    tokio::spawn(async move {
        while let Some(update) = updates.recv().await {
            store.record_chapter(&update);
            let snapshot = store.clone();
            let path = path.clone();
            match tokio::task::spawn_blocking(move || snapshot.save_to(&path)).await {
                Ok(Ok(())) => {
                    tracing::debug!(chapter = %update.chapter_id, "Saved chapter progress");
                }
                Ok(Err(e)) => tracing::warn!("Failed to save progress: {:#}", e),
                Err(e) => tracing::warn!("Progress save task failed: {}", e),
            }
        }
        store
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::model::{Chapter, Section};

    fn update(chapter_id: &str) -> ProgressUpdate {
        ProgressUpdate {
            user_id: "u1".into(),
            course_id: "ux-101".into(),
            section_id: "s1".into(),
            chapter_id: chapter_id.into(),
            completed: true,
            overall_progress: 50.0,
        }
    }

    fn three_chapter_course() -> Course {
        Course {
            course_id: "ux-101".into(),
            title: "UX".into(),
            teacher_name: "Ada".into(),
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
    fn default_store_is_empty() {
        let store = ProgressStore::default();
        assert!(store.records.is_empty());
    }

    #[test]
    fn record_chapter_creates_record() {
        let mut store = ProgressStore::default();
        store.record_chapter(&update("c1"));

        let record = store.get("u1", "ux-101").unwrap();
        assert!(record.is_chapter_completed("s1", "c1"));
        assert!(record.last_accessed.is_some());
    }

    #[test]
    fn for_course_builds_fresh_record() {
        let course = Course {
            course_id: "ux-101".into(),
            title: "UX".into(),
            teacher_name: "Ada".into(),
            teacher_title: None,
            teacher_bio: None,
            sections: vec![Section {
                section_id: "s1".into(),
                section_title: "Basics".into(),
                chapters: vec![Chapter::new("c1", "Intro")],
            }],
        };
        let store = ProgressStore::default();
        let record = store.for_course("u1", &course);
        assert_eq!(record.sections[0].chapters.len(), 1);
        assert!(!record.is_chapter_completed("s1", "c1"));
    }

    #[test]
    fn one_completed_chapter_reloads_as_a_third() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");

        let mut store = ProgressStore::default();
        store.record_chapter(&update("c1"));
        store.save_to(&path).unwrap();

        let loaded = ProgressStore::load_from(&path).unwrap();
        let record = loaded.for_course("u1", &three_chapter_course());
        assert!(record.is_chapter_completed("s1", "c1"));
        assert!(!record.is_chapter_completed("s2", "c3"));
        assert!((record.completion_percent() - 100.0 / 3.0).abs() < 0.01);
        assert!((record.overall_progress - 100.0 / 3.0).abs() < 0.01);
    }

    #[test]
    fn for_course_ignores_other_learners() {
        let mut store = ProgressStore::default();
        store.record_chapter(&ProgressUpdate { user_id: "u2".into(), ..update("c1") });

        let record = store.for_course("u1", &three_chapter_course());
        assert_eq!(record.completion_percent(), 0.0);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("progress.json");

        let mut store = ProgressStore::default();
        store.record_chapter(&update("c2"));
        store.save_to(&path).unwrap();

        let loaded = ProgressStore::load_from(&path).unwrap();
        assert!(loaded.get("u1", "ux-101").unwrap().is_chapter_completed("s1", "c2"));
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProgressStore::load_from(&dir.path().join("none.json")).unwrap();
        assert!(store.records.is_empty());
    }

    #[test]
    fn remove_course_drops_matching_records() {
        let mut store = ProgressStore::default();
        store.record_chapter(&update("c1"));
        store.record_chapter(&ProgressUpdate { user_id: "u2".into(), ..update("c1") });
        store.record_chapter(&ProgressUpdate { course_id: "other".into(), ..update("c1") });

        assert_eq!(store.remove_course("ux-101"), 2);
        assert_eq!(store.records.len(), 1);
    }

    #[tokio::test]
    async fn persist_task_saves_each_update() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        let (tx, rx) = mpsc::unbounded_channel();

        let handle = spawn_persist_task(ProgressStore::default(), path.clone(), rx);
        tx.send(update("c1")).unwrap();
        drop(tx);

        let store = handle.await.unwrap();
        assert!(store.get("u1", "ux-101").unwrap().is_chapter_completed("s1", "c1"));
        let on_disk = ProgressStore::load_from(&path).unwrap();
        assert!(on_disk.get("u1", "ux-101").unwrap().is_chapter_completed("s1", "c1"));
    }

    #[tokio::test]
    async fn completion_survives_writer_and_reload() {
        use crate::course::data::CourseProgressData;
        use crate::course::data::tests::loaded_data;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = spawn_persist_task(ProgressStore::default(), path.clone(), rx);

        let mut data = loaded_data(Some(tx));
        data.update_chapter_progress("s1", "c1", true);
        data.close_updates();
        handle.await.unwrap();

        let on_disk = ProgressStore::load_from(&path).unwrap();
        let stored = on_disk.get("ada", "ux-101").unwrap();
        assert_eq!(stored.overall_progress, 50.0);

        let course = data.course().unwrap().clone();
        let record = on_disk.for_course("ada", &course);
        assert!(record.is_chapter_completed("s1", "c1"));
        assert_eq!(record.completion_percent(), 50.0);
        assert_eq!(record.overall_progress, 50.0);
    }
}
