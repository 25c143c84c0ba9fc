//! Marks a chapter complete once enough of its video has been watched

use super::data::CourseProgressData;

/// Fraction of the video that must be played before the chapter counts as complete
pub const COMPLETION_THRESHOLD: f64 = 0.8;

/// Handle a playback progress event.
///
/// Fires the completion mutation at most once per chapter view: the one-shot
/// flag is set before the mutation is issued, so later progress events are
/// ignored even if the mutation has not been applied yet. Returns whether the
/// mutation was issued.
pub fn handle_progress<D>(played: f64, data: &mut D) -> bool
where
    D: CourseProgressData + ?Sized,
{
    if played < COMPLETION_THRESHOLD || data.has_marked_complete() {
        return false;
    }

    let (Some(section), Some(chapter)) = (data.current_section(), data.current_chapter()) else {
        return false;
    };
    if data.user_progress().is_none_or(|p| p.sections.is_empty()) || data.is_chapter_completed() {
        return false;
    }

    let section_id = section.section_id.clone();
    let chapter_id = chapter.chapter_id.clone();

    data.set_has_marked_complete(true);
    tracing::info!(
        section = %section_id,
        chapter = %chapter_id,
        played,
        "Marking chapter complete"
    );
    data.update_chapter_progress(&section_id, &chapter_id, true);
    true
}
