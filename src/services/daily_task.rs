//! Daily mindfulness task selection.
//!
//! Given `(now, completions, force_new)` the choice is fixed, except for the
//! explicit "give me another" path which draws from the supplied RNG.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use rand::Rng;

use crate::models::task::{find_task, DailyTask, TaskCompletion, TASK_CATALOG};
use crate::services::clock::DayWindow;

/// What unauthenticated callers see: the first catalog entry, not completed.
pub fn default_task() -> DailyTask {
    DailyTask::pending(&TASK_CATALOG[0])
}

/// `day_of_year mod catalog size`, with the 1-based ordinal of the local date.
pub fn rotation_index(date: NaiveDate) -> usize {
    date.ordinal() as usize % TASK_CATALOG.len()
}

/// The completion that governs `window`: the earliest one inside it, list
/// order breaking timestamp ties.
pub fn completion_in<'a>(
    completions: &'a [TaskCompletion],
    window: &DayWindow,
) -> Option<&'a TaskCompletion> {
    completions
        .iter()
        .filter(|c| window.contains(c.timestamp))
        .min_by_key(|c| c.timestamp)
}

pub fn select_daily_task<R: Rng + ?Sized>(
    now: DateTime<Utc>,
    offset: FixedOffset,
    completions: &[TaskCompletion],
    force_new: bool,
    rng: &mut R,
) -> DailyTask {
    let today = DayWindow::containing(now, offset);

    if !force_new {
        if let Some(done) = completion_in(completions, &today) {
            // completions for tasks no longer in the catalog fall through to rotation
            if let Some(task) = find_task(done.task_id) {
                return DailyTask::completed(task, done.timestamp);
            }
            tracing::warn!(task_id = done.task_id, "Completed task missing from catalog");
        }
    }

    let index = if force_new {
        rng.gen_range(0..TASK_CATALOG.len())
    } else {
        rotation_index(today.date)
    };

    DailyTask::pending(&TASK_CATALOG[index])
}
