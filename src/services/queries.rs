//! Read-only derivations over the repository's collections.
//!
//! Every function takes slices and returns owned copies; none of them can
//! mutate repository state, and an empty slice simply yields an empty answer.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};

use crate::models::assessment::AssessmentResult;
use crate::models::mood::MoodEntry;
use crate::models::task::TaskCompletion;
use crate::services::clock::{local_date, DayWindow};

pub const DEFAULT_RECENT_DAYS: i64 = 7;

/// Entries from the last `days × 24h`, oldest first. `days <= 0` yields nothing;
/// a window reaching past the representable range keeps every entry.
pub fn recent_moods(moods: &[MoodEntry], now: DateTime<Utc>, days: i64) -> Vec<MoodEntry> {
    if days <= 0 {
        return Vec::new();
    }
    let cutoff = Duration::try_days(days).and_then(|span| now.checked_sub_signed(span));
    let mut recent: Vec<MoodEntry> = moods
        .iter()
        .filter(|m| cutoff.map_or(true, |c| m.timestamp >= c))
        .cloned()
        .collect();
    recent.sort_by_key(|m| m.timestamp);
    recent
}

/// Entries with `start <= timestamp <= end`, oldest first.
pub fn moods_in_range(
    moods: &[MoodEntry],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<MoodEntry> {
    if end < start {
        return Vec::new();
    }
    let mut in_range: Vec<MoodEntry> = moods
        .iter()
        .filter(|m| m.timestamp >= start && m.timestamp <= end)
        .cloned()
        .collect();
    in_range.sort_by_key(|m| m.timestamp);
    in_range
}

/// First entry in list order recorded on the local `date`.
///
/// Several entries on one day resolve to the first recorded, not the latest;
/// [`moods_on_date`] exposes all of them.
pub fn mood_on_date(moods: &[MoodEntry], date: NaiveDate, offset: FixedOffset) -> Option<MoodEntry> {
    let window = DayWindow::for_date(date, offset);
    moods.iter().find(|m| window.contains(m.timestamp)).cloned()
}

/// Every entry recorded on the local `date`, oldest first.
pub fn moods_on_date(moods: &[MoodEntry], date: NaiveDate, offset: FixedOffset) -> Vec<MoodEntry> {
    let window = DayWindow::for_date(date, offset);
    let mut day: Vec<MoodEntry> = moods
        .iter()
        .filter(|m| window.contains(m.timestamp))
        .cloned()
        .collect();
    day.sort_by_key(|m| m.timestamp);
    day
}

/// Local dates that carry at least one entry (calendar highlights).
pub fn mood_dates(moods: &[MoodEntry], offset: FixedOffset) -> BTreeSet<NaiveDate> {
    moods
        .iter()
        .map(|m| local_date(m.timestamp, offset))
        .collect()
}

/// Most recent first.
pub fn task_completion_history(completions: &[TaskCompletion]) -> Vec<TaskCompletion> {
    let mut history = completions.to_vec();
    history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    history
}

/// Insertion order, which is chronological.
pub fn assessment_history(assessments: &[AssessmentResult]) -> Vec<AssessmentResult> {
    assessments.to_vec()
}
