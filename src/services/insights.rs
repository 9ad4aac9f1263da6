//! Chart series and deterministic summaries built from the stored collections.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};
use serde::Serialize;

use crate::models::assessment::{max_possible_score, AssessmentResult, StressLevel};
use crate::models::mood::{Mood, MoodEntry};
use crate::models::task::{find_task, TaskCatalogEntry, TaskCompletion};
use crate::services::clock::local_date;

pub const DEFAULT_ASSESSMENT_TREND: usize = 10;
pub const DEFAULT_TASK_HISTORY: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodTrendPoint {
    pub date: NaiveDate,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub mood: Mood,
    pub value: u8,
}

/// Maps entries (already ordered) onto chart points.
pub fn mood_trend(moods: &[MoodEntry], offset: FixedOffset) -> Vec<MoodTrendPoint> {
    moods
        .iter()
        .map(|m| MoodTrendPoint {
            date: local_date(m.timestamp, offset),
            timestamp: m.timestamp,
            mood: m.mood,
            value: m.mood.chart_value(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodSummary {
    pub total: usize,
    pub counts: BTreeMap<Mood, usize>,
    pub dominant: Option<Mood>,
    pub average_value: Option<f64>,
}

pub fn mood_summary(moods: &[MoodEntry]) -> MoodSummary {
    let mut counts: BTreeMap<Mood, usize> = BTreeMap::new();
    for entry in moods {
        *counts.entry(entry.mood).or_insert(0) += 1;
    }

    // ties go to the brighter mood
    let dominant = counts
        .iter()
        .max_by_key(|(mood, count)| (**count, mood.chart_value()))
        .map(|(mood, _)| *mood);

    let average_value = if moods.is_empty() {
        None
    } else {
        let sum: u32 = moods.iter().map(|m| m.mood.chart_value() as u32).sum();
        Some(sum as f64 / moods.len() as f64)
    };

    MoodSummary {
        total: moods.len(),
        counts,
        dominant,
        average_value,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailedScore {
    pub name: &'static str,
    pub value: u32,
}

/// Illustrative breakdown of one total score; not separately measured.
pub fn detailed_scores(score: u32) -> [DetailedScore; 3] {
    let pct = score as f64 / max_possible_score() as f64 * 100.0;
    let weighted = |factor: f64| (pct * factor).min(100.0).round() as u32;
    [
        DetailedScore {
            name: "Anxiety",
            value: weighted(0.9),
        },
        DetailedScore {
            name: "Stress",
            value: weighted(1.1),
        },
        DetailedScore {
            name: "Depression",
            value: weighted(0.85),
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentTrendPoint {
    pub date: NaiveDate,
    pub score: u32,
    pub level: StressLevel,
}

/// The last `limit` results, oldest first.
pub fn assessment_trend(
    assessments: &[AssessmentResult],
    limit: usize,
    offset: FixedOffset,
) -> Vec<AssessmentTrendPoint> {
    let skip = assessments.len().saturating_sub(limit);
    assessments[skip..]
        .iter()
        .map(|a| AssessmentTrendPoint {
            date: local_date(a.timestamp, offset),
            score: a.score,
            level: a.level,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStreak {
    pub current: u32,
    pub longest: u32,
    pub total_completions: usize,
}

/// Current streak counts consecutive local days with a completion ending
/// today; a day without one breaks it.
pub fn task_streak(completions: &[TaskCompletion], today: NaiveDate, offset: FixedOffset) -> TaskStreak {
    let days: BTreeSet<NaiveDate> = completions
        .iter()
        .map(|c| local_date(c.timestamp, offset))
        .collect();

    let mut current = 0u32;
    let mut check_date = today;
    for date in days.iter().rev() {
        if *date == check_date {
            current += 1;
            check_date -= Duration::days(1);
        } else if *date < check_date {
            break;
        }
    }

    let mut longest = 0u32;
    let mut streak = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for date in &days {
        streak = match prev {
            Some(p) if *date == p + Duration::days(1) => streak + 1,
            _ => 1,
        };
        longest = longest.max(streak);
        prev = Some(*date);
    }

    TaskStreak {
        current,
        longest,
        total_completions: completions.len(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedTask {
    #[serde(flatten)]
    pub completion: TaskCompletion,
    pub task: Option<TaskCatalogEntry>,
}

/// Joins completions (most recent first) with their catalog entries.
pub fn completed_tasks(history: &[TaskCompletion], limit: usize) -> Vec<CompletedTask> {
    history
        .iter()
        .take(limit)
        .map(|c| CompletedTask {
            completion: c.clone(),
            task: find_task(c.task_id).copied(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessInsight {
    pub summary: String,
    pub wins: Vec<String>,
    pub improvements: Vec<String>,
    pub latest_level: Option<StressLevel>,
    pub recommended_task: Option<TaskCatalogEntry>,
    pub mood_summary: MoodSummary,
    pub streak: TaskStreak,
}

/// Rule-based summary of the moods from the last `window_days`, the latest
/// assessment and the task streak.
pub fn generate_insight(
    recent_moods: &[MoodEntry],
    window_days: i64,
    assessments: &[AssessmentResult],
    streak: TaskStreak,
) -> WellnessInsight {
    let mood_summary = mood_summary(recent_moods);
    let window = match window_days {
        1 => "in the last day".to_string(),
        7 => "this week".to_string(),
        n => format!("in the last {} days", n),
    };
    let latest = assessments.last();
    let latest_level = latest.map(|a| a.level);

    let summary = match (mood_summary.dominant, latest_level) {
        (None, None) => {
            "No entries yet. Log your mood or take the assessment to see insights here.".to_string()
        }
        (Some(mood), None) => format!(
            "You logged {} mood entries {}, mostly feeling {}.",
            mood_summary.total,
            window,
            mood.label().to_lowercase()
        ),
        (None, Some(level)) => format!("Your latest assessment shows {}.", level.label().to_lowercase()),
        (Some(mood), Some(level)) => format!(
            "You logged {} mood entries {}, mostly feeling {}. Your latest assessment shows {}.",
            mood_summary.total,
            window,
            mood.label().to_lowercase(),
            level.label().to_lowercase()
        ),
    };

    let mut wins = Vec::new();
    if streak.current > 1 {
        wins.push(format!("{}-day mindfulness streak. Keep it going!", streak.current));
    }
    if let Some(avg) = mood_summary.average_value {
        if avg >= 3.5 {
            wins.push("Most of your recent moods have been positive.".to_string());
        }
    }
    if let [.., previous, last] = assessments {
        if last.score < previous.score {
            wins.push(format!(
                "Your assessment score dropped from {} to {}.",
                previous.score, last.score
            ));
        }
    }

    let mut improvements: Vec<String> = latest_level
        .map(|level| level.tips().iter().map(|t| t.to_string()).collect())
        .unwrap_or_default();
    if mood_summary.total == 0 {
        improvements.push("Track your mood daily to spot patterns.".to_string());
    }
    if streak.current == 0 {
        improvements.push("Complete today's mindfulness task to start a streak.".to_string());
    }

    WellnessInsight {
        summary,
        wins,
        improvements,
        latest_level,
        recommended_task: latest_level.map(|l| *l.recommended_category().task()),
        mood_summary,
        streak,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    use crate::auth::identity::UserId;
    use crate::models::assessment::QuestionResponse;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, d).unwrap()
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, d, h, 0, 0).unwrap()
    }

    fn mood(m: Mood, ts: DateTime<Utc>) -> MoodEntry {
        MoodEntry {
            id: Uuid::now_v7(),
            user_id: UserId::new("u1"),
            mood: m,
            note: None,
            timestamp: ts,
        }
    }

    fn completion(task_id: u32, ts: DateTime<Utc>) -> TaskCompletion {
        TaskCompletion {
            id: Uuid::now_v7(),
            user_id: UserId::new("u1"),
            task_id,
            timestamp: ts,
        }
    }

    fn assessment(score: u32, level: StressLevel, ts: DateTime<Utc>) -> AssessmentResult {
        AssessmentResult {
            id: Uuid::now_v7(),
            user_id: UserId::new("u1"),
            score,
            level,
            timestamp: ts,
            responses: vec![QuestionResponse::new(1, 0)],
        }
    }

    #[test]
    fn test_mood_trend_values() {
        let points = mood_trend(
            &[mood(Mood::Happy, at(1, 9)), mood(Mood::Angry, at(2, 9))],
            utc(),
        );
        assert_eq!(points[0].value, 5);
        assert_eq!(points[0].date, day(1));
        assert_eq!(points[1].value, 0);
    }

    #[test]
    fn test_mood_summary_counts_and_ties() {
        let summary = mood_summary(&[
            mood(Mood::Sad, at(1, 9)),
            mood(Mood::Happy, at(2, 9)),
            mood(Mood::Sad, at(3, 9)),
            mood(Mood::Happy, at(4, 9)),
        ]);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.counts.get(&Mood::Sad), Some(&2));
        assert_eq!(summary.dominant, Some(Mood::Happy));
        assert_eq!(summary.average_value, Some(3.0));

        let empty = mood_summary(&[]);
        assert!(empty.dominant.is_none());
        assert!(empty.average_value.is_none());
    }

    #[test]
    fn test_detailed_scores() {
        let [anxiety, stress, depression] = detailed_scores(21);
        assert_eq!(anxiety.value, 90);
        assert_eq!(stress.value, 100);
        assert_eq!(depression.value, 85);

        let [_, stress, _] = detailed_scores(0);
        assert_eq!(stress.value, 0);
    }

    #[test]
    fn test_assessment_trend_keeps_last_entries() {
        let results: Vec<_> = (1..=12)
            .map(|d| assessment(0, StressLevel::LowStress, at(d, 9)))
            .collect();
        let trend = assessment_trend(&results, DEFAULT_ASSESSMENT_TREND, utc());
        assert_eq!(trend.len(), 10);
        assert_eq!(trend[0].date, day(3));
        assert_eq!(trend[9].date, day(12));
        assert_eq!(assessment_trend(&results[..2], 10, utc()).len(), 2);
    }

    #[test]
    fn test_task_streak() {
        let completions = vec![
            completion(1, at(1, 9)),
            completion(2, at(2, 9)),
            completion(3, at(3, 9)),
            completion(4, at(6, 9)),
            completion(5, at(7, 9)),
            completion(5, at(7, 19)),
        ];
        let streak = task_streak(&completions, day(7), utc());
        assert_eq!(streak.current, 2);
        assert_eq!(streak.longest, 3);
        assert_eq!(streak.total_completions, 6);

        let broken = task_streak(&completions, day(9), utc());
        assert_eq!(broken.current, 0);
    }

    #[test]
    fn test_task_streak_empty() {
        let streak = task_streak(&[], day(1), utc());
        assert_eq!(streak, TaskStreak { current: 0, longest: 0, total_completions: 0 });
    }

    #[test]
    fn test_completed_tasks_join_catalog() {
        let history = vec![completion(2, at(3, 9)), completion(99, at(2, 9))];
        let joined = completed_tasks(&history, DEFAULT_TASK_HISTORY);
        assert_eq!(joined[0].task.map(|t| t.id), Some(2));
        assert!(joined[1].task.is_none());
        assert_eq!(completed_tasks(&history, 1).len(), 1);
    }

    #[test]
    fn test_insight_without_data() {
        let insight = generate_insight(&[], 7, &[], task_streak(&[], day(1), utc()));
        assert!(insight.summary.starts_with("No entries yet"));
        assert!(insight.latest_level.is_none());
        assert!(insight.recommended_task.is_none());
        assert_eq!(insight.improvements.len(), 2);
    }

    #[test]
    fn test_insight_names_the_mood_window() {
        let moods = vec![mood(Mood::Neutral, at(5, 9))];
        let streak = task_streak(&[], day(5), utc());

        let week = generate_insight(&moods, 7, &[], streak);
        assert!(week.summary.contains("1 mood entries this week"));

        let month = generate_insight(&moods, 30, &[], streak);
        assert!(month.summary.contains("in the last 30 days"));
        assert!(!month.summary.contains("this week"));
    }

    #[test]
    fn test_insight_uses_latest_assessment() {
        let moods = vec![mood(Mood::Happy, at(5, 9)), mood(Mood::Happy, at(6, 9))];
        let assessments = vec![
            assessment(12, StressLevel::ModerateStress, at(1, 9)),
            assessment(6, StressLevel::MildStress, at(6, 9)),
        ];
        let streak = TaskStreak {
            current: 3,
            longest: 3,
            total_completions: 3,
        };
        let insight = generate_insight(&moods, 7, &assessments, streak);

        assert_eq!(insight.latest_level, Some(StressLevel::MildStress));
        assert_eq!(insight.recommended_task.map(|t| t.id), Some(2));
        assert_eq!(insight.wins.len(), 3);
        assert_eq!(insight.improvements, StressLevel::MildStress.tips().to_vec());
        assert!(insight.summary.contains("mostly feeling happy"));
    }
}
