//! The engine the presentation layer talks to.
//!
//! Wires the repository to a clock and exposes every write and read the UI
//! needs. Reads never fail: with nobody signed in the collections are empty
//! and so are the answers.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use validator::Validate;

use crate::auth::identity::{IdentityHolder, UserId};
use crate::config::Config;
use crate::dto::{AssessmentRequest, MoodRequest};
use crate::error::{AppError, AppResult};
use crate::models::assessment::{AssessmentResult, QuestionResponse, StressLevel};
use crate::models::mood::MoodEntry;
use crate::models::task::{DailyTask, TaskCompletion};
use crate::services::clock::{Clock, SystemClock};
use crate::services::daily_task;
use crate::services::insights::{
    self, AssessmentTrendPoint, CompletedTask, DetailedScore, MoodSummary, MoodTrendPoint,
    TaskStreak, WellnessInsight, DEFAULT_ASSESSMENT_TREND, DEFAULT_TASK_HISTORY,
};
use crate::services::queries;
use crate::services::repository::WellnessRepository;
use crate::services::scorer::{self, AssessmentOutcome};
use crate::store::Store;

pub struct WellnessEngine<S, C = SystemClock> {
    repo: WellnessRepository<S>,
    clock: C,
    recent_days: i64,
}

impl<S: Store, C: Clock> WellnessEngine<S, C> {
    pub fn new(store: S, clock: C, config: &Config) -> Self {
        Self {
            repo: WellnessRepository::new(store, config.key_prefix.clone()),
            clock,
            recent_days: config.recent_days,
        }
    }

    pub fn repository(&self) -> &WellnessRepository<S> {
        &self.repo
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn active_identity(&self) -> Option<&UserId> {
        self.repo.owner()
    }

    // ── Identity lifecycle ──────────────────────────────────────────────────

    /// Follow the holder: load when a different identity became active,
    /// clear when nobody is. Returns the problems hit while loading.
    pub fn sync_identity(&mut self, holder: &IdentityHolder) -> Vec<AppError> {
        match holder.current() {
            Some(id) if self.repo.owner() == Some(id) => Vec::new(),
            Some(id) => self.repo.load_for_identity(id),
            None => {
                self.repo.clear();
                Vec::new()
            }
        }
    }

    pub fn load_for_identity(&mut self, id: &UserId) -> Vec<AppError> {
        self.repo.load_for_identity(id)
    }

    pub fn clear(&mut self) {
        self.repo.clear();
    }

    // ── Writes ──────────────────────────────────────────────────────────────

    pub fn record_mood(&mut self, request: MoodRequest) -> AppResult<MoodEntry> {
        self.require_identity()?;
        request.validate()?;
        let note = request.normalized_note();
        self.repo.record_mood(request.mood, note, self.clock.now())
    }

    pub fn record_assessment(
        &mut self,
        score: u32,
        level: StressLevel,
        responses: Vec<QuestionResponse>,
    ) -> AppResult<AssessmentResult> {
        self.repo
            .record_assessment(score, level, responses, self.clock.now())
    }

    /// Score the answers and store the result. Invalid answers are rejected
    /// before anything is written.
    pub fn submit_assessment(
        &mut self,
        request: AssessmentRequest,
    ) -> AppResult<(AssessmentResult, AssessmentOutcome)> {
        self.require_identity()?;
        let outcome = scorer::score(&request.responses)?;
        let result = self.repo.record_assessment(
            outcome.score,
            outcome.level,
            request.responses,
            self.clock.now(),
        )?;
        Ok((result, outcome))
    }

    /// Scoring alone needs no identity.
    pub fn score_assessment(&self, responses: &[QuestionResponse]) -> AppResult<AssessmentOutcome> {
        scorer::score(responses)
    }

    pub fn record_task_completion(&mut self, task_id: u32) -> AppResult<TaskCompletion> {
        self.repo.record_task_completion(task_id, self.clock.now())
    }

    // ── Daily task ──────────────────────────────────────────────────────────

    pub fn daily_task(&self, force_new: bool) -> DailyTask {
        self.daily_task_with_rng(force_new, &mut rand::thread_rng())
    }

    pub fn daily_task_with_rng<R: Rng + ?Sized>(&self, force_new: bool, rng: &mut R) -> DailyTask {
        if self.repo.owner().is_none() {
            return daily_task::default_task();
        }
        daily_task::select_daily_task(
            self.clock.now(),
            self.clock.offset(),
            self.repo.completions(),
            force_new,
            rng,
        )
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    /// `None` uses the configured window (7 days unless overridden).
    pub fn recent_moods(&self, days: Option<i64>) -> Vec<MoodEntry> {
        queries::recent_moods(
            self.repo.moods(),
            self.clock.now(),
            days.unwrap_or(self.recent_days),
        )
    }

    pub fn moods_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<MoodEntry> {
        queries::moods_in_range(self.repo.moods(), start, end)
    }

    pub fn mood_on_date(&self, date: NaiveDate) -> Option<MoodEntry> {
        queries::mood_on_date(self.repo.moods(), date, self.clock.offset())
    }

    pub fn moods_on_date(&self, date: NaiveDate) -> Vec<MoodEntry> {
        queries::moods_on_date(self.repo.moods(), date, self.clock.offset())
    }

    pub fn todays_mood(&self) -> Option<MoodEntry> {
        self.mood_on_date(self.clock.today())
    }

    pub fn mood_dates(&self) -> BTreeSet<NaiveDate> {
        queries::mood_dates(self.repo.moods(), self.clock.offset())
    }

    pub fn task_completion_history(&self) -> Vec<TaskCompletion> {
        queries::task_completion_history(self.repo.completions())
    }

    pub fn assessment_history(&self) -> Vec<AssessmentResult> {
        queries::assessment_history(self.repo.assessments())
    }

    // ── Analytics ───────────────────────────────────────────────────────────

    pub fn mood_trend(&self, days: Option<i64>) -> Vec<MoodTrendPoint> {
        insights::mood_trend(&self.recent_moods(days), self.clock.offset())
    }

    pub fn mood_summary(&self, days: Option<i64>) -> MoodSummary {
        insights::mood_summary(&self.recent_moods(days))
    }

    /// `None` charts the last 10 results.
    pub fn assessment_trend(&self, limit: Option<usize>) -> Vec<AssessmentTrendPoint> {
        insights::assessment_trend(
            self.repo.assessments(),
            limit.unwrap_or(DEFAULT_ASSESSMENT_TREND),
            self.clock.offset(),
        )
    }

    /// Breakdown of the most recent assessment, if there is one.
    pub fn latest_detailed_scores(&self) -> Option<[DetailedScore; 3]> {
        self.repo
            .assessments()
            .last()
            .map(|a| insights::detailed_scores(a.score))
    }

    pub fn task_streak(&self) -> TaskStreak {
        insights::task_streak(self.repo.completions(), self.clock.today(), self.clock.offset())
    }

    /// `None` lists the last 7 completions.
    pub fn recent_task_history(&self, limit: Option<usize>) -> Vec<CompletedTask> {
        insights::completed_tasks(
            &self.task_completion_history(),
            limit.unwrap_or(DEFAULT_TASK_HISTORY),
        )
    }

    pub fn insights(&self) -> WellnessInsight {
        insights::generate_insight(
            &self.recent_moods(None),
            self.recent_days,
            self.repo.assessments(),
            self.task_streak(),
        )
    }

    fn require_identity(&self) -> AppResult<&UserId> {
        self.repo.owner().ok_or(AppError::NotAuthenticated)
    }
}
