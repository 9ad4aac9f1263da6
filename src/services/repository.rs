//! Per-identity wellness data with write-through persistence.
//!
//! The repository is the only mutator of its collections. Each mutation
//! appends one entity and rewrites the whole collection under the owner's key;
//! if the write fails the append is rolled back, so memory and store never
//! disagree.
//!
//! A collection whose stored blob could not be *read* (as opposed to parsed)
//! stays blocked for writes until a later load succeeds, so a passing I/O
//! failure never overwrites history that is still on disk.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::auth::identity::UserId;
use crate::error::{AppError, AppResult};
use crate::models::assessment::{max_possible_score, AssessmentResult, QuestionResponse, StressLevel};
use crate::models::mood::{Mood, MoodEntry};
use crate::models::task::{find_task, TaskCompletion};
use crate::services::clock::to_stored_precision;
use crate::services::scorer;
use crate::store::{collection_key, Collection, Store, StoreError};

pub struct WellnessRepository<S> {
    store: S,
    key_prefix: String,
    owner: Option<UserId>,
    moods: Vec<MoodEntry>,
    assessments: Vec<AssessmentResult>,
    completions: Vec<TaskCompletion>,
    unavailable: HashSet<Collection>,
}

impl<S: Store> WellnessRepository<S> {
    pub fn new(store: S, key_prefix: impl Into<String>) -> Self {
        Self {
            store,
            key_prefix: key_prefix.into(),
            owner: None,
            moods: Vec::new(),
            assessments: Vec::new(),
            completions: Vec::new(),
            unavailable: HashSet::new(),
        }
    }

    pub fn owner(&self) -> Option<&UserId> {
        self.owner.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn moods(&self) -> &[MoodEntry] {
        &self.moods
    }

    pub fn assessments(&self) -> &[AssessmentResult] {
        &self.assessments
    }

    pub fn completions(&self) -> &[TaskCompletion] {
        &self.completions
    }

    /// False when the last load could not read this collection from the store.
    pub fn is_writable(&self, collection: Collection) -> bool {
        !self.unavailable.contains(&collection)
    }

    /// Replace all collections with what the store holds for `owner`.
    ///
    /// Missing keys load as empty. A collection that cannot be read or parsed
    /// also loads as empty; the corresponding errors are logged and returned
    /// so the caller can tell the user, but loading itself never fails.
    /// Collections that failed to *read* refuse writes until the next
    /// successful load.
    pub fn load_for_identity(&mut self, owner: &UserId) -> Vec<AppError> {
        let mut problems = Vec::new();

        let moods = self.load_collection::<MoodEntry>(owner, Collection::Moods);
        let assessments = self
            .load_collection::<AssessmentResult>(owner, Collection::Assessments)
            .and_then(|list| self.check_assessments(owner, list));
        let completions = self.load_collection::<TaskCompletion>(owner, Collection::Tasks);

        self.owner = Some(owner.clone());
        self.unavailable.clear();
        self.moods = self.recover(Collection::Moods, moods, &mut problems);
        self.assessments = self.recover(Collection::Assessments, assessments, &mut problems);
        self.completions = self.recover(Collection::Tasks, completions, &mut problems);

        tracing::debug!(
            owner = %owner,
            moods = self.moods.len(),
            assessments = self.assessments.len(),
            completions = self.completions.len(),
            problems = problems.len(),
            "Wellness data loaded"
        );

        problems
    }

    /// Drop everything held in memory; used when nobody is signed in.
    pub fn clear(&mut self) {
        if let Some(owner) = self.owner.take() {
            tracing::debug!(owner = %owner, "Wellness data cleared");
        }
        self.moods.clear();
        self.assessments.clear();
        self.completions.clear();
        self.unavailable.clear();
    }

    pub fn record_mood(
        &mut self,
        mood: Mood,
        note: Option<String>,
        at: DateTime<Utc>,
    ) -> AppResult<MoodEntry> {
        let owner = self.require_owner()?;
        self.require_writable(&owner, Collection::Moods)?;
        let entry = MoodEntry {
            id: Uuid::now_v7(),
            user_id: owner.clone(),
            mood,
            note,
            timestamp: to_stored_precision(at),
        };

        self.moods.push(entry.clone());
        if let Err(e) = self.persist(&owner, Collection::Moods, &self.moods) {
            self.moods.pop();
            return Err(e);
        }

        tracing::debug!(owner = %owner, mood = ?mood, "Mood recorded");
        Ok(entry)
    }

    /// Append an assessment. `responses` must answer every question once with
    /// a value in range, `score` must equal their sum and `level` must be the
    /// band for `score`.
    pub fn record_assessment(
        &mut self,
        score: u32,
        level: StressLevel,
        responses: Vec<QuestionResponse>,
        at: DateTime<Utc>,
    ) -> AppResult<AssessmentResult> {
        let owner = self.require_owner()?;
        self.require_writable(&owner, Collection::Assessments)?;
        scorer::validate_responses(&responses)?;

        let total: u32 = responses.iter().map(|r| r.score as u32).sum();
        if total != score {
            return Err(AppError::InvalidAssessmentInput(format!(
                "score {} does not match response total {}",
                score, total
            )));
        }
        let expected = scorer::level_for_score(score, max_possible_score());
        if expected != level {
            return Err(AppError::InvalidAssessmentInput(format!(
                "level {} does not match score {} (expected {})",
                level, score, expected
            )));
        }

        let result = AssessmentResult {
            id: Uuid::now_v7(),
            user_id: owner.clone(),
            score,
            level,
            timestamp: to_stored_precision(at),
            responses,
        };

        self.assessments.push(result.clone());
        if let Err(e) = self.persist(&owner, Collection::Assessments, &self.assessments) {
            self.assessments.pop();
            return Err(e);
        }

        tracing::debug!(owner = %owner, score, level = %level, "Assessment recorded");
        Ok(result)
    }

    /// Append a completion. Several completions on one day are allowed.
    pub fn record_task_completion(
        &mut self,
        task_id: u32,
        at: DateTime<Utc>,
    ) -> AppResult<TaskCompletion> {
        let owner = self.require_owner()?;
        self.require_writable(&owner, Collection::Tasks)?;
        if find_task(task_id).is_none() {
            return Err(AppError::Validation(format!("unknown task id {}", task_id)));
        }

        let completion = TaskCompletion {
            id: Uuid::now_v7(),
            user_id: owner.clone(),
            task_id,
            timestamp: to_stored_precision(at),
        };

        self.completions.push(completion.clone());
        if let Err(e) = self.persist(&owner, Collection::Tasks, &self.completions) {
            self.completions.pop();
            return Err(e);
        }

        tracing::debug!(owner = %owner, task_id, "Task completion recorded");
        Ok(completion)
    }

    fn require_owner(&self) -> AppResult<UserId> {
        self.owner.clone().ok_or(AppError::NotAuthenticated)
    }

    fn require_writable(&self, owner: &UserId, collection: Collection) -> AppResult<()> {
        if self.is_writable(collection) {
            Ok(())
        } else {
            Err(StoreError::Unavailable(self.key(owner, collection)).into())
        }
    }

    fn key(&self, owner: &UserId, collection: Collection) -> String {
        collection_key(&self.key_prefix, collection, owner)
    }

    fn load_collection<T: DeserializeOwned>(
        &self,
        owner: &UserId,
        collection: Collection,
    ) -> AppResult<Vec<T>> {
        let key = self.key(owner, collection);
        match self.store.get(&key)? {
            None => Ok(Vec::new()),
            Some(bytes) => serde_json::from_slice(&bytes).map_err(|e| AppError::CorruptState {
                key,
                reason: e.to_string(),
            }),
        }
    }

    /// Stored assessments must still hold a complete, in-range answer set and
    /// satisfy the score/level invariant.
    fn check_assessments(
        &self,
        owner: &UserId,
        list: Vec<AssessmentResult>,
    ) -> AppResult<Vec<AssessmentResult>> {
        let max = max_possible_score();
        for result in &list {
            if let Err(e) = scorer::validate_responses(&result.responses) {
                return Err(AppError::CorruptState {
                    key: self.key(owner, Collection::Assessments),
                    reason: format!("assessment {}: {}", result.id, e),
                });
            }
            let consistent = result.response_total() == result.score
                && scorer::level_for_score(result.score, max) == result.level;
            if !consistent {
                return Err(AppError::CorruptState {
                    key: self.key(owner, Collection::Assessments),
                    reason: format!("assessment {} violates score/level invariant", result.id),
                });
            }
        }
        Ok(list)
    }

    fn persist<T: Serialize>(
        &self,
        owner: &UserId,
        collection: Collection,
        items: &[T],
    ) -> AppResult<()> {
        let key = self.key(owner, collection);
        let bytes = serde_json::to_vec(items).map_err(|e| AppError::CorruptState {
            key: key.clone(),
            reason: e.to_string(),
        })?;
        self.store.set(&key, &bytes).map_err(|e| {
            tracing::error!(key = %key, error = %e, "Failed to persist collection");
            AppError::from(e)
        })
    }

    /// Corrupt content starts over empty; a failed read also starts empty
    /// but blocks writes to that collection.
    fn recover<T>(
        &mut self,
        collection: Collection,
        loaded: AppResult<Vec<T>>,
        problems: &mut Vec<AppError>,
    ) -> Vec<T> {
        match loaded {
            Ok(list) => list,
            Err(e) => {
                if matches!(e, AppError::Storage(_)) {
                    tracing::error!(collection = %collection, error = %e, "Stored collection could not be read, writes blocked");
                    self.unavailable.insert(collection);
                } else {
                    tracing::warn!(collection = %collection, error = %e, "Stored collection corrupt, starting empty");
                }
                problems.push(e);
                Vec::new()
            }
        }
    }
}
