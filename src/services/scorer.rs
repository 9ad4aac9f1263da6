//! Stress self-assessment scoring.
//!
//! Pure: answers in, classification out. Bands over the score percentage are
//! half-open and evaluated low to high:
//! `[0,25)` low, `[25,50)` mild, `[50,75)` moderate, `[75,90)` high, `[90,100]` severe.

use std::collections::HashSet;

use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::assessment::{max_possible_score, QuestionResponse, StressLevel, QUESTIONS};
use crate::models::task::{TaskCatalogEntry, TaskCategory};

/// Upper band edges in percent, exclusive.
const LOW_BELOW: u32 = 25;
const MILD_BELOW: u32 = 50;
const MODERATE_BELOW: u32 = 75;
const HIGH_BELOW: u32 = 90;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentOutcome {
    pub score: u32,
    pub max_score: u32,
    pub percentage: f64,
    pub level: StressLevel,
    pub message: &'static str,
    pub tips: &'static [&'static str],
    pub recommended_category: TaskCategory,
    pub recommended_task: TaskCatalogEntry,
}

/// Band for a percentage in `[0, 100]`.
pub fn level_for_percentage(percentage: f64) -> StressLevel {
    if percentage < LOW_BELOW as f64 {
        StressLevel::LowStress
    } else if percentage < MILD_BELOW as f64 {
        StressLevel::MildStress
    } else if percentage < MODERATE_BELOW as f64 {
        StressLevel::ModerateStress
    } else if percentage < HIGH_BELOW as f64 {
        StressLevel::HighStress
    } else {
        StressLevel::SevereStress
    }
}

/// Band for `score` out of `max_score`, compared in integers so that exact
/// edges (e.g. 25%) never land on the wrong side through float rounding.
pub fn level_for_score(score: u32, max_score: u32) -> StressLevel {
    let scaled = score as u64 * 100;
    let max = max_score.max(1) as u64;
    if scaled < LOW_BELOW as u64 * max {
        StressLevel::LowStress
    } else if scaled < MILD_BELOW as u64 * max {
        StressLevel::MildStress
    } else if scaled < MODERATE_BELOW as u64 * max {
        StressLevel::ModerateStress
    } else if scaled < HIGH_BELOW as u64 * max {
        StressLevel::HighStress
    } else {
        StressLevel::SevereStress
    }
}

/// Exactly one in-range answer per catalog question.
pub fn validate_responses(responses: &[QuestionResponse]) -> AppResult<()> {
    if responses.len() != QUESTIONS.len() {
        return Err(AppError::InvalidAssessmentInput(format!(
            "expected {} responses, got {}",
            QUESTIONS.len(),
            responses.len()
        )));
    }

    let mut seen = HashSet::with_capacity(responses.len());
    for response in responses {
        if !QUESTIONS.iter().any(|q| q.id == response.question_id) {
            return Err(AppError::InvalidAssessmentInput(format!(
                "unknown question id {}",
                response.question_id
            )));
        }
        if !seen.insert(response.question_id) {
            return Err(AppError::InvalidAssessmentInput(format!(
                "question {} answered more than once",
                response.question_id
            )));
        }
        response.validate().map_err(|e| {
            AppError::InvalidAssessmentInput(format!("question {}: {}", response.question_id, e))
        })?;
    }

    Ok(())
}

pub fn score(responses: &[QuestionResponse]) -> AppResult<AssessmentOutcome> {
    validate_responses(responses)?;

    let total: u32 = responses.iter().map(|r| r.score as u32).sum();
    let max_score = max_possible_score();
    let level = level_for_score(total, max_score);
    let category = level.recommended_category();

    Ok(AssessmentOutcome {
        score: total,
        max_score,
        percentage: total as f64 / max_score as f64 * 100.0,
        level,
        message: level.guidance(),
        tips: level.tips(),
        recommended_category: category,
        recommended_task: *category.task(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Seven answers whose scores sum to `total`, filled front to back.
    fn answers_summing_to(total: u32) -> Vec<QuestionResponse> {
        let mut remaining = total;
        QUESTIONS
            .iter()
            .map(|q| {
                let s = remaining.min(3);
                remaining -= s;
                QuestionResponse::new(q.id, s as u8)
            })
            .collect()
    }

    #[test]
    fn test_low_stress_scenario() {
        let outcome = score(&answers_summing_to(3)).unwrap();
        assert_eq!(outcome.score, 3);
        assert_eq!(outcome.level, StressLevel::LowStress);
        assert_eq!(outcome.recommended_category, TaskCategory::Affirmation);
        assert_eq!(outcome.recommended_task.id, 4);
    }

    #[test]
    fn test_moderate_stress_scenario() {
        let outcome = score(&answers_summing_to(11)).unwrap();
        assert_eq!(outcome.level, StressLevel::ModerateStress);
        assert_eq!(outcome.tips.len(), 4);
        assert_eq!(outcome.recommended_task.id, 3);
    }

    #[test]
    fn test_severe_stress_scenario() {
        let outcome = score(&answers_summing_to(20)).unwrap();
        assert_eq!(outcome.level, StressLevel::SevereStress);
        assert_eq!(outcome.recommended_category, TaskCategory::Breathing);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        for total in 0..=21 {
            let answers = answers_summing_to(total);
            assert_eq!(score(&answers).unwrap(), score(&answers).unwrap());
        }
    }

    #[test]
    fn test_percentage_band_edges() {
        assert_eq!(level_for_percentage(0.0), StressLevel::LowStress);
        assert_eq!(level_for_percentage(24.999), StressLevel::LowStress);
        assert_eq!(level_for_percentage(25.0), StressLevel::MildStress);
        assert_eq!(level_for_percentage(49.999), StressLevel::MildStress);
        assert_eq!(level_for_percentage(50.0), StressLevel::ModerateStress);
        assert_eq!(level_for_percentage(74.999), StressLevel::ModerateStress);
        assert_eq!(level_for_percentage(75.0), StressLevel::HighStress);
        assert_eq!(level_for_percentage(89.999), StressLevel::HighStress);
        assert_eq!(level_for_percentage(90.0), StressLevel::SevereStress);
        assert_eq!(level_for_percentage(100.0), StressLevel::SevereStress);
    }

    #[test]
    fn test_score_bands_match_percentage_bands() {
        // every reachable score must agree with the float classification
        for total in 0..=21 {
            let pct = total as f64 / 21.0 * 100.0;
            assert_eq!(level_for_score(total, 21), level_for_percentage(pct), "score {}", total);
        }
        // exact edges with a denominator that hits them
        assert_eq!(level_for_score(24, 100), StressLevel::LowStress);
        assert_eq!(level_for_score(25, 100), StressLevel::MildStress);
        assert_eq!(level_for_score(50, 100), StressLevel::ModerateStress);
        assert_eq!(level_for_score(75, 100), StressLevel::HighStress);
        assert_eq!(level_for_score(90, 100), StressLevel::SevereStress);
    }

    #[test]
    fn test_bands_are_monotonic() {
        let mut previous = StressLevel::LowStress;
        for tenth in 0..=1000 {
            let level = level_for_percentage(tenth as f64 / 10.0);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn test_rejects_incomplete_responses() {
        let mut answers = answers_summing_to(5);
        answers.pop();
        assert!(matches!(score(&answers), Err(AppError::InvalidAssessmentInput(_))));
    }

    #[test]
    fn test_rejects_out_of_range_value() {
        let mut answers = answers_summing_to(5);
        answers[2].score = 4;
        assert!(matches!(score(&answers), Err(AppError::InvalidAssessmentInput(_))));
    }

    #[test]
    fn test_rejects_duplicate_and_unknown_questions() {
        let mut answers = answers_summing_to(5);
        answers[6].question_id = 1;
        assert!(matches!(score(&answers), Err(AppError::InvalidAssessmentInput(_))));

        let mut answers = answers_summing_to(5);
        answers[6].question_id = 99;
        assert!(matches!(score(&answers), Err(AppError::InvalidAssessmentInput(_))));
    }
}
