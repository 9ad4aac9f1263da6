//! # MindEase: request and response shapes for the presentation layer
//!
//! Conventions:
//! - `*Request`  → built by the UI from form input, validated before use
//! - `*Response` → plain records handed back for rendering
//! - Field validation is expressed via `validator` derive macros

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::models::assessment::QuestionResponse;
use crate::models::mood::Mood;

// ============================================================================
// Errors
// ============================================================================

/// Stable error envelope: `{ "error": { "code": ..., "message": ... } }`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let message = match err {
            // storage details stay in the logs
            AppError::Storage(_) => "Your data could not be saved. Please try again.".to_string(),
            other => other.to_string(),
        };
        Self {
            error: ErrorBody {
                code: err.code(),
                message,
            },
        }
    }
}

// ============================================================================
// Mood
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MoodRequest {
    pub mood: Mood,

    /// Free-text note
    #[validate(length(max = 5000, message = "Note must be under 5000 characters"))]
    pub note: Option<String>,
}

impl MoodRequest {
    pub fn new(mood: Mood) -> Self {
        Self { mood, note: None }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Blank notes are stored as no note; anything else is kept as typed.
    pub fn normalized_note(&self) -> Option<String> {
        self.note.clone().filter(|n| !n.trim().is_empty())
    }
}

// ============================================================================
// Assessment
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    pub responses: Vec<QuestionResponse>,
}

// ============================================================================
// Queries
// ============================================================================

/// Mood chart range: "7days" or "30days". Default: 7 days.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoodRangeQuery {
    pub range: Option<String>,
}

impl MoodRangeQuery {
    pub fn days(&self, default_days: i64) -> i64 {
        match self.range.as_deref() {
            Some("7days") => 7,
            Some("30days") => 30,
            _ => default_days,
        }
    }
}
