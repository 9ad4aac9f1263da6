use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::auth::identity::UserId;
use crate::models::task::TaskCategory;

/// Highest value a single answer can carry.
pub const MAX_ANSWER_SCORE: u8 = 3;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Question {
    pub id: u32,
    pub text: &'static str,
}

pub static QUESTIONS: [Question; 7] = [
    Question {
        id: 1,
        text: "How often have you felt nervous, anxious, or on edge?",
    },
    Question {
        id: 2,
        text: "How often have you been unable to stop or control worrying?",
    },
    Question {
        id: 3,
        text: "How often have you had little interest or pleasure in doing things?",
    },
    Question {
        id: 4,
        text: "How often have you felt down, depressed, or hopeless?",
    },
    Question {
        id: 5,
        text: "How often have you had trouble falling or staying asleep, or sleeping too much?",
    },
    Question {
        id: 6,
        text: "How often have you felt tired or had little energy?",
    },
    Question {
        id: 7,
        text: "How often have you had trouble concentrating on things?",
    },
];

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AnswerOption {
    pub value: u8,
    pub label: &'static str,
}

/// Every question shares the same four answers.
pub static ANSWER_OPTIONS: [AnswerOption; 4] = [
    AnswerOption {
        value: 0,
        label: "Not at all",
    },
    AnswerOption {
        value: 1,
        label: "Several days",
    },
    AnswerOption {
        value: 2,
        label: "More than half the days",
    },
    AnswerOption {
        value: 3,
        label: "Nearly every day",
    },
];

/// `3 × question count`; 21 for the current question set.
pub fn max_possible_score() -> u32 {
    QUESTIONS.len() as u32 * MAX_ANSWER_SCORE as u32
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StressLevel {
    #[serde(rename = "Low Stress")]
    LowStress,
    #[serde(rename = "Mild Stress")]
    MildStress,
    #[serde(rename = "Moderate Stress")]
    ModerateStress,
    #[serde(rename = "High Stress")]
    HighStress,
    #[serde(rename = "Severe Stress")]
    SevereStress,
}

impl StressLevel {
    pub const ALL: [StressLevel; 5] = [
        StressLevel::LowStress,
        StressLevel::MildStress,
        StressLevel::ModerateStress,
        StressLevel::HighStress,
        StressLevel::SevereStress,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StressLevel::LowStress => "Low Stress",
            StressLevel::MildStress => "Mild Stress",
            StressLevel::ModerateStress => "Moderate Stress",
            StressLevel::HighStress => "High Stress",
            StressLevel::SevereStress => "Severe Stress",
        }
    }

    pub fn guidance(self) -> &'static str {
        match self {
            StressLevel::LowStress => "Your responses indicate low levels of stress and anxiety. It seems you're doing well overall!",
            StressLevel::MildStress => "Your responses indicate mild levels of stress. It's normal to experience some stress, but keeping an eye on it is important.",
            StressLevel::ModerateStress => "Your responses indicate moderate levels of stress and anxiety. This might be impacting your daily life.",
            StressLevel::HighStress => "Your responses indicate high levels of stress and anxiety. It's important to address these feelings.",
            StressLevel::SevereStress => "Your responses indicate very high levels of stress and anxiety. We recommend seeking professional support.",
        }
    }

    pub fn tips(self) -> &'static [&'static str] {
        match self {
            StressLevel::LowStress => &[
                "Continue your current wellness practices",
                "Practice mindfulness to maintain your mental wellness",
                "Regular exercise can help maintain your positive state",
            ],
            StressLevel::MildStress => &[
                "Try deep breathing exercises when feeling stressed",
                "Make time for activities you enjoy",
                "Ensure you're getting enough sleep",
            ],
            StressLevel::ModerateStress => &[
                "Consider talking to someone you trust about your feelings",
                "Practice regular relaxation techniques like meditation",
                "Establish a consistent sleep schedule",
                "Limit caffeine and screen time before bed",
            ],
            StressLevel::HighStress => &[
                "Consider speaking with a mental health professional",
                "Set aside time each day for stress-relief activities",
                "Practice saying 'no' to additional responsibilities when feeling overwhelmed",
                "Focus on healthy eating and regular exercise",
            ],
            StressLevel::SevereStress => &[
                "Reach out to a mental health professional as soon as possible",
                "Talk to your doctor about your symptoms",
                "Lean on your support network of friends and family",
                "Focus on basic self-care: sleep, nutrition, and gentle exercise",
            ],
        }
    }

    pub fn recommended_category(self) -> TaskCategory {
        match self {
            StressLevel::LowStress => TaskCategory::Affirmation,
            StressLevel::MildStress => TaskCategory::Gratitude,
            StressLevel::ModerateStress => TaskCategory::Meditation,
            StressLevel::HighStress | StressLevel::SevereStress => TaskCategory::Breathing,
        }
    }
}

impl std::fmt::Display for StressLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One answered question.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub question_id: u32,

    #[validate(range(max = 3, message = "Answer score must be 0-3"))]
    pub score: u8,
}

impl QuestionResponse {
    pub fn new(question_id: u32, score: u8) -> Self {
        Self { question_id, score }
    }
}

/// Immutable once recorded. `score` is the sum of `responses` and `level` is
/// the band that score falls in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub id: Uuid,
    pub user_id: UserId,
    pub score: u32,
    pub level: StressLevel,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub responses: Vec<QuestionResponse>,
}

impl AssessmentResult {
    pub fn response_total(&self) -> u32 {
        self.responses.iter().map(|r| r.score as u32).sum()
    }
}
