use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::identity::UserId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Anxious,
    Neutral,
    Angry,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Anxious,
        Mood::Neutral,
        Mood::Angry,
    ];

    /// Position on the mood chart: happy 5, neutral 3, anxious 2, sad 1, angry 0.
    pub fn chart_value(self) -> u8 {
        match self {
            Mood::Happy => 5,
            Mood::Neutral => 3,
            Mood::Anxious => 2,
            Mood::Sad => 1,
            Mood::Angry => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Anxious => "Anxious",
            Mood::Neutral => "Neutral",
            Mood::Angry => "Angry",
        }
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "happy" => Ok(Mood::Happy),
            "sad" => Ok(Mood::Sad),
            "anxious" => Ok(Mood::Anxious),
            "neutral" => Ok(Mood::Neutral),
            "angry" => Ok(Mood::Angry),
            other => Err(format!("unknown mood: {}", other)),
        }
    }
}

/// Immutable once recorded; only ever appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: UserId,
    pub mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}
