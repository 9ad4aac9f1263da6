use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::identity::UserId;

/// Static task definition. The catalog is fixed and never mutated.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TaskCatalogEntry {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
}

pub static TASK_CATALOG: [TaskCatalogEntry; 7] = [
    TaskCatalogEntry {
        id: 1,
        title: "Breathe deeply for 2 minutes",
        description: "Find a quiet spot. Breathe in for 4 seconds, hold for 4 seconds, exhale for 6 seconds. Repeat for 2 minutes.",
    },
    TaskCatalogEntry {
        id: 2,
        title: "Write 3 things you're grateful for",
        description: "Take a moment to write down three things you feel grateful for today, no matter how small they might seem.",
    },
    TaskCatalogEntry {
        id: 3,
        title: "Do a 5-minute body scan meditation",
        description: "Sit comfortably, close your eyes, and mentally scan your body from head to toe, noticing any sensations without judgment.",
    },
    TaskCatalogEntry {
        id: 4,
        title: "Read a positive affirmation",
        description: "Choose an affirmation like 'I am capable of handling whatever comes my way today' and repeat it to yourself several times.",
    },
    TaskCatalogEntry {
        id: 5,
        title: "Take a mindful walk for 10 minutes",
        description: "Walk slowly, paying attention to each step and your surroundings. Notice textures, sounds, and sensations without judgment.",
    },
    TaskCatalogEntry {
        id: 6,
        title: "Practice progressive muscle relaxation",
        description: "Tense and then release each muscle group in your body, starting from your toes and moving up to your head.",
    },
    TaskCatalogEntry {
        id: 7,
        title: "Do a digital detox for 30 minutes",
        description: "Put away all electronic devices and spend time doing something that doesn't involve screens.",
    },
];

pub fn find_task(id: u32) -> Option<&'static TaskCatalogEntry> {
    TASK_CATALOG.iter().find(|t| t.id == id)
}

/// Kind of task an assessment result recommends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Breathing,
    Meditation,
    Gratitude,
    Affirmation,
}

impl TaskCategory {
    /// The catalog task that stands for this category.
    pub fn task(self) -> &'static TaskCatalogEntry {
        let index = match self {
            TaskCategory::Breathing => 0,
            TaskCategory::Gratitude => 1,
            TaskCategory::Meditation => 2,
            TaskCategory::Affirmation => 3,
        };
        &TASK_CATALOG[index]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskCompletion {
    pub id: Uuid,
    pub user_id: UserId,
    pub task_id: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// Today's task as handed to the presentation layer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyTask {
    #[serde(flatten)]
    pub task: TaskCatalogEntry,
    pub completed: bool,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub completed_at: Option<DateTime<Utc>>,
}

impl DailyTask {
    pub fn pending(task: &TaskCatalogEntry) -> Self {
        Self {
            task: *task,
            completed: false,
            completed_at: None,
        }
    }

    pub fn completed(task: &TaskCatalogEntry, at: DateTime<Utc>) -> Self {
        Self {
            task: *task,
            completed: true,
            completed_at: Some(at),
        }
    }
}
