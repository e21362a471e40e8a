use serde::Serialize;
use uuid::Uuid;
use chrono::{DateTime, Utc};
use crate::utils::date::display_or_invalid;

/// A logged exercise. `date` is always rendered from `done_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub description: String,
    pub duration: i64,
    pub date: String,
    pub done_at: Option<DateTime<Utc>>,
}

impl Exercise {
    pub fn new(description: String, duration: i64, done_at: Option<DateTime<Utc>>) -> Self {
        Self {
            description,
            duration,
            date: display_or_invalid(done_at.as_ref()),
            done_at,
        }
    }

    pub fn to_log_entry(&self) -> LogEntry {
        LogEntry {
            description: self.description.clone(),
            duration: self.duration,
            date: self.date.clone(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub description: String,
    pub duration: i64,
    pub date: String,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct ExerciseReceipt {
    pub username: String,
    pub description: String,
    pub duration: i64,
    pub date: String,
    #[serde(rename = "_id")]
    pub user_id: Uuid,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct ExerciseLog {
    pub username: String,
    pub count: usize,
    #[serde(rename = "_id")]
    pub user_id: Uuid,
    pub log: Vec<LogEntry>,
}
