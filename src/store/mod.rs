//! In-memory user and exercise storage.
//!
//! `AppState` owns a single [`Store`] behind a read-write lock. Handlers take
//! the lock once per request, so every operation observes and leaves the two
//! collections in a consistent state.

use std::collections::HashMap;
use chrono::{DateTime, Utc};
use log::debug;
use tokio::sync::RwLock;
use uuid::Uuid;
use crate::errors::AppError;
use crate::models::exercise::{Exercise, ExerciseLog, ExerciseReceipt, LogEntry};
use crate::models::user::User;
use crate::utils::date::parse_date;

#[derive(Default)]
pub struct AppState {
    pub store: RwLock<Store>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Default, Debug)]
pub struct Store {
    users: Vec<User>,
    exercises: HashMap<Uuid, Vec<Exercise>>,
}

/// Optional `from`/`to`/`limit` query applied to a user's log.
#[derive(Default, Debug, Clone)]
pub struct LogFilter {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

impl Store {
    pub fn create_user(&mut self, username: String) -> User {
        let user = User::new(username);
        self.users.push(user.clone());
        self.exercises.insert(user.user_id, Vec::new());
        debug!("Created user {} ({})", user.user_id, user.username);
        user
    }

    pub fn list_users(&self) -> &[User] {
        &self.users
    }

    /// Looks a user up by the raw path segment; ids that are not UUIDs are simply unknown.
    pub fn find_user(&self, user_id: &str) -> Result<&User, AppError> {
        let user_id = Uuid::parse_str(user_id).map_err(|_| AppError::user_not_found())?;
        self.users
            .iter()
            .find(|user| user.user_id == user_id)
            .ok_or_else(AppError::user_not_found)
    }

    pub fn add_exercise(&mut self, user_id: Uuid, exercise: Exercise) -> Result<ExerciseReceipt, AppError> {
        let username = self
            .users
            .iter()
            .find(|user| user.user_id == user_id)
            .map(|user| user.username.clone())
            .ok_or_else(AppError::user_not_found)?;

        let receipt = ExerciseReceipt {
            username,
            description: exercise.description.clone(),
            duration: exercise.duration,
            date: exercise.date.clone(),
            user_id,
        };
        debug!("Logged exercise for user {} done at {:?}", user_id, exercise.done_at);
        self.exercises.entry(user_id).or_default().push(exercise);
        Ok(receipt)
    }

    pub fn exercise_log(&self, user_id: &str, filter: &LogFilter) -> Result<ExerciseLog, AppError> {
        let user = self.find_user(user_id)?;
        let entries: Vec<LogEntry> = self
            .exercises
            .get(&user.user_id)
            .map(|exercises| exercises.iter().map(Exercise::to_log_entry).collect())
            .unwrap_or_default();

        let log = filter.apply(entries);
        Ok(ExerciseLog {
            username: user.username.clone(),
            count: log.len(),
            user_id: user.user_id,
            log,
        })
    }
}

impl LogFilter {
    /// Filters on the re-parsed display date, so time of day never takes part
    /// in the comparison. Records or bounds that do not parse never match.
    pub fn apply(&self, mut entries: Vec<LogEntry>) -> Vec<LogEntry> {
        if let Some(from) = non_empty(&self.from) {
            let from = parse_date(from);
            entries.retain(|entry| compare(&entry.date, from, |date, bound| date >= bound));
        }
        if let Some(to) = non_empty(&self.to) {
            let to = parse_date(to);
            entries.retain(|entry| compare(&entry.date, to, |date, bound| date <= bound));
        }
        if let Some(limit) = non_empty(&self.limit) {
            let end = slice_end(limit, entries.len());
            entries.truncate(end);
        }
        entries
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

fn compare(
    display: &str,
    bound: Option<DateTime<Utc>>,
    keep: impl Fn(DateTime<Utc>, DateTime<Utc>) -> bool,
) -> bool {
    match (parse_date(display), bound) {
        (Some(date), Some(bound)) => keep(date, bound),
        _ => false,
    }
}

// Mirrors `slice(0, Number(limit))`: unreadable limits keep nothing, fractions
// truncate and negative limits count back from the end.
fn slice_end(limit: &str, len: usize) -> usize {
    let trimmed = limit.trim();
    let number = if trimmed.is_empty() {
        0.0
    } else {
        trimmed.parse::<f64>().unwrap_or(f64::NAN)
    };
    if number.is_nan() {
        return 0;
    }
    let number = number.trunc();
    if number >= 0.0 {
        if number >= len as f64 { len } else { number as usize }
    } else {
        let back = -number;
        if back >= len as f64 { 0 } else { len - back as usize }
    }
}
