use chrono::DateTime;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Tri-state task status, stored as lowercase TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Status {
    Todo,
    Doing,
    Done,
}

impl Default for Status {
    fn default() -> Self {
        Status::Todo
    }
}

impl Status {
    /// Display priority: in-progress work first, finished work last.
    pub fn rank(self) -> u8 {
        match self {
            Status::Doing => 0,
            Status::Todo => 1,
            Status::Done => 2,
        }
    }
}

/// Order tasks by status priority (DOING, then TODO, then DONE), ties
/// broken by title. Stable; never touches the store it was read from.
pub fn sort_by_status(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by(|a, b| {
        a.status
            .rank()
            .cmp(&b.status.rank())
            .then_with(|| a.title.cmp(&b.title))
    });
    tasks
}
