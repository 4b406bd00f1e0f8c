use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::Status;

#[derive(Deserialize)]
pub struct CreateTask {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub status: Status,
    /// Assignee override; defaults to the acting authenticated user.
    pub user_id: Option<Uuid>,
}

#[derive(Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
}

/// Response envelope shared by every task endpoint.
#[derive(Serialize)]
pub struct Data<T> {
    pub data: T,
}
