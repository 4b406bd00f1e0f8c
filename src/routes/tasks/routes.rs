use axum::{Json, extract::{Path, Query, State}, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::middleware_auth::JwtUser;
use crate::state::AppState;
use super::dto::{CreateTask, Data, UpdateTask};
use super::model;
use super::queries;

#[derive(Deserialize)]
pub struct ListParams {
    pub sort: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    JwtUser(auth_user): JwtUser,
    Json(body): Json<CreateTask>,
) -> Result<impl IntoResponse, ApiError> {
    if body.title.trim().is_empty() {
        return Err(ApiError::validation("title", "The title field is required."));
    }

    let user_id = body.user_id.unwrap_or(auth_user);

    let task = queries::create_task(
        &state.db,
        user_id,
        &body.title,
        body.description.as_deref(),
        body.status,
    )
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            ApiError::validation("user_id", "The assigned user does not exist.")
        }
        _ => ApiError::from(e),
    })?;

    Ok((StatusCode::CREATED, Json(Data { data: task })))
}

pub async fn get(
    State(state): State<AppState>,
    JwtUser(_): JwtUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let task = queries::get_task(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("task"))?;

    Ok(Json(Data { data: task }))
}

pub async fn list(
    State(state): State<AppState>,
    JwtUser(_): JwtUser,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tasks = queries::list_tasks(&state.db).await?;

    if params.sort.as_deref() == Some("status") {
        tasks = model::sort_by_status(tasks);
    }

    Ok(Json(Data { data: tasks }))
}

pub async fn update(
    State(state): State<AppState>,
    JwtUser(_): JwtUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTask>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(title) = &body.title {
        if title.trim().is_empty() {
            return Err(ApiError::validation("title", "The title field is required."));
        }
    }

    let task = queries::update_task(&state.db, id, body.title, body.description, body.status)
        .await?
        .ok_or(ApiError::NotFound("task"))?;

    Ok(Json(Data { data: task }))
}

pub async fn delete(
    State(state): State<AppState>,
    JwtUser(_): JwtUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let task = queries::delete_task(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("task"))?;

    Ok(Json(Data { data: task }))
}
