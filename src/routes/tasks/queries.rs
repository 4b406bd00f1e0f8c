use chrono::Utc;
use sqlx::{Result, SqlitePool};
use uuid::Uuid;

use super::model::{Status, Task};

pub async fn create_task(
    pool: &SqlitePool,
    user_id: Uuid,
    title: &str,
    description: Option<&str>,
    status: Status,
) -> Result<Task> {
    let rec = sqlx::query_as::<_, Task>(
        r#"
        INSERT INTO tasks (id, title, description, status, user_id, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        RETURNING id, title, description, status, user_id, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(title)
    .bind(description)
    .bind(status)
    .bind(user_id)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(rec)
}

pub async fn get_task(pool: &SqlitePool, id: Uuid) -> Result<Option<Task>> {
    let rec = sqlx::query_as::<_, Task>(
        r#"
        SELECT id, title, description, status, user_id, created_at
        FROM tasks
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(rec)
}

/// All tasks in insertion order.
pub async fn list_tasks(pool: &SqlitePool) -> Result<Vec<Task>> {
    let rec = sqlx::query_as::<_, Task>(
        r#"
        SELECT id, title, description, status, user_id, created_at
        FROM tasks
        ORDER BY created_at
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rec)
}

pub async fn update_task(
    pool: &SqlitePool,
    id: Uuid,
    title: Option<String>,
    description: Option<String>,
    status: Option<Status>,
) -> Result<Option<Task>> {
    let rec = sqlx::query_as::<_, Task>(
        r#"
        UPDATE tasks
        SET
            title = COALESCE(?2, title),
            description = COALESCE(?3, description),
            status = COALESCE(?4, status)
        WHERE id = ?1
        RETURNING id, title, description, status, user_id, created_at
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(description)
    .bind(status)
    .fetch_optional(pool)
    .await?;

    Ok(rec)
}

/// Hard delete; returns the removed row's last representation.
pub async fn delete_task(pool: &SqlitePool, id: Uuid) -> Result<Option<Task>> {
    let rec = sqlx::query_as::<_, Task>(
        r#"
        DELETE FROM tasks
        WHERE id = ?1
        RETURNING id, title, description, status, user_id, created_at
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(rec)
}
