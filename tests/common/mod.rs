#![allow(dead_code)] // not every test binary uses every helper

use std::sync::Once;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;
use uuid::Uuid;

use task_api::routes;
use task_api::state::AppState;

static ENV: Once = Once::new();

pub struct TestApp {
    pub app: Router,
    pub db: SqlitePool,
}

/// Fresh application over its own in-memory database, so every test
/// starts from an empty store.
pub async fn spawn() -> TestApp {
    ENV.call_once(|| std::env::set_var("JWT_SECRET", "test-secret"));

    // A single connection keeps the :memory: database alive and shared.
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!()
        .run(&db)
        .await
        .expect("failed to run migrations");

    let app = routes::routes().with_state(AppState { db: db.clone() });

    TestApp { app, db }
}

/// Insert a user and mint a bearer token for them.
pub async fn acting_as(db: &SqlitePool) -> (Uuid, String) {
    let user_id = create_user(db).await;
    let token = routes::auth::issue_token(user_id).expect("failed to mint token");
    (user_id, token)
}

pub async fn create_user(db: &SqlitePool) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO users (id, email, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(id)
    .bind(format!("user-{id}@example.com"))
    .bind("factory-generated-hash")
    .bind(Utc::now())
    .execute(db)
    .await
    .expect("failed to insert user");
    id
}

/// Valid-by-default task attributes; tests override individual fields.
pub fn task_attributes() -> Value {
    json!({
        "title": format!("Task {}", Uuid::new_v4()),
        "description": "Generated by the test factory",
        "status": "todo",
    })
}

/// Insert a task row directly, bypassing the HTTP surface.
pub async fn insert_task(db: &SqlitePool, user_id: Uuid, title: &str, status: &str) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO tasks (id, title, description, status, user_id, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(title)
    .bind("Seeded by the test factory")
    .bind(status)
    .bind(user_id)
    .bind(Utc::now())
    .execute(db)
    .await
    .expect("failed to insert task");
    id
}

/// Drive a request through the router and decode the JSON body.
pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}
