use axum::{ extract::{ Json, State }, http::StatusCode, response::IntoResponse, };
use serde::{Deserialize, Serialize};
use crate::config;
use crate::error::ApiError;
use crate::routes::middleware_auth::Claims;
use crate::state::AppState;
use uuid::Uuid;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;
use argon2::password_hash::{SaltString, PasswordHash};
use jsonwebtoken::{EncodingKey, Header, encode};
use chrono::Utc;
use chrono::Duration;

#[derive(Deserialize)]
pub struct RegistrationRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub id: Uuid,
    pub email: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: Uuid,
    password_hash: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegistrationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.email.trim().is_empty() {
        return Err(ApiError::validation("email", "The email field is required."));
    }
    if payload.password.len() < 8 {
        return Err(ApiError::validation(
            "password",
            "The password must be at least 8 characters.",
        ));
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon = Argon2::default();

    let password_hash = argon
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("password hash error: {e}")))?
        .to_string();
    let user_id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO users (id, email, password_hash, created_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(user_id)
    .bind(&payload.email)
    .bind(&password_hash)
    .bind(Utc::now())
    .execute(&state.db)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            ApiError::validation("email", "The email has already been taken.")
        }
        _ => ApiError::from(e),
    })?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse { id: user_id, email: payload.email }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let row = sqlx::query_as::<_, CredentialRow>(
        r#"
        SELECT id, password_hash FROM users WHERE email = ?1
        "#,
    )
    .bind(&payload.email)
    .fetch_optional(&state.db)
    .await?
    .ok_or(ApiError::Unauthorized)?;

    let parsed_hash = PasswordHash::new(&row.password_hash)
        .map_err(|e| ApiError::Internal(format!("stored hash is invalid: {e}")))?;
    let argon = Argon2::default();
    if argon
        .verify_password(payload.password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(ApiError::Unauthorized);
    }

    let token = issue_token(row.id)?;

    Ok(Json(LoginResponse { token }))
}

/// Mint a signed bearer token for the given user, valid for 24 hours.
pub fn issue_token(user_id: Uuid) -> Result<String, ApiError> {
    let secret = config::jwt_secret();
    let now = Utc::now();
    let exp = now + Duration::hours(24);
    let claims = Claims {
        sub: user_id.to_string(),
        exp: exp.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("jwt encode error: {e}")))
}
