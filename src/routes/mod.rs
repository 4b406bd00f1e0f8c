use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

pub mod auth;
mod health;
pub mod middleware_auth;
pub mod tasks;

pub use auth::register;
pub use health::health;

use crate::routes::auth::login;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let tasks_router = Router::new()
        .route("/", post(tasks::routes::create).get(tasks::routes::list))
        .route(
            "/{id}",
            get(tasks::routes::get)
                .patch(tasks::routes::update)
                .delete(tasks::routes::delete),
        );

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .nest(
            "/api",
            Router::new()
                .nest("/tasks", tasks_router)
                .layer(middleware::from_fn(middleware_auth::require_auth)),
        )
        .layer(CorsLayer::permissive())
}

async fn root() -> &'static str {
    "Welcome to the task API"
}
