use axum::{Json, Router, routing::get};
use serde::Serialize;

use super::AppState;

pub(crate) mod auth;
pub(crate) mod posts;
pub(crate) mod roles;
pub(crate) mod users;

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .nest("/api/auth", auth::router())
        .nest("/api/users", users::router())
        .nest("/api/roles", roles::router())
        .nest("/api/posts", posts::router())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}
