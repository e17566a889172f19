use axum::{
    Router,
    routing::{get, put},
};

use crate::presentation::AppState;
use crate::presentation::handlers::users::{
    change_role, deactivate, list_users, profile, update_profile,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route(
            "/me",
            get(profile).patch(update_profile).delete(deactivate),
        )
        .route("/{id}/role", put(change_role))
}
