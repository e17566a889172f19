use axum::{
    Router,
    routing::{get, put},
};

use crate::presentation::AppState;
use crate::presentation::handlers::roles::{create_role, list_roles, update_role};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_roles).post(create_role))
        .route("/{id}", put(update_role))
}
