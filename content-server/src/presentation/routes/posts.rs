use axum::{Router, routing::get};

use crate::presentation::AppState;
use crate::presentation::handlers::posts::{create_post, delete_post, get_post, list_posts};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/{id}", get(get_post).delete(delete_post))
}
