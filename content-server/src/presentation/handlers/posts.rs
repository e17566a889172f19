use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{PageQuery, PaginationDto};
use crate::domain::post::{CreatePostRequest, Post};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::extract::BearerToken;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    #[validate(length(min = 1))]
    pub(crate) text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) author_id: Uuid,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            text: post.text,
            author_id: post.author_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListPostsResponseDto {
    pub(crate) pagination: PaginationDto,
    pub(crate) posts: Vec<PostDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct DeletePostResponseDto {
    pub(crate) item_id: Uuid,
    pub(crate) row_count: u64,
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    security(("bearer_auth" = [])),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    token: BearerToken,
    Json(dto): Json<CreatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;

    let req = CreatePostRequest {
        title: dto.title,
        text: dto.text,
    };

    let post = state
        .post_service
        .create_post(token.0.as_deref(), req)
        .await?;
    Ok((StatusCode::CREATED, Json(PostDto::from(post))))
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u32>, Query, description = "Page number (>= 1)"),
        ("page_size" = Option<u32>, Query, description = "Items per page (1..=100)")
    ),
    responses(
        (status = 200, description = "Posts listed", body = ListPostsResponseDto),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<PageQuery>,
) -> AppResult<(StatusCode, Json<ListPostsResponseDto>)> {
    query.validate()?;

    let result = state
        .post_service
        .list_posts(token.0.as_deref(), query.page(), query.page_size())
        .await?;

    Ok((
        StatusCode::OK,
        Json(ListPostsResponseDto {
            pagination: PaginationDto::new(result.page, result.page_size, result.total_count),
            posts: result.posts.into_iter().map(PostDto::from).collect(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let post = state.post_service.get_post(token.0.as_deref(), id).await?;
    Ok((StatusCode::OK, Json(PostDto::from(post))))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Deletion outcome", body = DeletePostResponseDto),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<DeletePostResponseDto>)> {
    let result = state
        .post_service
        .delete_post(token.0.as_deref(), id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(DeletePostResponseDto {
            item_id: result.post_id,
            row_count: result.rows_affected,
        }),
    ))
}
