use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderName, StatusCode, header},
    response::AppendHeaders,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{PageQuery, PaginationDto};
use crate::application::session::clear_refresh_cookie;
use crate::application::user_service::ChangeRoleResult;
use crate::domain::user::{UpdateProfileRequest, User};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::extract::BearerToken;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserDto {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) surname: String,
    pub(crate) patronymic: Option<String>,
    pub(crate) email: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            surname: user.surname,
            patronymic: user.patronymic,
            email: user.email,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateProfileDto {
    #[validate(length(min = 1, max = 64))]
    pub(crate) name: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub(crate) surname: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub(crate) patronymic: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserWithRoleDto {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) surname: String,
    pub(crate) patronymic: Option<String>,
    pub(crate) email: String,
    pub(crate) role_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListUsersResponseDto {
    pub(crate) pagination: PaginationDto,
    pub(crate) users: Vec<UserWithRoleDto>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct ChangeRoleDto {
    pub(crate) role_id: Uuid,
}

impl From<ChangeRoleResult> for UserWithRoleDto {
    fn from(result: ChangeRoleResult) -> Self {
        Self {
            id: result.user.id,
            name: result.user.name,
            surname: result.user.surname,
            patronymic: result.user.patronymic,
            email: result.user.email,
            role_name: result.role.name,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile of the acting user", body = UserDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User no longer exists")
    )
)]
pub(crate) async fn profile(
    State(state): State<AppState>,
    token: BearerToken,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    let user = state.user_service.profile(token.0.as_deref()).await?;
    Ok((StatusCode::OK, Json(UserDto::from(user))))
}

#[utoipa::path(
    patch,
    path = "/api/users/me",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = UserDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub(crate) async fn update_profile(
    State(state): State<AppState>,
    token: BearerToken,
    Json(dto): Json<UpdateProfileDto>,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    dto.validate()?;

    let req = UpdateProfileRequest {
        name: dto.name,
        surname: dto.surname,
        patronymic: dto.patronymic,
    };

    let user = state
        .user_service
        .update_profile(token.0.as_deref(), req)
        .await?;
    Ok((StatusCode::OK, Json(UserDto::from(user))))
}

#[utoipa::path(
    delete,
    path = "/api/users/me",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Account deactivated, refresh cookie cleared"),
        (status = 401, description = "Unauthorized")
    )
)]
pub(crate) async fn deactivate(
    State(state): State<AppState>,
    token: BearerToken,
) -> AppResult<(StatusCode, AppendHeaders<[(HeaderName, String); 1]>)> {
    state.user_service.deactivate(token.0.as_deref()).await?;

    Ok((
        StatusCode::NO_CONTENT,
        AppendHeaders([(header::SET_COOKIE, clear_refresh_cookie())]),
    ))
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u32>, Query, description = "Page number (>= 1)"),
        ("page_size" = Option<u32>, Query, description = "Items per page (1..=100)")
    ),
    responses(
        (status = 200, description = "Users listed", body = ListUsersResponseDto),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub(crate) async fn list_users(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<PageQuery>,
) -> AppResult<(StatusCode, Json<ListUsersResponseDto>)> {
    query.validate()?;

    let result = state
        .user_service
        .list_users(token.0.as_deref(), query.page(), query.page_size())
        .await?;

    let users = result
        .users
        .into_iter()
        .map(|entry| UserWithRoleDto {
            id: entry.user.id,
            name: entry.user.name,
            surname: entry.user.surname,
            patronymic: entry.user.patronymic,
            email: entry.user.email,
            role_name: entry.role_name,
        })
        .collect();

    Ok((
        StatusCode::OK,
        Json(ListUsersResponseDto {
            pagination: PaginationDto::new(result.page, result.page_size, result.total_count),
            users,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}/role",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Target user id")
    ),
    request_body = ChangeRoleDto,
    responses(
        (status = 200, description = "Role changed", body = UserWithRoleDto),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User or role not found")
    )
)]
pub(crate) async fn change_role(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
    Json(dto): Json<ChangeRoleDto>,
) -> AppResult<(StatusCode, Json<UserWithRoleDto>)> {
    let result = state
        .user_service
        .change_role(token.0.as_deref(), id, dto.role_id)
        .await?;

    Ok((StatusCode::OK, Json(UserWithRoleDto::from(result))))
}
