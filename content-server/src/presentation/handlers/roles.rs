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
use crate::domain::role::{CreateRoleRequest, Role, RoleRights, UpdateRoleRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::extract::BearerToken;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RoleRightsDto {
    pub(crate) read_posts_access: bool,
    pub(crate) write_posts_access: bool,
    pub(crate) delete_posts_access: bool,
    pub(crate) manage_roles_access: bool,
}

impl From<RoleRightsDto> for RoleRights {
    fn from(dto: RoleRightsDto) -> Self {
        Self {
            read_posts_access: dto.read_posts_access,
            write_posts_access: dto.write_posts_access,
            delete_posts_access: dto.delete_posts_access,
            manage_roles_access: dto.manage_roles_access,
        }
    }
}

impl From<RoleRights> for RoleRightsDto {
    fn from(rights: RoleRights) -> Self {
        Self {
            read_posts_access: rights.read_posts_access,
            write_posts_access: rights.write_posts_access,
            delete_posts_access: rights.delete_posts_access,
            manage_roles_access: rights.manage_roles_access,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreateRoleDto {
    #[validate(length(min = 1, max = 64))]
    pub(crate) name: String,
    pub(crate) role_rights: RoleRightsDto,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateRoleDto {
    #[validate(length(min = 1, max = 64))]
    pub(crate) name: String,
    pub(crate) role_rights: RoleRightsDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct RoleDto {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) role_rights: RoleRightsDto,
}

impl From<Role> for RoleDto {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
            role_rights: role.rights.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListRolesResponseDto {
    pub(crate) pagination: PaginationDto,
    pub(crate) roles: Vec<RoleDto>,
}

#[utoipa::path(
    post,
    path = "/api/roles",
    tag = "roles",
    security(("bearer_auth" = [])),
    request_body = CreateRoleDto,
    responses(
        (status = 201, description = "Role created", body = RoleDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub(crate) async fn create_role(
    State(state): State<AppState>,
    token: BearerToken,
    Json(dto): Json<CreateRoleDto>,
) -> AppResult<(StatusCode, Json<RoleDto>)> {
    dto.validate()?;

    let req = CreateRoleRequest {
        name: dto.name,
        rights: dto.role_rights.into(),
    };

    let role = state
        .role_service
        .create_role(token.0.as_deref(), req)
        .await?;
    Ok((StatusCode::CREATED, Json(RoleDto::from(role))))
}

#[utoipa::path(
    put,
    path = "/api/roles/{id}",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Role id")
    ),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Role updated", body = RoleDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Role not found")
    )
)]
pub(crate) async fn update_role(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateRoleDto>,
) -> AppResult<(StatusCode, Json<RoleDto>)> {
    dto.validate()?;

    let req = UpdateRoleRequest {
        name: dto.name,
        rights: dto.role_rights.into(),
    };

    let role = state
        .role_service
        .update_role(token.0.as_deref(), id, req)
        .await?;
    Ok((StatusCode::OK, Json(RoleDto::from(role))))
}

#[utoipa::path(
    get,
    path = "/api/roles",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u32>, Query, description = "Page number (>= 1)"),
        ("page_size" = Option<u32>, Query, description = "Items per page (1..=100)")
    ),
    responses(
        (status = 200, description = "Roles listed", body = ListRolesResponseDto),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub(crate) async fn list_roles(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<PageQuery>,
) -> AppResult<(StatusCode, Json<ListRolesResponseDto>)> {
    query.validate()?;

    let result = state
        .role_service
        .list_roles(token.0.as_deref(), query.page(), query.page_size())
        .await?;

    Ok((
        StatusCode::OK,
        Json(ListRolesResponseDto {
            pagination: PaginationDto::new(result.page, result.page_size, result.total_count),
            roles: result.roles.into_iter().map(RoleDto::from).collect(),
        }),
    ))
}
