use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::handlers::auth::{
    AuthResponseDto, LoginDto, LogoutResponseDto, RegisterDto,
};
use crate::presentation::handlers::posts::{
    CreatePostDto, DeletePostResponseDto, ListPostsResponseDto, PostDto,
};
use crate::presentation::handlers::roles::{
    CreateRoleDto, ListRolesResponseDto, RoleDto, RoleRightsDto, UpdateRoleDto,
};
use crate::presentation::handlers::users::{
    ChangeRoleDto, ListUsersResponseDto, UpdateProfileDto, UserDto, UserWithRoleDto,
};
use crate::presentation::handlers::{PageQuery, PaginationDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::auth::register,
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::auth::refresh,
        crate::presentation::handlers::auth::logout,
        crate::presentation::handlers::users::profile,
        crate::presentation::handlers::users::update_profile,
        crate::presentation::handlers::users::deactivate,
        crate::presentation::handlers::users::list_users,
        crate::presentation::handlers::users::change_role,
        crate::presentation::handlers::roles::create_role,
        crate::presentation::handlers::roles::update_role,
        crate::presentation::handlers::roles::list_roles,
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::posts::delete_post
    ),
    components(
        schemas(
            RegisterDto,
            LoginDto,
            AuthResponseDto,
            LogoutResponseDto,
            UserDto,
            UpdateProfileDto,
            UserWithRoleDto,
            ListUsersResponseDto,
            ChangeRoleDto,
            RoleRightsDto,
            CreateRoleDto,
            UpdateRoleDto,
            RoleDto,
            ListRolesResponseDto,
            CreatePostDto,
            PostDto,
            ListPostsResponseDto,
            DeletePostResponseDto,
            PageQuery,
            PaginationDto
        )
    ),
    tags(
        (name = "auth", description = "Registration, login and token lifecycle"),
        (name = "users", description = "Profile and account administration"),
        (name = "roles", description = "Role management"),
        (name = "posts", description = "Post endpoints")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}
