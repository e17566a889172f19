use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::post_service::PostService;
use crate::application::role_service::RoleService;
use crate::application::session::SessionIssuer;
use crate::application::user_service::UserService;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::data::repositories::postgres::role_repository::PostgresRoleRepository;
use crate::data::repositories::postgres::user_repository::PostgresUserRepository;

pub(crate) mod app_error;
pub(crate) mod extract;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<PostgresUserRepository, PostgresRoleRepository>>,
    pub(crate) user_service: Arc<UserService<PostgresUserRepository, PostgresRoleRepository>>,
    pub(crate) role_service: Arc<RoleService<PostgresUserRepository, PostgresRoleRepository>>,
    pub(crate) post_service:
        Arc<PostService<PostgresPostRepository, PostgresUserRepository, PostgresRoleRepository>>,
    pub(crate) sessions: Arc<SessionIssuer>,
}

impl AppState {
    pub(crate) fn new(
        auth_service: Arc<AuthService<PostgresUserRepository, PostgresRoleRepository>>,
        user_service: Arc<UserService<PostgresUserRepository, PostgresRoleRepository>>,
        role_service: Arc<RoleService<PostgresUserRepository, PostgresRoleRepository>>,
        post_service: Arc<
            PostService<PostgresPostRepository, PostgresUserRepository, PostgresRoleRepository>,
        >,
        sessions: Arc<SessionIssuer>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            role_service,
            post_service,
            sessions,
        }
    }
}
