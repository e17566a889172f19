use std::sync::Arc;

use anyhow::Result;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::access_control::AccessControl;
use application::auth_service::AuthService;
use application::post_service::PostService;
use application::role_service::RoleService;
use application::session::SessionIssuer;
use application::token_codec::TokenCodec;
use application::user_service::UserService;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use data::repositories::postgres::role_repository::PostgresRoleRepository;
use data::repositories::postgres::user_repository::PostgresUserRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url).await?;
    run_migrations(&pool).await?;

    let codec = Arc::new(TokenCodec::new(
        &settings.jwt_algorithm,
        &settings.jwt_private_key_pem,
        &settings.jwt_public_key_pem,
        settings.access_token_ttl_minutes,
        settings.refresh_token_ttl_minutes,
    )?);
    let sessions = Arc::new(SessionIssuer::new(codec.clone()));

    let users = PostgresUserRepository::new(pool.clone());
    let roles = PostgresRoleRepository::new(pool.clone());
    let posts = PostgresPostRepository::new(pool);

    let access = Arc::new(AccessControl::new(
        users.clone(),
        roles.clone(),
        codec.clone(),
    ));

    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        roles.clone(),
        codec,
        sessions.clone(),
    ));
    let user_service = Arc::new(UserService::new(users, roles.clone(), access.clone()));
    let role_service = Arc::new(RoleService::new(roles, access.clone()));
    let post_service = Arc::new(PostService::new(posts, access));

    let state = AppState::new(
        auth_service,
        user_service,
        role_service,
        post_service,
        sessions,
    );

    server::run_http(&settings, state).await
}
