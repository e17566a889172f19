use axum::{
    Json,
    extract::State,
    http::{HeaderName, StatusCode, header},
    response::AppendHeaders,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::application::auth_service::AuthResult;
use crate::application::session::clear_refresh_cookie;
use crate::domain::user::{LoginRequest, RegisterRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::extract::RefreshTokenCookie;

type SetCookie = AppendHeaders<[(HeaderName, String); 1]>;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct RegisterDto {
    #[validate(length(min = 1, max = 64))]
    pub(crate) name: String,
    #[validate(length(min = 1, max = 64))]
    pub(crate) surname: String,
    pub(crate) patronymic: Option<String>,
    #[validate(email)]
    pub(crate) email: String,
    #[validate(length(min = 8, max = 128))]
    pub(crate) password: String,
    #[validate(length(min = 8, max = 128))]
    pub(crate) repeat_password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct LoginDto {
    #[validate(email)]
    pub(crate) email: String,
    #[validate(length(min = 1))]
    pub(crate) password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AuthResponseDto {
    pub(crate) user_id: Uuid,
    pub(crate) access_token: String,
    pub(crate) token_type: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct LogoutResponseDto {
    pub(crate) message: String,
}

fn auth_response(state: &AppState, result: AuthResult) -> (SetCookie, Json<AuthResponseDto>) {
    let cookie = state
        .sessions
        .refresh_cookie(&result.tokens.refresh_token);
    (
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(AuthResponseDto {
            user_id: result.user.id,
            access_token: result.tokens.access_token,
            token_type: "Bearer".to_string(),
        }),
    )
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Registered successfully", body = AuthResponseDto),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Passwords do not match or email taken"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    Json(dto): Json<RegisterDto>,
) -> AppResult<(StatusCode, SetCookie, Json<AuthResponseDto>)> {
    dto.validate()?;

    let req = RegisterRequest {
        name: dto.name,
        surname: dto.surname,
        patronymic: dto.patronymic,
        email: dto.email,
        password: dto.password,
        repeat_password: dto.repeat_password,
    };

    let result = state.auth_service.register(req).await?;
    let (cookie, body) = auth_response(&state, result);
    Ok((StatusCode::CREATED, cookie, body))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = AuthResponseDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    Json(dto): Json<LoginDto>,
) -> AppResult<(StatusCode, SetCookie, Json<AuthResponseDto>)> {
    dto.validate()?;

    let req = LoginRequest {
        email: dto.email,
        password: dto.password,
    };

    let result = state.auth_service.login(req).await?;
    let (cookie, body) = auth_response(&state, result);
    Ok((StatusCode::OK, cookie, body))
}

#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = "auth",
    responses(
        (status = 200, description = "Pair rotated", body = AuthResponseDto),
        (status = 401, description = "Refresh token missing, invalid or expired"),
        (status = 404, description = "User behind the token no longer exists"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn refresh(
    State(state): State<AppState>,
    RefreshTokenCookie(token): RefreshTokenCookie,
) -> AppResult<(StatusCode, SetCookie, Json<AuthResponseDto>)> {
    let result = state.auth_service.refresh(token.as_deref()).await?;
    let (cookie, body) = auth_response(&state, result);
    Ok((StatusCode::OK, cookie, body))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Refresh cookie cleared", body = LogoutResponseDto)
    )
)]
pub(crate) async fn logout() -> (SetCookie, Json<LogoutResponseDto>) {
    (
        AppendHeaders([(header::SET_COOKIE, clear_refresh_cookie())]),
        Json(LogoutResponseDto {
            message: "refresh token removed".to_string(),
        }),
    )
}
