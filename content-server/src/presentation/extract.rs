use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use super::app_error::AppError;
use crate::application::session::REFRESH_COOKIE_NAME;
use crate::domain::error::DomainError;

/// The bearer credential, if the request carried one. Absence is not a
/// rejection here; the services decide what a missing token means.
#[derive(Debug, Clone)]
pub(crate) struct BearerToken(pub(crate) Option<String>);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(header::AUTHORIZATION) else {
            return Ok(Self(None));
        };
        let value = value
            .to_str()
            .map_err(|_| AppError::Domain(DomainError::InvalidToken))?;

        let mut segments = value.split_whitespace();
        let scheme = segments
            .next()
            .ok_or(AppError::Domain(DomainError::InvalidToken))?;
        let token = segments
            .next()
            .ok_or(AppError::Domain(DomainError::InvalidToken))?;
        if segments.next().is_some()
            || !scheme.eq_ignore_ascii_case("bearer")
            || token.is_empty()
        {
            return Err(AppError::Domain(DomainError::InvalidToken));
        }

        Ok(Self(Some(token.to_string())))
    }
}

/// The refresh token as delivered by its scoped cookie, if present.
#[derive(Debug, Clone)]
pub(crate) struct RefreshTokenCookie(pub(crate) Option<String>);

impl<S> FromRequestParts<S> for RefreshTokenCookie
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|value| cookie_value(value, REFRESH_COOKIE_NAME));

        Ok(Self(token))
    }
}

fn cookie_value(header_value: &str, name: &str) -> Option<String> {
    header_value
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}
