use std::sync::Arc;

use uuid::Uuid;

use super::token_codec::{TokenCodec, TokenError, TokenKind};

pub(crate) const REFRESH_COOKIE_NAME: &str = "refresh_token";

#[derive(Debug, Clone)]
pub(crate) struct SessionTokens {
    pub(crate) access_token: String,
    pub(crate) refresh_token: String,
}

/// Mints access/refresh pairs and renders the refresh-token cookie.
/// The access token travels as a bearer credential; the refresh token
/// only ever lives in this cookie.
pub(crate) struct SessionIssuer {
    codec: Arc<TokenCodec>,
    refresh_ttl_seconds: i64,
}

impl SessionIssuer {
    pub(crate) fn new(codec: Arc<TokenCodec>) -> Self {
        let refresh_ttl_seconds = codec.refresh_ttl_minutes() * 60;
        Self {
            codec,
            refresh_ttl_seconds,
        }
    }

    pub(crate) fn issue_pair(&self, user_id: Uuid) -> Result<SessionTokens, TokenError> {
        Ok(SessionTokens {
            access_token: self.codec.issue(user_id, TokenKind::Access)?,
            refresh_token: self.codec.issue(user_id, TokenKind::Refresh)?,
        })
    }

    pub(crate) fn refresh_cookie(&self, refresh_token: &str) -> String {
        format!(
            "{REFRESH_COOKIE_NAME}={refresh_token}; Max-Age={}; Path=/; HttpOnly; Secure; SameSite=None",
            self.refresh_ttl_seconds
        )
    }
}

/// Logout is stateless: dropping the cookie is all there is to revoke.
/// Outstanding access tokens stay valid until their natural expiry.
pub(crate) fn clear_refresh_cookie() -> String {
    format!("{REFRESH_COOKIE_NAME}=; Max-Age=0; Path=/; HttpOnly; Secure; SameSite=None")
}
