use std::sync::Arc;

use super::token_codec::{TokenCodec, TokenError};
use crate::data::role_repository::RoleRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::role::Permission;
use crate::domain::user::User;

/// The decision function gating every protected operation:
/// token -> user -> role -> permission flag.
///
/// Holds no state of its own; users and roles are looked up per call.
pub(crate) struct AccessControl<U: UserRepository, R: RoleRepository> {
    users: U,
    roles: R,
    codec: Arc<TokenCodec>,
}

impl<U: UserRepository, R: RoleRepository> AccessControl<U, R> {
    pub(crate) fn new(users: U, roles: R, codec: Arc<TokenCodec>) -> Self {
        Self {
            users,
            roles,
            codec,
        }
    }

    /// Resolves the acting user behind a bearer token, without any
    /// permission check. Deactivated users still pass; only login
    /// inspects `is_active`.
    pub(crate) async fn authenticate(&self, token: Option<&str>) -> Result<User, DomainError> {
        let token = token.ok_or(DomainError::MissingToken)?;

        let user_id = self.codec.verify(token).map_err(|err| match err {
            TokenError::Expired => DomainError::TokenExpired,
            _ => DomainError::InvalidToken,
        })?;

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::ActorNotFound)
    }

    /// `authenticate`, then check the required right on the actor's role.
    pub(crate) async fn authorize(
        &self,
        token: Option<&str>,
        permission: Permission,
    ) -> Result<User, DomainError> {
        let user = self.authenticate(token).await?;

        // role_id is non-null by schema; a dangling reference is data
        // corruption, not a client error
        let role = self.roles.find_by_id(user.role_id).await?.ok_or_else(|| {
            DomainError::Unexpected(format!("role {} missing for user {}", user.role_id, user.id))
        })?;

        if !role.rights.allows(permission) {
            return Err(DomainError::Forbidden);
        }

        Ok(user)
    }
}
