use async_trait::async_trait;
use uuid::Uuid;

use super::pagination::Pagination;
use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub(crate) user: User,
    pub(crate) password_hash: String,
}

#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub(crate) name: String,
    pub(crate) surname: String,
    pub(crate) patronymic: Option<String>,
    pub(crate) email: String,
    pub(crate) password_hash: String,
    pub(crate) role_id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ProfilePatch {
    pub(crate) name: Option<String>,
    pub(crate) surname: Option<String>,
    pub(crate) patronymic: Option<String>,
}

/// Listing row joined with the role name, for administrative views.
#[derive(Debug, Clone)]
pub(crate) struct UserWithRoleName {
    pub(crate) user: User,
    pub(crate) role_name: String,
}

#[async_trait]
pub(crate) trait UserRepository: Send + Sync {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError>;
    async fn update_profile(
        &self,
        id: Uuid,
        patch: ProfilePatch,
    ) -> Result<Option<User>, DomainError>;
    async fn change_role(&self, id: Uuid, role_id: Uuid) -> Result<Option<User>, DomainError>;
    async fn deactivate(&self, id: Uuid) -> Result<bool, DomainError>;
    async fn list_users(&self, pagination: Pagination)
    -> Result<Vec<UserWithRoleName>, DomainError>;
    async fn total_users(&self) -> Result<i64, DomainError>;
}
