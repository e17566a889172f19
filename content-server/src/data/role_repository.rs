use async_trait::async_trait;
use uuid::Uuid;

use super::pagination::Pagination;
use crate::domain::error::DomainError;
use crate::domain::role::{Role, RoleRights};

#[derive(Debug, Clone)]
pub(crate) struct NewRole {
    pub(crate) name: String,
    pub(crate) rights: RoleRights,
}

#[derive(Debug, Clone)]
pub(crate) struct RolePatch {
    pub(crate) name: String,
    pub(crate) rights: RoleRights,
}

#[async_trait]
pub(crate) trait RoleRepository: Send + Sync {
    async fn create_role(&self, input: NewRole) -> Result<Role, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, DomainError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError>;
    async fn update_role(&self, id: Uuid, patch: RolePatch) -> Result<Option<Role>, DomainError>;
    async fn list_roles(&self, pagination: Pagination) -> Result<Vec<Role>, DomainError>;
    async fn total_roles(&self) -> Result<i64, DomainError>;
}
