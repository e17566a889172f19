use std::sync::Arc;

use uuid::Uuid;

use super::access_control::AccessControl;
use crate::data::pagination::Pagination;
use crate::data::role_repository::RoleRepository;
use crate::data::user_repository::{ProfilePatch, UserRepository, UserWithRoleName};
use crate::domain::error::DomainError;
use crate::domain::role::{Permission, Role};
use crate::domain::user::{UpdateProfileRequest, User};

#[derive(Debug, Clone)]
pub(crate) struct ListUsersResult {
    pub(crate) users: Vec<UserWithRoleName>,
    pub(crate) page: u32,
    pub(crate) page_size: u32,
    pub(crate) total_count: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct ChangeRoleResult {
    pub(crate) user: User,
    pub(crate) role: Role,
}

pub(crate) struct UserService<U: UserRepository, R: RoleRepository> {
    users: U,
    roles: R,
    access: Arc<AccessControl<U, R>>,
}

impl<U: UserRepository, R: RoleRepository> UserService<U, R> {
    pub(crate) fn new(users: U, roles: R, access: Arc<AccessControl<U, R>>) -> Self {
        Self {
            users,
            roles,
            access,
        }
    }

    /// Any valid token may read its own account; no permission involved.
    pub(crate) async fn profile(&self, token: Option<&str>) -> Result<User, DomainError> {
        self.access.authenticate(token).await
    }

    pub(crate) async fn update_profile(
        &self,
        token: Option<&str>,
        req: UpdateProfileRequest,
    ) -> Result<User, DomainError> {
        let actor = self.access.authenticate(token).await?;
        let req = req.validate()?;

        self.users
            .update_profile(
                actor.id,
                ProfilePatch {
                    name: req.name,
                    surname: req.surname,
                    patronymic: req.patronymic,
                },
            )
            .await?
            .ok_or(DomainError::ActorNotFound)
    }

    /// Soft delete; the account row stays so old posts keep their author.
    pub(crate) async fn deactivate(&self, token: Option<&str>) -> Result<(), DomainError> {
        let actor = self.access.authenticate(token).await?;
        if !self.users.deactivate(actor.id).await? {
            return Err(DomainError::ActorNotFound);
        }
        Ok(())
    }

    pub(crate) async fn list_users(
        &self,
        token: Option<&str>,
        page: u32,
        page_size: u32,
    ) -> Result<ListUsersResult, DomainError> {
        self.access
            .authorize(token, Permission::ManageRoles)
            .await?;

        let pagination = Pagination { page, page_size };
        let users = self.users.list_users(pagination).await?;
        let total_count = self.users.total_users().await?;

        Ok(ListUsersResult {
            users,
            page,
            page_size,
            total_count,
        })
    }

    pub(crate) async fn change_role(
        &self,
        token: Option<&str>,
        target_user_id: Uuid,
        role_id: Uuid,
    ) -> Result<ChangeRoleResult, DomainError> {
        self.access
            .authorize(token, Permission::ManageRoles)
            .await?;

        let target = self
            .users
            .find_by_id(target_user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user id: {target_user_id}")))?;

        let role = self
            .roles
            .find_by_id(role_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("role id: {role_id}")))?;

        let user = self
            .users
            .change_role(target.id, role.id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user id: {target_user_id}")))?;

        Ok(ChangeRoleResult { user, role })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use uuid::Uuid;

    use super::UserService;
    use crate::application::access_control::AccessControl;
    use crate::application::support::{
        FakeRoleRepo, FakeUserRepo, rights, sample_user, test_codec,
    };
    use crate::application::token_codec::TokenKind;
    use crate::domain::error::DomainError;
    use crate::domain::user::UpdateProfileRequest;

    struct Fixture {
        users: FakeUserRepo,
        roles: FakeRoleRepo,
        service: UserService<FakeUserRepo, FakeRoleRepo>,
    }

    fn fixture() -> Fixture {
        let users = FakeUserRepo::new();
        let roles = FakeRoleRepo::new();
        let codec = Arc::new(test_codec());
        let access = Arc::new(AccessControl::new(users.clone(), roles.clone(), codec));
        Fixture {
            users: users.clone(),
            roles: roles.clone(),
            service: UserService::new(users, roles, access),
        }
    }

    fn token_for(user_id: Uuid) -> String {
        test_codec()
            .issue(user_id, TokenKind::Access)
            .expect("token must be issued")
    }

    #[tokio::test]
    async fn profile_requires_a_token() {
        let f = fixture();

        let err = f.service.profile(None).await.expect_err("must fail");
        assert!(matches!(err, DomainError::MissingToken));
    }

    #[tokio::test]
    async fn update_profile_changes_only_submitted_fields() {
        let f = fixture();
        let role = f.roles.insert("user", rights(true, false, false, false));
        let user = sample_user(role.id);
        f.users.insert(user.clone(), "hash");

        let updated = f
            .service
            .update_profile(
                Some(&token_for(user.id)),
                UpdateProfileRequest {
                    name: Some("Pyotr".to_string()),
                    surname: None,
                    patronymic: None,
                },
            )
            .await
            .expect("update must succeed");

        assert_eq!(updated.name, "Pyotr");
        assert_eq!(updated.surname, user.surname);
    }

    #[tokio::test]
    async fn deactivate_soft_deletes_the_actor() {
        let f = fixture();
        let role = f.roles.insert("user", rights(true, false, false, false));
        let user = sample_user(role.id);
        f.users.insert(user.clone(), "hash");

        f.service
            .deactivate(Some(&token_for(user.id)))
            .await
            .expect("deactivate must succeed");

        let stored = f.users.get(user.id).expect("row must remain");
        assert!(!stored.is_active);
    }

    #[tokio::test]
    async fn list_users_requires_manage_roles() {
        let f = fixture();
        let plain = f.roles.insert("user", rights(true, false, false, false));
        let user = sample_user(plain.id);
        f.users.insert(user.clone(), "hash");

        let err = f
            .service
            .list_users(Some(&token_for(user.id)), 1, 20)
            .await
            .expect_err("must be forbidden");
        assert!(matches!(err, DomainError::Forbidden));
    }

    #[tokio::test]
    async fn list_users_returns_page_and_total_for_managers() {
        let f = fixture();
        let admin_role = f.roles.insert("admin", rights(true, true, true, true));
        let admin = sample_user(admin_role.id);
        f.users.insert(admin.clone(), "hash");

        let result = f
            .service
            .list_users(Some(&token_for(admin.id)), 1, 20)
            .await
            .expect("list must succeed");

        assert_eq!(result.page, 1);
        assert_eq!(result.page_size, 20);
        assert_eq!(result.total_count, 1);
        assert_eq!(result.users.len(), 1);
    }

    #[tokio::test]
    async fn change_role_rejects_missing_target_user() {
        let f = fixture();
        let admin_role = f.roles.insert("admin", rights(true, true, true, true));
        let admin = sample_user(admin_role.id);
        f.users.insert(admin.clone(), "hash");

        let err = f
            .service
            .change_role(Some(&token_for(admin.id)), Uuid::new_v4(), admin_role.id)
            .await
            .expect_err("must fail");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn change_role_rejects_missing_role() {
        let f = fixture();
        let admin_role = f.roles.insert("admin", rights(true, true, true, true));
        let admin = sample_user(admin_role.id);
        f.users.insert(admin.clone(), "hash");

        let err = f
            .service
            .change_role(Some(&token_for(admin.id)), admin.id, Uuid::new_v4())
            .await
            .expect_err("must fail");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn change_role_moves_the_target_to_the_new_role() {
        let f = fixture();
        let admin_role = f.roles.insert("admin", rights(true, true, true, true));
        let editor_role = f.roles.insert("editor", rights(true, true, false, false));
        let admin = sample_user(admin_role.id);
        f.users.insert(admin.clone(), "hash");
        let target = sample_user(admin_role.id);
        f.users.insert(target.clone(), "hash");

        let result = f
            .service
            .change_role(Some(&token_for(admin.id)), target.id, editor_role.id)
            .await
            .expect("change must succeed");

        assert_eq!(result.user.role_id, editor_role.id);
        assert_eq!(result.role.name, "editor");
    }
}
