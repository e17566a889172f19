use std::sync::Arc;

use uuid::Uuid;

use super::access_control::AccessControl;
use crate::data::pagination::Pagination;
use crate::data::role_repository::{NewRole, RolePatch, RoleRepository};
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::role::{CreateRoleRequest, Permission, Role, UpdateRoleRequest};

#[derive(Debug, Clone)]
pub(crate) struct ListRolesResult {
    pub(crate) roles: Vec<Role>,
    pub(crate) page: u32,
    pub(crate) page_size: u32,
    pub(crate) total_count: i64,
}

pub(crate) struct RoleService<U: UserRepository, R: RoleRepository> {
    roles: R,
    access: Arc<AccessControl<U, R>>,
}

impl<U: UserRepository, R: RoleRepository> RoleService<U, R> {
    pub(crate) fn new(roles: R, access: Arc<AccessControl<U, R>>) -> Self {
        Self { roles, access }
    }

    pub(crate) async fn create_role(
        &self,
        token: Option<&str>,
        req: CreateRoleRequest,
    ) -> Result<Role, DomainError> {
        self.access
            .authorize(token, Permission::ManageRoles)
            .await?;
        let req = req.validate()?;

        self.roles
            .create_role(NewRole {
                name: req.name,
                rights: req.rights,
            })
            .await
    }

    pub(crate) async fn update_role(
        &self,
        token: Option<&str>,
        role_id: Uuid,
        req: UpdateRoleRequest,
    ) -> Result<Role, DomainError> {
        self.access
            .authorize(token, Permission::ManageRoles)
            .await?;
        let req = req.validate()?;

        self.roles
            .find_by_id(role_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("role id: {role_id}")))?;

        self.roles
            .update_role(
                role_id,
                RolePatch {
                    name: req.name,
                    rights: req.rights,
                },
            )
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("role id: {role_id}")))
    }

    pub(crate) async fn list_roles(
        &self,
        token: Option<&str>,
        page: u32,
        page_size: u32,
    ) -> Result<ListRolesResult, DomainError> {
        self.access
            .authorize(token, Permission::ManageRoles)
            .await?;

        let pagination = Pagination { page, page_size };
        let roles = self.roles.list_roles(pagination).await?;
        let total_count = self.roles.total_roles().await?;

        Ok(ListRolesResult {
            roles,
            page,
            page_size,
            total_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use uuid::Uuid;

    use super::RoleService;
    use crate::application::access_control::AccessControl;
    use crate::application::support::{
        FakeRoleRepo, FakeUserRepo, rights, sample_user, test_codec,
    };
    use crate::application::token_codec::TokenKind;
    use crate::domain::error::DomainError;
    use crate::domain::role::{CreateRoleRequest, UpdateRoleRequest};

    struct Fixture {
        users: FakeUserRepo,
        roles: FakeRoleRepo,
        service: RoleService<FakeUserRepo, FakeRoleRepo>,
    }

    fn fixture() -> Fixture {
        let users = FakeUserRepo::new();
        let roles = FakeRoleRepo::new();
        let codec = Arc::new(test_codec());
        let access = Arc::new(AccessControl::new(users.clone(), roles.clone(), codec));
        Fixture {
            users: users.clone(),
            roles: roles.clone(),
            service: RoleService::new(roles, access),
        }
    }

    fn token_for(user_id: Uuid) -> String {
        test_codec()
            .issue(user_id, TokenKind::Access)
            .expect("token must be issued")
    }

    fn create_request(name: &str) -> CreateRoleRequest {
        CreateRoleRequest {
            name: name.to_string(),
            rights: rights(true, true, false, false),
        }
    }

    #[tokio::test]
    async fn create_role_is_forbidden_without_manage_roles() {
        let f = fixture();
        let plain = f.roles.insert("user", rights(true, false, false, false));
        let user = sample_user(plain.id);
        f.users.insert(user.clone(), "hash");

        let err = f
            .service
            .create_role(Some(&token_for(user.id)), create_request("editor"))
            .await
            .expect_err("must be forbidden");
        assert!(matches!(err, DomainError::Forbidden));
    }

    #[tokio::test]
    async fn create_role_stores_rights_for_managers() {
        let f = fixture();
        let admin_role = f.roles.insert("admin", rights(true, true, true, true));
        let admin = sample_user(admin_role.id);
        f.users.insert(admin.clone(), "hash");

        let role = f
            .service
            .create_role(Some(&token_for(admin.id)), create_request("editor"))
            .await
            .expect("create must succeed");

        assert_eq!(role.name, "editor");
        assert!(role.rights.write_posts_access);
        assert!(!role.rights.manage_roles_access);
    }

    #[tokio::test]
    async fn update_role_rejects_missing_target() {
        let f = fixture();
        let admin_role = f.roles.insert("admin", rights(true, true, true, true));
        let admin = sample_user(admin_role.id);
        f.users.insert(admin.clone(), "hash");

        let err = f
            .service
            .update_role(
                Some(&token_for(admin.id)),
                Uuid::new_v4(),
                UpdateRoleRequest {
                    name: "editor".to_string(),
                    rights: rights(true, true, false, false),
                },
            )
            .await
            .expect_err("must fail");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_role_rewrites_name_and_rights() {
        let f = fixture();
        let admin_role = f.roles.insert("admin", rights(true, true, true, true));
        let admin = sample_user(admin_role.id);
        f.users.insert(admin.clone(), "hash");
        let target = f.roles.insert("reader", rights(true, false, false, false));

        let updated = f
            .service
            .update_role(
                Some(&token_for(admin.id)),
                target.id,
                UpdateRoleRequest {
                    name: "writer".to_string(),
                    rights: rights(true, true, false, false),
                },
            )
            .await
            .expect("update must succeed");

        assert_eq!(updated.name, "writer");
        assert!(updated.rights.write_posts_access);
    }

    #[tokio::test]
    async fn list_roles_returns_page_and_total() {
        let f = fixture();
        let admin_role = f.roles.insert("admin", rights(true, true, true, true));
        let admin = sample_user(admin_role.id);
        f.users.insert(admin.clone(), "hash");
        f.roles.insert("reader", rights(true, false, false, false));

        let result = f
            .service
            .list_roles(Some(&token_for(admin.id)), 1, 20)
            .await
            .expect("list must succeed");

        assert_eq!(result.total_count, 2);
        assert_eq!(result.roles.len(), 2);
    }
}
