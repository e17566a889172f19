use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::DomainError;

/// One resource action a role may grant or withhold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Permission {
    ReadPosts,
    WritePosts,
    DeletePosts,
    ManageRoles,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct RoleRights {
    pub(crate) read_posts_access: bool,
    pub(crate) write_posts_access: bool,
    pub(crate) delete_posts_access: bool,
    pub(crate) manage_roles_access: bool,
}

impl RoleRights {
    pub(crate) fn allows(&self, permission: Permission) -> bool {
        match permission {
            Permission::ReadPosts => self.read_posts_access,
            Permission::WritePosts => self.write_posts_access,
            Permission::DeletePosts => self.delete_posts_access,
            Permission::ManageRoles => self.manage_roles_access,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Role {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) rights: RoleRights,
}

#[derive(Debug, Clone)]
pub(crate) struct CreateRoleRequest {
    pub(crate) name: String,
    pub(crate) rights: RoleRights,
}

impl CreateRoleRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            name: normalize_role_name(&self.name)?,
            rights: self.rights,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct UpdateRoleRequest {
    pub(crate) name: String,
    pub(crate) rights: RoleRights,
}

impl UpdateRoleRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            name: normalize_role_name(&self.name)?,
            rights: self.rights,
        })
    }
}

fn normalize_role_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() || name.len() > 64 {
        return Err(DomainError::Validation {
            field: "name",
            message: "must be 1..64 chars",
        });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::{CreateRoleRequest, Permission, RoleRights};

    #[test]
    fn allows_maps_each_permission_to_its_flag() {
        let rights = RoleRights {
            read_posts_access: true,
            write_posts_access: false,
            delete_posts_access: true,
            manage_roles_access: false,
        };

        assert!(rights.allows(Permission::ReadPosts));
        assert!(!rights.allows(Permission::WritePosts));
        assert!(rights.allows(Permission::DeletePosts));
        assert!(!rights.allows(Permission::ManageRoles));
    }

    #[test]
    fn create_role_request_rejects_blank_name() {
        let req = CreateRoleRequest {
            name: "   ".to_string(),
            rights: RoleRights {
                read_posts_access: true,
                write_posts_access: false,
                delete_posts_access: false,
                manage_roles_access: false,
            },
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_role_request_trims_name() {
        let req = CreateRoleRequest {
            name: "  editor  ".to_string(),
            rights: RoleRights {
                read_posts_access: true,
                write_posts_access: true,
                delete_posts_access: false,
                manage_roles_access: false,
            },
        };
        let validated = req.validate().expect("must be valid");
        assert_eq!(validated.name, "editor");
    }
}
