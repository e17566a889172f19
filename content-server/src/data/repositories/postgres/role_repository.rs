use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::map_db_error;
use crate::data::pagination::Pagination;
use crate::data::role_repository::{NewRole, RolePatch, RoleRepository};
use crate::domain::error::DomainError;
use crate::domain::role::{Role, RoleRights};

#[derive(Debug, Clone)]
pub(crate) struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    id: Uuid,
    name: String,
    read_posts_access: bool,
    write_posts_access: bool,
    delete_posts_access: bool,
    manage_roles_access: bool,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            rights: RoleRights {
                read_posts_access: row.read_posts_access,
                write_posts_access: row.write_posts_access,
                delete_posts_access: row.delete_posts_access,
                manage_roles_access: row.manage_roles_access,
            },
        }
    }
}

const ROLE_COLUMNS: &str = "id, name, read_posts_access, write_posts_access, \
                            delete_posts_access, manage_roles_access";

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn create_role(&self, input: NewRole) -> Result<Role, DomainError> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            INSERT INTO roles
                (name, read_posts_access, write_posts_access,
                 delete_posts_access, manage_roles_access)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, read_posts_access, write_posts_access,
                      delete_posts_access, manage_roles_access
            "#,
        )
        .bind(&input.name)
        .bind(input.rights.read_posts_access)
        .bind(input.rights.write_posts_access)
        .bind(input.rights.delete_posts_access)
        .bind(input.rights.manage_roles_access)
        .fetch_one(&self.pool)
        .await
        .map_err(map_role_db_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, DomainError> {
        let row = sqlx::query_as::<_, RoleRow>(&format!(
            "SELECT {ROLE_COLUMNS} FROM roles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_role_db_error)?;

        Ok(row.map(Role::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError> {
        let row = sqlx::query_as::<_, RoleRow>(&format!(
            "SELECT {ROLE_COLUMNS} FROM roles WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_role_db_error)?;

        Ok(row.map(Role::from))
    }

    async fn update_role(&self, id: Uuid, patch: RolePatch) -> Result<Option<Role>, DomainError> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            UPDATE roles
            SET name = $2,
                read_posts_access = $3,
                write_posts_access = $4,
                delete_posts_access = $5,
                manage_roles_access = $6
            WHERE id = $1
            RETURNING id, name, read_posts_access, write_posts_access,
                      delete_posts_access, manage_roles_access
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(patch.rights.read_posts_access)
        .bind(patch.rights.write_posts_access)
        .bind(patch.rights.delete_posts_access)
        .bind(patch.rights.manage_roles_access)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_role_db_error)?;

        Ok(row.map(Role::from))
    }

    async fn list_roles(&self, pagination: Pagination) -> Result<Vec<Role>, DomainError> {
        let rows = sqlx::query_as::<_, RoleRow>(&format!(
            "SELECT {ROLE_COLUMNS} FROM roles ORDER BY name, id LIMIT $1 OFFSET $2"
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_role_db_error)?;

        Ok(rows.into_iter().map(Role::from).collect())
    }

    async fn total_roles(&self) -> Result<i64, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roles")
            .fetch_one(&self.pool)
            .await
            .map_err(map_role_db_error)?;

        Ok(total)
    }
}

fn map_role_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23505")
    {
        return DomainError::Validation {
            field: "name",
            message: "role name already exists",
        };
    }
    map_db_error(err)
}
