use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::map_db_error;
use crate::data::pagination::Pagination;
use crate::data::user_repository::{
    NewUser, ProfilePatch, UserCredentials, UserRepository, UserWithRoleName,
};
use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    surname: String,
    patronymic: Option<String>,
    email: String,
    is_active: bool,
    role_id: Uuid,
}

#[derive(sqlx::FromRow)]
struct UserCredentialsRow {
    id: Uuid,
    name: String,
    surname: String,
    patronymic: Option<String>,
    email: String,
    password_hash: String,
    is_active: bool,
    role_id: Uuid,
}

#[derive(sqlx::FromRow)]
struct UserWithRoleNameRow {
    id: Uuid,
    name: String,
    surname: String,
    patronymic: Option<String>,
    email: String,
    is_active: bool,
    role_id: Uuid,
    role_name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            surname: row.surname,
            patronymic: row.patronymic,
            email: row.email,
            is_active: row.is_active,
            role_id: row.role_id,
        }
    }
}

const USER_COLUMNS: &str = "id, name, surname, patronymic, email, is_active, role_id";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, surname, patronymic, email, password_hash, role_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, surname, patronymic, email, is_active, role_id
            "#,
        )
        .bind(&input.name)
        .bind(&input.surname)
        .bind(&input.patronymic)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(input.role_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        let row = sqlx::query_as::<_, UserCredentialsRow>(
            r#"
            SELECT id, name, surname, patronymic, email, password_hash, is_active, role_id
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        Ok(row.map(|r| UserCredentials {
            user: User {
                id: r.id,
                name: r.name,
                surname: r.surname,
                patronymic: r.patronymic,
                email: r.email,
                is_active: r.is_active,
                role_id: r.role_id,
            },
            password_hash: r.password_hash,
        }))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        patch: ProfilePatch,
    ) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                surname = COALESCE($3, surname),
                patronymic = COALESCE($4, patronymic)
            WHERE id = $1
            RETURNING id, name, surname, patronymic, email, is_active, role_id
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.surname)
        .bind(&patch.patronymic)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        Ok(row.map(User::from))
    }

    async fn change_role(&self, id: Uuid, role_id: Uuid) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET role_id = $2
            WHERE id = $1
            RETURNING id, name, surname, patronymic, email, is_active, role_id
            "#,
        )
        .bind(id)
        .bind(role_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        Ok(row.map(User::from))
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_user_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_users(
        &self,
        pagination: Pagination,
    ) -> Result<Vec<UserWithRoleName>, DomainError> {
        let rows = sqlx::query_as::<_, UserWithRoleNameRow>(
            r#"
            SELECT
                u.id, u.name, u.surname, u.patronymic, u.email, u.is_active, u.role_id,
                r.name AS role_name
            FROM users u
            JOIN roles r ON r.id = u.role_id
            ORDER BY u.surname, u.name, u.id
            LIMIT $1
            OFFSET $2
            "#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        Ok(rows
            .into_iter()
            .map(|r| UserWithRoleName {
                user: User {
                    id: r.id,
                    name: r.name,
                    surname: r.surname,
                    patronymic: r.patronymic,
                    email: r.email,
                    is_active: r.is_active,
                    role_id: r.role_id,
                },
                role_name: r.role_name,
            })
            .collect())
    }

    async fn total_users(&self) -> Result<i64, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(map_user_db_error)?;

        Ok(total)
    }
}

fn map_user_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return DomainError::EmailTaken;
        }
        if db_err.code().as_deref() == Some("23503") {
            return DomainError::NotFound("role".to_string());
        }
    }
    map_db_error(err)
}
