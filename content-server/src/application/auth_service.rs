use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

use super::session::{SessionIssuer, SessionTokens};
use super::token_codec::{TokenCodec, TokenError};
use crate::data::role_repository::RoleRepository;
use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{LoginRequest, RegisterRequest, User};

/// Role assigned to every fresh registration. Seeded by migration; its
/// absence is a deployment fault surfaced as a typed error.
pub(crate) const DEFAULT_ROLE_NAME: &str = "user";

#[derive(Debug, Clone)]
pub(crate) struct AuthResult {
    pub(crate) user: User,
    pub(crate) tokens: SessionTokens,
}

pub(crate) struct AuthService<U: UserRepository, R: RoleRepository> {
    users: U,
    roles: R,
    codec: Arc<TokenCodec>,
    sessions: Arc<SessionIssuer>,
}

impl<U: UserRepository, R: RoleRepository> AuthService<U, R> {
    const DUMMY_PASSWORD_HASH: &'static str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$gwN6hT1sNdk9kI95f7n2Gl3fL0qRmBf2Ffkj2r90/0M";

    pub(crate) fn new(
        users: U,
        roles: R,
        codec: Arc<TokenCodec>,
        sessions: Arc<SessionIssuer>,
    ) -> Self {
        Self {
            users,
            roles,
            codec,
            sessions,
        }
    }

    pub(crate) async fn register(&self, req: RegisterRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        if req.password != req.repeat_password {
            return Err(DomainError::PasswordMismatch);
        }

        if self.users.find_by_email(&req.email).await?.is_some() {
            return Err(DomainError::EmailTaken);
        }

        let default_role = self
            .roles
            .find_by_name(DEFAULT_ROLE_NAME)
            .await?
            .ok_or(DomainError::DefaultRoleNotConfigured(DEFAULT_ROLE_NAME))?;

        let password_hash = self.hash_password(&req.password)?;

        let user = self
            .users
            .create_user(NewUser {
                name: req.name,
                surname: req.surname,
                patronymic: req.patronymic,
                email: req.email,
                password_hash,
                role_id: default_role.id,
            })
            .await?;

        let tokens = self.issue_pair(&user)?;
        Ok(AuthResult { user, tokens })
    }

    /// Unknown email, wrong password and deactivated account are
    /// deliberately indistinguishable to the caller.
    pub(crate) async fn login(&self, req: LoginRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        let creds = match self.users.find_by_email(&req.email).await? {
            Some(creds) => creds,
            None => {
                // выравниваем время ответа, когда пользователь не найден
                match self.verify_password(&req.password, Self::DUMMY_PASSWORD_HASH) {
                    Ok(()) | Err(DomainError::InvalidCredentials) => {}
                    Err(err) => return Err(err),
                }
                return Err(DomainError::InvalidCredentials);
            }
        };

        self.verify_password(&req.password, &creds.password_hash)?;

        if !creds.user.is_active {
            return Err(DomainError::InvalidCredentials);
        }

        let tokens = self.issue_pair(&creds.user)?;
        Ok(AuthResult {
            user: creds.user,
            tokens,
        })
    }

    /// Full rotation: a valid refresh token buys a brand-new pair, and
    /// the caller rewrites the cookie. No reuse detection exists.
    pub(crate) async fn refresh(
        &self,
        refresh_token: Option<&str>,
    ) -> Result<AuthResult, DomainError> {
        let token = refresh_token.ok_or(DomainError::MissingToken)?;

        let user_id = self.codec.verify(token).map_err(|err| match err {
            TokenError::Expired => DomainError::TokenExpired,
            _ => DomainError::InvalidToken,
        })?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::ActorNotFound)?;

        let tokens = self.issue_pair(&user)?;
        Ok(AuthResult { user, tokens })
    }

    fn issue_pair(&self, user: &User) -> Result<SessionTokens, DomainError> {
        self.sessions
            .issue_pair(user.id)
            .map_err(|err| DomainError::Unexpected(err.to_string()))
    }

    pub(crate) fn hash_password(&self, raw_password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Self::argon2()?
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    pub(crate) fn verify_password(
        &self,
        raw_password: &str,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Self::argon2()?
            .verify_password(raw_password.as_bytes(), &parsed_hash)
            .map_err(|err| match err {
                PasswordHashError::Password => DomainError::InvalidCredentials,
                _ => DomainError::Unexpected(err.to_string()),
            })?;

        Ok(())
    }

    fn argon2() -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(19 * 1024, 2, 1, None)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use uuid::Uuid;

    use super::{AuthService, DEFAULT_ROLE_NAME};
    use crate::application::session::SessionIssuer;
    use crate::application::support::{
        FakeRoleRepo, FakeUserRepo, RSA_PRIVATE_KEY_PEM, RSA_PUBLIC_KEY_PEM, rights, sample_user,
        test_codec,
    };
    use crate::application::token_codec::{TokenCodec, TokenKind};
    use crate::domain::error::DomainError;
    use crate::domain::user::{LoginRequest, RegisterRequest};

    fn service(
        users: FakeUserRepo,
        roles: FakeRoleRepo,
    ) -> AuthService<FakeUserRepo, FakeRoleRepo> {
        let codec = Arc::new(test_codec());
        let sessions = Arc::new(SessionIssuer::new(codec.clone()));
        AuthService::new(users, roles, codec, sessions)
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Ivan".to_string(),
            surname: "Petrov".to_string(),
            patronymic: None,
            email: email.to_string(),
            password: "very-secure-password".to_string(),
            repeat_password: "very-secure-password".to_string(),
        }
    }

    #[tokio::test]
    async fn register_rejects_password_mismatch_without_side_effects() {
        let users = FakeUserRepo::new();
        let roles = FakeRoleRepo::new();
        roles.insert(DEFAULT_ROLE_NAME, rights(true, false, false, false));
        let service = service(users.clone(), roles);

        let req = RegisterRequest {
            repeat_password: "different-password".to_string(),
            ..register_request("ivan@example.com")
        };

        let err = service.register(req).await.expect_err("must fail");
        assert!(matches!(err, DomainError::PasswordMismatch));
        assert_eq!(users.count(), 0);
    }

    #[tokio::test]
    async fn register_rejects_taken_email() {
        let users = FakeUserRepo::new();
        let roles = FakeRoleRepo::new();
        let role = roles.insert(DEFAULT_ROLE_NAME, rights(true, false, false, false));
        let mut existing = sample_user(role.id);
        existing.email = "ivan@example.com".to_string();
        users.insert(existing, "hash");
        let service = service(users, roles);

        let err = service
            .register(register_request("ivan@example.com"))
            .await
            .expect_err("must fail");
        assert!(matches!(err, DomainError::EmailTaken));
    }

    #[tokio::test]
    async fn register_fails_when_default_role_is_missing() {
        let service = service(FakeUserRepo::new(), FakeRoleRepo::new());

        let err = service
            .register(register_request("ivan@example.com"))
            .await
            .expect_err("must fail");
        assert!(matches!(err, DomainError::DefaultRoleNotConfigured(_)));
    }

    #[tokio::test]
    async fn register_assigns_default_role_and_issues_both_tokens() {
        let users = FakeUserRepo::new();
        let roles = FakeRoleRepo::new();
        let role = roles.insert(DEFAULT_ROLE_NAME, rights(true, false, false, false));
        let service = service(users.clone(), roles);

        let result = service
            .register(register_request("ivan@example.com"))
            .await
            .expect("register must succeed");

        assert_eq!(result.user.role_id, role.id);
        assert!(result.user.is_active);

        let codec = test_codec();
        assert_eq!(
            codec
                .verify(&result.tokens.access_token)
                .expect("access verifies"),
            result.user.id
        );
        assert_eq!(
            codec
                .verify(&result.tokens.refresh_token)
                .expect("refresh verifies"),
            result.user.id
        );

        let stored = users.get(result.user.id).expect("user must be stored");
        assert_eq!(stored.email, "ivan@example.com");
    }

    #[tokio::test]
    async fn login_is_uniform_across_failure_causes() {
        let users = FakeUserRepo::new();
        let roles = FakeRoleRepo::new();
        let role = roles.insert(DEFAULT_ROLE_NAME, rights(true, false, false, false));
        let service = service(users.clone(), roles);

        let hash = service
            .hash_password("correct-password")
            .expect("hash must be created");

        let mut active = sample_user(role.id);
        active.email = "active@example.com".to_string();
        users.insert(active, &hash);

        let mut inactive = sample_user(role.id);
        inactive.email = "inactive@example.com".to_string();
        inactive.is_active = false;
        users.insert(inactive, &hash);

        let cases = [
            ("nobody@example.com", "correct-password"),
            ("active@example.com", "wrong-password"),
            ("inactive@example.com", "correct-password"),
        ];

        for (email, password) in cases {
            let err = service
                .login(LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                })
                .await
                .expect_err("login must fail");
            assert!(
                matches!(err, DomainError::InvalidCredentials),
                "case {email}: expected InvalidCredentials, got {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn login_returns_tokens_for_valid_credentials() {
        let users = FakeUserRepo::new();
        let roles = FakeRoleRepo::new();
        let role = roles.insert(DEFAULT_ROLE_NAME, rights(true, false, false, false));
        let service = service(users.clone(), roles);

        let hash = service
            .hash_password("correct-password")
            .expect("hash must be created");
        let mut user = sample_user(role.id);
        user.email = "ivan@example.com".to_string();
        let user_id = user.id;
        users.insert(user, &hash);

        let result = service
            .login(LoginRequest {
                email: "ivan@example.com".to_string(),
                password: "correct-password".to_string(),
            })
            .await
            .expect("login must succeed");

        assert_eq!(result.user.id, user_id);
        assert_eq!(
            test_codec()
                .verify(&result.tokens.access_token)
                .expect("access verifies"),
            user_id
        );
    }

    #[tokio::test]
    async fn refresh_rotates_the_pair_for_a_known_user() {
        let users = FakeUserRepo::new();
        let roles = FakeRoleRepo::new();
        let role = roles.insert(DEFAULT_ROLE_NAME, rights(true, false, false, false));
        let user = sample_user(role.id);
        users.insert(user.clone(), "hash");
        let service = service(users, roles);

        let refresh_token = test_codec()
            .issue(user.id, TokenKind::Refresh)
            .expect("token must be issued");

        let result = service
            .refresh(Some(&refresh_token))
            .await
            .expect("refresh must succeed");

        assert_eq!(result.user.id, user.id);
        let codec = test_codec();
        assert_eq!(
            codec
                .verify(&result.tokens.access_token)
                .expect("access verifies"),
            user.id
        );
        assert_eq!(
            codec
                .verify(&result.tokens.refresh_token)
                .expect("refresh verifies"),
            user.id
        );
    }

    #[tokio::test]
    async fn refresh_with_missing_token_fails() {
        let service = service(FakeUserRepo::new(), FakeRoleRepo::new());

        let err = service.refresh(None).await.expect_err("must fail");
        assert!(matches!(err, DomainError::MissingToken));
    }

    #[tokio::test]
    async fn refresh_with_expired_token_fails_as_expired() {
        let users = FakeUserRepo::new();
        let roles = FakeRoleRepo::new();
        let role = roles.insert(DEFAULT_ROLE_NAME, rights(true, false, false, false));
        let user = sample_user(role.id);
        users.insert(user.clone(), "hash");

        let expired_codec = Arc::new(
            TokenCodec::new("RS256", RSA_PRIVATE_KEY_PEM, RSA_PUBLIC_KEY_PEM, 30, -5)
                .expect("codec must be created"),
        );
        let stale = expired_codec
            .issue(user.id, TokenKind::Refresh)
            .expect("token must be issued");

        let codec = Arc::new(test_codec());
        let sessions = Arc::new(SessionIssuer::new(codec.clone()));
        let service = AuthService::new(users, roles, codec, sessions);

        let err = service
            .refresh(Some(&stale))
            .await
            .expect_err("must fail");
        assert!(matches!(err, DomainError::TokenExpired));
    }

    #[tokio::test]
    async fn refresh_for_deleted_user_fails_as_actor_not_found() {
        let service = service(FakeUserRepo::new(), FakeRoleRepo::new());
        let token = test_codec()
            .issue(Uuid::new_v4(), TokenKind::Refresh)
            .expect("token must be issued");

        let err = service
            .refresh(Some(&token))
            .await
            .expect_err("must fail");
        assert!(matches!(err, DomainError::ActorNotFound));
    }

    #[test]
    fn password_hash_round_trip() {
        let service = service(FakeUserRepo::new(), FakeRoleRepo::new());

        let hash = service
            .hash_password("correct-password")
            .expect("hash must be created");
        assert!(service.verify_password("correct-password", &hash).is_ok());

        let err = service
            .verify_password("wrong-password", &hash)
            .expect_err("must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }
}
