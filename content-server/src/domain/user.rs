use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidateEmail;

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) name: String,
    pub(crate) surname: String,
    pub(crate) patronymic: Option<String>,
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) repeat_password: String,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let name = normalize_person_name("name", &self.name)?;
        let surname = normalize_person_name("surname", &self.surname)?;
        let patronymic = match self.patronymic {
            Some(value) if !value.trim().is_empty() => {
                Some(normalize_person_name("patronymic", &value)?)
            }
            _ => None,
        };
        let email = normalize_email(&self.email)?;
        let password_len = self.password.chars().count();
        if password_len < 8 || password_len > 128 {
            return Err(DomainError::Validation {
                field: "password",
                message: "must be 8..128 chars",
            });
        }
        Ok(Self {
            name,
            surname,
            patronymic,
            email,
            password: self.password,
            repeat_password: self.repeat_password,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let email = normalize_email(&self.email)?;
        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }
        Ok(Self {
            email,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct UpdateProfileRequest {
    pub(crate) name: Option<String>,
    pub(crate) surname: Option<String>,
    pub(crate) patronymic: Option<String>,
}

impl UpdateProfileRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let name = self
            .name
            .map(|value| normalize_person_name("name", &value))
            .transpose()?;
        let surname = self
            .surname
            .map(|value| normalize_person_name("surname", &value))
            .transpose()?;
        let patronymic = self
            .patronymic
            .map(|value| normalize_person_name("patronymic", &value))
            .transpose()?;
        Ok(Self {
            name,
            surname,
            patronymic,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct User {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) surname: String,
    pub(crate) patronymic: Option<String>,
    pub(crate) email: String,
    pub(crate) is_active: bool,
    pub(crate) role_id: Uuid,
}

fn normalize_person_name(field: &'static str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() || value.len() > 64 {
        return Err(DomainError::Validation {
            field,
            message: "must be 1..64 chars",
        });
    }
    Ok(value.to_string())
}

fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(DomainError::Validation {
            field: "email",
            message: "must be a valid email",
        });
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::{LoginRequest, RegisterRequest, normalize_email};

    fn sample_register() -> RegisterRequest {
        RegisterRequest {
            name: "Ivan".to_string(),
            surname: "Petrov".to_string(),
            patronymic: Some("Sergeevich".to_string()),
            email: "ivan@example.com".to_string(),
            password: "very-secure-password".to_string(),
            repeat_password: "very-secure-password".to_string(),
        }
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        let value = normalize_email("  TeSt@Example.COM ").expect("must be valid");
        assert_eq!(value, "test@example.com");
    }

    #[test]
    fn register_rejects_short_password() {
        let req = RegisterRequest {
            password: "short".to_string(),
            repeat_password: "short".to_string(),
            ..sample_register()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn register_normalizes_fields() {
        let req = RegisterRequest {
            name: "  Ivan  ".to_string(),
            email: "  IVAN@EXAMPLE.COM ".to_string(),
            ..sample_register()
        };
        let validated = req.validate().expect("must be valid");
        assert_eq!(validated.name, "Ivan");
        assert_eq!(validated.email, "ivan@example.com");
    }

    #[test]
    fn register_drops_blank_patronymic() {
        let req = RegisterRequest {
            patronymic: Some("   ".to_string()),
            ..sample_register()
        };
        let validated = req.validate().expect("must be valid");
        assert!(validated.patronymic.is_none());
    }

    #[test]
    fn login_rejects_empty_password() {
        let req = LoginRequest {
            email: "ivan@example.com".to_string(),
            password: String::new(),
        };
        assert!(req.validate().is_err());
    }
}
