use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) author_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) text: String,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            text: normalize_text(&self.text)?,
        })
    }
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() || title.len() > 255 {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..255 chars",
        });
    }
    Ok(title.to_string())
}

fn normalize_text(text: &str) -> Result<String, DomainError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DomainError::Validation {
            field: "text",
            message: "must not be empty",
        });
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::{CreatePostRequest, DomainError};

    #[test]
    fn create_post_request_rejects_empty_title() {
        let req = CreatePostRequest {
            title: "   ".to_string(),
            text: "valid text".to_string(),
        };

        let err = req.validate().expect_err("title must be rejected");
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, "title"),
            _ => panic!("expected DomainError::Validation"),
        }
    }

    #[test]
    fn create_post_request_rejects_empty_text() {
        let req = CreatePostRequest {
            title: "valid title".to_string(),
            text: "   ".to_string(),
        };

        let err = req.validate().expect_err("text must be rejected");
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, "text"),
            _ => panic!("expected DomainError::Validation"),
        }
    }

    #[test]
    fn create_post_request_normalizes_fields() {
        let req = CreatePostRequest {
            title: "  title  ".to_string(),
            text: "  text  ".to_string(),
        };

        let validated = req.validate().expect("must validate");
        assert_eq!(validated.title, "title");
        assert_eq!(validated.text, "text");
    }
}
