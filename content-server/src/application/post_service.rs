use std::sync::Arc;

use uuid::Uuid;

use super::access_control::AccessControl;
use crate::data::pagination::Pagination;
use crate::data::post_repository::{NewPost, PostRepository};
use crate::data::role_repository::RoleRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post};
use crate::domain::role::Permission;

#[derive(Debug, Clone)]
pub(crate) struct ListPostsResult {
    pub(crate) posts: Vec<Post>,
    pub(crate) page: u32,
    pub(crate) page_size: u32,
    pub(crate) total_count: i64,
}

/// Deletion reports how many rows went away; deleting a missing post is
/// not an error, just a zero.
#[derive(Debug, Clone)]
pub(crate) struct DeletePostResult {
    pub(crate) post_id: Uuid,
    pub(crate) rows_affected: u64,
}

pub(crate) struct PostService<P: PostRepository, U: UserRepository, R: RoleRepository> {
    repo: P,
    access: Arc<AccessControl<U, R>>,
}

impl<P: PostRepository, U: UserRepository, R: RoleRepository> PostService<P, U, R> {
    pub(crate) fn new(repo: P, access: Arc<AccessControl<U, R>>) -> Self {
        Self { repo, access }
    }

    pub(crate) async fn create_post(
        &self,
        token: Option<&str>,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let author = self
            .access
            .authorize(token, Permission::WritePosts)
            .await?;
        let req = req.validate()?;

        self.repo
            .create_post(NewPost {
                title: req.title,
                text: req.text,
                author_id: author.id,
            })
            .await
    }

    pub(crate) async fn get_post(
        &self,
        token: Option<&str>,
        post_id: Uuid,
    ) -> Result<Post, DomainError> {
        self.access.authorize(token, Permission::ReadPosts).await?;

        self.repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {post_id}")))
    }

    pub(crate) async fn list_posts(
        &self,
        token: Option<&str>,
        page: u32,
        page_size: u32,
    ) -> Result<ListPostsResult, DomainError> {
        self.access.authorize(token, Permission::ReadPosts).await?;

        let pagination = Pagination { page, page_size };
        let posts = self.repo.list_posts(pagination).await?;
        let total_count = self.repo.total_posts().await?;

        Ok(ListPostsResult {
            posts,
            page,
            page_size,
            total_count,
        })
    }

    pub(crate) async fn delete_post(
        &self,
        token: Option<&str>,
        post_id: Uuid,
    ) -> Result<DeletePostResult, DomainError> {
        self.access
            .authorize(token, Permission::DeletePosts)
            .await?;

        let rows_affected = self.repo.delete_post(post_id).await?;
        Ok(DeletePostResult {
            post_id,
            rows_affected,
        })
    }
}
