use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::application::pagination::{self, Page};
use crate::data::group_repository::GroupRepository;
use crate::data::post_repository::PostRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::group::Group;
use crate::domain::post::{NewPost, Post, PostChanges};
use crate::domain::user::User;

/// Read and write operations over posts, composed from the post, group
/// and user stores plus the pagination helper.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    groups: Arc<dyn GroupRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        groups: Arc<dyn GroupRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            posts,
            groups,
            users,
        }
    }

    pub async fn recent_posts(&self, page: Option<&str>) -> Result<Page<Post>, DomainError> {
        let posts = self.posts.list_all().await?;
        Ok(pagination::paginate(posts, page))
    }

    pub async fn group_posts(
        &self,
        slug: &str,
        page: Option<&str>,
    ) -> Result<(Group, Page<Post>), DomainError> {
        let group = self
            .groups
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::GroupNotFound(slug.to_string()))?;
        let posts = self.posts.list_by_group(group.id).await?;
        Ok((group, pagination::paginate(posts, page)))
    }

    pub async fn author_posts(
        &self,
        username: &str,
        page: Option<&str>,
    ) -> Result<(User, Page<Post>), DomainError> {
        let author = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(username.to_string()))?;
        let posts = self.posts.list_by_author(author.id).await?;
        Ok((author, pagination::paginate(posts, page)))
    }

    pub async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PostNotFound(id))
    }

    #[instrument(skip(self, text))]
    pub async fn create_post(
        &self,
        author_id: Uuid,
        text: String,
        group_id: Option<i64>,
    ) -> Result<Post, DomainError> {
        self.posts
            .create(NewPost {
                author_id,
                text,
                group_id,
            })
            .await
    }

    #[instrument(skip(self, text))]
    pub async fn update_post(
        &self,
        id: i64,
        text: String,
        group_id: Option<i64>,
    ) -> Result<Post, DomainError> {
        self.posts
            .update(id, PostChanges { text, group_id })
            .await?
            .ok_or(DomainError::PostNotFound(id))
    }

    pub async fn find_group(&self, id: i64) -> Result<Option<Group>, DomainError> {
        self.groups.find_by_id(id).await
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>, DomainError> {
        self.groups.list().await
    }
}
