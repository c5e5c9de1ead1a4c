use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::data::db_error;
use crate::domain::error::DomainError;
use crate::domain::post::{NewPost, Post, PostChanges};

/// The post store. Listings come back newest-first with the author's
/// username and the group's title/slug joined in.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, new: NewPost) -> Result<Post, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError>;
    async fn update(&self, id: i64, changes: PostChanges) -> Result<Option<Post>, DomainError>;
    async fn list_all(&self) -> Result<Vec<Post>, DomainError>;
    async fn list_by_group(&self, group_id: i64) -> Result<Vec<Post>, DomainError>;
    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, DomainError>;
}

// Shared projection so every read returns the same row shape.
const SELECT_POSTS: &str = r#"
    SELECT p.id, p.text, p.pub_date, p.author_id,
           u.username AS author_username,
           p.group_id, g.title AS group_title, g.slug AS group_slug
    FROM posts p
    JOIN users u ON u.id = p.author_id
    LEFT JOIN groups g ON g.id = p.group_id
"#;

const ORDER_NEWEST_FIRST: &str = " ORDER BY p.pub_date DESC, p.id DESC";

#[derive(Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, new: NewPost) -> Result<Post, DomainError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO posts (text, author_id, group_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&new.text)
        .bind(new.author_id)
        .bind(new.group_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("failed to create post", e))?;

        info!(post_id = id, author_id = %new.author_id, "post created");

        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::Internal(format!("created post {id} not readable")))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        sqlx::query_as::<_, Post>(&format!("{SELECT_POSTS} WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("failed to load post", e))
    }

    async fn update(&self, id: i64, changes: PostChanges) -> Result<Option<Post>, DomainError> {
        let updated = sqlx::query("UPDATE posts SET text = $1, group_id = $2 WHERE id = $3")
            .bind(&changes.text)
            .bind(changes.group_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("failed to update post", e))?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        info!(post_id = id, "post updated");
        self.find_by_id(id).await
    }

    async fn list_all(&self) -> Result<Vec<Post>, DomainError> {
        sqlx::query_as::<_, Post>(&format!("{SELECT_POSTS}{ORDER_NEWEST_FIRST}"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("failed to list posts", e))
    }

    async fn list_by_group(&self, group_id: i64) -> Result<Vec<Post>, DomainError> {
        sqlx::query_as::<_, Post>(&format!(
            "{SELECT_POSTS} WHERE p.group_id = $1{ORDER_NEWEST_FIRST}"
        ))
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("failed to list group posts", e))
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, DomainError> {
        sqlx::query_as::<_, Post>(&format!(
            "{SELECT_POSTS} WHERE p.author_id = $1{ORDER_NEWEST_FIRST}"
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("failed to list author posts", e))
    }
}
