/// Post service - handles post creation, retrieval, and management
use crate::db::post_repo;
use crate::error::{AppError, Result};
use crate::models::{CreatePostRequest, ListQuery, Post, UpdatePostRequest};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new post. An unknown author is rejected by the foreign key.
    pub async fn create_post(&self, req: &CreatePostRequest) -> Result<Post> {
        let post = post_repo::create_post(&self.pool, req.author_id, &req.title, &req.body).await?;
        tracing::info!(post_id = %post.id, author_id = %post.author_id, "Post created");
        Ok(post)
    }

    pub async fn get_post(&self, post_id: Uuid) -> Result<Post> {
        post_repo::find_post(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
    }

    pub async fn list_posts(&self, query: ListQuery) -> Result<Vec<Post>> {
        Ok(post_repo::list_posts(&self.pool, query.limit, query.offset).await?)
    }

    /// Update title and/or body; bumps `updated_at`
    pub async fn update_post(&self, post_id: Uuid, req: &UpdatePostRequest) -> Result<Post> {
        post_repo::update_post(
            &self.pool,
            post_id,
            req.title.as_deref(),
            req.body.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
    }

    pub async fn delete_post(&self, post_id: Uuid) -> Result<Post> {
        let post = post_repo::delete_post(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
        tracing::info!(post_id = %post.id, "Post deleted");
        Ok(post)
    }
}
