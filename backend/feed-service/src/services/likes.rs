/// Like service - like, unlike and list likes of a post
use crate::db::{like_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::{CreateLikeRequest, Like};
use sqlx::PgPool;
use uuid::Uuid;

pub struct LikeService {
    pool: PgPool,
}

impl LikeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Like a post. A second like by the same user is a conflict.
    pub async fn like_post(&self, req: &CreateLikeRequest) -> Result<Like> {
        match like_repo::create_like(&self.pool, req.user_id, req.post_id).await {
            Ok(like) => Ok(like),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                AppError::Conflict("User has already liked this post".to_string()),
            ),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn unlike(&self, like_id: Uuid) -> Result<Like> {
        like_repo::delete_like(&self.pool, like_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Like not found".to_string()))
    }

    pub async fn likes_for_post(&self, post_id: Uuid) -> Result<Vec<Like>> {
        if post_repo::find_post(&self.pool, post_id).await?.is_none() {
            return Err(AppError::NotFound("Post not found".to_string()));
        }
        Ok(like_repo::list_likes_by_post(&self.pool, post_id).await?)
    }
}
