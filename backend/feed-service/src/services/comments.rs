/// Comment service - comment lifecycle on posts
use crate::db::comment_repo;
use crate::error::{AppError, Result};
use crate::models::{Comment, CreateCommentRequest, ListQuery, UpdateCommentRequest};
use sqlx::PgPool;
use uuid::Uuid;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_comment(&self, req: &CreateCommentRequest) -> Result<Comment> {
        Ok(comment_repo::create_comment(&self.pool, req.user_id, req.post_id, &req.content).await?)
    }

    pub async fn get_comment(&self, comment_id: Uuid) -> Result<Comment> {
        comment_repo::find_comment(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
    }

    pub async fn list_comments(&self, query: ListQuery) -> Result<Vec<Comment>> {
        Ok(comment_repo::list_comments(&self.pool, query.limit, query.offset).await?)
    }

    pub async fn update_comment(
        &self,
        comment_id: Uuid,
        req: &UpdateCommentRequest,
    ) -> Result<Comment> {
        comment_repo::update_comment(&self.pool, comment_id, &req.content)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
    }

    pub async fn delete_comment(&self, comment_id: Uuid) -> Result<Comment> {
        comment_repo::delete_comment(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
    }
}
