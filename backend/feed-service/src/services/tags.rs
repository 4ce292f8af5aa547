/// Tag service - tag catalogue and post tagging
use crate::db::tag_repo;
use crate::error::{AppError, Result};
use crate::models::{CreatePostTagRequest, CreateTagRequest, ListQuery, PostTag, Tag};
use sqlx::PgPool;
use uuid::Uuid;

pub struct TagService {
    pool: PgPool,
}

impl TagService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Tag names are stored trimmed and lowercased
    pub async fn create_tag(&self, req: &CreateTagRequest) -> Result<Tag> {
        let tag = normalize_tag(&req.tag)?;
        Ok(tag_repo::create_tag(&self.pool, &tag).await?)
    }

    pub async fn get_tag(&self, tag_id: Uuid) -> Result<Tag> {
        tag_repo::find_tag(&self.pool, tag_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tag not found".to_string()))
    }

    pub async fn list_tags(&self, query: ListQuery) -> Result<Vec<Tag>> {
        Ok(tag_repo::list_tags(&self.pool, query.limit, query.offset).await?)
    }

    pub async fn update_tag(&self, tag_id: Uuid, req: &CreateTagRequest) -> Result<Tag> {
        let tag = normalize_tag(&req.tag)?;
        tag_repo::update_tag(&self.pool, tag_id, &tag)
            .await?
            .ok_or_else(|| AppError::NotFound("Tag not found".to_string()))
    }

    pub async fn delete_tag(&self, tag_id: Uuid) -> Result<Tag> {
        tag_repo::delete_tag(&self.pool, tag_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tag not found".to_string()))
    }

    pub async fn tag_post(&self, req: &CreatePostTagRequest) -> Result<PostTag> {
        match tag_repo::create_post_tag(&self.pool, req.post_id, req.tag_id).await {
            Ok(post_tag) => Ok(post_tag),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                AppError::Conflict("Tag is already attached to this post".to_string()),
            ),
            Err(e) => Err(e.into()),
        }
    }
}

fn normalize_tag(tag: &str) -> Result<String> {
    let tag = tag.trim().to_lowercase();
    if tag.is_empty() {
        return Err(AppError::Validation("tag must not be blank".to_string()));
    }
    Ok(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("  Rust ").unwrap(), "rust");
        assert_eq!(normalize_tag("web-development").unwrap(), "web-development");
        assert!(matches!(normalize_tag("   "), Err(AppError::Validation(_))));
    }
}
