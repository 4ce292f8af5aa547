//! PostgreSQL-backed collaborators for the ranking engine.

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::db::{comment_repo, like_repo, post_repo, tag_repo, user_repo};
use crate::error::Result;
use crate::models::{EngagementCount, Post};
use crate::services::feed_ranking::{EngagementStore, PostStore, TagAffinityStore, UserStore};

#[derive(Clone)]
pub struct PgFeedStore {
    pool: PgPool,
}

impl PgFeedStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

#[async_trait]
impl PostStore for PgFeedStore {
    async fn posts_excluding_author(&self, author_id: Uuid) -> Result<Vec<Post>> {
        Ok(post_repo::list_posts_excluding_author(&self.pool, author_id).await?)
    }
}

#[async_trait]
impl EngagementStore for PgFeedStore {
    async fn like_count(&self, post_id: Uuid) -> Result<u64> {
        Ok(to_count(like_repo::count_likes_by_post(&self.pool, post_id).await?))
    }

    async fn comment_count(&self, post_id: Uuid) -> Result<u64> {
        Ok(to_count(
            comment_repo::count_comments_by_post(&self.pool, post_id).await?,
        ))
    }

    async fn engagement_counts(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, EngagementCount>> {
        let (likes, comments) = tokio::try_join!(
            like_repo::count_likes_by_posts(&self.pool, post_ids),
            comment_repo::count_comments_by_posts(&self.pool, post_ids),
        )?;

        Ok(post_ids
            .iter()
            .map(|id| {
                let counts = EngagementCount {
                    likes: likes.get(id).copied().map_or(0, to_count),
                    comments: comments.get(id).copied().map_or(0, to_count),
                };
                (*id, counts)
            })
            .collect())
    }
}

#[async_trait]
impl TagAffinityStore for PgFeedStore {
    async fn tag_ids_for_post(&self, post_id: Uuid) -> Result<HashSet<Uuid>> {
        Ok(tag_repo::tag_ids_for_post(&self.pool, post_id).await?)
    }

    async fn tag_ids_for_user_posts(&self, user_id: Uuid) -> Result<HashSet<Uuid>> {
        Ok(tag_repo::tag_ids_for_user_posts(&self.pool, user_id).await?)
    }

    async fn tag_ids_for_posts(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, HashSet<Uuid>>> {
        Ok(tag_repo::tag_ids_for_posts(&self.pool, post_ids).await?)
    }
}

#[async_trait]
impl UserStore for PgFeedStore {
    async fn user_exists(&self, user_id: Uuid) -> Result<bool> {
        Ok(user_repo::user_exists(&self.pool, user_id).await?)
    }
}
