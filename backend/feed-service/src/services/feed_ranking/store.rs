//! Read-only collaborators of the ranking engine.
//!
//! Each trait has a per-post operation and, where the engine needs one value per
//! candidate, a batch operation. The batch defaults fall back to the per-post
//! calls; the PostgreSQL store overrides them with one query each.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{EngagementCount, Post};

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Every post whose author is not `author_id`
    async fn posts_excluding_author(&self, author_id: Uuid) -> Result<Vec<Post>>;
}

#[async_trait]
pub trait EngagementStore: Send + Sync {
    async fn like_count(&self, post_id: Uuid) -> Result<u64>;

    async fn comment_count(&self, post_id: Uuid) -> Result<u64>;

    /// Counts for every id in `post_ids`. Posts without engagement map to zero.
    async fn engagement_counts(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, EngagementCount>> {
        let mut counts = HashMap::with_capacity(post_ids.len());
        for &post_id in post_ids {
            let likes = self.like_count(post_id).await?;
            let comments = self.comment_count(post_id).await?;
            counts.insert(post_id, EngagementCount { likes, comments });
        }
        Ok(counts)
    }
}

#[async_trait]
pub trait TagAffinityStore: Send + Sync {
    async fn tag_ids_for_post(&self, post_id: Uuid) -> Result<HashSet<Uuid>>;

    /// Union of the tag sets of all posts authored by `user_id`
    async fn tag_ids_for_user_posts(&self, user_id: Uuid) -> Result<HashSet<Uuid>>;

    /// Tag sets keyed by post. Untagged posts may be absent from the map.
    async fn tag_ids_for_posts(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, HashSet<Uuid>>> {
        let mut tags = HashMap::with_capacity(post_ids.len());
        for &post_id in post_ids {
            tags.insert(post_id, self.tag_ids_for_post(post_id).await?);
        }
        Ok(tags)
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn user_exists(&self, user_id: Uuid) -> Result<bool>;
}

/// A single backend that serves every collaborator
pub trait FeedStore: PostStore + EngagementStore + TagAffinityStore + UserStore {}

impl<T> FeedStore for T where T: PostStore + EngagementStore + TagAffinityStore + UserStore {}
