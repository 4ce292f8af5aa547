//! In-process feed store.
//!
//! Built up front with the `&mut self` helpers and then shared read-only behind
//! an `Arc`. Used by tests and local demos that run without PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use super::store::{EngagementStore, PostStore, TagAffinityStore, UserStore};
use crate::error::Result;
use crate::models::Post;

#[derive(Debug, Default, Clone)]
pub struct InMemoryFeedStore {
    users: HashSet<Uuid>,
    posts: Vec<Post>,
    likes: HashMap<Uuid, u64>,
    comments: HashMap<Uuid, u64>,
    post_tags: HashMap<Uuid, HashSet<Uuid>>,
}

impl InMemoryFeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.users.insert(id);
        id
    }

    pub fn add_post(&mut self, author_id: Uuid, created_at: DateTime<Utc>) -> Uuid {
        let id = Uuid::new_v4();
        self.posts.push(Post {
            id,
            author_id,
            title: format!("post {}", self.posts.len() + 1),
            body: String::from("lorem ipsum"),
            created_at,
            updated_at: created_at,
        });
        id
    }

    pub fn set_likes(&mut self, post_id: Uuid, likes: u64) {
        self.likes.insert(post_id, likes);
    }

    pub fn set_comments(&mut self, post_id: Uuid, comments: u64) {
        self.comments.insert(post_id, comments);
    }

    pub fn tag_post(&mut self, post_id: Uuid, tag_id: Uuid) {
        self.post_tags.entry(post_id).or_default().insert(tag_id);
    }
}

#[async_trait]
impl PostStore for InMemoryFeedStore {
    async fn posts_excluding_author(&self, author_id: Uuid) -> Result<Vec<Post>> {
        Ok(self
            .posts
            .iter()
            .filter(|post| post.author_id != author_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl EngagementStore for InMemoryFeedStore {
    async fn like_count(&self, post_id: Uuid) -> Result<u64> {
        Ok(self.likes.get(&post_id).copied().unwrap_or(0))
    }

    async fn comment_count(&self, post_id: Uuid) -> Result<u64> {
        Ok(self.comments.get(&post_id).copied().unwrap_or(0))
    }
}

#[async_trait]
impl TagAffinityStore for InMemoryFeedStore {
    async fn tag_ids_for_post(&self, post_id: Uuid) -> Result<HashSet<Uuid>> {
        Ok(self.post_tags.get(&post_id).cloned().unwrap_or_default())
    }

    async fn tag_ids_for_user_posts(&self, user_id: Uuid) -> Result<HashSet<Uuid>> {
        Ok(self
            .posts
            .iter()
            .filter(|post| post.author_id == user_id)
            .filter_map(|post| self.post_tags.get(&post.id))
            .flatten()
            .copied()
            .collect())
    }
}

#[async_trait]
impl UserStore for InMemoryFeedStore {
    async fn user_exists(&self, user_id: Uuid) -> Result<bool> {
        Ok(self.users.contains(&user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_interests_are_union_of_own_post_tags() {
        let mut store = InMemoryFeedStore::new();
        let user = store.add_user();
        let other = store.add_user();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        let first = store.add_post(user, Utc::now());
        let second = store.add_post(user, Utc::now());
        let foreign = store.add_post(other, Utc::now());
        store.tag_post(first, a);
        store.tag_post(second, a);
        store.tag_post(second, b);
        store.tag_post(foreign, c);

        let interests = store.tag_ids_for_user_posts(user).await.unwrap();
        assert_eq!(interests, [a, b].into_iter().collect());
    }

    #[tokio::test]
    async fn test_default_batch_lookups() {
        let mut store = InMemoryFeedStore::new();
        let author = store.add_user();
        let post = store.add_post(author, Utc::now());
        let quiet = store.add_post(author, Utc::now());
        store.set_likes(post, 4);
        store.set_comments(post, 1);

        let counts = store.engagement_counts(&[post, quiet]).await.unwrap();
        assert_eq!(counts[&post].likes, 4);
        assert_eq!(counts[&post].comments, 1);
        assert_eq!(counts[&quiet].likes, 0);

        let tags = store.tag_ids_for_posts(&[quiet]).await.unwrap();
        assert!(tags[&quiet].is_empty());
    }
}
