//! Personalized feed ranking.
//!
//! For a requesting user the engine derives interest tags from the user's own
//! posts, scores every post written by someone else, sorts by score and returns
//! one page. Nothing is cached between requests.

pub mod memory;
pub mod pagination;
pub mod scoring;
pub mod store;

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::config::FeedConfig;
use crate::error::Result;
use crate::metrics::feed::{observe_feed_request, FEED_CANDIDATE_COUNT, FEED_INTEREST_TAG_COUNT};
use crate::models::feed::MAX_PAGE_SIZE;
use crate::models::{EngagementCount, FeedItem, FeedPage, Post};

pub use memory::InMemoryFeedStore;
pub use pagination::{clamp_page_request, paginate};
pub use scoring::{
    compare_ranked, tag_match_count, time_decay, RankingWeights, COMMENT_WEIGHT, LIKE_WEIGHT,
    TAG_MATCH_WEIGHT,
};
pub use store::{EngagementStore, FeedStore, PostStore, TagAffinityStore, UserStore};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedRankingConfig {
    pub weights: RankingWeights,
    pub max_page_size: usize,
}

impl Default for FeedRankingConfig {
    fn default() -> Self {
        Self {
            weights: RankingWeights::default(),
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl From<&FeedConfig> for FeedRankingConfig {
    fn from(config: &FeedConfig) -> Self {
        FeedRankingConfig {
            weights: RankingWeights::new(
                config.like_weight,
                config.comment_weight,
                config.tag_weight,
            ),
            max_page_size: config.max_page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }
}

pub struct FeedRankingService {
    posts: Arc<dyn PostStore>,
    engagement: Arc<dyn EngagementStore>,
    tags: Arc<dyn TagAffinityStore>,
    users: Arc<dyn UserStore>,
    weights: RankingWeights,
    max_page_size: usize,
}

impl FeedRankingService {
    pub fn new(
        posts: Arc<dyn PostStore>,
        engagement: Arc<dyn EngagementStore>,
        tags: Arc<dyn TagAffinityStore>,
        users: Arc<dyn UserStore>,
        config: FeedRankingConfig,
    ) -> Self {
        Self {
            posts,
            engagement,
            tags,
            users,
            weights: config.weights,
            max_page_size: config.max_page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Build the engine on top of one store that serves every collaborator.
    pub fn from_store<S>(store: Arc<S>, config: FeedRankingConfig) -> Self
    where
        S: FeedStore + 'static,
    {
        Self::new(store.clone(), store.clone(), store.clone(), store, config)
    }

    pub fn with_weights(mut self, weights: RankingWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> RankingWeights {
        self.weights
    }

    /// Tag ids attached to any post the user authored
    pub async fn derive_interests(&self, user_id: Uuid) -> Result<HashSet<Uuid>> {
        self.tags.tag_ids_for_user_posts(user_id).await
    }

    pub async fn get_personalized_feed(
        &self,
        user_id: Uuid,
        page: usize,
        page_size: usize,
    ) -> Result<FeedPage> {
        self.get_personalized_feed_at(user_id, page, page_size, Utc::now())
            .await
    }

    /// Rank the feed as of `now`.
    ///
    /// An unknown user gets an empty, well-formed page rather than an error.
    pub async fn get_personalized_feed_at(
        &self,
        user_id: Uuid,
        page: usize,
        page_size: usize,
        now: DateTime<Utc>,
    ) -> Result<FeedPage> {
        let feed = self
            .find_personalized_feed_at(user_id, page, page_size, now)
            .await?;
        Ok(feed.unwrap_or_else(|| {
            let (page, page_size) = clamp_page_request(page, page_size, self.max_page_size);
            FeedPage::empty(page, page_size)
        }))
    }

    /// Like [`Self::get_personalized_feed`], but `None` when the user does not exist.
    pub async fn find_personalized_feed(
        &self,
        user_id: Uuid,
        page: usize,
        page_size: usize,
    ) -> Result<Option<FeedPage>> {
        self.find_personalized_feed_at(user_id, page, page_size, Utc::now())
            .await
    }

    #[instrument(skip(self, now))]
    pub async fn find_personalized_feed_at(
        &self,
        user_id: Uuid,
        page: usize,
        page_size: usize,
        now: DateTime<Utc>,
    ) -> Result<Option<FeedPage>> {
        let start = Instant::now();
        let (page, page_size) = clamp_page_request(page, page_size, self.max_page_size);

        let result = self.rank(user_id, page, page_size, now).await;
        let elapsed = start.elapsed().as_secs_f64();

        match &result {
            Ok(Some(feed)) => {
                observe_feed_request("ranked", elapsed);
                debug!(
                    returned = feed.items.len(),
                    total_items = feed.pagination.total_items,
                    page,
                    page_size,
                    "Personalized feed ranked"
                );
            }
            Ok(None) => {
                observe_feed_request("unknown_user", elapsed);
                debug!("Feed requested for unknown user");
            }
            Err(e) => {
                observe_feed_request("error", elapsed);
                warn!(error = %e, "Personalized feed ranking failed");
            }
        }
        result
    }

    async fn rank(
        &self,
        user_id: Uuid,
        page: usize,
        page_size: usize,
        now: DateTime<Utc>,
    ) -> Result<Option<FeedPage>> {
        if !self.users.user_exists(user_id).await? {
            return Ok(None);
        }

        let (interests, candidates) = tokio::try_join!(
            self.derive_interests(user_id),
            self.posts.posts_excluding_author(user_id),
        )?;

        // Own posts never reach the page, whatever the store returns
        let candidates: Vec<Post> = candidates
            .into_iter()
            .filter(|post| post.author_id != user_id)
            .collect();

        FEED_INTEREST_TAG_COUNT.observe(interests.len() as f64);
        FEED_CANDIDATE_COUNT.observe(candidates.len() as f64);
        debug!(
            interests = interests.len(),
            candidates = candidates.len(),
            "Scoring feed candidates"
        );

        if candidates.is_empty() {
            return Ok(Some(FeedPage::empty(page, page_size)));
        }

        let post_ids: Vec<Uuid> = candidates.iter().map(|post| post.id).collect();
        let (engagement, post_tags) = tokio::try_join!(
            self.engagement.engagement_counts(&post_ids),
            self.tags.tag_ids_for_posts(&post_ids),
        )?;

        let mut scored: Vec<FeedItem> = candidates
            .into_iter()
            .map(|post| self.score_post(post, &interests, &engagement, &post_tags, now))
            .collect();
        scored.sort_by(compare_ranked);

        let (items, pagination) = paginate(scored, page, page_size);
        Ok(Some(FeedPage { items, pagination }))
    }

    fn score_post(
        &self,
        post: Post,
        interests: &HashSet<Uuid>,
        engagement: &HashMap<Uuid, EngagementCount>,
        post_tags: &HashMap<Uuid, HashSet<Uuid>>,
        now: DateTime<Utc>,
    ) -> FeedItem {
        let counts = engagement.get(&post.id).copied().unwrap_or_default();
        let tag_matches = post_tags
            .get(&post.id)
            .map_or(0, |tags| tag_match_count(interests, tags));
        let decay = time_decay(post.created_at, now);
        let score = self
            .weights
            .score(counts.likes, counts.comments, tag_matches, decay);

        FeedItem {
            post,
            score,
            like_count: counts.likes,
            comment_count: counts.comments,
            tag_match_count: tag_matches,
            time_decay: decay,
        }
    }
}
