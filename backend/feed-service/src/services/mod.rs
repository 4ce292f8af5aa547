//! Service layer for feed-service
//!
//! - `feed_ranking`: personalized feed engine and its store abstractions
//! - `users`, `posts`, `likes`, `comments`, `tags`: entity CRUD over PostgreSQL
//! - `seed`: demo data generation

pub mod comments;
pub mod feed_ranking;
pub mod likes;
pub mod posts;
pub mod seed;
pub mod tags;
pub mod users;

pub use comments::CommentService;
pub use feed_ranking::{FeedRankingConfig, FeedRankingService, InMemoryFeedStore, RankingWeights};
pub use likes::LikeService;
pub use posts::PostService;
pub use seed::{SeedConfig, SeedPlan, SeedService};
pub use tags::TagService;
pub use users::UserService;
