//! Demo data generation for local environments.
//!
//! [`SeedPlan::generate`] builds every row in memory from an injected RNG, then
//! [`SeedService::apply`] writes the plan with one `UNNEST` insert per table
//! inside a single transaction.

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Comment, Like, Post, PostTag, Tag, User};

const SEED_WINDOW_DAYS: i64 = 30;
const MAX_TAGS_PER_POST: usize = 5;

const TAG_CATALOGUE: &[&str] = &[
    "python", "javascript", "react", "rust", "database", "api", "web-development",
    "machine-learning", "data-science", "backend", "frontend", "devops", "cloud",
    "travel", "food", "photography", "fitness", "music", "art", "books", "movies",
    "gaming", "sports", "nature", "cooking", "health", "fashion", "design",
    "startup", "entrepreneurship", "marketing", "finance", "business",
    "productivity", "leadership", "innovation", "strategy", "networking", "career",
    "remote-work", "tutorial", "learning", "education", "science", "technology",
    "programming", "tips", "guide", "howto", "best-practices",
];

const FIRST_NAMES: &[&str] = &[
    "Ada", "Grace", "Linus", "Margaret", "Alan", "Barbara", "Ken", "Frances", "Dennis",
    "Radia", "Edsger", "Hedy", "Tim", "Katherine", "Guido", "Sophie", "Yukihiro", "Joan",
];

const LAST_NAMES: &[&str] = &[
    "Lovelace", "Hopper", "Torvalds", "Hamilton", "Turing", "Liskov", "Thompson", "Allen",
    "Ritchie", "Perlman", "Dijkstra", "Lamarr", "Berners-Lee", "Johnson", "Rossum", "Wilson",
];

const WORDS: &[&str] = &[
    "feed", "signal", "network", "story", "morning", "project", "idea", "pattern", "garden",
    "coffee", "journey", "release", "review", "weekend", "system", "question", "update",
    "photo", "recipe", "market", "launch", "lesson", "city", "design", "build", "music",
    "trail", "notes", "draft", "community", "experiment", "habit", "workflow", "team",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedConfig {
    pub users: usize,
    pub posts_per_user: usize,
    pub tags: usize,
    pub likes_per_user: usize,
    pub comments_per_user: usize,
    pub clear: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            users: 20,
            posts_per_user: 100,
            tags: 50,
            likes_per_user: 40,
            comments_per_user: 40,
            clear: false,
        }
    }
}

impl SeedConfig {
    /// Read `SEED_*` variables. Values below a minimum fall back to the default.
    pub fn from_env() -> std::result::Result<Self, String> {
        let defaults = Self::default();
        Ok(Self {
            users: bounded_env("SEED_USERS", 10, defaults.users)?,
            posts_per_user: bounded_env("SEED_POSTS_PER_USER", 50, defaults.posts_per_user)?,
            tags: bounded_env("SEED_TAGS", 20, defaults.tags)?,
            likes_per_user: bounded_env("SEED_LIKES_PER_USER", 40, defaults.likes_per_user)?,
            comments_per_user: bounded_env(
                "SEED_COMMENTS_PER_USER",
                40,
                defaults.comments_per_user,
            )?,
            clear: match std::env::var("SEED_CLEAR") {
                Ok(v) => v
                    .trim()
                    .parse()
                    .map_err(|e| format!("Failed to parse SEED_CLEAR='{}': {}", v, e))?,
                Err(_) => defaults.clear,
            },
        })
    }
}

fn bounded_env(key: &str, min: usize, default: usize) -> std::result::Result<usize, String> {
    let value = match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, raw, e))?,
        Err(_) => return Ok(default),
    };

    if value < min {
        warn!(key, value, min, default, "Seed value below minimum, using default");
        return Ok(default);
    }
    Ok(value)
}

/// Every row one seeding run inserts
#[derive(Debug, Clone, Default)]
pub struct SeedPlan {
    pub users: Vec<User>,
    pub tags: Vec<Tag>,
    pub posts: Vec<Post>,
    pub post_tags: Vec<PostTag>,
    pub likes: Vec<Like>,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub tags: usize,
    pub posts: usize,
    pub post_tags: usize,
    pub likes: usize,
    pub comments: usize,
}

impl SeedPlan {
    pub fn generate<R: Rng + ?Sized>(config: &SeedConfig, now: DateTime<Utc>, rng: &mut R) -> Self {
        let window_start = now - Duration::days(SEED_WINDOW_DAYS);
        let mut plan = SeedPlan::default();

        for index in 0..config.users {
            let first = pick(FIRST_NAMES, rng);
            let last = pick(LAST_NAMES, rng);
            let created_at = random_between(window_start, now, rng);
            plan.users.push(User {
                id: Uuid::new_v4(),
                username: format!(
                    "{}_{}{}_{:08x}",
                    first.to_lowercase(),
                    pick(WORDS, rng),
                    index + 1,
                    rng.gen::<u32>()
                ),
                full_name: Some(format!("{} {}", first, last)),
                created_at,
                updated_at: created_at,
            });
        }

        let mut tag_names: Vec<String> = TAG_CATALOGUE
            .choose_multiple(rng, config.tags.min(TAG_CATALOGUE.len()))
            .map(|tag| tag.to_string())
            .collect();
        while tag_names.len() < config.tags {
            tag_names.push(format!("topic-{}", tag_names.len() + 1));
        }
        plan.tags = tag_names
            .into_iter()
            .map(|tag| Tag {
                id: Uuid::new_v4(),
                tag,
                created_at: window_start,
                updated_at: window_start,
            })
            .collect();

        for user in &plan.users {
            for _ in 0..config.posts_per_user {
                let created_at = random_between(window_start, now, rng);
                plan.posts.push(Post {
                    id: Uuid::new_v4(),
                    author_id: user.id,
                    title: title(rng),
                    body: body(rng),
                    created_at,
                    updated_at: created_at,
                });
            }
        }

        if !plan.tags.is_empty() {
            for post in &plan.posts {
                let count = rng.gen_range(1..=MAX_TAGS_PER_POST).min(plan.tags.len());
                for tag in plan.tags.choose_multiple(rng, count) {
                    plan.post_tags.push(PostTag {
                        id: Uuid::new_v4(),
                        post_id: post.id,
                        tag_id: tag.id,
                        created_at: post.created_at,
                        updated_at: post.created_at,
                    });
                }
            }
        }

        for user in &plan.users {
            let others: Vec<&Post> = plan
                .posts
                .iter()
                .filter(|post| post.author_id != user.id)
                .collect();

            for post in others.choose_multiple(rng, config.likes_per_user) {
                let created_at = random_between(post.created_at, now, rng);
                plan.likes.push(Like {
                    id: Uuid::new_v4(),
                    user_id: user.id,
                    post_id: post.id,
                    created_at,
                    updated_at: created_at,
                });
            }

            for post in others.choose_multiple(rng, config.comments_per_user) {
                let created_at = random_between(post.created_at, now, rng);
                plan.comments.push(Comment {
                    id: Uuid::new_v4(),
                    user_id: user.id,
                    post_id: post.id,
                    content: sentences(rng.gen_range(1..=3), rng),
                    created_at,
                    updated_at: created_at,
                });
            }
        }

        plan
    }

    pub fn summary(&self) -> SeedSummary {
        SeedSummary {
            users: self.users.len(),
            tags: self.tags.len(),
            posts: self.posts.len(),
            post_tags: self.post_tags.len(),
            likes: self.likes.len(),
            comments: self.comments.len(),
        }
    }
}

fn pick<'a, R: Rng + ?Sized>(words: &[&'a str], rng: &mut R) -> &'a str {
    words.choose(rng).copied().unwrap_or("post")
}

fn random_between<R: Rng + ?Sized>(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    rng: &mut R,
) -> DateTime<Utc> {
    let span_ms = (end - start).num_milliseconds();
    if span_ms <= 0 {
        return start;
    }
    start + Duration::milliseconds(rng.gen_range(0..=span_ms))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn title<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = rng.gen_range(3..=8);
    let words: Vec<&str> = (0..len).map(|_| pick(WORDS, rng)).collect();
    capitalize(&words.join(" "))
}

fn sentences<R: Rng + ?Sized>(count: usize, rng: &mut R) -> String {
    (0..count)
        .map(|_| {
            let len = rng.gen_range(6..=12);
            let words: Vec<&str> = (0..len).map(|_| pick(WORDS, rng)).collect();
            format!("{}.", capitalize(&words.join(" ")))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn body<R: Rng + ?Sized>(rng: &mut R) -> String {
    let paragraphs = rng.gen_range(1..=3);
    (0..paragraphs)
        .map(|_| {
            let count = rng.gen_range(2..=5);
            sentences(count, rng)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub struct SeedService {
    pool: PgPool,
}

impl SeedService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the plan in one transaction, optionally clearing every table first.
    pub async fn apply(&self, plan: &SeedPlan, clear: bool) -> Result<SeedSummary> {
        let mut tx = self.pool.begin().await?;

        if clear {
            clear_all(&mut tx).await?;
            info!("Cleared existing feed data");
        }

        insert_users(&mut tx, &plan.users).await?;
        let tag_ids = upsert_tags(&mut tx, &plan.tags).await?;
        insert_posts(&mut tx, &plan.posts).await?;
        let post_tags: Vec<PostTag> = plan
            .post_tags
            .iter()
            .map(|row| PostTag {
                tag_id: tag_ids.get(&row.tag_id).copied().unwrap_or(row.tag_id),
                ..row.clone()
            })
            .collect();
        insert_post_tags(&mut tx, &post_tags).await?;
        insert_likes(&mut tx, &plan.likes).await?;
        insert_comments(&mut tx, &plan.comments).await?;

        tx.commit().await?;

        let summary = plan.summary();
        info!(
            users = summary.users,
            tags = summary.tags,
            posts = summary.posts,
            post_tags = summary.post_tags,
            likes = summary.likes,
            comments = summary.comments,
            "Database seeding completed"
        );
        Ok(summary)
    }

    pub async fn clear(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        clear_all(&mut tx).await?;
        tx.commit().await?;
        Ok(())
    }
}

async fn clear_all(tx: &mut Transaction<'_, Postgres>) -> Result<()> {
    sqlx::query("TRUNCATE post_tags, comments, likes, posts, tags, users")
        .execute(&mut **tx)
        .await?;
    Ok(())
}

async fn insert_users(tx: &mut Transaction<'_, Postgres>, users: &[User]) -> Result<()> {
    let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
    let usernames: Vec<String> = users.iter().map(|u| u.username.clone()).collect();
    let full_names: Vec<String> = users
        .iter()
        .map(|u| u.full_name.clone().unwrap_or_default())
        .collect();
    let created: Vec<DateTime<Utc>> = users.iter().map(|u| u.created_at).collect();

    sqlx::query(
        r#"
        INSERT INTO users (id, username, full_name, created_at, updated_at)
        SELECT id, username, full_name, created_at, created_at
        FROM UNNEST($1::uuid[], $2::varchar[], $3::varchar[], $4::timestamptz[])
            AS t(id, username, full_name, created_at)
        "#,
    )
    .bind(&ids)
    .bind(&usernames)
    .bind(&full_names)
    .bind(&created)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Insert tags, reusing rows whose name already exists.
///
/// Returns planned tag id -> stored tag id.
async fn upsert_tags(
    tx: &mut Transaction<'_, Postgres>,
    tags: &[Tag],
) -> Result<HashMap<Uuid, Uuid>> {
    let ids: Vec<Uuid> = tags.iter().map(|t| t.id).collect();
    let names: Vec<String> = tags.iter().map(|t| t.tag.clone()).collect();
    let created: Vec<DateTime<Utc>> = tags.iter().map(|t| t.created_at).collect();

    let stored: Vec<(Uuid, String)> = sqlx::query_as(
        r#"
        INSERT INTO tags (id, tag, created_at, updated_at)
        SELECT id, tag, created_at, created_at
        FROM UNNEST($1::uuid[], $2::varchar[], $3::timestamptz[]) AS t(id, tag, created_at)
        ON CONFLICT (tag) DO UPDATE SET tag = EXCLUDED.tag
        RETURNING id, tag
        "#,
    )
    .bind(&ids)
    .bind(&names)
    .bind(&created)
    .fetch_all(&mut **tx)
    .await?;

    let by_name: HashMap<String, Uuid> = stored.into_iter().map(|(id, tag)| (tag, id)).collect();
    let reused = tags
        .iter()
        .filter(|t| by_name.get(&t.tag).is_some_and(|id| *id != t.id))
        .count();
    if reused > 0 {
        info!(reused, "Reusing existing tags");
    }

    Ok(tags
        .iter()
        .filter_map(|t| by_name.get(&t.tag).map(|id| (t.id, *id)))
        .collect())
}

async fn insert_posts(tx: &mut Transaction<'_, Postgres>, posts: &[Post]) -> Result<()> {
    let ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
    let authors: Vec<Uuid> = posts.iter().map(|p| p.author_id).collect();
    let titles: Vec<String> = posts.iter().map(|p| p.title.clone()).collect();
    let bodies: Vec<String> = posts.iter().map(|p| p.body.clone()).collect();
    let created: Vec<DateTime<Utc>> = posts.iter().map(|p| p.created_at).collect();

    sqlx::query(
        r#"
        INSERT INTO posts (id, author_id, title, body, created_at, updated_at)
        SELECT id, author_id, title, body, created_at, created_at
        FROM UNNEST($1::uuid[], $2::uuid[], $3::varchar[], $4::text[], $5::timestamptz[])
            AS t(id, author_id, title, body, created_at)
        "#,
    )
    .bind(&ids)
    .bind(&authors)
    .bind(&titles)
    .bind(&bodies)
    .bind(&created)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn insert_post_tags(tx: &mut Transaction<'_, Postgres>, rows: &[PostTag]) -> Result<()> {
    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let posts: Vec<Uuid> = rows.iter().map(|r| r.post_id).collect();
    let tags: Vec<Uuid> = rows.iter().map(|r| r.tag_id).collect();
    let created: Vec<DateTime<Utc>> = rows.iter().map(|r| r.created_at).collect();

    sqlx::query(
        r#"
        INSERT INTO post_tags (id, post_id, tag_id, created_at, updated_at)
        SELECT id, post_id, tag_id, created_at, created_at
        FROM UNNEST($1::uuid[], $2::uuid[], $3::uuid[], $4::timestamptz[])
            AS t(id, post_id, tag_id, created_at)
        "#,
    )
    .bind(&ids)
    .bind(&posts)
    .bind(&tags)
    .bind(&created)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn insert_likes(tx: &mut Transaction<'_, Postgres>, likes: &[Like]) -> Result<()> {
    let ids: Vec<Uuid> = likes.iter().map(|l| l.id).collect();
    let users: Vec<Uuid> = likes.iter().map(|l| l.user_id).collect();
    let posts: Vec<Uuid> = likes.iter().map(|l| l.post_id).collect();
    let created: Vec<DateTime<Utc>> = likes.iter().map(|l| l.created_at).collect();

    sqlx::query(
        r#"
        INSERT INTO likes (id, user_id, post_id, created_at, updated_at)
        SELECT id, user_id, post_id, created_at, created_at
        FROM UNNEST($1::uuid[], $2::uuid[], $3::uuid[], $4::timestamptz[])
            AS t(id, user_id, post_id, created_at)
        "#,
    )
    .bind(&ids)
    .bind(&users)
    .bind(&posts)
    .bind(&created)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn insert_comments(tx: &mut Transaction<'_, Postgres>, comments: &[Comment]) -> Result<()> {
    let ids: Vec<Uuid> = comments.iter().map(|c| c.id).collect();
    let users: Vec<Uuid> = comments.iter().map(|c| c.user_id).collect();
    let posts: Vec<Uuid> = comments.iter().map(|c| c.post_id).collect();
    let contents: Vec<String> = comments.iter().map(|c| c.content.clone()).collect();
    let created: Vec<DateTime<Utc>> = comments.iter().map(|c| c.created_at).collect();

    sqlx::query(
        r#"
        INSERT INTO comments (id, user_id, post_id, content, created_at, updated_at)
        SELECT id, user_id, post_id, content, created_at, created_at
        FROM UNNEST($1::uuid[], $2::uuid[], $3::uuid[], $4::text[], $5::timestamptz[])
            AS t(id, user_id, post_id, content, created_at)
        "#,
    )
    .bind(&ids)
    .bind(&users)
    .bind(&posts)
    .bind(&contents)
    .bind(&created)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serial_test::serial;
    use std::collections::{HashMap, HashSet};

    fn small_config() -> SeedConfig {
        SeedConfig {
            users: 4,
            posts_per_user: 6,
            tags: 8,
            likes_per_user: 5,
            comments_per_user: 3,
            clear: false,
        }
    }

    #[test]
    fn test_plan_sizes() {
        let mut rng = StdRng::seed_from_u64(7);
        let plan = SeedPlan::generate(&small_config(), Utc::now(), &mut rng);

        assert_eq!(plan.users.len(), 4);
        assert_eq!(plan.posts.len(), 24);
        assert_eq!(plan.tags.len(), 8);
        assert_eq!(plan.likes.len(), 20);
        assert_eq!(plan.comments.len(), 12);
    }

    #[test]
    fn test_engagement_targets_other_users_posts() {
        let mut rng = StdRng::seed_from_u64(11);
        let plan = SeedPlan::generate(&small_config(), Utc::now(), &mut rng);
        let authors: HashMap<Uuid, Uuid> =
            plan.posts.iter().map(|p| (p.id, p.author_id)).collect();

        for like in &plan.likes {
            assert_ne!(authors[&like.post_id], like.user_id);
        }
        for comment in &plan.comments {
            assert_ne!(authors[&comment.post_id], comment.user_id);
        }

        let pairs: HashSet<(Uuid, Uuid)> =
            plan.likes.iter().map(|l| (l.user_id, l.post_id)).collect();
        assert_eq!(pairs.len(), plan.likes.len());
    }

    #[test]
    fn test_timestamps_and_tagging() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(3);
        let plan = SeedPlan::generate(&small_config(), now, &mut rng);
        let created: HashMap<Uuid, DateTime<Utc>> =
            plan.posts.iter().map(|p| (p.id, p.created_at)).collect();

        for post in &plan.posts {
            assert!(post.created_at <= now);
            assert!(post.created_at >= now - Duration::days(SEED_WINDOW_DAYS));
            let tags = plan.post_tags.iter().filter(|pt| pt.post_id == post.id).count();
            assert!((1..=MAX_TAGS_PER_POST).contains(&tags));
        }
        for like in &plan.likes {
            assert!(like.created_at >= created[&like.post_id]);
            assert!(like.created_at <= now);
        }

        let names: HashSet<&str> = plan.tags.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(names.len(), plan.tags.len());
        let usernames: HashSet<&str> = plan.users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(usernames.len(), plan.users.len());
    }

    #[test]
    fn test_usernames_differ_between_runs() {
        let first = SeedPlan::generate(&small_config(), Utc::now(), &mut StdRng::seed_from_u64(1));
        let second = SeedPlan::generate(&small_config(), Utc::now(), &mut StdRng::seed_from_u64(2));

        let taken: HashSet<&str> = first.users.iter().map(|u| u.username.as_str()).collect();
        for user in &second.users {
            assert!(!taken.contains(user.username.as_str()), "{} reused", user.username);
            assert!(user.username.len() <= 50);
        }
    }

    #[test]
    fn test_more_tags_than_catalogue() {
        let config = SeedConfig {
            tags: TAG_CATALOGUE.len() + 5,
            ..small_config()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let plan = SeedPlan::generate(&config, Utc::now(), &mut rng);
        let names: HashSet<&str> = plan.tags.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(names.len(), TAG_CATALOGUE.len() + 5);
    }

    #[test]
    #[serial]
    fn test_config_minimums_fall_back_to_defaults() {
        std::env::set_var("SEED_USERS", "3");
        std::env::set_var("SEED_POSTS_PER_USER", "75");
        std::env::set_var("SEED_CLEAR", "true");

        let config = SeedConfig::from_env().unwrap();
        assert_eq!(config.users, 20);
        assert_eq!(config.posts_per_user, 75);
        assert!(config.clear);

        std::env::remove_var("SEED_USERS");
        std::env::remove_var("SEED_POSTS_PER_USER");
        std::env::remove_var("SEED_CLEAR");
    }
}
