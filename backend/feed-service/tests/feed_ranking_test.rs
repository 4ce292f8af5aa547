//! Integration Tests: feed ranking engine over the in-memory store
//!
//! Coverage:
//! - Score components (likes, comments, tag matches, decay) reach the item
//! - Own posts never appear in a user's feed
//! - Pages are sorted by score with a deterministic tie-break
//! - Pagination metadata and out-of-range pages
//! - Unknown users get an empty, well-formed page

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;
use uuid::Uuid;

use feed_service::services::{
    FeedRankingConfig, FeedRankingService, InMemoryFeedStore, RankingWeights,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn engine(store: InMemoryFeedStore) -> FeedRankingService {
    FeedRankingService::from_store(Arc::new(store), FeedRankingConfig::default())
}

#[tokio::test]
async fn test_item_carries_every_score_component() {
    let mut store = InMemoryFeedStore::new();
    let reader = store.add_user();
    let author = store.add_user();
    let (rust, travel, food) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    let own = store.add_post(reader, now() - Duration::days(3));
    store.tag_post(own, rust);
    store.tag_post(own, travel);

    let post = store.add_post(author, now() - Duration::hours(1));
    store.set_likes(post, 10);
    store.set_comments(post, 2);
    store.tag_post(post, rust);
    store.tag_post(post, travel);
    store.tag_post(post, food);

    let feed = engine(store)
        .get_personalized_feed_at(reader, 1, 20, now())
        .await
        .unwrap();

    assert_eq!(feed.items.len(), 1);
    let item = &feed.items[0];
    assert_eq!(item.post.id, post);
    assert_eq!(item.like_count, 10);
    assert_eq!(item.comment_count, 2);
    assert_eq!(item.tag_match_count, 2);
    assert!((item.time_decay - 0.5).abs() < 1e-9);
    assert!((item.score - 20.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_single_shared_tag_counts_once() {
    let mut store = InMemoryFeedStore::new();
    let reader = store.add_user();
    let author = store.add_user();
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    let own = store.add_post(reader, now());
    store.tag_post(own, a);
    store.tag_post(own, b);
    let candidate = store.add_post(author, now());
    store.tag_post(candidate, a);
    store.tag_post(candidate, c);

    let feed = engine(store)
        .get_personalized_feed_at(reader, 1, 20, now())
        .await
        .unwrap();

    assert_eq!(feed.items[0].tag_match_count, 1);
}

#[tokio::test]
async fn test_user_without_posts_has_no_tag_matches() {
    let mut store = InMemoryFeedStore::new();
    let reader = store.add_user();
    let author = store.add_user();
    let post = store.add_post(author, now());
    store.tag_post(post, Uuid::new_v4());

    let feed = engine(store)
        .get_personalized_feed_at(reader, 1, 20, now())
        .await
        .unwrap();

    assert_eq!(feed.items[0].tag_match_count, 0);
    assert!((feed.items[0].score - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_own_posts_are_never_ranked() {
    let mut store = InMemoryFeedStore::new();
    let users: Vec<Uuid> = (0..3).map(|_| store.add_user()).collect();
    for (i, user) in users.iter().enumerate() {
        for hours in 0..4 {
            let post = store.add_post(*user, now() - Duration::hours(hours));
            store.set_likes(post, (i as u64 + 1) * 10);
        }
    }
    let engine = engine(store);

    for user in &users {
        let feed = engine
            .get_personalized_feed_at(*user, 1, 100, now())
            .await
            .unwrap();
        assert_eq!(feed.pagination.total_items, 8);
        assert!(feed.items.iter().all(|item| item.post.author_id != *user));
    }
}

#[tokio::test]
async fn test_two_comments_outrank_five_likes_but_one_does_not() {
    let mut store = InMemoryFeedStore::new();
    let reader = store.add_user();
    let author = store.add_user();
    let created = now() - Duration::hours(2);

    let liked = store.add_post(author, created);
    store.set_likes(liked, 5);
    let two_comments = store.add_post(author, created);
    store.set_comments(two_comments, 2);
    let one_comment = store.add_post(author, created);
    store.set_comments(one_comment, 1);

    let feed = engine(store)
        .get_personalized_feed_at(reader, 1, 20, now())
        .await
        .unwrap();

    let order: Vec<Uuid> = feed.items.iter().map(|item| item.post.id).collect();
    assert_eq!(order, vec![two_comments, liked, one_comment]);
}

#[tokio::test]
async fn test_pages_are_sorted_by_score() {
    let mut store = InMemoryFeedStore::new();
    let reader = store.add_user();
    let author = store.add_user();
    for i in 0..30i64 {
        let post = store.add_post(author, now() - Duration::minutes(i * 17));
        store.set_likes(post, (i % 7) as u64);
        store.set_comments(post, (i % 3) as u64);
    }

    let feed = engine(store)
        .get_personalized_feed_at(reader, 1, 100, now())
        .await
        .unwrap();

    assert_eq!(feed.items.len(), 30);
    for pair in feed.items.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[tokio::test]
async fn test_equal_scores_prefer_newer_posts() {
    let mut store = InMemoryFeedStore::new();
    let reader = store.add_user();
    let author = store.add_user();

    // 0.5 * 1 like + decay(1h) == decay(0h)
    let older = store.add_post(author, now() - Duration::hours(1));
    store.set_likes(older, 1);
    let newer = store.add_post(author, now());

    let feed = engine(store)
        .with_weights(RankingWeights::new(0.5, 3.0, 2.0))
        .get_personalized_feed_at(reader, 1, 20, now())
        .await
        .unwrap();

    assert_eq!(feed.items[0].score, feed.items[1].score);
    assert_eq!(feed.items[0].post.id, newer);
    assert_eq!(feed.items[1].post.id, older);
}

#[tokio::test]
async fn test_equal_scores_order_by_created_at_then_id() {
    let mut store = InMemoryFeedStore::new();
    let reader = store.add_user();
    let author = store.add_user();
    let created = now() - Duration::hours(3);
    let a = store.add_post(author, created);
    let b = store.add_post(author, created);

    let feed = engine(store)
        .get_personalized_feed_at(reader, 1, 20, now())
        .await
        .unwrap();

    let expected = if a < b { vec![a, b] } else { vec![b, a] };
    let order: Vec<Uuid> = feed.items.iter().map(|item| item.post.id).collect();
    assert_eq!(order, expected);
}

#[tokio::test]
async fn test_future_posts_decay_is_capped_at_one() {
    let mut store = InMemoryFeedStore::new();
    let reader = store.add_user();
    let author = store.add_user();
    store.add_post(author, now() + Duration::hours(6));

    let feed = engine(store)
        .get_personalized_feed_at(reader, 1, 20, now())
        .await
        .unwrap();

    assert_eq!(feed.items[0].time_decay, 1.0);
}

#[tokio::test]
async fn test_pagination_walks_the_ranked_list() {
    let mut store = InMemoryFeedStore::new();
    let reader = store.add_user();
    let author = store.add_user();
    for likes in 0..25u64 {
        let post = store.add_post(author, now() - Duration::hours(1));
        store.set_likes(post, likes);
    }
    let engine = engine(store);

    let full = engine
        .get_personalized_feed_at(reader, 1, 100, now())
        .await
        .unwrap();
    let first = engine
        .get_personalized_feed_at(reader, 1, 10, now())
        .await
        .unwrap();
    let last = engine
        .get_personalized_feed_at(reader, 3, 10, now())
        .await
        .unwrap();

    assert_eq!(first.pagination.total_items, 25);
    assert_eq!(first.pagination.total_pages, 3);
    assert!(first.pagination.has_next);
    assert!(!first.pagination.has_previous);
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.items[0].post.id, full.items[0].post.id);

    assert_eq!(last.items.len(), 5);
    assert!(!last.pagination.has_next);
    assert!(last.pagination.has_previous);
    assert_eq!(last.items[4].post.id, full.items[24].post.id);
}

#[tokio::test]
async fn test_page_past_the_end_is_empty_not_an_error() {
    let mut store = InMemoryFeedStore::new();
    let reader = store.add_user();
    let author = store.add_user();
    store.add_post(author, now());

    let engine = engine(store);
    let first = engine
        .get_personalized_feed_at(reader, 1, 1, now())
        .await
        .unwrap();
    assert_eq!(first.pagination.total_pages, 1);
    assert!(!first.pagination.has_next);
    assert!(!first.pagination.has_previous);

    let second = engine
        .get_personalized_feed_at(reader, 2, 1, now())
        .await
        .unwrap();
    assert!(second.items.is_empty());
    assert_eq!(second.pagination.total_items, 1);
    assert!(second.pagination.has_previous);
    assert!(!second.pagination.has_next);
}

#[tokio::test]
async fn test_oversized_requests_are_clamped() {
    let mut store = InMemoryFeedStore::new();
    let reader = store.add_user();
    let author = store.add_user();
    for _ in 0..120 {
        store.add_post(author, now());
    }

    let feed = engine(store)
        .get_personalized_feed_at(reader, 0, 1_000, now())
        .await
        .unwrap();

    assert_eq!(feed.pagination.page, 1);
    assert_eq!(feed.pagination.page_size, 100);
    assert_eq!(feed.items.len(), 100);
}

#[tokio::test]
async fn test_unknown_user_gets_empty_page() {
    let mut store = InMemoryFeedStore::new();
    let author = store.add_user();
    store.add_post(author, now());

    let feed = engine(store)
        .get_personalized_feed_at(Uuid::new_v4(), 1, 20, now())
        .await
        .unwrap();

    assert!(feed.items.is_empty());
    assert_eq!(feed.pagination.total_items, 0);
    assert_eq!(feed.pagination.total_pages, 0);
    assert!(!feed.pagination.has_next);
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let mut store = InMemoryFeedStore::new();
    let users: Vec<Uuid> = (0..4).map(|_| store.add_user()).collect();
    for user in &users {
        for _ in 0..5 {
            store.add_post(*user, now());
        }
    }
    let engine = Arc::new(engine(store));

    let handles: Vec<_> = users
        .iter()
        .map(|user| {
            let engine = engine.clone();
            let user = *user;
            tokio::spawn(async move { engine.get_personalized_feed_at(user, 1, 50, now()).await })
        })
        .collect();

    for handle in handles {
        let feed = handle.await.unwrap().unwrap();
        assert_eq!(feed.pagination.total_items, 15);
    }
}
