//! Scoring primitives for the personalized feed.
//!
//! `score = like·likes + comment·comments + tag_match·matches + time_decay`

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashSet;
use uuid::Uuid;

use crate::models::FeedItem;

pub const LIKE_WEIGHT: f64 = 1.0;
pub const COMMENT_WEIGHT: f64 = 3.0;
pub const TAG_MATCH_WEIGHT: f64 = 2.0;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Linear weights applied to engagement and interest signals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingWeights {
    pub like: f64,
    pub comment: f64,
    pub tag_match: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            like: LIKE_WEIGHT,
            comment: COMMENT_WEIGHT,
            tag_match: TAG_MATCH_WEIGHT,
        }
    }
}

impl RankingWeights {
    pub fn new(like: f64, comment: f64, tag_match: f64) -> Self {
        let defaults = Self::default();
        Self {
            like: finite_or(like, defaults.like),
            comment: finite_or(comment, defaults.comment),
            tag_match: finite_or(tag_match, defaults.tag_match),
        }
    }

    pub fn score(&self, likes: u64, comments: u64, tag_matches: usize, time_decay: f64) -> f64 {
        self.like * likes as f64
            + self.comment * comments as f64
            + self.tag_match * tag_matches as f64
            + time_decay
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Recency factor in `(0, 1]`: `1 / (hours + 1)`.
///
/// Hours are fractional. A `created_at` later than `now` counts as zero age.
pub fn time_decay(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let age_ms = (now - created_at).num_milliseconds().max(0);
    let hours = age_ms as f64 / MILLIS_PER_HOUR;
    1.0 / (hours + 1.0)
}

/// Size of the intersection between the user's interests and a post's tags
pub fn tag_match_count(interests: &HashSet<Uuid>, post_tags: &HashSet<Uuid>) -> usize {
    let (small, large) = if interests.len() <= post_tags.len() {
        (interests, post_tags)
    } else {
        (post_tags, interests)
    };
    small.iter().filter(|tag| large.contains(tag)).count()
}

/// Feed order: score desc, then newest first, then id asc.
pub fn compare_ranked(a: &FeedItem, b: &FeedItem) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.post.created_at.cmp(&a.post.created_at))
        .then_with(|| a.post.id.cmp(&b.post.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Post;
    use chrono::Duration;

    fn approx(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    fn item(score: f64, created_at: DateTime<Utc>, id: Uuid) -> FeedItem {
        FeedItem {
            post: Post {
                id,
                author_id: Uuid::new_v4(),
                title: "t".into(),
                body: "b".into(),
                created_at,
                updated_at: created_at,
            },
            score,
            like_count: 0,
            comment_count: 0,
            tag_match_count: 0,
            time_decay: 0.0,
        }
    }

    #[test]
    fn test_time_decay_reference_points() {
        let now = Utc::now();
        assert!(approx(time_decay(now, now), 1.0, 1e-12));
        assert!(approx(time_decay(now - Duration::hours(1), now), 0.5, 1e-9));
        assert!(approx(time_decay(now - Duration::hours(24), now), 0.04, 1e-9));
        assert!(approx(time_decay(now - Duration::minutes(30), now), 1.0 / 1.5, 1e-9));
    }

    #[test]
    fn test_time_decay_is_monotonic() {
        let now = Utc::now();
        let mut previous = f64::INFINITY;
        for hours in [0, 1, 2, 6, 24, 72, 720] {
            let decay = time_decay(now - Duration::hours(hours), now);
            assert!(decay < previous);
            assert!(decay > 0.0 && decay <= 1.0);
            previous = decay;
        }
    }

    #[test]
    fn test_future_timestamps_clamp_to_one() {
        let now = Utc::now();
        assert_eq!(time_decay(now + Duration::hours(5), now), 1.0);
    }

    #[test]
    fn test_score_reference_points() {
        let weights = RankingWeights::default();
        assert!(approx(weights.score(10, 2, 2, 0.5), 20.5, 1e-9));
        assert!(approx(weights.score(20, 0, 1, 1.0 / 73.0), 22.0137, 1e-3));
    }

    #[test]
    fn test_comments_outweigh_likes() {
        let weights = RankingWeights::default();
        assert!(weights.score(0, 2, 0, 0.0) > weights.score(5, 0, 0, 0.0));
        assert!(weights.score(0, 1, 0, 0.0) < weights.score(5, 0, 0, 0.0));
    }

    #[test]
    fn test_non_finite_weights_fall_back() {
        let weights = RankingWeights::new(f64::NAN, 4.0, f64::INFINITY);
        assert_eq!(weights.like, LIKE_WEIGHT);
        assert_eq!(weights.comment, 4.0);
        assert_eq!(weights.tag_match, TAG_MATCH_WEIGHT);
    }

    #[test]
    fn test_tag_match_count() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let interests: HashSet<Uuid> = [a, b].into_iter().collect();
        let post_tags: HashSet<Uuid> = [a, c].into_iter().collect();

        assert_eq!(tag_match_count(&interests, &post_tags), 1);
        assert_eq!(tag_match_count(&post_tags, &interests), 1);
        assert_eq!(tag_match_count(&HashSet::new(), &post_tags), 0);
    }

    #[test]
    fn test_ties_break_on_recency_then_id() {
        let now = Utc::now();
        let low = Uuid::from_u128(1);
        let high = Uuid::from_u128(2);

        let older = item(3.0, now - Duration::hours(2), low);
        let newer = item(3.0, now, high);
        assert_eq!(compare_ranked(&newer, &older), Ordering::Less);

        let same_time_low = item(3.0, now, low);
        let same_time_high = item(3.0, now, high);
        assert_eq!(compare_ranked(&same_time_low, &same_time_high), Ordering::Less);

        let better = item(4.0, now - Duration::hours(10), high);
        assert_eq!(compare_ranked(&better, &newer), Ordering::Less);
    }
}
