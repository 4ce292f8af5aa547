use crate::models::Like;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use uuid::Uuid;

/// Create a new like on a post
/// Fails with a unique violation if the user already liked it
pub async fn create_like(pool: &PgPool, user_id: Uuid, post_id: Uuid) -> Result<Like, sqlx::Error> {
    sqlx::query_as::<_, Like>(
        r#"
        INSERT INTO likes (user_id, post_id)
        VALUES ($1, $2)
        RETURNING id, user_id, post_id, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(post_id)
    .fetch_one(pool)
    .await
}

/// Delete a like by id, returning the removed row
pub async fn delete_like(pool: &PgPool, like_id: Uuid) -> Result<Option<Like>, sqlx::Error> {
    sqlx::query_as::<_, Like>(
        r#"
        DELETE FROM likes
        WHERE id = $1
        RETURNING id, user_id, post_id, created_at, updated_at
        "#,
    )
    .bind(like_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_likes_by_post(pool: &PgPool, post_id: Uuid) -> Result<Vec<Like>, sqlx::Error> {
    sqlx::query_as::<_, Like>(
        r#"
        SELECT id, user_id, post_id, created_at, updated_at
        FROM likes
        WHERE post_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await
}

/// Count total likes for a post
pub async fn count_likes_by_post(pool: &PgPool, post_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM likes WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Like counts for many posts in one round trip. Posts without likes are absent.
pub async fn count_likes_by_posts(
    pool: &PgPool,
    post_ids: &[Uuid],
) -> Result<HashMap<Uuid, i64>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT post_id, COUNT(*) AS count
        FROM likes
        WHERE post_id = ANY($1)
        GROUP BY post_id
        "#,
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| (row.get::<Uuid, _>("post_id"), row.get::<i64, _>("count")))
        .collect())
}
