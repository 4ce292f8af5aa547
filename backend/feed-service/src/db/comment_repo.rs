use crate::models::Comment;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use uuid::Uuid;

pub async fn create_comment(
    pool: &PgPool,
    user_id: Uuid,
    post_id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (user_id, post_id, content)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, post_id, content, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(post_id)
    .bind(content)
    .fetch_one(pool)
    .await
}

pub async fn find_comment(pool: &PgPool, comment_id: Uuid) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, user_id, post_id, content, created_at, updated_at
        FROM comments
        WHERE id = $1
        "#,
    )
    .bind(comment_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_comments(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, user_id, post_id, content, created_at, updated_at
        FROM comments
        ORDER BY created_at DESC, id
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn update_comment(
    pool: &PgPool,
    comment_id: Uuid,
    content: &str,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments
        SET content = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING id, user_id, post_id, content, created_at, updated_at
        "#,
    )
    .bind(comment_id)
    .bind(content)
    .fetch_optional(pool)
    .await
}

pub async fn delete_comment(
    pool: &PgPool,
    comment_id: Uuid,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        DELETE FROM comments
        WHERE id = $1
        RETURNING id, user_id, post_id, content, created_at, updated_at
        "#,
    )
    .bind(comment_id)
    .fetch_optional(pool)
    .await
}

pub async fn count_comments_by_post(pool: &PgPool, post_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM comments WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Comment counts for many posts in one round trip. Posts without comments are absent.
pub async fn count_comments_by_posts(
    pool: &PgPool,
    post_ids: &[Uuid],
) -> Result<HashMap<Uuid, i64>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT post_id, COUNT(*) AS count
        FROM comments
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
