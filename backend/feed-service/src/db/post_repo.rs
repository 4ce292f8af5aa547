use crate::models::Post;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    title: &str,
    body: &str,
) -> Result<Post, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (author_id, title, body)
        VALUES ($1, $2, $3)
        RETURNING id, author_id, title, body, created_at, updated_at
        "#,
    )
    .bind(author_id)
    .bind(title)
    .bind(body)
    .fetch_one(pool)
    .await
}

pub async fn find_post(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, title, body, created_at, updated_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_posts(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, title, body, created_at, updated_at
        FROM posts
        ORDER BY created_at DESC, id
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Feed candidates: every post not written by `author_id`
pub async fn list_posts_excluding_author(
    pool: &PgPool,
    author_id: Uuid,
) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, title, body, created_at, updated_at
        FROM posts
        WHERE author_id <> $1
        "#,
    )
    .bind(author_id)
    .fetch_all(pool)
    .await
}

pub async fn update_post(
    pool: &PgPool,
    post_id: Uuid,
    title: Option<&str>,
    body: Option<&str>,
) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET title = COALESCE($2, title),
            body = COALESCE($3, body),
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, author_id, title, body, created_at, updated_at
        "#,
    )
    .bind(post_id)
    .bind(title)
    .bind(body)
    .fetch_optional(pool)
    .await
}

pub async fn delete_post(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        DELETE FROM posts
        WHERE id = $1
        RETURNING id, author_id, title, body, created_at, updated_at
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await
}
