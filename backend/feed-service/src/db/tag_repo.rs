use crate::models::{PostTag, Tag};
use sqlx::{PgPool, Row};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

pub async fn create_tag(pool: &PgPool, tag: &str) -> Result<Tag, sqlx::Error> {
    sqlx::query_as::<_, Tag>(
        r#"
        INSERT INTO tags (tag)
        VALUES ($1)
        RETURNING id, tag, created_at, updated_at
        "#,
    )
    .bind(tag)
    .fetch_one(pool)
    .await
}

pub async fn find_tag(pool: &PgPool, tag_id: Uuid) -> Result<Option<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>("SELECT id, tag, created_at, updated_at FROM tags WHERE id = $1")
        .bind(tag_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_tags(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>(
        r#"
        SELECT id, tag, created_at, updated_at
        FROM tags
        ORDER BY tag
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn update_tag(pool: &PgPool, tag_id: Uuid, tag: &str) -> Result<Option<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>(
        r#"
        UPDATE tags
        SET tag = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING id, tag, created_at, updated_at
        "#,
    )
    .bind(tag_id)
    .bind(tag)
    .fetch_optional(pool)
    .await
}

pub async fn delete_tag(pool: &PgPool, tag_id: Uuid) -> Result<Option<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>(
        r#"
        DELETE FROM tags
        WHERE id = $1
        RETURNING id, tag, created_at, updated_at
        "#,
    )
    .bind(tag_id)
    .fetch_optional(pool)
    .await
}

/// Attach a tag to a post. A repeated pair is a unique violation.
pub async fn create_post_tag(
    pool: &PgPool,
    post_id: Uuid,
    tag_id: Uuid,
) -> Result<PostTag, sqlx::Error> {
    sqlx::query_as::<_, PostTag>(
        r#"
        INSERT INTO post_tags (post_id, tag_id)
        VALUES ($1, $2)
        RETURNING id, post_id, tag_id, created_at, updated_at
        "#,
    )
    .bind(post_id)
    .bind(tag_id)
    .fetch_one(pool)
    .await
}

pub async fn tag_ids_for_post(pool: &PgPool, post_id: Uuid) -> Result<HashSet<Uuid>, sqlx::Error> {
    let ids = sqlx::query_scalar::<_, Uuid>("SELECT tag_id FROM post_tags WHERE post_id = $1")
        .bind(post_id)
        .fetch_all(pool)
        .await?;

    Ok(ids.into_iter().collect())
}

/// Distinct tags over every post the user authored
pub async fn tag_ids_for_user_posts(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<HashSet<Uuid>, sqlx::Error> {
    let ids = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT DISTINCT pt.tag_id
        FROM post_tags pt
        JOIN posts p ON p.id = pt.post_id
        WHERE p.author_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(ids.into_iter().collect())
}

/// Tag sets for many posts in one round trip. Untagged posts are absent.
pub async fn tag_ids_for_posts(
    pool: &PgPool,
    post_ids: &[Uuid],
) -> Result<HashMap<Uuid, HashSet<Uuid>>, sqlx::Error> {
    let rows = sqlx::query("SELECT post_id, tag_id FROM post_tags WHERE post_id = ANY($1)")
        .bind(post_ids)
        .fetch_all(pool)
        .await?;

    let mut tags: HashMap<Uuid, HashSet<Uuid>> = HashMap::new();
    for row in rows {
        tags.entry(row.get::<Uuid, _>("post_id"))
            .or_default()
            .insert(row.get::<Uuid, _>("tag_id"));
    }
    Ok(tags)
}
