use crate::models::User;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn create_user(
    pool: &PgPool,
    username: &str,
    full_name: Option<&str>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, full_name)
        VALUES ($1, $2)
        RETURNING id, username, full_name, created_at, updated_at
        "#,
    )
    .bind(username)
    .bind(full_name)
    .fetch_one(pool)
    .await
}

pub async fn find_user(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, full_name, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn user_exists(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

pub async fn list_users(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, full_name, created_at, updated_at
        FROM users
        ORDER BY created_at, id
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Apply the fields that are present; absent fields keep their value.
pub async fn update_user(
    pool: &PgPool,
    user_id: Uuid,
    username: Option<&str>,
    full_name: Option<&str>,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET username = COALESCE($2, username),
            full_name = COALESCE($3, full_name),
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, username, full_name, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(username)
    .bind(full_name)
    .fetch_optional(pool)
    .await
}

pub async fn delete_user(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        DELETE FROM users
        WHERE id = $1
        RETURNING id, username, full_name, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}
