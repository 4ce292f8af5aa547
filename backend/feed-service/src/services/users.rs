/// User service - registration, lookup and profile updates
use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::models::{CreateUserRequest, ListQuery, UpdateUserRequest, User};
use sqlx::PgPool;
use uuid::Uuid;

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_user(&self, req: &CreateUserRequest) -> Result<User> {
        let username = normalize_username(&req.username)?;
        let user = user_repo::create_user(&self.pool, username, req.full_name.as_deref()).await?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<User> {
        user_repo::find_user(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn list_users(&self, query: ListQuery) -> Result<Vec<User>> {
        Ok(user_repo::list_users(&self.pool, query.limit, query.offset).await?)
    }

    pub async fn update_user(&self, user_id: Uuid, req: &UpdateUserRequest) -> Result<User> {
        let username = req.username.as_deref().map(normalize_username).transpose()?;
        user_repo::update_user(&self.pool, user_id, username, req.full_name.as_deref())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Delete a user together with their posts and engagement
    pub async fn delete_user(&self, user_id: Uuid) -> Result<User> {
        let user = user_repo::delete_user(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        tracing::info!(user_id = %user.id, "User deleted");
        Ok(user)
    }
}

fn normalize_username(username: &str) -> Result<&str> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::Validation("username must not be blank".to_string()));
    }
    Ok(username)
}
