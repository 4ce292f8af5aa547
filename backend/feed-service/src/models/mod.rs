/// Data models for feed-service
///
/// Row types map one-to-one onto the tables in `migrations/`. Request DTOs carry
/// `validator` rules and are checked in the handlers before any query runs.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub mod feed;

pub use feed::{EngagementCount, FeedItem, FeedPage, FeedQuery, FeedResponse, PaginationInfo};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Like {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Tag {
    pub id: Uuid,
    pub tag: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Join row attaching a tag to a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct PostTag {
    pub id: Uuid,
    pub post_id: Uuid,
    pub tag_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Request payloads

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(max = 100))]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: Option<String>,
    #[validate(length(max = 100))]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePostRequest {
    pub author_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub body: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateLikeRequest {
    pub user_id: Uuid,
    pub post_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCommentRequest {
    pub user_id: Uuid,
    pub post_id: Uuid,
    #[validate(length(min = 1))]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1))]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTagRequest {
    #[validate(length(min = 1, max = 50))]
    pub tag: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePostTagRequest {
    pub post_id: Uuid,
    pub tag_id: Uuid,
}

pub const DEFAULT_LIST_LIMIT: i64 = 100;
pub const MAX_LIST_LIMIT: i64 = 500;

/// `?limit=&offset=` window for list endpoints
#[derive(Debug, Clone, Copy, Deserialize, Validate, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    #[serde(default = "default_list_limit")]
    #[validate(range(min = 1, max = 500))]
    pub limit: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub offset: i64,
}

fn default_list_limit() -> i64 {
    DEFAULT_LIST_LIMIT
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
        }
    }
}

/// Envelope shared by every CRUD response: `{ data, success, message }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub success: bool,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            success: true,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_length_rules() {
        let ok = CreateUserRequest {
            username: "alice".into(),
            full_name: None,
        };
        assert!(ok.validate().is_ok());

        let empty = CreateUserRequest {
            username: String::new(),
            full_name: None,
        };
        assert!(empty.validate().is_err());

        let long = CreateUserRequest {
            username: "a".repeat(51),
            full_name: None,
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_post_title_and_body_rules() {
        let author_id = Uuid::new_v4();
        let too_long = CreatePostRequest {
            author_id,
            title: "t".repeat(201),
            body: "body".into(),
        };
        assert!(too_long.validate().is_err());

        let empty_body = CreatePostRequest {
            author_id,
            title: "title".into(),
            body: String::new(),
        };
        assert!(empty_body.validate().is_err());
    }

    #[test]
    fn test_partial_updates_only_check_present_fields() {
        assert!(UpdatePostRequest::default().validate().is_ok());
        assert!(UpdateUserRequest::default().validate().is_ok());

        let bad = UpdatePostRequest {
            title: Some(String::new()),
            body: None,
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_envelope_shape() {
        let json = serde_json::to_value(ApiResponse::ok(1, "done")).unwrap();
        assert_eq!(json["data"], 1);
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "done");
    }
}
