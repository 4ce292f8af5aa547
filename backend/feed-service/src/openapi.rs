/// OpenAPI documentation for Feed Service
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Feed Service API",
        version = "1.0.0",
        description = "Users, posts, likes, comments and tags, plus a personalized feed ranked by engagement, tag affinity and recency.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Development server"),
    ),
    paths(
        handlers::health::health_summary,
        handlers::health::readiness_summary,
        handlers::health::liveness_check,
        handlers::health::db_health,
        handlers::users::create_user,
        handlers::users::list_users,
        handlers::users::get_user,
        handlers::users::update_user,
        handlers::users::delete_user,
        handlers::posts::create_post,
        handlers::posts::list_posts,
        handlers::posts::get_post,
        handlers::posts::update_post,
        handlers::posts::delete_post,
        handlers::likes::like_post,
        handlers::likes::unlike_post,
        handlers::likes::get_post_likes,
        handlers::comments::create_comment,
        handlers::comments::list_comments,
        handlers::comments::get_comment,
        handlers::comments::update_comment,
        handlers::comments::delete_comment,
        handlers::tags::create_tag,
        handlers::tags::list_tags,
        handlers::tags::get_tag,
        handlers::tags::update_tag,
        handlers::tags::delete_tag,
        handlers::tags::tag_post,
        handlers::feed::get_personalized_feed,
    ),
    components(schemas(
        models::User,
        models::Post,
        models::Like,
        models::Comment,
        models::Tag,
        models::PostTag,
        models::CreateUserRequest,
        models::UpdateUserRequest,
        models::CreatePostRequest,
        models::UpdatePostRequest,
        models::CreateLikeRequest,
        models::CreateCommentRequest,
        models::UpdateCommentRequest,
        models::CreateTagRequest,
        models::CreatePostTagRequest,
        models::FeedItem,
        models::FeedResponse,
        models::PaginationInfo,
        handlers::health::ComponentStatus,
        handlers::health::ComponentCheck,
        handlers::health::ReadinessResponse,
    )),
    tags(
        (name = "health", description = "Service health checks"),
        (name = "users", description = "User accounts"),
        (name = "posts", description = "Post creation, retrieval, updates and deletion"),
        (name = "likes", description = "Likes on posts"),
        (name = "comments", description = "Comments on posts"),
        (name = "tags", description = "Tag catalogue and post tagging"),
        (name = "feed", description = "Personalized feed ranking"),
    ),
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn openapi_json_path() -> &'static str {
        "/api/v1/openapi.json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_feed_route() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/feeds/{user_id}"));
        assert!(doc.paths.paths.contains_key("/api/v1/tags/post-tags"));
        assert_eq!(doc.info.title, "Feed Service API");
    }
}
