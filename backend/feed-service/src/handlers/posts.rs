/// Post handlers - HTTP endpoints for post operations
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::models::{ApiResponse, CreatePostRequest, ListQuery, UpdatePostRequest};
use crate::services::PostService;

/// Create a new post
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    tag = "posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created"),
        (status = 400, description = "Invalid payload or unknown author")
    )
)]
pub async fn create_post(
    pool: web::Data<PgPool>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let service = PostService::new((**pool).clone());
    let post = service.create_post(&req).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(post, "Post created successfully")))
}

/// Get a post by ID
#[utoipa::path(
    get,
    path = "/api/v1/posts/{post_id}",
    tag = "posts",
    params(("post_id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post found"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn get_post(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service.get_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post, "Post retrieved successfully")))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts",
    tag = "posts",
    params(ListQuery),
    responses((status = 200, description = "Posts, newest first"))
)]
pub async fn list_posts(
    pool: web::Data<PgPool>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    query.validate()?;
    let service = PostService::new((**pool).clone());
    let posts = service.list_posts(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts, "Posts retrieved successfully")))
}

#[utoipa::path(
    put,
    path = "/api/v1/posts/{post_id}",
    tag = "posts",
    params(("post_id" = Uuid, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn update_post(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let service = PostService::new((**pool).clone());
    let post = service.update_post(path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post, "Post updated successfully")))
}

/// Delete a post and everything attached to it
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{post_id}",
    tag = "posts",
    params(("post_id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn delete_post(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service.delete_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post, "Post deleted successfully")))
}
