use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{ApiResponse, CreateLikeRequest};
use crate::services::LikeService;

#[utoipa::path(
    post,
    path = "/api/v1/likes",
    tag = "likes",
    request_body = CreateLikeRequest,
    responses(
        (status = 201, description = "Post liked"),
        (status = 400, description = "Unknown user or post"),
        (status = 409, description = "Post already liked by this user")
    )
)]
pub async fn like_post(
    pool: web::Data<PgPool>,
    req: web::Json<CreateLikeRequest>,
) -> Result<HttpResponse> {
    let service = LikeService::new((**pool).clone());
    let like = service.like_post(&req).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(like, "Post liked successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/v1/likes/{like_id}",
    tag = "likes",
    params(("like_id" = Uuid, Path, description = "Like id")),
    responses(
        (status = 200, description = "Post unliked"),
        (status = 404, description = "Like not found")
    )
)]
pub async fn unlike_post(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = LikeService::new((**pool).clone());
    let like = service.unlike(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(like, "Post unliked successfully")))
}

#[utoipa::path(
    get,
    path = "/api/v1/likes/post/{post_id}",
    tag = "likes",
    params(("post_id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Likes of the post"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn get_post_likes(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = LikeService::new((**pool).clone());
    let likes = service.likes_for_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(likes, "Likes retrieved successfully")))
}
