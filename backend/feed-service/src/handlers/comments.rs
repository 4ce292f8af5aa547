/// Comment handlers
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::models::{ApiResponse, CreateCommentRequest, ListQuery, UpdateCommentRequest};
use crate::services::CommentService;

#[utoipa::path(
    post,
    path = "/api/v1/comments",
    tag = "comments",
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created"),
        (status = 400, description = "Invalid payload, unknown user or post")
    )
)]
pub async fn create_comment(
    pool: web::Data<PgPool>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let service = CommentService::new((**pool).clone());
    let comment = service.create_comment(&req).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(comment, "Comment created successfully")))
}

#[utoipa::path(
    get,
    path = "/api/v1/comments/{comment_id}",
    tag = "comments",
    params(("comment_id" = Uuid, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment found"),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn get_comment(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let comment = service.get_comment(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(comment, "Comment retrieved successfully")))
}

#[utoipa::path(
    get,
    path = "/api/v1/comments",
    tag = "comments",
    params(ListQuery),
    responses((status = 200, description = "Comments, newest first"))
)]
pub async fn list_comments(
    pool: web::Data<PgPool>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    query.validate()?;
    let service = CommentService::new((**pool).clone());
    let comments = service.list_comments(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(comments, "Comments retrieved successfully")))
}

#[utoipa::path(
    put,
    path = "/api/v1/comments/{comment_id}",
    tag = "comments",
    params(("comment_id" = Uuid, Path, description = "Comment id")),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Comment updated"),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn update_comment(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let service = CommentService::new((**pool).clone());
    let comment = service.update_comment(path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(comment, "Comment updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/v1/comments/{comment_id}",
    tag = "comments",
    params(("comment_id" = Uuid, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment deleted"),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let comment = service.delete_comment(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(comment, "Comment deleted successfully")))
}
