/// Tag handlers - tag catalogue and post tagging
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::models::{ApiResponse, CreatePostTagRequest, CreateTagRequest, ListQuery};
use crate::services::TagService;

#[utoipa::path(
    post,
    path = "/api/v1/tags",
    tag = "tags",
    request_body = CreateTagRequest,
    responses(
        (status = 201, description = "Tag created"),
        (status = 409, description = "Tag already exists")
    )
)]
pub async fn create_tag(
    pool: web::Data<PgPool>,
    req: web::Json<CreateTagRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let service = TagService::new((**pool).clone());
    let tag = service.create_tag(&req).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(tag, "Tag created successfully")))
}

#[utoipa::path(
    get,
    path = "/api/v1/tags/{tag_id}",
    tag = "tags",
    params(("tag_id" = Uuid, Path, description = "Tag id")),
    responses(
        (status = 200, description = "Tag found"),
        (status = 404, description = "Tag not found")
    )
)]
pub async fn get_tag(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = TagService::new((**pool).clone());
    let tag = service.get_tag(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(tag, "Tag retrieved successfully")))
}

#[utoipa::path(
    get,
    path = "/api/v1/tags",
    tag = "tags",
    params(ListQuery),
    responses((status = 200, description = "Tags in name order"))
)]
pub async fn list_tags(
    pool: web::Data<PgPool>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    query.validate()?;
    let service = TagService::new((**pool).clone());
    let tags = service.list_tags(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(tags, "Tags retrieved successfully")))
}

#[utoipa::path(
    put,
    path = "/api/v1/tags/{tag_id}",
    tag = "tags",
    params(("tag_id" = Uuid, Path, description = "Tag id")),
    request_body = CreateTagRequest,
    responses(
        (status = 200, description = "Tag renamed"),
        (status = 404, description = "Tag not found"),
        (status = 409, description = "Tag name already exists")
    )
)]
pub async fn update_tag(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<CreateTagRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let service = TagService::new((**pool).clone());
    let tag = service.update_tag(path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(tag, "Tag updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tags/{tag_id}",
    tag = "tags",
    params(("tag_id" = Uuid, Path, description = "Tag id")),
    responses(
        (status = 200, description = "Tag deleted"),
        (status = 404, description = "Tag not found")
    )
)]
pub async fn delete_tag(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = TagService::new((**pool).clone());
    let tag = service.delete_tag(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(tag, "Tag deleted successfully")))
}

/// Attach an existing tag to an existing post
#[utoipa::path(
    post,
    path = "/api/v1/tags/post-tags",
    tag = "tags",
    request_body = CreatePostTagRequest,
    responses(
        (status = 201, description = "Tag attached to post"),
        (status = 400, description = "Unknown post or tag"),
        (status = 409, description = "Tag already attached")
    )
)]
pub async fn tag_post(
    pool: web::Data<PgPool>,
    req: web::Json<CreatePostTagRequest>,
) -> Result<HttpResponse> {
    let service = TagService::new((**pool).clone());
    let post_tag = service.tag_post(&req).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(post_tag, "Tag added to post successfully")))
}
