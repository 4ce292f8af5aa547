/// User handlers - HTTP endpoints for user accounts
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::models::{ApiResponse, CreateUserRequest, ListQuery, UpdateUserRequest};
use crate::services::UserService;

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn create_user(
    pool: web::Data<PgPool>,
    req: web::Json<CreateUserRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let service = UserService::new((**pool).clone());
    let user = service.create_user(&req).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(user, "User created successfully")))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(("user_id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User found"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = UserService::new((**pool).clone());
    let user = service.get_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(user, "User retrieved successfully")))
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    params(ListQuery),
    responses((status = 200, description = "Users"))
)]
pub async fn list_users(
    pool: web::Data<PgPool>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    query.validate()?;
    let service = UserService::new((**pool).clone());
    let users = service.list_users(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(users, "Users retrieved successfully")))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(("user_id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let service = UserService::new((**pool).clone());
    let user = service.update_user(path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(user, "User updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(("user_id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = UserService::new((**pool).clone());
    let user = service.delete_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(user, "User deleted successfully")))
}
