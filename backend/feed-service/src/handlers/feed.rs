use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::{FeedQuery, FeedResponse};
use crate::services::feed_ranking::FeedRankingService;

pub struct FeedHandlerState {
    pub feed_ranking: Arc<FeedRankingService>,
}

/// Personalized feed for one user
#[utoipa::path(
    get,
    path = "/api/v1/feeds/{user_id}",
    tag = "feed",
    params(
        ("user_id" = Uuid, Path, description = "User the feed is ranked for"),
        FeedQuery
    ),
    responses(
        (status = 200, description = "Ranked feed page", body = FeedResponse),
        (status = 400, description = "Invalid page or page_size"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_personalized_feed(
    path: web::Path<Uuid>,
    query: web::Query<FeedQuery>,
    state: web::Data<FeedHandlerState>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    query.validate()?;

    debug!(
        "Feed request: user={} page={} page_size={}",
        user_id, query.page, query.page_size
    );

    let feed = state
        .feed_ranking
        .find_personalized_feed(user_id, query.page, query.page_size)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(FeedResponse::from(feed)))
}
