/// HTTP handlers for feed-service
///
/// - Users, posts, likes, comments and tags: CRUD over PostgreSQL
/// - Feeds: the personalized ranked feed
/// - Health: liveness, readiness and database probes
pub mod comments;
pub mod feed;
pub mod health;
pub mod likes;
pub mod posts;
pub mod tags;
pub mod users;

use actix_web::web;

use crate::error::AppError;

pub use comments::{create_comment, delete_comment, get_comment, list_comments, update_comment};
pub use feed::{get_personalized_feed, FeedHandlerState};
pub use health::{db_health, health_summary, liveness_check, readiness_summary, HealthState};
pub use likes::{get_post_likes, like_post, unlike_post};
pub use posts::{create_post, delete_post, get_post, list_posts, update_post};
pub use tags::{create_tag, delete_tag, get_tag, list_tags, tag_post, update_tag};
pub use users::{create_user, delete_user, get_user, list_users, update_user};

fn bad_request(message: String) -> actix_web::Error {
    AppError::BadRequest(message).into()
}

/// Register the `/api/v1` routes.
///
/// Malformed JSON bodies, query strings and path ids all answer 400 with the
/// standard error body.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| bad_request(err.to_string())))
        .app_data(
            web::QueryConfig::default().error_handler(|err, _| bad_request(err.to_string())),
        )
        .app_data(web::PathConfig::default().error_handler(|err, _| bad_request(err.to_string())))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/users")
                        .service(
                            web::resource("")
                                .route(web::post().to(create_user))
                                .route(web::get().to(list_users)),
                        )
                        .service(
                            web::resource("/{user_id}")
                                .route(web::get().to(get_user))
                                .route(web::put().to(update_user))
                                .route(web::delete().to(delete_user)),
                        ),
                )
                .service(
                    web::scope("/posts")
                        .service(
                            web::resource("")
                                .route(web::post().to(create_post))
                                .route(web::get().to(list_posts)),
                        )
                        .service(
                            web::resource("/{post_id}")
                                .route(web::get().to(get_post))
                                .route(web::put().to(update_post))
                                .route(web::delete().to(delete_post)),
                        ),
                )
                .service(
                    web::scope("/likes")
                        .service(web::resource("").route(web::post().to(like_post)))
                        .service(
                            web::resource("/post/{post_id}").route(web::get().to(get_post_likes)),
                        )
                        .service(web::resource("/{like_id}").route(web::delete().to(unlike_post))),
                )
                .service(
                    web::scope("/comments")
                        .service(
                            web::resource("")
                                .route(web::post().to(create_comment))
                                .route(web::get().to(list_comments)),
                        )
                        .service(
                            web::resource("/{comment_id}")
                                .route(web::get().to(get_comment))
                                .route(web::put().to(update_comment))
                                .route(web::delete().to(delete_comment)),
                        ),
                )
                .service(
                    web::scope("/tags")
                        .service(
                            web::resource("")
                                .route(web::post().to(create_tag))
                                .route(web::get().to(list_tags)),
                        )
                        // before /{tag_id}, which would otherwise claim the segment
                        .service(web::resource("/post-tags").route(web::post().to(tag_post)))
                        .service(
                            web::resource("/{tag_id}")
                                .route(web::get().to(get_tag))
                                .route(web::put().to(update_tag))
                                .route(web::delete().to(delete_tag)),
                        ),
                )
                .service(
                    web::scope("/feeds").service(
                        web::resource("/{user_id}").route(web::get().to(get_personalized_feed)),
                    ),
                ),
        );
}

/// Register the health probes. Requires `web::Data<HealthState>`.
pub fn configure_health(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/v1/health", web::get().to(health_summary))
        .route("/api/v1/health/ready", web::get().to(readiness_summary))
        .route("/api/v1/health/live", web::get().to(liveness_check))
        .route("/api/v1/db-health", web::get().to(db_health));
}
