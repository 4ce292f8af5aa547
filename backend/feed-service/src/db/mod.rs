/// Database access layer
///
/// - `pool`: connection pool construction and migrations
/// - `*_repo`: free-function queries per table
/// - `feed_store`: PostgreSQL implementation of the ranking collaborators
pub mod comment_repo;
pub mod feed_store;
pub mod like_repo;
pub mod pool;
pub mod post_repo;
pub mod tag_repo;
pub mod user_repo;

pub use feed_store::PgFeedStore;
pub use pool::{create_pool, run_migrations, DbConfig};
