//! Populate the feed database with demo users, posts, tags and engagement.
//!
//! `feed-seed`          generate and insert a plan sized by `SEED_*`
//! `feed-seed --clear`  truncate every feed table and exit

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use feed_service::config::Config;
use feed_service::db::{create_pool, run_migrations, DbConfig};
use feed_service::services::{SeedConfig, SeedPlan, SeedService};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .init();

    let clear_only = std::env::args().skip(1).any(|arg| arg == "--clear");

    let config = Config::from_env()
        .map_err(anyhow::Error::msg)
        .context("failed to load configuration")?;

    let pool = create_pool(DbConfig::for_service("feed-seed", &config.database))
        .await
        .context("failed to connect to database")?;

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .context("failed to run migrations")?;
    }

    let service = SeedService::new(pool.clone());

    if clear_only {
        service.clear().await.context("failed to clear feed data")?;
        info!("Cleared all feed data");
        pool.close().await;
        return Ok(());
    }

    let seed_config = SeedConfig::from_env()
        .map_err(anyhow::Error::msg)
        .context("invalid seed configuration")?;
    info!(?seed_config, "Generating seed data");

    let plan = {
        let mut rng = rand::thread_rng();
        SeedPlan::generate(&seed_config, Utc::now(), &mut rng)
    };

    let summary = service
        .apply(&plan, seed_config.clear)
        .await
        .context("failed to insert seed data")?;

    println!(
        "Seeded {} users, {} tags, {} posts, {} post tags, {} likes, {} comments",
        summary.users,
        summary.tags,
        summary.posts,
        summary.post_tags,
        summary.likes,
        summary.comments
    );

    pool.close().await;
    Ok(())
}
