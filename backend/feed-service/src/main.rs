use actix_cors::Cors;
use actix_web::{dev::Service, middleware::Logger, web, App, HttpResponse, HttpServer};
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use feed_service::config::Config;
use feed_service::db::{create_pool, run_migrations, DbConfig, PgFeedStore};
use feed_service::handlers::{self, FeedHandlerState, HealthState};
use feed_service::metrics;
use feed_service::openapi::ApiDoc;
use feed_service::services::{FeedRankingConfig, FeedRankingService};

async fn openapi_json(doc: web::Data<utoipa::openapi::OpenApi>) -> actix_web::Result<HttpResponse> {
    let body = serde_json::to_string(&*doc).map_err(|e| {
        error!("OpenAPI serialization failed: {}", e);
        actix_web::error::ErrorInternalServerError("OpenAPI serialization error")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_target(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting feed-service v{}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.env);

    let db_cfg = DbConfig::for_service("feed-service", &config.database);
    db_cfg.log_config();
    let db_pool = match create_pool(db_cfg).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Database pool creation failed: {:#}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    if config.database.run_migrations {
        if let Err(e) = run_migrations(&db_pool).await {
            error!("Database migrations failed: {:#}", e);
            eprintln!("ERROR: Failed to run database migrations: {}", e);
            std::process::exit(1);
        }
    } else {
        info!("RUN_MIGRATIONS disabled, assuming schema is current");
    }

    let feed_ranking = Arc::new(FeedRankingService::from_store(
        Arc::new(PgFeedStore::new(db_pool.clone())),
        FeedRankingConfig::from(&config.feed),
    ));
    let weights = feed_ranking.weights();
    info!(
        like = weights.like,
        comment = weights.comment,
        tag_match = weights.tag_match,
        "Feed ranking weights"
    );

    let feed_state = web::Data::new(FeedHandlerState { feed_ranking });
    let health_state = web::Data::new(HealthState::new(db_pool.clone()));
    let db_data = web::Data::new(db_pool.clone());

    let allowed_origins: Vec<String> = config.cors.origins().map(str::to_string).collect();
    if allowed_origins.iter().any(|o| o == "*") {
        warn!("CORS allows any origin");
    }

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    info!("HTTP server listening on {}", bind_address);

    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in &allowed_origins {
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        let openapi_doc = ApiDoc::openapi();

        App::new()
            .app_data(web::Data::new(openapi_doc.clone()))
            .service(
                SwaggerUi::new("/api/v1/docs/{_:.*}")
                    .url(ApiDoc::openapi_json_path(), openapi_doc.clone()),
            )
            .route(ApiDoc::openapi_json_path(), web::get().to(openapi_json))
            .app_data(db_data.clone())
            .app_data(feed_state.clone())
            .app_data(health_state.clone())
            .wrap_fn(|req, srv| {
                let method = req.method().to_string();
                let path = metrics::route_label(req.match_pattern());
                let start = Instant::now();

                let fut = srv.call(req);
                async move {
                    let res = fut.await;
                    let status = match &res {
                        Ok(res) => res.status().as_u16(),
                        Err(_) => 500,
                    };
                    metrics::observe_http_request(&method, &path, status, start.elapsed());
                    res
                }
            })
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/metrics", web::get().to(metrics::serve_metrics))
            .configure(handlers::configure_health)
            .configure(handlers::configure)
    })
    .disable_signals()
    .bind(&bind_address)?
    .run();

    let server_handle = server.handle();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown signal received, draining HTTP server");
        server_handle.stop(true).await;
    });

    server.await?;

    db_pool.close().await;
    info!("feed-service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
