//! Liveness, readiness and database probes.

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;
use std::collections::HashMap;
use std::time::Instant;
use utoipa::ToSchema;

pub struct HealthState {
    db_pool: PgPool,
}

#[derive(Debug, Serialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentCheck {
    pub status: ComponentStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub status: ComponentStatus,
    pub checks: HashMap<String, ComponentCheck>,
    pub timestamp: String,
}

impl HealthState {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    async fn check_postgres(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.db_pool)
            .await
            .map(|_| ())
    }

    async fn postgres_component(&self) -> ComponentCheck {
        let start = Instant::now();
        let result = self.check_postgres().await;
        let latency_ms = Some(start.elapsed().as_millis() as u64);

        match result {
            Ok(_) => ComponentCheck {
                status: ComponentStatus::Healthy,
                message: "PostgreSQL connection successful".to_string(),
                latency_ms,
            },
            Err(e) => ComponentCheck {
                status: ComponentStatus::Unhealthy,
                message: format!("PostgreSQL connection failed: {}", e),
                latency_ms,
            },
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service and database reachable"),
        (status = 503, description = "Database unreachable")
    )
)]
pub async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    match state.check_postgres().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "feed-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "feed-service"
        })),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Ready to serve", body = ReadinessResponse),
        (status = 503, description = "A dependency is down", body = ReadinessResponse)
    )
)]
pub async fn readiness_summary(state: web::Data<HealthState>) -> HttpResponse {
    let postgres = state.postgres_component().await;
    let ready = postgres.status == ComponentStatus::Healthy;

    let mut checks = HashMap::new();
    checks.insert("postgresql".to_string(), postgres);

    let response = ReadinessResponse {
        ready,
        status: if ready {
            ComponentStatus::Healthy
        } else {
            ComponentStatus::Unhealthy
        },
        checks,
        timestamp: Utc::now().to_rfc3339(),
    };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/health/live",
    tag = "health",
    responses((status = 200, description = "Process is up"))
)]
pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

/// Database probe with round-trip latency
#[utoipa::path(
    get,
    path = "/api/v1/db-health",
    tag = "health",
    responses(
        (status = 200, description = "Database reachable", body = ComponentCheck),
        (status = 503, description = "Database unreachable", body = ComponentCheck)
    )
)]
pub async fn db_health(state: web::Data<HealthState>) -> HttpResponse {
    let check = state.postgres_component().await;
    if check.status == ComponentStatus::Healthy {
        HttpResponse::Ok().json(check)
    } else {
        HttpResponse::ServiceUnavailable().json(check)
    }
}
