//! Prometheus metrics for feed-service.
//!
//! Exposes ranking collectors, HTTP and pool metrics, and the `/metrics` handler.

use actix_web::HttpResponse;
use prometheus::{Encoder, TextEncoder};

pub mod db;
pub mod feed;
pub mod http;

pub use http::{observe_http_request, route_label};

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
