use lazy_static::lazy_static;
use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};
use std::time::Duration;

lazy_static! {
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "feed_http_requests_total",
        "HTTP requests served, by method, route pattern and status",
        &["method", "path", "status"]
    )
    .expect("failed to register feed_http_requests_total");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "feed_http_request_duration_seconds",
        "HTTP request latency by method and route pattern",
        &["method", "path"]
    )
    .expect("failed to register feed_http_request_duration_seconds");
}

/// Label for a request's route: the matched pattern, or "unmatched" for
/// requests no route claimed.
pub fn route_label(pattern: Option<String>) -> String {
    pattern.unwrap_or_else(|| "unmatched".to_string())
}

/// `path` is a [`route_label`], so ids never become label values.
pub fn observe_http_request(method: &str, path: &str, status: u16, elapsed: Duration) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(elapsed.as_secs_f64());
}
