use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_histogram_vec, register_int_counter_vec, Histogram,
    HistogramVec, IntCounterVec,
};

lazy_static! {
    /// Duration of personalized feed requests by outcome (ranked, unknown_user, error).
    pub static ref FEED_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "feed_request_duration_seconds",
        "Personalized feed request duration segmented by outcome",
        &["outcome"]
    )
    .expect("failed to register feed_request_duration_seconds");

    /// Total personalized feed requests by outcome.
    pub static ref FEED_REQUEST_TOTAL: IntCounterVec = register_int_counter_vec!(
        "feed_request_total",
        "Total personalized feed requests segmented by outcome",
        &["outcome"]
    )
    .expect("failed to register feed_request_total");

    /// Number of candidate posts scored per request.
    pub static ref FEED_CANDIDATE_COUNT: Histogram = register_histogram!(
        "feed_candidate_count",
        "Number of candidate posts scored per feed request",
        vec![0.0, 10.0, 50.0, 100.0, 500.0, 1_000.0, 5_000.0, 10_000.0, 50_000.0]
    )
    .expect("failed to register feed_candidate_count");

    /// Size of the derived interest tag set per request.
    pub static ref FEED_INTEREST_TAG_COUNT: Histogram = register_histogram!(
        "feed_interest_tag_count",
        "Number of interest tags derived for the requesting user",
        vec![0.0, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0]
    )
    .expect("failed to register feed_interest_tag_count");
}

/// Record the end of one feed request.
pub fn observe_feed_request(outcome: &str, elapsed_secs: f64) {
    FEED_REQUEST_TOTAL.with_label_values(&[outcome]).inc();
    FEED_REQUEST_DURATION_SECONDS
        .with_label_values(&[outcome])
        .observe(elapsed_secs);
}
