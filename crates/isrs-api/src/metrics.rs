//! Prometheus metrics for request traffic, reviews and text generation.

use std::{sync::LazyLock, time::Instant};

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use regex::Regex;

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}")
        .expect("Invalid UUID regex")
});

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d+(/|$)").expect("Invalid number regex"));

/// Outcome label for `card_reviews_total`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    Success,
    Conflict,
    UpstreamError,
}

impl ReviewOutcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Conflict => "conflict",
            Self::UpstreamError => "upstream_error",
        }
    }
}

/// Initialize Prometheus metrics exporter
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let builder = PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Full("http_request_duration_seconds".to_string()),
        &[
            0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
        ],
    )?;

    let handle = builder.install_recorder()?;

    Ok(handle)
}

/// Middleware to record HTTP request metrics
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = normalize_path(req.uri().path());

    let response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(duration);

    response
}

/// Replace UUIDs and numeric segments with `:id` to keep label cardinality low
fn normalize_path(path: &str) -> String {
    let normalized = UUID_RE.replace_all(path, ":id");
    // Run twice since adjacent numeric segments share a slash
    let normalized = NUMBER_RE.replace_all(&normalized, "/:id$1");
    NUMBER_RE.replace_all(&normalized, "/:id$1").into_owned()
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (StatusCode::OK, handle.render())
}

pub fn record_review_event(outcome: ReviewOutcome) {
    counter!("card_reviews_total", "outcome" => outcome.as_str()).increment(1);
}

/// `kind` is the generation use: `sentence`, `translation` or `practice`
pub fn record_generation_event(kind: &'static str, success: bool) {
    let status = if success { "success" } else { "failure" };

    counter!(
        "text_generation_total",
        "kind" => kind,
        "status" => status
    )
    .increment(1);
}
