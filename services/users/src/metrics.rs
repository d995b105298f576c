//! Prometheus request metrics: a tracking middleware and the scrape handler.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use axum::extract::{MatchedPath, Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const REQUESTS_TOTAL: &str = "http_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";
pub const SLOW_REQUESTS_TOTAL: &str = "http_slow_requests_total";

const UNMATCHED_PATH: &str = "unmatched";

/// How often histogram buckets are drained into the rendered snapshot.
pub const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

// The recorder is process-global; every `Metrics` shares the first handle.
static HANDLE: Mutex<Option<PrometheusHandle>> = Mutex::new(None);

#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Route serving the scrape payload.
    pub path: String,
    /// Requests slower than this also count towards `http_slow_requests_total`.
    pub slow_time: Duration,
    /// Histogram buckets for `http_request_duration_seconds`, in seconds.
    pub duration_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            path: "/metrics".to_owned(),
            slow_time: Duration::from_secs(10),
            duration_buckets: vec![0.1, 0.3, 1.2, 5.0, 10.0],
        }
    }
}

#[derive(Clone)]
pub struct Metrics {
    handle: PrometheusHandle,
    path: String,
    slow_time: Duration,
}

impl Metrics {
    /// Install the Prometheus recorder, or reuse it if this process already
    /// installed one. Buckets from the first installation win.
    pub fn install(config: &MetricsConfig) -> Result<Self, BuildError> {
        let mut slot = HANDLE.lock().unwrap_or_else(PoisonError::into_inner);
        let handle = match slot.as_ref() {
            Some(handle) => handle.clone(),
            None => {
                let handle = PrometheusBuilder::new()
                    .set_buckets_for_metric(
                        Matcher::Full(REQUEST_DURATION_SECONDS.to_owned()),
                        &config.duration_buckets,
                    )?
                    .install_recorder()?;
                describe_counter!(REQUESTS_TOTAL, "Total HTTP requests");
                describe_histogram!(REQUEST_DURATION_SECONDS, "HTTP request duration");
                describe_counter!(SLOW_REQUESTS_TOTAL, "HTTP requests slower than the slow threshold");
                *slot = Some(handle.clone());
                handle
            }
        };
        Ok(Self {
            handle,
            path: config.path.clone(),
            slow_time: config.slow_time,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn render(&self) -> String {
        self.handle.render()
    }

    /// Run recorder upkeep every [`UPKEEP_INTERVAL`] until the task is aborted.
    /// `install_recorder` leaves this to the caller; without it histogram
    /// samples pile up between scrapes.
    pub fn spawn_upkeep(&self) -> JoinHandle<()> {
        let handle = self.handle.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(UPKEEP_INTERVAL);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                handle.run_upkeep();
            }
        })
    }
}

/// Records count, latency and slow requests per method, route and status.
pub async fn track_metrics(State(metrics): State<Metrics>, request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| UNMATCHED_PATH.to_owned(), |p| p.as_str().to_owned());
    let start = Instant::now();

    let response = next.run(request).await;

    let elapsed = start.elapsed();
    let status = response.status().as_u16().to_string();
    counter!(
        REQUESTS_TOTAL,
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);
    histogram!(
        REQUEST_DURATION_SECONDS,
        "method" => method.clone(),
        "path" => path.clone()
    )
    .record(elapsed.as_secs_f64());
    if elapsed > metrics.slow_time {
        tracing::warn!(%method, %path, elapsed_secs = elapsed.as_secs_f64(), "slow request");
        counter!(
            SLOW_REQUESTS_TOTAL,
            "method" => method,
            "path" => path,
            "status" => status
        )
        .increment(1);
    }
    response
}

/// Handler for `GET /metrics`.
pub async fn render(State(metrics): State<Metrics>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics.render(),
    )
}
