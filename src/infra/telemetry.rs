use std::sync::Once;

use metrics::{Unit, describe_counter, describe_histogram};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

pub const CACHE_HIT_TOTAL: &str = "blogdesk_cache_hit_total";
pub const CACHE_MISS_TOTAL: &str = "blogdesk_cache_miss_total";
pub const CACHE_INVALIDATE_TOTAL: &str = "blogdesk_cache_invalidate_total";
pub const HTTP_REQUEST_TOTAL: &str = "blogdesk_http_request_total";
pub const HTTP_REQUEST_MS: &str = "blogdesk_http_request_ms";

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber writing to stderr.
///
/// Stdout is reserved for command output.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            CACHE_HIT_TOTAL,
            Unit::Count,
            "Total number of query cache hits, labelled by key family."
        );
        describe_counter!(
            CACHE_MISS_TOTAL,
            Unit::Count,
            "Total number of query cache misses, labelled by key family."
        );
        describe_counter!(
            CACHE_INVALIDATE_TOTAL,
            Unit::Count,
            "Total number of per-resource cache invalidations."
        );
        describe_counter!(
            HTTP_REQUEST_TOTAL,
            Unit::Count,
            "Total number of admin API requests, labelled by method and outcome."
        );
        describe_histogram!(
            HTTP_REQUEST_MS,
            Unit::Milliseconds,
            "Admin API round-trip latency in milliseconds."
        );
    });
}
