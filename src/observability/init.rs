//! Tracing initialization and subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber with file-based OTLP export.
///
/// Spans pass the level filter from `config.trace_level` (default `info`),
/// flow through the OpenTelemetry layer, and land as JSON lines in
/// `zlauncher-otlp.json` inside the data directory.
///
/// Idempotent: only the first call installs a subscriber, later calls are
/// no-ops. If the data directory cannot be created the plugin simply runs
/// without tracing.
///
/// # Example
///
/// ```rust
/// use zlauncher::observability::init_tracing;
/// use zlauncher::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        // tracing is optional, run without it
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        "zlauncher",
    )]);

    let trace_file = data_dir.join("zlauncher-otlp.json");
    let provider = tracer::create_tracer_provider(trace_file, resource);

    let tracer = provider.tracer("zlauncher");
    let otel_layer = OpenTelemetryLayer::new(tracer);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer);

    let _ = subscriber.try_init();
}
