//! Global subscriber setup.

use super::exporter::{self, SCOPE};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the trace output inside the data directory.
pub const TRACE_FILE: &str = "quicklaunch-otlp.json";

/// Installs the global `tracing` subscriber.
///
/// Spans are filtered by `RUST_LOG` if set, else by `config.trace_level`, and
/// exported as OTLP/JSON to [`TRACE_FILE`] in the configured data directory.
/// Safe to call more than once; later calls are no-ops. Tracing is optional,
/// so an unusable data directory just leaves it off.
pub fn init_tracing(config: &Config) {
    let data_dir = config.data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.trace_level));

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SCOPE),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = exporter::file_tracer_provider(data_dir.join(TRACE_FILE), resource);
    let tracer = provider.tracer(SCOPE);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(tracer))
        .try_init();
}
