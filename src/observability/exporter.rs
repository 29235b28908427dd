//! Span exporter that appends OTLP/JSON lines to a rotating file.

use super::otlp;
use super::rotation::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Instrumentation scope written into every batch.
pub const SCOPE: &str = "quicklaunch";

/// Writes each exported batch as one line of OTLP/JSON.
pub struct OtlpFileExporter {
    file: RotatingFile,
    resource: Resource,
    shut_down: AtomicBool,
}

impl OtlpFileExporter {
    /// Creates an exporter writing to `file`.
    ///
    /// # Parameters
    ///
    /// * `file` - Rotating destination; opened lazily on the first export
    /// * `resource` - Resource attributes stamped on every batch until the
    ///   SDK replaces them through `set_resource`
    #[must_use]
    pub fn new(file: RotatingFile, resource: Resource) -> Self {
        Self {
            file,
            resource,
            shut_down: AtomicBool::new(false),
        }
    }
}

impl SpanExporter for OtlpFileExporter {
    /// Encodes `batch` as one OTLP/JSON document and appends it as a line.
    ///
    /// # Returns
    ///
    /// - `Ok(())` once the line is on disk
    /// - `Err(TraceError)` after shutdown, or when the write fails
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.shut_down.load(Ordering::SeqCst) {
            Err(TraceError::from("exporter is shut down"))
        } else {
            let line = otlp::encode_batch(&self.resource, SCOPE, &batch).to_string();
            self.file
                .append_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.shut_down.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

impl std::fmt::Debug for OtlpFileExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtlpFileExporter")
            .field("file", &self.file)
            .field("shut_down", &self.shut_down)
            .finish_non_exhaustive()
    }
}

/// Builds a provider that exports every finished span synchronously to `path`.
///
/// Spans go through a simple (non-batching) processor, so each one is on disk
/// when it closes. The file rotates with [`RotatingFile`]'s default limits.
///
/// # Parameters
///
/// * `path` - Trace file, usually `<data_dir>/quicklaunch-otlp.json`
/// * `resource` - Service name and version attributes
///
/// # Example
///
/// ```rust,no_run
/// use opentelemetry::KeyValue;
/// use opentelemetry_sdk::resource::Resource;
/// use quicklaunch::observability::exporter::file_tracer_provider;
///
/// let resource = Resource::new([KeyValue::new("service.name", "quicklaunch")]);
/// let provider = file_tracer_provider("/tmp/quicklaunch-otlp.json".into(), resource);
/// # drop(provider);
/// ```
#[must_use]
pub fn file_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = OtlpFileExporter::new(RotatingFile::new(path), resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
